use serde::Deserialize;
use tracing::trace;

use super::{DispatchError, EventDispatcher, Session};
use crate::types::{
    DiscoIdentity, DiscoItem, InviteKind, Resource, SoftwareVersion, SubscriptionKind, Timestamp,
};

/// A decoded protocol event, one variant per dispatcher entry point.
///
/// Deserialises from JSON objects tagged with `"type"`, e.g.
/// `{"type": "typing", "from": "bob@example.org/phone"}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// Stanza error.
    Error {
        /// Sender of the error.
        from: String,
        /// Error condition or text.
        message: String,
    },
    /// Login completed.
    LoginSuccess {
        /// Configured account name.
        account: String,
    },
    /// Authentication failed.
    LoginFailed,
    /// Connection dropped.
    LostConnection,
    /// Software version query result.
    SoftwareVersion(SoftwareVersion),
    /// disco#info result.
    DiscoInfo {
        /// Queried entity.
        from: String,
        /// Reported identities.
        #[serde(default)]
        identities: Vec<DiscoIdentity>,
        /// Reported feature namespaces.
        #[serde(default)]
        features: Vec<String>,
    },
    /// disco#items result.
    DiscoItems {
        /// Queried entity.
        jid: String,
        /// Reported items.
        #[serde(default)]
        items: Vec<DiscoItem>,
    },
    /// Room listing.
    RoomList {
        /// Conference service.
        conference_node: String,
        /// Rooms on the service.
        #[serde(default)]
        rooms: Vec<DiscoItem>,
    },
    /// Search bot answer.
    DuckResult {
        /// Answer text.
        result: String,
    },
    /// Room invitation.
    RoomInvite {
        /// Direct or mediated.
        kind: InviteKind,
        /// Who invited us.
        invitor: String,
        /// Room JID.
        room: String,
        /// Optional reason text.
        #[serde(default)]
        reason: Option<String>,
    },
    /// Broadcast to a room.
    RoomBroadcast {
        /// Room JID.
        room: String,
        /// Broadcast text.
        message: String,
    },
    /// Room subject.
    RoomSubject {
        /// Room JID.
        room: String,
        /// Subject text.
        subject: String,
    },
    /// Room history line.
    RoomHistory {
        /// Room JID.
        room: String,
        /// Sender nickname.
        nick: String,
        /// Original send time.
        timestamp: Timestamp,
        /// Message text.
        message: String,
    },
    /// Live room message.
    RoomMessage {
        /// Room JID.
        room: String,
        /// Sender nickname.
        nick: String,
        /// Message text.
        message: String,
    },
    /// One-to-one message.
    IncomingMessage {
        /// Sender JID.
        from: String,
        /// Message body.
        message: String,
        /// Private message from a room occupant.
        #[serde(default)]
        private: bool,
    },
    /// Offline-stored message.
    DelayedMessage {
        /// Sender JID.
        from: String,
        /// Message body.
        message: String,
        /// Original send time.
        timestamp: Timestamp,
        /// Private message from a room occupant.
        #[serde(default)]
        private: bool,
    },
    /// Peer is composing.
    Typing {
        /// Sender JID.
        from: String,
    },
    /// Peer left the conversation.
    Gone {
        /// Sender JID.
        from: String,
    },
    /// Presence subscription stanza.
    Subscription {
        /// Sender JID.
        from: String,
        /// Subscription type.
        kind: SubscriptionKind,
    },
    /// Contact resource went offline.
    ContactOffline {
        /// Bare JID.
        contact: String,
        /// Resource, if named.
        #[serde(default)]
        resource: Option<String>,
        /// Status text.
        #[serde(default)]
        status: Option<String>,
    },
    /// Contact resource online or changed.
    ContactOnline {
        /// Bare JID.
        contact: String,
        /// Resource and its presence.
        resource: Resource,
        /// Last activity.
        #[serde(default)]
        last_activity: Option<Timestamp>,
    },
    /// We left a room.
    LeaveRoom {
        /// Room JID.
        room: String,
    },
    /// Our own nickname changed.
    RoomNickChange {
        /// Room JID.
        room: String,
        /// New nickname.
        nick: String,
    },
    /// Room member list complete.
    RoomRosterComplete {
        /// Room JID.
        room: String,
    },
    /// Existing member presence.
    RoomMemberPresence {
        /// Room JID.
        room: String,
        /// Member nickname.
        nick: String,
        /// Show value.
        #[serde(default)]
        show: Option<String>,
        /// Status text.
        #[serde(default)]
        status: Option<String>,
        /// Capabilities string.
        #[serde(default)]
        caps: Option<String>,
    },
    /// Member joined.
    RoomMemberOnline {
        /// Room JID.
        room: String,
        /// Member nickname.
        nick: String,
        /// Show value.
        #[serde(default)]
        show: Option<String>,
        /// Status text.
        #[serde(default)]
        status: Option<String>,
        /// Capabilities string.
        #[serde(default)]
        caps: Option<String>,
    },
    /// Member left.
    RoomMemberOffline {
        /// Room JID.
        room: String,
        /// Member nickname.
        nick: String,
    },
    /// Member changed nickname.
    RoomMemberNickChange {
        /// Room JID.
        room: String,
        /// Previous nickname.
        old_nick: String,
        /// New nickname.
        nick: String,
    },
    /// Contact added to a group.
    GroupAdd {
        /// Bare JID.
        contact: String,
        /// Group name.
        group: String,
    },
    /// Contact removed from a group.
    GroupRemove {
        /// Bare JID.
        contact: String,
        /// Group name.
        group: String,
    },
    /// Roster push: contact added.
    RosterAdd {
        /// Bare JID.
        barejid: String,
        /// Roster nickname.
        #[serde(default)]
        name: Option<String>,
    },
    /// Roster push: contact removed.
    RosterRemove {
        /// Bare JID.
        barejid: String,
    },
}

impl Event {
    /// Decode one JSON-encoded event.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error for malformed input or an unknown type.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Short name of the event category, for logs.
    pub fn category(&self) -> &'static str {
        match self {
            Self::Error { .. } => "error",
            Self::LoginSuccess { .. } => "login_success",
            Self::LoginFailed => "login_failed",
            Self::LostConnection => "lost_connection",
            Self::SoftwareVersion(_) => "software_version",
            Self::DiscoInfo { .. } => "disco_info",
            Self::DiscoItems { .. } => "disco_items",
            Self::RoomList { .. } => "room_list",
            Self::DuckResult { .. } => "duck_result",
            Self::RoomInvite { .. } => "room_invite",
            Self::RoomBroadcast { .. } => "room_broadcast",
            Self::RoomSubject { .. } => "room_subject",
            Self::RoomHistory { .. } => "room_history",
            Self::RoomMessage { .. } => "room_message",
            Self::IncomingMessage { .. } => "incoming_message",
            Self::DelayedMessage { .. } => "delayed_message",
            Self::Typing { .. } => "typing",
            Self::Gone { .. } => "gone",
            Self::Subscription { .. } => "subscription",
            Self::ContactOffline { .. } => "contact_offline",
            Self::ContactOnline { .. } => "contact_online",
            Self::LeaveRoom { .. } => "leave_room",
            Self::RoomNickChange { .. } => "room_nick_change",
            Self::RoomRosterComplete { .. } => "room_roster_complete",
            Self::RoomMemberPresence { .. } => "room_member_presence",
            Self::RoomMemberOnline { .. } => "room_member_online",
            Self::RoomMemberOffline { .. } => "room_member_offline",
            Self::RoomMemberNickChange { .. } => "room_member_nick_change",
            Self::GroupAdd { .. } => "group_add",
            Self::GroupRemove { .. } => "group_remove",
            Self::RosterAdd { .. } => "roster_add",
            Self::RosterRemove { .. } => "roster_remove",
        }
    }
}

impl EventDispatcher {
    /// Route an event to its entry point.
    ///
    /// # Errors
    ///
    /// Propagates the error from [`EventDispatcher::handle_login_success`];
    /// every other category is infallible.
    pub fn dispatch(&mut self, session: &mut Session, event: Event) -> Result<(), DispatchError> {
        trace!(event = event.category(), "dispatching");
        match event {
            Event::Error { from, message } => self.handle_error_message(session, &from, &message),
            Event::LoginSuccess { account } => return self.handle_login_success(session, &account),
            Event::LoginFailed => self.handle_failed_login(),
            Event::LostConnection => self.handle_lost_connection(session),
            Event::SoftwareVersion(version) => self.handle_software_version_result(&version),
            Event::DiscoInfo {
                from,
                identities,
                features,
            } => self.handle_disco_info(&from, &identities, &features),
            Event::DiscoItems { jid, items } => self.handle_disco_items(&jid, &items),
            Event::RoomList {
                conference_node,
                rooms,
            } => self.handle_room_list(&conference_node, &rooms),
            Event::DuckResult { result } => self.handle_duck_result(&result),
            Event::RoomInvite {
                kind,
                invitor,
                room,
                reason,
            } => self.handle_room_invite(session, kind, &invitor, &room, reason.as_deref()),
            Event::RoomBroadcast { room, message } => self.handle_room_broadcast(&room, &message),
            Event::RoomSubject { room, subject } => self.handle_room_subject(&room, &subject),
            Event::RoomHistory {
                room,
                nick,
                timestamp,
                message,
            } => self.handle_room_history(&room, &nick, timestamp, &message),
            Event::RoomMessage {
                room,
                nick,
                message,
            } => self.handle_room_message(session, &room, &nick, &message),
            Event::IncomingMessage {
                from,
                message,
                private,
            } => self.handle_incoming_message(session, &from, &message, private),
            Event::DelayedMessage {
                from,
                message,
                timestamp,
                private,
            } => self.handle_delayed_message(session, &from, &message, timestamp, private),
            Event::Typing { from } => self.handle_typing(&from),
            Event::Gone { from } => self.handle_gone(&from),
            Event::Subscription { from, kind } => self.handle_subscription(&from, kind),
            Event::ContactOffline {
                contact,
                resource,
                status,
            } => self.handle_contact_offline(
                session,
                &contact,
                resource.as_deref(),
                status.as_deref(),
            ),
            Event::ContactOnline {
                contact,
                resource,
                last_activity,
            } => self.handle_contact_online(session, &contact, &resource, last_activity),
            Event::LeaveRoom { room } => self.handle_leave_room(session, &room),
            Event::RoomNickChange { room, nick } => self.handle_room_nick_change(&room, &nick),
            Event::RoomRosterComplete { room } => self.handle_room_roster_complete(session, &room),
            Event::RoomMemberPresence {
                room,
                nick,
                show,
                status,
                caps,
            } => self.handle_room_member_presence(
                &room,
                &nick,
                show.as_deref(),
                status.as_deref(),
                caps.as_deref(),
            ),
            Event::RoomMemberOnline {
                room,
                nick,
                show,
                status,
                caps,
            } => self.handle_room_member_online(
                &room,
                &nick,
                show.as_deref(),
                status.as_deref(),
                caps.as_deref(),
            ),
            Event::RoomMemberOffline { room, nick } => self.handle_room_member_offline(&room, &nick),
            Event::RoomMemberNickChange {
                room,
                old_nick,
                nick,
            } => self.handle_room_member_nick_change(&room, &old_nick, &nick),
            Event::GroupAdd { contact, group } => self.handle_group_add(&contact, &group),
            Event::GroupRemove { contact, group } => self.handle_group_remove(&contact, &group),
            Event::RosterAdd { barejid, name } => {
                self.handle_roster_add(session, &barejid, name.as_deref());
            }
            Event::RosterRemove { barejid } => self.handle_roster_remove(session, &barejid),
        }
        Ok(())
    }
}
