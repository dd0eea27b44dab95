//! Interfaces to the collaborators the dispatcher drives.
//!
//! The dispatcher owns each collaborator as a boxed trait object chosen when
//! the session starts. Every trait is `Send` so a dispatcher can be moved
//! into the event loop task.
//!
//! UI and log calls are one-way and infallible from the dispatcher's point
//! of view: implementations deal with their own failures.

use crate::types::{
    Account, ContactPresence, ContactRecord, Direction, DiscoIdentity, DiscoItem, InviteKind,
    Occupant, Resource, SoftwareVersion, Timestamp,
};

/// Presentation layer.
pub trait UiNotifier: Send {
    /// Show a protocol error received from `from`.
    fn show_error(&mut self, from: &str, message: &str);

    /// Print an error line in the console window.
    fn console_error(&mut self, message: &str);

    /// Print an informational line in the console window.
    fn console_message(&mut self, message: &str);

    /// Login completed; `presence` is what the title bar should show.
    fn login_success(&mut self, account: &Account, presence: ContactPresence);

    /// The session ended.
    fn disconnected(&mut self);

    /// Software version query result.
    fn software_version(&mut self, version: &SoftwareVersion);

    /// Service discovery info result.
    fn disco_info(&mut self, from: &str, identities: &[DiscoIdentity], features: &[String]);

    /// Service discovery items result.
    fn disco_items(&mut self, jid: &str, items: &[DiscoItem]);

    /// Rooms available on a conference service.
    fn room_list(&mut self, conference_node: &str, rooms: &[DiscoItem]);

    /// Answer from the DuckDuckGo search bot.
    fn duck_result(&mut self, result: &str);

    /// Ask the user about an invitation.
    fn room_invite(&mut self, kind: InviteKind, invitor: &str, room: &str, reason: Option<&str>);

    /// Server broadcast to a room.
    fn room_broadcast(&mut self, room: &str, message: &str);

    /// Room subject changed.
    fn room_subject(&mut self, room: &str, subject: &str);

    /// Historic room message replayed on join.
    fn room_history(&mut self, room: &str, nick: &str, timestamp: Timestamp, message: &str);

    /// Live room message.
    fn room_message(&mut self, room: &str, nick: &str, message: &str);

    /// One-to-one message; `timestamp` is set for delayed delivery.
    fn incoming_message(
        &mut self,
        from: &str,
        message: &str,
        timestamp: Option<Timestamp>,
        private: bool,
    );

    /// Peer started typing.
    fn contact_typing(&mut self, from: &str);

    /// Peer closed the conversation.
    fn recipient_gone(&mut self, from: &str);

    /// System line inside the conversation window for `from`.
    fn system_message_from(&mut self, from: &str, message: &str);

    /// A contact resource came online or changed presence.
    fn contact_online(
        &mut self,
        contact: &str,
        resource: &str,
        show: &str,
        status: Option<&str>,
        last_activity: Option<Timestamp>,
    );

    /// A contact resource went offline.
    fn contact_offline(&mut self, full_jid: &str, show: &str, status: Option<&str>);

    /// Our own nickname in a room changed.
    fn room_nick_change(&mut self, room: &str, nick: &str);

    /// Full member list once the room roster is received.
    fn room_roster(&mut self, room: &str, occupants: &[Occupant], presence: Option<&str>);

    /// Existing room member changed presence.
    fn room_member_presence(
        &mut self,
        room: &str,
        nick: &str,
        show: Option<&str>,
        status: Option<&str>,
    );

    /// Member joined a room.
    fn room_member_online(&mut self, room: &str, nick: &str, show: Option<&str>, status: Option<&str>);

    /// Member left a room.
    fn room_member_offline(&mut self, room: &str, nick: &str);

    /// Member changed nickname.
    fn room_member_nick_change(&mut self, room: &str, old_nick: &str, nick: &str);

    /// Contact added to a roster group.
    fn group_added(&mut self, contact: &str, group: &str);

    /// Contact removed from a roster group.
    fn group_removed(&mut self, contact: &str, group: &str);

    /// Contact added to the roster.
    fn roster_add(&mut self, barejid: &str, name: Option<&str>);

    /// Contact removed from the roster.
    fn roster_remove(&mut self, barejid: &str);
}

/// Chat log writer. The storage format belongs to the implementation.
pub trait ChatLogger: Send {
    /// Append a one-to-one chat line to `owner`'s log with `peer`.
    fn append_chat_line(
        &mut self,
        owner: &str,
        peer: &str,
        text: &str,
        direction: Direction,
        timestamp: Option<Timestamp>,
    );

    /// Append a room line to `owner`'s log for `room`.
    fn append_groupchat_line(&mut self, owner: &str, room: &str, nick: &str, text: &str);
}

/// Personal roster storage.
pub trait RosterStore: Send {
    /// Record presence for a contact resource. Returns whether anything changed.
    fn update_presence(
        &mut self,
        contact: &str,
        resource: &Resource,
        last_activity: Option<Timestamp>,
    ) -> bool;

    /// Mark a resource (or, with `None`, the contact) offline. Returns whether
    /// anything changed.
    fn set_offline(&mut self, contact: &str, resource: Option<&str>, status: Option<&str>) -> bool;

    /// Current record for a bare JID.
    fn get_contact(&self, barejid: &str) -> Option<ContactRecord>;

    /// Drop every entry.
    fn clear(&mut self);
}

/// Multi-user chat room storage.
pub trait RoomStore: Send {
    /// Whether we are in `room`.
    fn is_active(&self, room: &str) -> bool;

    /// Whether the member list for `room` has been fully received.
    fn roster_received(&self, room: &str) -> bool;

    /// Mark the member list for `room` as fully received.
    fn set_roster_received(&mut self, room: &str);

    /// Current members of `room`.
    fn roster(&self, room: &str) -> Vec<Occupant>;

    /// Add or update a member. Returns `true` only when an existing member's
    /// show or status changed.
    fn add_to_roster(
        &mut self,
        room: &str,
        nick: &str,
        show: Option<&str>,
        status: Option<&str>,
        caps: Option<&str>,
    ) -> bool;

    /// Remove a member.
    fn remove_from_roster(&mut self, room: &str, nick: &str);

    /// Rename a member, keeping its presence.
    fn change_member_nick(&mut self, room: &str, old_nick: &str, nick: &str);

    /// Forget `room` entirely.
    fn leave(&mut self, room: &str);
}

/// Result of running an incoming body through [`MessageCrypto::decrypt`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decrypted {
    /// Text to show; `None` for an internal protocol message.
    pub plaintext: Option<String>,
    /// Whether the body was actually encrypted.
    pub was_decrypted: bool,
}

/// End-to-end encryption layer for one-to-one messages.
pub trait MessageCrypto: Send {
    /// Called once an account has logged in.
    fn on_connect(&mut self, _account: &Account) {}

    /// Decrypt a message body from `peer`.
    fn decrypt(&mut self, peer: &str, ciphertext: &str) -> Decrypted;
}

/// Crypto layer for builds without end-to-end encryption.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullCrypto;

impl MessageCrypto for NullCrypto {
    fn decrypt(&mut self, _peer: &str, ciphertext: &str) -> Decrypted {
        Decrypted {
            plaintext: Some(ciphertext.to_owned()),
            was_decrypted: false,
        }
    }
}

/// Account configuration lookup.
pub trait AccountStore: Send {
    /// Load an account by name.
    fn get_account(&self, name: &str) -> Option<Account>;
}

/// Per-recipient chat state (typing notifications and the like).
pub trait ChatSessions: Send {
    /// Forget every chat session.
    fn clear(&mut self);
}

/// Desktop notification system.
pub trait DesktopNotifier: Send {
    /// Notify about a subscription request from `from`.
    fn notify_subscription(&mut self, from: &str);
}

/// Everything an [`EventDispatcher`](crate::dispatch::EventDispatcher) talks to.
pub struct Collaborators {
    /// Presentation layer.
    pub ui: Box<dyn UiNotifier>,
    /// Chat log writer.
    pub chat_log: Box<dyn ChatLogger>,
    /// Personal roster.
    pub roster: Box<dyn RosterStore>,
    /// Multi-user chat rooms.
    pub rooms: Box<dyn RoomStore>,
    /// Message decryption.
    pub crypto: Box<dyn MessageCrypto>,
    /// Account lookup.
    pub accounts: Box<dyn AccountStore>,
    /// Chat session state.
    pub chat_sessions: Box<dyn ChatSessions>,
    /// Desktop notifications.
    pub desktop: Box<dyn DesktopNotifier>,
}
