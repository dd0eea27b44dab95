use tracing::{debug, warn};

use super::{EventDispatcher, Session};
use crate::jid::Jid;
use crate::types::{InviteKind, Timestamp};

impl EventDispatcher {
    /// Invitation to `room` from `invitor`.
    ///
    /// Prompts only when the room is neither joined nor already invited to.
    pub fn handle_room_invite(
        &mut self,
        session: &mut Session,
        kind: InviteKind,
        invitor: &str,
        room: &str,
        reason: Option<&str>,
    ) {
        let room_jid = match Jid::parse(room) {
            Ok(jid) => jid.bare(),
            Err(e) => {
                warn!(room, error = %e, "invite for unparseable room ignored");
                return;
            }
        };

        let active = self.rooms.is_active(&room_jid);
        if session.invites_mut().should_prompt(&room_jid, active) {
            self.ui.room_invite(kind, invitor, room, reason);
        }
    }

    /// Server broadcast to a room.
    pub fn handle_room_broadcast(&mut self, room: &str, message: &str) {
        self.ui.room_broadcast(room, message);
    }

    /// Room subject.
    pub fn handle_room_subject(&mut self, room: &str, subject: &str) {
        self.ui.room_subject(room, subject);
    }

    /// Room history replayed on join.
    pub fn handle_room_history(
        &mut self,
        room: &str,
        nick: &str,
        timestamp: Timestamp,
        message: &str,
    ) {
        self.ui.room_history(room, nick, timestamp, message);
    }

    /// Live room message; logged when group chat logging is on.
    pub fn handle_room_message(&mut self, session: &Session, room: &str, nick: &str, message: &str) {
        self.ui.room_message(room, nick, message);

        if !self.prefs.group_chat_logging {
            return;
        }
        match session.own_jid() {
            Some(owner) => self
                .chat_log
                .append_groupchat_line(&owner.bare(), room, nick, message),
            None => warn!(room, "room message before login, not logged"),
        }
    }

    /// We left `room` (or were removed).
    pub fn handle_leave_room(&mut self, session: &mut Session, room: &str) {
        self.rooms.leave(room);
        session.invites_mut().remove(room);
    }

    /// Our own nickname in `room` changed.
    pub fn handle_room_nick_change(&mut self, room: &str, nick: &str) {
        self.ui.room_nick_change(room, nick);
    }

    /// Member list for `room` is complete; the join has finished.
    pub fn handle_room_roster_complete(&mut self, session: &mut Session, room: &str) {
        self.rooms.set_roster_received(room);
        session.invites_mut().remove(room);
        let roster = self.rooms.roster(room);
        debug!(room, members = roster.len(), "room roster complete");
        self.ui.room_roster(room, &roster, None);
    }

    /// Presence update from an existing member. Shown only if it changed
    /// something.
    pub fn handle_room_member_presence(
        &mut self,
        room: &str,
        nick: &str,
        show: Option<&str>,
        status: Option<&str>,
        caps: Option<&str>,
    ) {
        if self.rooms.add_to_roster(room, nick, show, status, caps) {
            self.ui.room_member_presence(room, nick, show, status);
        }
    }

    /// A member joined.
    pub fn handle_room_member_online(
        &mut self,
        room: &str,
        nick: &str,
        show: Option<&str>,
        status: Option<&str>,
        caps: Option<&str>,
    ) {
        self.rooms.add_to_roster(room, nick, show, status, caps);
        self.ui.room_member_online(room, nick, show, status);
    }

    /// A member left.
    pub fn handle_room_member_offline(&mut self, room: &str, nick: &str) {
        self.rooms.remove_from_roster(room, nick);
        self.ui.room_member_offline(room, nick);
    }

    /// A member changed nickname.
    pub fn handle_room_member_nick_change(&mut self, room: &str, old_nick: &str, nick: &str) {
        self.rooms.change_member_nick(room, old_nick, nick);
        self.ui.room_member_nick_change(room, old_nick, nick);
    }
}
