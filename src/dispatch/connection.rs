use tracing::{debug, info, warn};

use super::{DispatchError, EventDispatcher, Session, CONFLICT};
use crate::jid::Jid;
use crate::types::ContactPresence;

impl EventDispatcher {
    /// A stanza error arrived from `from`.
    ///
    /// Always shown. A `conflict` (nickname taken) for a room whose roster is
    /// not yet complete means our join failed, so the room is left. Once the
    /// roster is complete the conflict is stale and we stay.
    pub fn handle_error_message(&mut self, session: &mut Session, from: &str, message: &str) {
        self.ui.show_error(from, message);

        if message != CONFLICT {
            return;
        }

        let room = match Jid::parse(from) {
            Ok(jid) => jid.bare(),
            Err(e) => {
                warn!(from, error = %e, "conflict from unparseable jid");
                return;
            }
        };

        if self.rooms.roster_received(&room) {
            debug!(%room, "conflict after roster complete, staying in room");
            return;
        }

        info!(%room, "nickname conflict while joining, leaving room");
        self.rooms.leave(&room);
        session.invites_mut().remove(&room);
    }

    /// Login completed for `account_name`.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::UnknownAccount`] if the account is not
    /// configured and [`DispatchError::InvalidJid`] if its JID does not
    /// parse. Nothing is shown in either case.
    pub fn handle_login_success(
        &mut self,
        session: &mut Session,
        account_name: &str,
    ) -> Result<(), DispatchError> {
        let account = self
            .accounts
            .get_account(account_name)
            .ok_or_else(|| DispatchError::UnknownAccount(account_name.to_owned()))?;
        let jid = Jid::parse(&account.jid)?;

        self.crypto.on_connect(&account);

        let login_presence = account.login_presence.unwrap_or(self.prefs.login_presence);
        let presence = ContactPresence::from(login_presence);
        self.ui.login_success(&account, presence);
        info!(jid = %jid, %presence, "logged in successfully");

        session.set_own_jid(jid);
        Ok(())
    }

    /// The connection dropped. Clears everything the login established.
    pub fn handle_lost_connection(&mut self, session: &mut Session) {
        self.ui.console_error("Lost connection.");
        self.roster.clear();
        session.reset();
        self.chat_sessions.clear();
        self.ui.disconnected();
        warn!("lost connection");
    }

    /// Authentication failed. Nothing was established, so nothing is cleared.
    pub fn handle_failed_login(&mut self) {
        self.ui.console_error("Login failed.");
        info!("login failed");
    }
}
