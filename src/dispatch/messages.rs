use tracing::{debug, warn};

use super::{EventDispatcher, Session};
use crate::jid::Jid;
use crate::types::{Direction, Timestamp};

impl EventDispatcher {
    /// A one-to-one message arrived.
    ///
    /// `private` marks a private message from a room occupant: it is neither
    /// decrypted nor logged. Other messages go through the crypto layer; an
    /// internal protocol message (no plaintext) is dropped without a trace in
    /// the UI or the log.
    pub fn handle_incoming_message(
        &mut self,
        session: &Session,
        from: &str,
        message: &str,
        private: bool,
    ) {
        let (text, was_decrypted) = if private {
            (message.to_owned(), false)
        } else {
            let decrypted = self.crypto.decrypt(from, message);
            match decrypted.plaintext {
                Some(plaintext) => (plaintext, decrypted.was_decrypted),
                None => {
                    debug!(from, "internal protocol message dropped");
                    return;
                }
            }
        };

        self.ui.incoming_message(from, &text, None, private);

        if private || !self.prefs.chat_logging {
            return;
        }

        match self.prefs.redaction_policy.loggable_text(&text, was_decrypted) {
            Some(logged) => self.log_incoming(session, from, logged, None),
            None => debug!(from, "decrypted message not logged"),
        }
    }

    /// A message stored by the server while we were away.
    ///
    /// `timestamp` is the original send time and reaches both UI and log
    /// unchanged.
    pub fn handle_delayed_message(
        &mut self,
        session: &Session,
        from: &str,
        message: &str,
        timestamp: Timestamp,
        private: bool,
    ) {
        self.ui.incoming_message(from, message, Some(timestamp), private);

        if !private && self.prefs.chat_logging {
            self.log_incoming(session, from, message, Some(timestamp));
        }
    }

    /// Peer is composing.
    pub fn handle_typing(&mut self, from: &str) {
        self.ui.contact_typing(from);
    }

    /// Peer left the conversation.
    pub fn handle_gone(&mut self, from: &str) {
        self.ui.recipient_gone(from);
    }

    fn log_incoming(
        &mut self,
        session: &Session,
        from: &str,
        text: &str,
        timestamp: Option<Timestamp>,
    ) {
        let Some(owner) = session.own_jid() else {
            warn!(from, "message before login, not logged");
            return;
        };
        let peer = match Jid::parse(from) {
            Ok(jid) => jid.bare(),
            Err(e) => {
                warn!(from, error = %e, "message from unparseable jid, not logged");
                return;
            }
        };
        self.chat_log
            .append_chat_line(&owner.bare(), &peer, text, Direction::Incoming, timestamp);
    }
}
