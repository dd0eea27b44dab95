//! Incoming event dispatch.
//!
//! The transport decodes a stanza and calls exactly one `handle_*` entry on
//! [`EventDispatcher`] (or hands an [`Event`] to [`EventDispatcher::dispatch`]).
//! Each entry validates its input, mutates the [`Session`] and collaborator
//! state, decides whether to notify, then calls the UI and chat log.
//!
//! Handlers are synchronous and never retry. Events are applied strictly in
//! the order they are handed in.

mod connection;
mod contacts;
mod event_loop;
mod events;
mod messages;
mod queries;
mod rooms;
mod session;

pub use event_loop::spawn_event_loop;
pub use events::Event;
pub use session::Session;

use crate::collaborators::{
    AccountStore, ChatLogger, ChatSessions, Collaborators, DesktopNotifier, MessageCrypto,
    RoomStore, RosterStore, UiNotifier,
};
use crate::config::Preferences;
use crate::jid::JidError;
use crate::presence::PresenceMerger;

/// Error message that makes us leave a room we are still joining.
pub const CONFLICT: &str = "conflict";

/// Errors from dispatcher entry points.
///
/// Only the login path can fail; everything else degrades to a log line.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    /// Login succeeded for an account we have no configuration for.
    #[error("unknown account: {0}")]
    UnknownAccount(String),

    /// A JID in the event could not be parsed.
    #[error("invalid jid: {0}")]
    InvalidJid(#[from] JidError),
}

/// Turns incoming events into state changes and UI/log calls.
pub struct EventDispatcher {
    prefs: Preferences,
    merger: PresenceMerger,
    ui: Box<dyn UiNotifier>,
    chat_log: Box<dyn ChatLogger>,
    roster: Box<dyn RosterStore>,
    rooms: Box<dyn RoomStore>,
    crypto: Box<dyn MessageCrypto>,
    accounts: Box<dyn AccountStore>,
    chat_sessions: Box<dyn ChatSessions>,
    desktop: Box<dyn DesktopNotifier>,
}

impl EventDispatcher {
    /// Build a dispatcher for one session.
    pub fn new(prefs: Preferences, collaborators: Collaborators) -> Self {
        let Collaborators {
            ui,
            chat_log,
            roster,
            rooms,
            crypto,
            accounts,
            chat_sessions,
            desktop,
        } = collaborators;

        Self {
            merger: PresenceMerger::new(prefs.presence_notifications),
            prefs,
            ui,
            chat_log,
            roster,
            rooms,
            crypto,
            accounts,
            chat_sessions,
            desktop,
        }
    }

    /// Preferences this dispatcher was built with.
    pub fn preferences(&self) -> &Preferences {
        &self.prefs
    }
}
