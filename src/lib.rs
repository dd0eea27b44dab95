//! Courier: incoming-event dispatch for an XMPP chat client.
//!
//! The transport layer decodes stanzas into calls on
//! [`dispatch::EventDispatcher`]. The dispatcher updates session state
//! (contact directory, pending room invites) and the roster/room stores, then
//! tells the UI and the chat log what happened. It never talks to the network
//! and never renders anything.
//!
//! See `DESIGN.md` for the architecture notes.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod collaborators;
pub mod config;
pub mod contacts;
pub mod dispatch;
pub mod jid;
pub mod logging;
pub mod muc;
pub mod presence;
pub mod roster;
pub mod types;
