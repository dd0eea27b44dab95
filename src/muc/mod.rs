//! Multi-user chat: invite deduplication and an in-memory room store.

pub mod invites;
pub mod rooms;

pub use invites::InviteDeduplicator;
pub use rooms::{MemoryRooms, RoomPhase};
