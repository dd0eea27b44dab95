//! Session contact directory: contact name to last-known status.
//!
//! The directory is owned by the [`Session`](crate::dispatch::Session) and
//! mutated only from dispatcher entry points, one event at a time. Readers
//! that need a stable view take a [`ContactSnapshot`].

mod directory;
mod snapshot;

pub use directory::{AddOutcome, Contact, ContactDirectory};
pub use snapshot::ContactSnapshot;
