//! Pending room invitations.

use indexmap::IndexSet;
use tracing::debug;

/// Records which rooms already have an invite prompt outstanding.
///
/// Servers retransmit and several admins may invite at once; only the first
/// invite for a room that is not already joined reaches the user.
#[derive(Debug, Default)]
pub struct InviteDeduplicator {
    pending: IndexSet<String>,
}

impl InviteDeduplicator {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decide whether an invite for `room` should prompt the user.
    ///
    /// Returns `false` for an active room or one already invited to.
    /// Otherwise records the invite and returns `true`.
    pub fn should_prompt(&mut self, room: &str, room_is_active: bool) -> bool {
        if room_is_active {
            debug!(room, "invite for active room suppressed");
            return false;
        }
        let recorded = self.pending.insert(room.to_owned());
        if !recorded {
            debug!(room, "duplicate invite suppressed");
        }
        recorded
    }

    /// Forget the invite for `room` (joined, declined or left).
    pub fn remove(&mut self, room: &str) -> bool {
        self.pending.shift_remove(room)
    }

    /// Whether an invite for `room` is outstanding.
    pub fn contains(&self, room: &str) -> bool {
        self.pending.contains(room)
    }

    /// Outstanding invites in arrival order.
    pub fn pending(&self) -> impl Iterator<Item = &str> {
        self.pending.iter().map(String::as_str)
    }

    /// Number of outstanding invites.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Whether no invite is outstanding.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Drop every outstanding invite.
    pub fn clear(&mut self) {
        self.pending.clear();
    }
}
