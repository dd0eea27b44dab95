//! In-memory room store.

use std::collections::HashMap;

use indexmap::IndexMap;
use tracing::{debug, trace};

use crate::collaborators::RoomStore;
use crate::types::Occupant;

/// Where a joined room is in its join sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoomPhase {
    /// Join sent; member presences still arriving.
    Joining,
    /// Our own presence came back, the member list is complete.
    RosterReceived,
}

#[derive(Debug)]
struct Room {
    nick: String,
    phase: RoomPhase,
    occupants: IndexMap<String, Occupant>,
}

/// [`RoomStore`] backed by a map of joined rooms.
///
/// Rooms are entered with [`MemoryRooms::join`] when the client sends the
/// join presence and leave the map on [`RoomStore::leave`].
#[derive(Debug, Default)]
pub struct MemoryRooms {
    rooms: HashMap<String, Room>,
}

impl MemoryRooms {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start joining `room` as `nick`.
    pub fn join(&mut self, room: &str, nick: &str) {
        self.rooms.insert(
            room.to_owned(),
            Room {
                nick: nick.to_owned(),
                phase: RoomPhase::Joining,
                occupants: IndexMap::new(),
            },
        );
        debug!(room, nick, "joining room");
    }

    /// Join phase of `room`, `None` if not joined.
    pub fn phase(&self, room: &str) -> Option<RoomPhase> {
        self.rooms.get(room).map(|r| r.phase)
    }

    /// Our nickname in `room`.
    pub fn nick(&self, room: &str) -> Option<&str> {
        self.rooms.get(room).map(|r| r.nick.as_str())
    }

    /// Number of joined rooms.
    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    /// Whether no room is joined.
    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }
}

impl RoomStore for MemoryRooms {
    fn is_active(&self, room: &str) -> bool {
        self.rooms.contains_key(room)
    }

    fn roster_received(&self, room: &str) -> bool {
        self.phase(room) == Some(RoomPhase::RosterReceived)
    }

    fn set_roster_received(&mut self, room: &str) {
        match self.rooms.get_mut(room) {
            Some(r) => r.phase = RoomPhase::RosterReceived,
            None => debug!(room, "roster complete for unknown room"),
        }
    }

    fn roster(&self, room: &str) -> Vec<Occupant> {
        self.rooms
            .get(room)
            .map(|r| r.occupants.values().cloned().collect())
            .unwrap_or_default()
    }

    fn add_to_roster(
        &mut self,
        room: &str,
        nick: &str,
        show: Option<&str>,
        status: Option<&str>,
        caps: Option<&str>,
    ) -> bool {
        let Some(r) = self.rooms.get_mut(room) else {
            debug!(room, nick, "presence for unknown room ignored");
            return false;
        };

        let occupant = Occupant {
            nick: nick.to_owned(),
            show: show.map(str::to_owned),
            status: status.map(str::to_owned),
            caps: caps.map(str::to_owned),
        };

        match r.occupants.insert(nick.to_owned(), occupant) {
            Some(old) => old.show.as_deref() != show || old.status.as_deref() != status,
            None => false,
        }
    }

    fn remove_from_roster(&mut self, room: &str, nick: &str) {
        if let Some(r) = self.rooms.get_mut(room) {
            r.occupants.shift_remove(nick);
        }
    }

    fn change_member_nick(&mut self, room: &str, old_nick: &str, nick: &str) {
        let Some(r) = self.rooms.get_mut(room) else {
            return;
        };
        if let Some(mut occupant) = r.occupants.shift_remove(old_nick) {
            occupant.nick = nick.to_owned();
            r.occupants.insert(nick.to_owned(), occupant);
            trace!(room, old_nick, nick, "member renamed");
        }
    }

    fn leave(&mut self, room: &str) {
        if self.rooms.remove(room).is_some() {
            debug!(room, "left room");
        }
    }
}
