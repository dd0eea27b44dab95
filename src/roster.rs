//! In-memory personal roster.

use indexmap::IndexMap;
use tracing::trace;

use crate::collaborators::RosterStore;
use crate::types::{ContactRecord, Resource, Timestamp};

/// [`RosterStore`] holding roster entries keyed by bare JID.
///
/// Presence for a JID that is not on the roster is ignored.
#[derive(Debug, Default)]
pub struct MemoryRoster {
    contacts: IndexMap<String, ContactRecord>,
}

impl MemoryRoster {
    /// Create an empty roster.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a roster entry (as received in a roster push).
    pub fn add_contact(&mut self, record: ContactRecord) {
        self.contacts.insert(record.barejid.clone(), record);
    }

    /// Remove a roster entry.
    pub fn remove_contact(&mut self, barejid: &str) -> bool {
        self.contacts.shift_remove(barejid).is_some()
    }

    /// Number of roster entries.
    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    /// Whether the roster is empty.
    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }
}

impl RosterStore for MemoryRoster {
    fn update_presence(
        &mut self,
        contact: &str,
        resource: &Resource,
        last_activity: Option<Timestamp>,
    ) -> bool {
        let Some(record) = self.contacts.get_mut(contact) else {
            trace!(contact, "presence from contact not on roster");
            return false;
        };

        let activity_changed = record.last_activity != last_activity;
        record.last_activity = last_activity;

        let presence_changed = match record.resources.iter_mut().find(|r| r.name == resource.name)
        {
            Some(existing) if *existing == *resource => false,
            Some(existing) => {
                *existing = resource.clone();
                true
            }
            None => {
                record.resources.push(resource.clone());
                true
            }
        };

        presence_changed || activity_changed
    }

    fn set_offline(&mut self, contact: &str, resource: Option<&str>, _status: Option<&str>) -> bool {
        let Some(record) = self.contacts.get_mut(contact) else {
            return false;
        };
        let Some(name) = resource else {
            return true;
        };
        let before = record.resources.len();
        record.resources.retain(|r| r.name != name);
        record.resources.len() != before
    }

    fn get_contact(&self, barejid: &str) -> Option<ContactRecord> {
        self.contacts.get(barejid).cloned()
    }

    fn clear(&mut self) {
        self.contacts.clear();
    }
}
