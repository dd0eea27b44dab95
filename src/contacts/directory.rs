use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::trace;

use super::ContactSnapshot;

/// A known contact and its last-known availability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    /// Unique key within the directory.
    pub name: String,
    /// Last-known status; `None` when the contact reported none.
    pub status: Option<String>,
}

/// What [`ContactDirectory::add`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// A new contact was appended.
    Created,
    /// An existing contact had its status replaced.
    Updated,
}

/// Insertion-ordered map of contacts keyed by name.
#[derive(Debug, Default)]
pub struct ContactDirectory {
    contacts: IndexMap<String, Contact>,
}

impl ContactDirectory {
    /// Create an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a contact or replace the status of an existing one.
    ///
    /// An update keeps the contact's position in iteration order. Passing
    /// `None` clears the status.
    pub fn add(&mut self, name: &str, status: Option<&str>) -> AddOutcome {
        if let Some(existing) = self.contacts.get_mut(name) {
            existing.status = status.map(str::to_owned);
            trace!(name, status, "contact status updated");
            return AddOutcome::Updated;
        }

        self.contacts.insert(
            name.to_owned(),
            Contact {
                name: name.to_owned(),
                status: status.map(str::to_owned),
            },
        );
        trace!(name, status, "contact created");
        AddOutcome::Created
    }

    /// Remove a contact. Returns `false` if no contact has that name.
    pub fn remove(&mut self, name: &str) -> bool {
        // shift_remove keeps the remaining contacts in insertion order.
        self.contacts.shift_remove(name).is_some()
    }

    /// Remove every contact.
    pub fn clear(&mut self) {
        self.contacts.clear();
    }

    /// Look up a contact by name.
    pub fn get(&self, name: &str) -> Option<&Contact> {
        self.contacts.get(name)
    }

    /// Number of contacts.
    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    /// Whether the directory holds no contacts.
    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    /// Contacts in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Contact> {
        self.contacts.values()
    }

    /// Copy the current contents into an immutable snapshot.
    pub fn snapshot(&self) -> ContactSnapshot {
        self.contacts.values().cloned().collect()
    }
}
