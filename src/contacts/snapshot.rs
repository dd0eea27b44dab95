use std::sync::Arc;

use super::Contact;

/// Immutable point-in-time copy of the contact directory.
///
/// Cloning a snapshot shares the same contact slice; later directory
/// mutations never show through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSnapshot {
    contacts: Arc<[Contact]>,
}

impl ContactSnapshot {
    /// Number of contacts captured.
    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    /// Whether the snapshot is empty.
    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    /// Contacts in directory insertion order.
    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    /// Look up a captured contact by name.
    pub fn get(&self, name: &str) -> Option<&Contact> {
        self.contacts.iter().find(|c| c.name == name)
    }

    /// Iterate captured contacts.
    pub fn iter(&self) -> std::slice::Iter<'_, Contact> {
        self.contacts.iter()
    }
}

impl Default for ContactSnapshot {
    fn default() -> Self {
        Self {
            contacts: Arc::from(Vec::new()),
        }
    }
}

impl FromIterator<Contact> for ContactSnapshot {
    fn from_iter<I: IntoIterator<Item = Contact>>(iter: I) -> Self {
        Self {
            contacts: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a ContactSnapshot {
    type Item = &'a Contact;
    type IntoIter = std::slice::Iter<'a, Contact>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
