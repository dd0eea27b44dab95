use crate::contacts::{ContactDirectory, ContactSnapshot};
use crate::jid::Jid;
use crate::muc::InviteDeduplicator;

/// State owned by one login session.
///
/// Created when the session starts and passed by `&mut` into every
/// dispatcher call that changes it. Nothing here is global.
#[derive(Debug, Default)]
pub struct Session {
    contacts: ContactDirectory,
    invites: InviteDeduplicator,
    own_jid: Option<Jid>,
}

impl Session {
    /// Start an empty session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Known contacts.
    pub fn contacts(&self) -> &ContactDirectory {
        &self.contacts
    }

    /// Known contacts, mutable.
    pub fn contacts_mut(&mut self) -> &mut ContactDirectory {
        &mut self.contacts
    }

    /// Snapshot of the contact directory.
    pub fn contact_snapshot(&self) -> ContactSnapshot {
        self.contacts.snapshot()
    }

    /// Outstanding room invites.
    pub fn invites(&self) -> &InviteDeduplicator {
        &self.invites
    }

    /// Outstanding room invites, mutable.
    pub fn invites_mut(&mut self) -> &mut InviteDeduplicator {
        &mut self.invites
    }

    /// Our own JID once logged in.
    pub fn own_jid(&self) -> Option<&Jid> {
        self.own_jid.as_ref()
    }

    pub(crate) fn set_own_jid(&mut self, jid: Jid) {
        self.own_jid = Some(jid);
    }

    /// Drop everything established during the login.
    pub(crate) fn reset(&mut self) {
        self.contacts.clear();
        self.invites.clear();
        self.own_jid = None;
    }
}
