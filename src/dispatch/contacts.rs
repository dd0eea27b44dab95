use tracing::{info, warn};

use super::{EventDispatcher, Session};
use crate::jid::Jid;
use crate::presence::PresenceObservation;
use crate::types::{Resource, SubscriptionKind, Timestamp};

impl EventDispatcher {
    /// Presence subscription stanza from `from`.
    ///
    /// Unknown subscription types are ignored.
    pub fn handle_subscription(&mut self, from: &str, kind: SubscriptionKind) {
        match kind {
            SubscriptionKind::Subscribe => {
                self.ui
                    .console_message(&format!("Received authorization request from {from}"));
                info!(from, "received authorization request");
                self.ui.system_message_from(
                    from,
                    "Authorization request, type '/sub allow' to accept or '/sub deny' to reject",
                );
                if self.prefs.subscription_notify {
                    self.desktop.notify_subscription(from);
                }
            }
            SubscriptionKind::Subscribed => {
                self.ui
                    .console_message(&format!("Subscription received from {from}"));
                info!(from, "subscription received");
                self.ui.system_message_from(from, "Subscribed");
            }
            SubscriptionKind::Unsubscribed => {
                self.ui
                    .console_message(&format!("{from} deleted subscription"));
                info!(from, "subscription deleted");
                self.ui.system_message_from(from, "Unsubscribed");
            }
            SubscriptionKind::Unsubscribe | SubscriptionKind::Unknown => {}
        }
    }

    /// A contact resource went offline.
    ///
    /// The roster store is updated first. The UI hears about it only if the
    /// store reports a change, a resource is named, status display is on,
    /// and the contact is authorized.
    pub fn handle_contact_offline(
        &mut self,
        session: &mut Session,
        contact: &str,
        resource: Option<&str>,
        status: Option<&str>,
    ) {
        let changed = self.roster.set_offline(contact, resource, status);
        if !changed {
            return;
        }
        self.refresh_directory(session, contact);

        let Some(resource) = resource else {
            return;
        };
        if !self.prefs.status_display {
            return;
        }

        let observation = PresenceObservation::offline(contact, Some(resource), status);
        let subscription = self.roster.get_contact(contact).and_then(|c| c.subscription);
        let merge = self.merger.merge(&observation, subscription.as_deref());
        if !merge.should_notify {
            return;
        }

        match Jid::from_bare_and_resource(contact, resource) {
            Ok(jid) => self
                .ui
                .contact_offline(&jid.full(), &merge.effective_presence, status),
            Err(e) => warn!(contact, resource, error = %e, "offline presence from bad jid"),
        }
    }

    /// A contact resource came online or changed presence.
    ///
    /// Same gating as [`EventDispatcher::handle_contact_offline`]: store
    /// change, status display, authorized contact.
    pub fn handle_contact_online(
        &mut self,
        session: &mut Session,
        contact: &str,
        resource: &Resource,
        last_activity: Option<Timestamp>,
    ) {
        let changed = self.roster.update_presence(contact, resource, last_activity);
        if !changed {
            return;
        }
        self.refresh_directory(session, contact);

        if !self.prefs.status_display {
            return;
        }

        let observation = PresenceObservation::online(contact, resource, last_activity);
        let subscription = self.roster.get_contact(contact).and_then(|c| c.subscription);
        let merge = self.merger.merge(&observation, subscription.as_deref());
        if merge.should_notify {
            self.ui.contact_online(
                contact,
                &resource.name,
                &merge.effective_presence,
                resource.status.as_deref(),
                last_activity,
            );
        }
    }

    /// Contact added to a roster group.
    pub fn handle_group_add(&mut self, contact: &str, group: &str) {
        self.ui.group_added(contact, group);
    }

    /// Contact removed from a roster group.
    pub fn handle_group_remove(&mut self, contact: &str, group: &str) {
        self.ui.group_removed(contact, group);
    }

    /// Roster push added `barejid`.
    pub fn handle_roster_add(&mut self, session: &mut Session, barejid: &str, name: Option<&str>) {
        if session.contacts().get(barejid).is_none() {
            session.contacts_mut().add(barejid, None);
        }
        self.ui.roster_add(barejid, name);
    }

    /// Roster push removed `barejid`.
    pub fn handle_roster_remove(&mut self, session: &mut Session, barejid: &str) {
        session.contacts_mut().remove(barejid);
        self.ui.roster_remove(barejid);
    }

    /// Mirror the roster's view of `contact` into the session directory: the
    /// presence of its highest-priority resource, or no status when none is
    /// connected.
    fn refresh_directory(&self, session: &mut Session, contact: &str) {
        let status = self.roster.get_contact(contact).and_then(|record| {
            record
                .resources
                .iter()
                .max_by_key(|r| r.priority)
                .map(|r| r.presence.as_str())
        });
        session.contacts_mut().add(contact, status);
    }
}
