//! Presence merge decision.
//!
//! Decides whether a roster presence change should reach the user. Storage
//! of the presence itself is the roster store's job; this module only looks
//! at values and has no side effects.

use crate::types::{ContactPresence, Resource, Timestamp, SUBSCRIPTION_NONE};

/// One observed presence for a contact resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresenceObservation {
    /// Bare JID of the contact.
    pub contact_id: String,
    /// Resource the presence came from.
    pub resource_id: Option<String>,
    /// Reported availability.
    pub presence: ContactPresence,
    /// Status text.
    pub status_text: Option<String>,
    /// Last activity reported alongside the presence.
    pub last_activity: Option<Timestamp>,
    /// Entity capabilities hash.
    pub caps_hash: Option<String>,
}

impl PresenceObservation {
    /// Observation for a resource that is online.
    pub fn online(contact: &str, resource: &Resource, last_activity: Option<Timestamp>) -> Self {
        Self {
            contact_id: contact.to_owned(),
            resource_id: Some(resource.name.clone()),
            presence: resource.presence.into(),
            status_text: resource.status.clone(),
            last_activity,
            caps_hash: resource.caps_hash.clone(),
        }
    }

    /// Observation for a resource (or whole contact) going offline.
    pub fn offline(contact: &str, resource: Option<&str>, status: Option<&str>) -> Self {
        Self {
            contact_id: contact.to_owned(),
            resource_id: resource.map(str::to_owned),
            presence: ContactPresence::Offline,
            status_text: status.map(str::to_owned),
            last_activity: None,
            caps_hash: None,
        }
    }
}

/// Outcome of [`PresenceMerger::merge`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresenceMerge {
    /// Whether the UI should be told.
    pub should_notify: bool,
    /// Presence string to show (`online`, `away`, `offline`, ...).
    pub effective_presence: String,
}

/// Applies the user's presence notification preference.
#[derive(Debug, Clone, Copy)]
pub struct PresenceMerger {
    notifications_enabled: bool,
}

impl PresenceMerger {
    /// Create a merger; with `notifications_enabled == false` nothing notifies.
    pub fn new(notifications_enabled: bool) -> Self {
        Self {
            notifications_enabled,
        }
    }

    /// Decide whether `observation` is worth showing.
    ///
    /// Called only once the roster store has reported a change.
    /// `subscription` is the contact's roster subscription; a contact with no
    /// subscription (or `none`) never notifies.
    pub fn merge(
        &self,
        observation: &PresenceObservation,
        subscription: Option<&str>,
    ) -> PresenceMerge {
        let authorized = matches!(subscription, Some(s) if s != SUBSCRIPTION_NONE);

        PresenceMerge {
            should_notify: self.notifications_enabled && authorized,
            effective_presence: observation.presence.as_str().to_owned(),
        }
    }
}
