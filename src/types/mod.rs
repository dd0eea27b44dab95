//! Core value types shared by the dispatcher and its collaborators.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Point in time attached to presence activity and delayed messages.
pub type Timestamp = DateTime<Utc>;

/// Subscription value meaning "no presence authorization either way".
pub const SUBSCRIPTION_NONE: &str = "none";

/// Presence string for a contact or resource that went away.
pub const OFFLINE: &str = "offline";

/// A presence string that does not name a known availability.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown presence: {0}")]
pub struct UnknownPresence(pub String);

// ── Presence ────────────────────────────────────────────────────

/// Availability reported by a single connected resource.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourcePresence {
    /// Available.
    #[default]
    Online,
    /// Free for chat.
    Chat,
    /// Temporarily away.
    Away,
    /// Extended away.
    Xa,
    /// Do not disturb.
    Dnd,
}

impl ResourcePresence {
    /// Display string used by the UI and the contact directory.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Online => "online",
            Self::Chat => "chat",
            Self::Away => "away",
            Self::Xa => "xa",
            Self::Dnd => "dnd",
        }
    }
}

impl fmt::Display for ResourcePresence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourcePresence {
    type Err = UnknownPresence;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "online" => Ok(Self::Online),
            "chat" => Ok(Self::Chat),
            "away" => Ok(Self::Away),
            "xa" => Ok(Self::Xa),
            "dnd" => Ok(Self::Dnd),
            other => Err(UnknownPresence(other.to_owned())),
        }
    }
}

/// Availability of a contact as shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactPresence {
    /// Available.
    Online,
    /// Free for chat.
    Chat,
    /// Temporarily away.
    Away,
    /// Extended away.
    Xa,
    /// Do not disturb.
    Dnd,
    /// No connected resource.
    Offline,
}

impl ContactPresence {
    /// Display string used by the UI and the contact directory.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Online => "online",
            Self::Chat => "chat",
            Self::Away => "away",
            Self::Xa => "xa",
            Self::Dnd => "dnd",
            Self::Offline => OFFLINE,
        }
    }
}

impl From<ResourcePresence> for ContactPresence {
    fn from(presence: ResourcePresence) -> Self {
        match presence {
            ResourcePresence::Online => Self::Online,
            ResourcePresence::Chat => Self::Chat,
            ResourcePresence::Away => Self::Away,
            ResourcePresence::Xa => Self::Xa,
            ResourcePresence::Dnd => Self::Dnd,
        }
    }
}

impl fmt::Display for ContactPresence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Roster ──────────────────────────────────────────────────────

/// One connected endpoint of a contact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    /// Resource part of the full JID.
    pub name: String,
    /// Reported availability.
    pub presence: ResourcePresence,
    /// Free-form status text.
    #[serde(default)]
    pub status: Option<String>,
    /// Presence priority.
    #[serde(default)]
    pub priority: i8,
    /// Entity capabilities verification hash.
    #[serde(default)]
    pub caps_hash: Option<String>,
}

impl Resource {
    /// Create a resource with no status text, priority 0 and no caps.
    pub fn new(name: impl Into<String>, presence: ResourcePresence) -> Self {
        Self {
            name: name.into(),
            presence,
            status: None,
            priority: 0,
            caps_hash: None,
        }
    }

    /// Attach status text.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }
}

/// A roster entry as held by the roster store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactRecord {
    /// Bare JID of the contact.
    pub barejid: String,
    /// Roster nickname.
    pub name: Option<String>,
    /// Subscription state (`none`, `to`, `from`, `both`).
    pub subscription: Option<String>,
    /// Roster groups.
    pub groups: Vec<String>,
    /// Currently connected resources.
    pub resources: Vec<Resource>,
    /// Last reported activity.
    pub last_activity: Option<Timestamp>,
}

impl ContactRecord {
    /// Create an entry with no resources.
    pub fn new(barejid: impl Into<String>, subscription: Option<&str>) -> Self {
        Self {
            barejid: barejid.into(),
            name: None,
            subscription: subscription.map(str::to_owned),
            groups: Vec::new(),
            resources: Vec::new(),
            last_activity: None,
        }
    }

    /// Find a connected resource by name.
    pub fn resource(&self, name: &str) -> Option<&Resource> {
        self.resources.iter().find(|r| r.name == name)
    }
}

/// A member of a multi-user chat room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Occupant {
    /// Nickname in the room.
    pub nick: String,
    /// Presence show value.
    pub show: Option<String>,
    /// Status text.
    pub status: Option<String>,
    /// Capabilities string.
    pub caps: Option<String>,
}

// ── Events ──────────────────────────────────────────────────────

/// Direction of a logged chat line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Received from the peer.
    Incoming,
    /// Sent by us.
    Outgoing,
}

/// Presence subscription stanza types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionKind {
    /// Contact asks to see our presence.
    Subscribe,
    /// Contact accepted our request.
    Subscribed,
    /// Contact stops seeing our presence.
    Unsubscribe,
    /// Contact revoked our subscription.
    Unsubscribed,
    /// Anything else the parser passed through.
    #[serde(other)]
    Unknown,
}

/// How a room invitation was delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InviteKind {
    /// Sent directly by the invitor (XEP-0249).
    Direct,
    /// Relayed through the room (XEP-0045).
    Mediated,
}

/// A configured account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Account name as configured.
    pub name: String,
    /// JID the account logs in with.
    pub jid: String,
    /// Presence to announce on login, if set for this account.
    #[serde(default)]
    pub login_presence: Option<ResourcePresence>,
}

/// Reply to a software version query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SoftwareVersion {
    /// Responding JID.
    pub jid: String,
    /// Presence of the responder, if known.
    pub presence: Option<String>,
    /// Client name.
    pub name: Option<String>,
    /// Client version.
    pub version: Option<String>,
    /// Operating system.
    pub os: Option<String>,
}

/// Service discovery identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoIdentity {
    /// Human-readable name.
    pub name: Option<String>,
    /// Identity category (`server`, `conference`, ...).
    pub category: String,
    /// Identity type within the category.
    #[serde(rename = "type")]
    pub kind: String,
}

/// Service discovery item; also used for room listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoItem {
    /// Item JID.
    pub jid: String,
    /// Human-readable name.
    pub name: Option<String>,
}
