//! Jabber identifiers (`local@domain/resource`).

use std::fmt;
use std::str::FromStr;

/// Reasons a JID string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum JidError {
    /// The input was empty.
    #[error("empty jid")]
    Empty,
    /// Nothing between `@` (or start) and `/` (or end).
    #[error("missing domain in jid: {0}")]
    MissingDomain(String),
    /// An `@` with nothing before it.
    #[error("empty localpart in jid: {0}")]
    EmptyLocal(String),
    /// A `/` with nothing after it.
    #[error("empty resource in jid: {0}")]
    EmptyResource(String),
}

/// A parsed JID.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Jid {
    local: Option<String>,
    domain: String,
    resource: Option<String>,
}

impl Jid {
    /// Parse a bare or full JID.
    ///
    /// The resource is everything after the first `/`, so it may itself
    /// contain `@` or `/` (room nicknames often do).
    ///
    /// # Errors
    ///
    /// Returns [`JidError`] when a part is empty.
    pub fn parse(input: &str) -> Result<Self, JidError> {
        if input.is_empty() {
            return Err(JidError::Empty);
        }

        let (bare, resource) = match input.split_once('/') {
            Some((_, "")) => return Err(JidError::EmptyResource(input.to_owned())),
            Some((bare, resource)) => (bare, Some(resource.to_owned())),
            None => (input, None),
        };

        let (local, domain) = match bare.split_once('@') {
            Some(("", _)) => return Err(JidError::EmptyLocal(input.to_owned())),
            Some((local, domain)) => (Some(local.to_owned()), domain),
            None => (None, bare),
        };

        if domain.is_empty() {
            return Err(JidError::MissingDomain(input.to_owned()));
        }

        Ok(Self {
            local,
            domain: domain.to_owned(),
            resource,
        })
    }

    /// Build a full JID from a bare JID and a resource.
    ///
    /// # Errors
    ///
    /// Returns [`JidError`] when the combination does not parse.
    pub fn from_bare_and_resource(bare: &str, resource: &str) -> Result<Self, JidError> {
        Self::parse(&format!("{bare}/{resource}"))
    }

    /// Localpart, if any.
    pub fn local(&self) -> Option<&str> {
        self.local.as_deref()
    }

    /// Domainpart.
    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Resourcepart, if any.
    pub fn resource(&self) -> Option<&str> {
        self.resource.as_deref()
    }

    /// `local@domain`, or just `domain`.
    pub fn bare(&self) -> String {
        match &self.local {
            Some(local) => format!("{local}@{}", self.domain),
            None => self.domain.clone(),
        }
    }

    /// Bare JID plus `/resource` when present.
    pub fn full(&self) -> String {
        match &self.resource {
            Some(resource) => format!("{}/{resource}", self.bare()),
            None => self.bare(),
        }
    }
}

impl FromStr for Jid {
    type Err = JidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Jid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full())
    }
}
