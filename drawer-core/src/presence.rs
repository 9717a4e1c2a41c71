use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Binary online indicator shown for a direct conversation's counterpart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PresenceStatus {
    Active,
    Offline,
}

impl PresenceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PresenceStatus::Active => "Active",
            PresenceStatus::Offline => "Offline",
        }
    }
}

impl fmt::Display for PresenceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable snapshot of the identities currently considered active.
///
/// The presence channel delivers members as a list; they are kept as a set
/// so lookups stay constant time regardless of how many users are online.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActiveSet {
    members: HashSet<String>,
}

impl ActiveSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, identity: &str) -> bool {
        self.members.contains(identity)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Copy of this snapshot with `identity` added.
    pub fn with_member(&self, identity: impl Into<String>) -> Self {
        let mut members = self.members.clone();
        members.insert(identity.into());
        Self { members }
    }

    /// Copy of this snapshot with `identity` removed.
    pub fn without_member(&self, identity: &str) -> Self {
        let mut members = self.members.clone();
        members.remove(identity);
        Self { members }
    }
}

impl<S: Into<String>> FromIterator<S> for ActiveSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            members: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Resolves the counterpart's status against an active-set snapshot.
///
/// An unknown counterpart is always offline.
pub fn resolve_presence(identity: Option<&str>, active: &ActiveSet) -> PresenceStatus {
    match identity {
        Some(id) if active.contains(id) => PresenceStatus::Active,
        _ => PresenceStatus::Offline,
    }
}
