use serde::{Deserialize, Serialize};

/// A chat participant as delivered by the identity store.
///
/// The email is the identity used for presence lookups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(default)]
    pub id: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Raw creation timestamp as received. Parsed lazily so a malformed
    /// value never rejects the whole record.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl User {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            email: email.into(),
            name: None,
            image: None,
            created_at: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    pub fn with_created_at(mut self, created_at: impl Into<String>) -> Self {
        self.created_at = Some(created_at.into());
        self
    }
}

/// Conversation snapshot with its ordered member list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub is_group: bool,
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_message_at: Option<String>,
}

impl Conversation {
    pub fn direct(id: impl Into<String>, users: Vec<User>) -> Self {
        Self {
            id: id.into(),
            name: None,
            is_group: false,
            users,
            created_at: None,
            last_message_at: None,
        }
    }

    pub fn group(id: impl Into<String>, name: Option<String>, users: Vec<User>) -> Self {
        Self {
            id: id.into(),
            name,
            is_group: true,
            users,
            created_at: None,
            last_message_at: None,
        }
    }

    /// The conversation's own name, ignoring blank values.
    pub fn display_name(&self) -> Option<&str> {
        self.name.as_deref().map(str::trim).filter(|n| !n.is_empty())
    }

    /// Borrowed view of the conversation split by shape.
    pub fn kind<'a>(&'a self, counterpart: Option<&'a User>) -> ConversationKind<'a> {
        if self.is_group {
            ConversationKind::Group {
                name: self.display_name(),
                members: &self.users,
            }
        } else {
            ConversationKind::Direct {
                name: self.display_name(),
                counterpart,
            }
        }
    }
}

/// A conversation seen through its shape. Direct conversations only expose
/// the counterpart; group conversations only expose the roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversationKind<'a> {
    Direct {
        name: Option<&'a str>,
        counterpart: Option<&'a User>,
    },
    Group {
        name: Option<&'a str>,
        members: &'a [User],
    },
}

impl ConversationKind<'_> {
    pub fn is_group(&self) -> bool {
        matches!(self, ConversationKind::Group { .. })
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            ConversationKind::Direct { name, .. } | ConversationKind::Group { name, .. } => *name,
        }
    }
}

/// Picks the participant that is not the current user.
///
/// Returns `None` when every member shares the current user's email, which
/// happens for malformed rosters.
pub fn other_user<'a>(conversation: &'a Conversation, current_email: &str) -> Option<&'a User> {
    conversation
        .users
        .iter()
        .find(|user| !user.email.eq_ignore_ascii_case(current_email))
}
