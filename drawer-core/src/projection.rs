//! Display fields for the profile drawer.
//!
//! [`project`] is the pure mapping from a conversation to its metadata.
//! [`Projector`] wraps the same mapping with per-field memoization so that a
//! panel re-rendering for unrelated reasons (dialog toggles, presence changes
//! of other users) does no formatting work.

use crate::conversation::{ConversationKind, User};
use crate::memo::Memo;
use crate::presence::{ActiveSet, PresenceStatus, resolve_presence};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Serialize;

pub const UNNAMED_GROUP_TITLE: &str = "Unnamed group";
pub const UNKNOWN_USER_TITLE: &str = "Unknown user";

/// Number of member avatars stacked for a group.
const GROUP_AVATAR_LIMIT: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "images")]
pub enum Avatar {
    Single(Option<String>),
    Group(Vec<Option<String>>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PanelMetadata {
    pub title: String,
    pub status_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub joined_date: Option<String>,
    /// Counterpart email, direct conversations only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Comma-joined roster, group conversations only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_list: Option<String>,
    pub avatar: Avatar,
}

/// Projects a conversation into its display fields.
pub fn project(kind: ConversationKind<'_>, active: &ActiveSet) -> PanelMetadata {
    match kind {
        ConversationKind::Direct { name, counterpart } => {
            let presence = resolve_presence(counterpart.map(|u| u.email.as_str()), active);
            PanelMetadata {
                title: direct_title(name, counterpart),
                status_text: presence.as_str().to_string(),
                joined_date: format_joined_date(counterpart.and_then(|u| u.created_at.as_deref())),
                email: counterpart.map(|u| u.email.clone()),
                email_list: None,
                avatar: Avatar::Single(counterpart.and_then(|u| u.image.clone())),
            }
        }
        ConversationKind::Group { name, members } => PanelMetadata {
            title: group_title(name),
            status_text: member_count_text(members.len()),
            joined_date: None,
            email: None,
            email_list: Some(join_emails(members)),
            avatar: group_avatar(members),
        },
    }
}

fn direct_title(name: Option<&str>, counterpart: Option<&User>) -> String {
    if let Some(name) = name {
        return name.to_string();
    }
    counterpart
        .and_then(|u| {
            u.name
                .as_deref()
                .map(str::trim)
                .filter(|n| !n.is_empty())
                .or_else(|| Some(u.email.as_str()).filter(|e| !e.is_empty()))
        })
        .unwrap_or(UNKNOWN_USER_TITLE)
        .to_string()
}

fn group_title(name: Option<&str>) -> String {
    name.unwrap_or(UNNAMED_GROUP_TITLE).to_string()
}

fn member_count_text(count: usize) -> String {
    format!("{count} members")
}

fn join_emails(members: &[User]) -> String {
    members
        .iter()
        .map(|u| u.email.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

fn group_avatar(members: &[User]) -> Avatar {
    Avatar::Group(
        members
            .iter()
            .take(GROUP_AVATAR_LIMIT)
            .map(|u| u.image.clone())
            .collect(),
    )
}

fn parse_calendar_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc).date_naive());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Some(dt.date());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

/// Formats a creation timestamp as `15 Oct 2026`, or `None` if it is
/// missing or unparsable. Timestamps carrying an offset are read in UTC.
pub fn format_joined_date(raw: Option<&str>) -> Option<String> {
    parse_calendar_date(raw?).map(|date| date.format("%-d %b %Y").to_string())
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct TitleKey {
    name: Option<String>,
    is_group: bool,
    counterpart_name: Option<String>,
    counterpart_email: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StatusKey {
    Group(usize),
    Direct(PresenceStatus),
}

/// Memoizing front end over [`project`].
#[derive(Debug, Default)]
pub struct Projector {
    title: Memo<TitleKey, String>,
    status: Memo<StatusKey, String>,
    joined_date: Memo<Option<String>, Option<String>>,
    email_list: Memo<Vec<String>, String>,
}

impl Projector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn project(&mut self, kind: ConversationKind<'_>, active: &ActiveSet) -> PanelMetadata {
        let title = self.title.get_or_compute(title_key(kind), |_| match kind {
            ConversationKind::Direct { name, counterpart } => direct_title(name, counterpart),
            ConversationKind::Group { name, .. } => group_title(name),
        });

        match kind {
            ConversationKind::Direct { counterpart, .. } => {
                let presence = resolve_presence(counterpart.map(|u| u.email.as_str()), active);
                let status_text = self
                    .status
                    .get_or_compute(StatusKey::Direct(presence), |_| {
                        presence.as_str().to_string()
                    });
                let created_at = counterpart.and_then(|u| u.created_at.clone());
                let joined_date = self
                    .joined_date
                    .get_or_compute(created_at, |raw| format_joined_date(raw.as_deref()));
                PanelMetadata {
                    title,
                    status_text,
                    joined_date,
                    email: counterpart.map(|u| u.email.clone()),
                    email_list: None,
                    avatar: Avatar::Single(counterpart.and_then(|u| u.image.clone())),
                }
            }
            ConversationKind::Group { members, .. } => {
                let status_text = self
                    .status
                    .get_or_compute(StatusKey::Group(members.len()), |_| {
                        member_count_text(members.len())
                    });
                let email_list = self.email_list.get_or_compute_by(
                    |cached| cached.iter().eq(members.iter().map(|u| &u.email)),
                    || members.iter().map(|u| u.email.clone()).collect(),
                    |emails| emails.join(", "),
                );
                PanelMetadata {
                    title,
                    status_text,
                    joined_date: None,
                    email: None,
                    email_list: Some(email_list),
                    avatar: group_avatar(members),
                }
            }
        }
    }

    /// Total recomputations across all memoized fields.
    pub fn computations(&self) -> u64 {
        self.title.computations()
            + self.status.computations()
            + self.joined_date.computations()
            + self.email_list.computations()
    }

    pub fn status_computations(&self) -> u64 {
        self.status.computations()
    }
}

fn title_key(kind: ConversationKind<'_>) -> TitleKey {
    match kind {
        ConversationKind::Direct { name, counterpart } => TitleKey {
            name: name.map(str::to_string),
            is_group: false,
            counterpart_name: counterpart.and_then(|u| u.name.clone()),
            counterpart_email: counterpart.map(|u| u.email.clone()),
        },
        ConversationKind::Group { name, .. } => TitleKey {
            name: name.map(str::to_string),
            is_group: true,
            counterpart_name: None,
            counterpart_email: None,
        },
    }
}
