//! Document lifecycle models.
//!
//! `DRAFT -> SENT -> VALIDATED -> ARCHIVED`, with every transition and
//! comment appended as an immutable [`DocumentHistory`] row. History rows
//! are the audit trail: written once per action, never mutated or deleted.

use chrono::{DateTime, Utc};
use hr_core::traits::{Id, Identifiable, Timestamped};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DocumentCategory {
    Rh,
    Finance,
    Internal,
}

impl DocumentCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rh => "RH",
            Self::Finance => "FINANCE",
            Self::Internal => "INTERNAL",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "RH" => Some(Self::Rh),
            "FINANCE" => Some(Self::Finance),
            "INTERNAL" => Some(Self::Internal),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentType {
    pub id: Option<Id>,
    pub name: String,
    pub category: DocumentCategory,
}

impl Identifiable for DocumentType {
    fn id(&self) -> Option<Id> {
        self.id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DocumentStatus {
    Draft,
    Sent,
    Validated,
    Archived,
}

impl DocumentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "DRAFT",
            Self::Sent => "SENT",
            Self::Validated => "VALIDATED",
            Self::Archived => "ARCHIVED",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "DRAFT" => Some(Self::Draft),
            "SENT" => Some(Self::Sent),
            "VALIDATED" => Some(Self::Validated),
            "ARCHIVED" => Some(Self::Archived),
            _ => None,
        }
    }

    /// Sending is only legal from DRAFT.
    pub fn can_send(&self) -> bool {
        matches!(self, Self::Draft)
    }

    /// Validation is blocked once VALIDATED or ARCHIVED.
    pub fn can_validate(&self) -> bool {
        !matches!(self, Self::Validated | Self::Archived)
    }

    /// Archiving is blocked only when already ARCHIVED.
    pub fn can_archive(&self) -> bool {
        !matches!(self, Self::Archived)
    }
}

/// Recorded history action. `Returned` is reserved: stored and understood
/// but no operation currently emits it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DocumentAction {
    Created,
    Sent,
    Commented,
    Validated,
    Archived,
    Returned,
}

impl DocumentAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Created => "CREATED",
            Self::Sent => "SENT",
            Self::Commented => "COMMENTED",
            Self::Validated => "VALIDATED",
            Self::Archived => "ARCHIVED",
            Self::Returned => "RETURNED",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "CREATED" => Some(Self::Created),
            "SENT" => Some(Self::Sent),
            "COMMENTED" => Some(Self::Commented),
            "VALIDATED" => Some(Self::Validated),
            "ARCHIVED" => Some(Self::Archived),
            "RETURNED" => Some(Self::Returned),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub id: Option<Id>,
    pub title: String,
    pub doc_type_id: Id,
    /// Opaque reference into the external file store.
    pub file: String,
    pub source_department_id: Id,
    pub target_department_id: Option<Id>,
    pub created_by: Option<Id>,
    pub status: DocumentStatus,
    pub sent_at: Option<DateTime<Utc>>,
    pub validated_by: Option<Id>,
    pub validated_at: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
}

impl Identifiable for Document {
    fn id(&self) -> Option<Id> {
        self.id
    }
}

impl Timestamped for Document {
    fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }
}

/// Immutable audit row. Comments thread through `parent`, which must point
/// at a COMMENTED row of the same document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentHistory {
    pub id: Option<Id>,
    pub document_id: Id,
    pub parent_id: Option<Id>,
    pub action: DocumentAction,
    pub by_user: Option<Id>,
    pub note: String,
    pub is_private: bool,
    pub created_at: Option<DateTime<Utc>>,
}

impl Identifiable for DocumentHistory {
    fn id(&self) -> Option<Id> {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_send_only_from_draft() {
        assert!(DocumentStatus::Draft.can_send());
        assert!(!DocumentStatus::Sent.can_send());
        assert!(!DocumentStatus::Validated.can_send());
        assert!(!DocumentStatus::Archived.can_send());
    }

    #[test]
    fn test_validate_blocked_after_terminal_states() {
        assert!(DocumentStatus::Draft.can_validate());
        assert!(DocumentStatus::Sent.can_validate());
        assert!(!DocumentStatus::Validated.can_validate());
        assert!(!DocumentStatus::Archived.can_validate());
    }

    #[test]
    fn test_archive_blocked_only_when_archived() {
        assert!(DocumentStatus::Draft.can_archive());
        assert!(DocumentStatus::Sent.can_archive());
        assert!(DocumentStatus::Validated.can_archive());
        assert!(!DocumentStatus::Archived.can_archive());
    }
}
