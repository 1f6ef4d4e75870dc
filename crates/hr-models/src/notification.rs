//! Internal notification model.

use chrono::{DateTime, Utc};
use hr_core::traits::{Id, Identifiable, Timestamped};
use serde::{Deserialize, Serialize};

/// Fire-and-forget internal message. The core only enqueues rows; delivery
/// (push/email) belongs to the external notification transport.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub id: Option<Id>,
    pub user_id: Id,
    pub title: String,
    pub message: String,
    pub is_read: bool,
    pub link: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

impl Notification {
    pub fn new(user_id: Id, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            id: None,
            user_id,
            title: title.into(),
            message: message.into(),
            is_read: false,
            link: None,
            created_at: None,
        }
    }

    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }
}

impl Identifiable for Notification {
    fn id(&self) -> Option<Id> {
        self.id
    }
}

impl Timestamped for Notification {
    fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }
}
