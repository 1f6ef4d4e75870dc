//! Task model.

use chrono::{DateTime, NaiveDate, Utc};
use hr_core::traits::{Id, Identifiable, Timestamped};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    Todo,
    Done,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Todo => "TODO",
            Self::Done => "DONE",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "TODO" => Some(Self::Todo),
            "DONE" => Some(Self::Done),
            _ => None,
        }
    }
}

/// A task assigned by a chef to an employee of the chef's department.
/// Only the assignee may move it TODO -> DONE.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: Option<Id>,
    pub title: String,
    pub description: String,
    pub due_date: Option<NaiveDate>,
    pub status: TaskStatus,
    pub assigned_to: Id,
    pub assigned_by: Option<Id>,
    pub created_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl Identifiable for Task {
    fn id(&self) -> Option<Id> {
        self.id
    }
}

impl Timestamped for Task {
    fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }
}
