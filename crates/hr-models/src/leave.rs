//! Leave request model.

use chrono::{DateTime, NaiveDate, Utc};
use hr_core::traits::{Id, Identifiable, Timestamped};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LeaveType {
    Annual,
    Sick,
    Other,
}

impl LeaveType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Annual => "ANNUAL",
            Self::Sick => "SICK",
            Self::Other => "OTHER",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "ANNUAL" => Some(Self::Annual),
            "SICK" => Some(Self::Sick),
            "OTHER" => Some(Self::Other),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LeaveStatus {
    Pending,
    Accepted,
    Refused,
}

impl LeaveStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Accepted => "ACCEPTED",
            Self::Refused => "REFUSED",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "PENDING" => Some(Self::Pending),
            "ACCEPTED" => Some(Self::Accepted),
            "REFUSED" => Some(Self::Refused),
            _ => None,
        }
    }
}

/// Lifecycle: PENDING -> {ACCEPTED, REFUSED} exactly once, decided by a
/// chef of the employee's department.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaveRequest {
    pub id: Option<Id>,
    pub employee_id: Id,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub leave_type: LeaveType,
    pub reason: String,
    /// Opaque reference into the external file store.
    pub attachment: Option<String>,
    pub status: LeaveStatus,
    pub chef_comment: String,
    pub decided_by: Option<Id>,
    pub decided_at: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
}

impl LeaveRequest {
    /// Whether this request's interval overlaps [start, end] (inclusive).
    pub fn overlaps(&self, start: NaiveDate, end: NaiveDate) -> bool {
        self.start_date <= end && start <= self.end_date
    }

    /// Whether an ACCEPTED request is still in effect on `today`.
    pub fn is_ongoing(&self, today: NaiveDate) -> bool {
        self.status == LeaveStatus::Accepted && self.end_date >= today
    }
}

impl Identifiable for LeaveRequest {
    fn id(&self) -> Option<Id> {
        self.id
    }
}

impl Timestamped for LeaveRequest {
    fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }
}
