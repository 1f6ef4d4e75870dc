//! User account model.

use chrono::{DateTime, Utc};
use hr_core::traits::{Id, Identifiable};
use serde::{Deserialize, Serialize};

use crate::role::Role;

/// An authenticable account. Matched to an [`crate::Employee`] row by email
/// equality, not by foreign key; accounts without an employee record are
/// legal (e.g. a GRH director who is not on the payroll roster).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Option<Id>,
    pub email: String,
    /// Password hash is owned by the external authentication provider;
    /// the core never verifies credentials.
    #[serde(skip_serializing)]
    pub password_hash: Option<String>,
    pub role: Role,
    pub created_at: Option<DateTime<Utc>>,
}

impl Identifiable for User {
    fn id(&self) -> Option<Id> {
        self.id
    }
}
