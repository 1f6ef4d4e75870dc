//! Employee model.

use chrono::NaiveDate;
use hr_core::traits::{Id, Identifiable};
use serde::{Deserialize, Serialize};

/// A payroll roster entry. Joined to a [`crate::User`] account through the
/// unique email, which is the load-bearing identity link for all scope
/// checks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Employee {
    pub id: Option<Id>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub hired_at: NaiveDate,
    pub department_id: Id,
    pub salary: f64,
    /// 4-digit attendance PIN; unset means the employee cannot clock in.
    pub attendance_pin: Option<String>,
}

impl Employee {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

impl Identifiable for Employee {
    fn id(&self) -> Option<Id> {
        self.id
    }
}
