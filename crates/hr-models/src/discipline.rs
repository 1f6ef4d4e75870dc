//! Absence warnings and monthly discipline flags.

use chrono::{DateTime, NaiveDate, Utc};
use hr_core::traits::{Id, Identifiable};
use serde::{Deserialize, Serialize};

/// Warning count at which RH_SENIOR is escalated to.
pub const ESCALATION_THRESHOLD: i32 = 3;

/// One warning per (employee, date); the unique store constraint is the
/// authoritative duplicate guard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AbsenceWarning {
    pub id: Option<Id>,
    pub employee_id: Id,
    pub date: NaiveDate,
    pub comment: String,
    pub issued_by: Option<Id>,
    pub issued_at: Option<DateTime<Utc>>,
}

impl Identifiable for AbsenceWarning {
    fn id(&self) -> Option<Id> {
        self.id
    }
}

/// Monthly aggregate counter per employee, keyed on the first day of the
/// month. Incremented atomically as warnings accrue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisciplineFlag {
    pub id: Option<Id>,
    pub employee_id: Id,
    pub month: NaiveDate,
    pub warning_count: i32,
}

impl DisciplineFlag {
    pub fn is_escalated(&self) -> bool {
        self.warning_count >= ESCALATION_THRESHOLD
    }
}

impl Identifiable for DisciplineFlag {
    fn id(&self) -> Option<Id> {
        self.id
    }
}
