//! Attendance model and its per-day state machine.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use hr_core::traits::{Id, Identifiable};
use serde::{Deserialize, Serialize};

/// Per-(employee, date) state: `None -> CheckedIn -> CheckedOut`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttendanceState {
    None,
    CheckedIn,
    CheckedOut,
}

/// One row per employee per day, created on check-in and mutated exactly
/// once on check-out; never deleted. A row left in CheckedIn persists
/// indefinitely and still counts as "present" for absence detection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attendance {
    pub id: Option<Id>,
    pub employee_id: Id,
    pub date: NaiveDate,
    pub check_in_time: Option<NaiveTime>,
    pub check_out_time: Option<NaiveTime>,
    pub created_at: Option<DateTime<Utc>>,
}

impl Attendance {
    pub fn state(&self) -> AttendanceState {
        match (self.check_in_time, self.check_out_time) {
            (None, _) => AttendanceState::None,
            (Some(_), None) => AttendanceState::CheckedIn,
            (Some(_), Some(_)) => AttendanceState::CheckedOut,
        }
    }
}

impl Identifiable for Attendance {
    fn id(&self) -> Option<Id> {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_progression() {
        let mut att = Attendance {
            id: Some(1),
            employee_id: 1,
            date: NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
            check_in_time: None,
            check_out_time: None,
            created_at: None,
        };
        assert_eq!(att.state(), AttendanceState::None);

        att.check_in_time = NaiveTime::from_hms_opt(9, 15, 0);
        assert_eq!(att.state(), AttendanceState::CheckedIn);

        att.check_out_time = NaiveTime::from_hms_opt(17, 30, 0);
        assert_eq!(att.state(), AttendanceState::CheckedOut);
    }
}
