//! Attendance check-in/check-out.
//!
//! Per (employee, date) the states are `NONE -> CHECKED_IN -> CHECKED_OUT`.
//! Both transitions are PIN-gated, with the checks applied in a fixed
//! order so error responses stay deterministic: pin present, pin shape,
//! employee record, configured PIN, exact match, then the state
//! transition itself. There is no automatic checkout: a row left in
//! CHECKED_IN persists and still counts as present.

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use hr_auth::{capabilities, Action, Principal};
use hr_core::{DateRange, HrError, HrResult};
use hr_models::{Attendance, Employee};
use hr_scope::ScopeResolver;

use crate::entity_id;
use crate::store::Store;

pub struct AttendanceService {
    store: Arc<dyn Store>,
}

impl AttendanceService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub async fn check_in(
        &self,
        principal: &Principal,
        pin: Option<&str>,
        now: DateTime<Utc>,
    ) -> HrResult<Attendance> {
        let employee = self.pin_checked_employee(principal, pin).await?;
        let employee_id = entity_id(&employee, "Employee")?;
        self.store
            .check_in(employee_id, now.date_naive(), now.time())
            .await
    }

    pub async fn check_out(
        &self,
        principal: &Principal,
        pin: Option<&str>,
        now: DateTime<Utc>,
    ) -> HrResult<Attendance> {
        let employee = self.pin_checked_employee(principal, pin).await?;
        let employee_id = entity_id(&employee, "Employee")?;
        self.store
            .check_out(employee_id, now.date_naive(), now.time())
            .await
    }

    /// The caller's own attendance rows, defaulting to month-start..today.
    pub async fn my_attendance(
        &self,
        principal: &Principal,
        from: Option<&str>,
        to: Option<&str>,
        today: NaiveDate,
    ) -> HrResult<Vec<Attendance>> {
        capabilities::require(principal, Action::CheckAttendance)?;
        let resolver = ScopeResolver::new(self.store.as_ref());
        let Some(employee) = resolver.own_employee(principal).await? else {
            return Ok(Vec::new());
        };
        let employee_id = entity_id(&employee, "Employee")?;
        let range = DateRange::new(
            match from {
                Some(s) => hr_core::parse_date(s)?,
                None => hr_core::month_start(today),
            },
            match to {
                Some(s) => hr_core::parse_date(s)?,
                None => today,
            },
        );
        self.store
            .attendance_in_range(Some(&[employee_id]), range)
            .await
    }

    /// The fixed PIN gate shared by both transitions.
    async fn pin_checked_employee(
        &self,
        principal: &Principal,
        pin: Option<&str>,
    ) -> HrResult<Employee> {
        capabilities::require(principal, Action::CheckAttendance)?;

        let pin = pin
            .filter(|p| !p.is_empty())
            .ok_or_else(|| HrError::validation("pin is required"))?;
        if pin.len() != 4 || !pin.chars().all(|c| c.is_ascii_digit()) {
            return Err(HrError::validation("pin must be exactly 4 digits"));
        }

        let resolver = ScopeResolver::new(self.store.as_ref());
        let employee = resolver
            .own_employee(principal)
            .await?
            .ok_or_else(|| HrError::validation("employee record not found"))?;

        let configured = employee
            .attendance_pin
            .as_deref()
            .filter(|p| !p.is_empty())
            .ok_or_else(|| HrError::validation("pin not set"))?;
        if pin != configured {
            return Err(HrError::InvalidPin);
        }

        Ok(employee)
    }
}
