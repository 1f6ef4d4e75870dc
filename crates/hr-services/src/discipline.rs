//! Absence tracking and discipline escalation.
//!
//! Absence is derived, never stored: an employee is absent on a day when
//! they have no attendance row and no accepted leave covering it. Warnings
//! are one-per-(employee, day) and feed a monthly counter; crossing the
//! escalation threshold notifies every RH_SENIOR user.

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use hr_auth::{capabilities, Action, Principal};
use hr_core::{month_start, HrError, HrResult};
use hr_models::{AbsenceWarning, DisciplineFlag, Employee, Role};

use crate::entity_id;
use crate::notify::Notifier;
use crate::store::Store;

pub struct DisciplineService {
    store: Arc<dyn Store>,
    notifier: Notifier,
}

impl DisciplineService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        let notifier = Notifier::new(store.clone());
        Self { store, notifier }
    }

    /// Employees absent on `date`: no attendance row and not covered by an
    /// accepted leave.
    pub async fn absent_employees(
        &self,
        principal: &Principal,
        date: NaiveDate,
    ) -> HrResult<Vec<Employee>> {
        capabilities::require(principal, Action::ListAbsences)?;

        let present = self.store.employee_ids_present_on(date).await?;
        let on_leave = self.store.employee_ids_on_accepted_leave(date).await?;

        let mut absent = Vec::new();
        for employee in self.store.employees_all().await? {
            let id = entity_id(&employee, "Employee")?;
            if !present.contains(&id) && !on_leave.contains(&id) {
                absent.push(employee);
            }
        }
        Ok(absent)
    }

    /// Record a warning for an absence and bump the monthly counter. At
    /// most one warning per employee per day; the store's unique
    /// constraint decides races.
    pub async fn issue_warning(
        &self,
        principal: &Principal,
        employee_id: i64,
        date: NaiveDate,
        comment: String,
        now: DateTime<Utc>,
    ) -> HrResult<AbsenceWarning> {
        capabilities::require(principal, Action::IssueWarning)?;

        let employee = self
            .store
            .employee_by_id(employee_id)
            .await?
            .ok_or_else(|| HrError::validation("employee not found"))?;

        let warning = self
            .store
            .insert_warning(AbsenceWarning {
                id: None,
                employee_id,
                date,
                comment,
                issued_by: Some(principal.user_id),
                issued_at: Some(now),
            })
            .await?;

        let flag = self
            .store
            .increment_flag(employee_id, month_start(date))
            .await?;
        if flag.is_escalated() {
            self.escalate(&employee, flag.warning_count).await?;
        }

        tracing::info!(
            employee_id,
            %date,
            count = flag.warning_count,
            "absence warning issued"
        );
        Ok(warning)
    }

    /// Flags of the current month that reached the escalation threshold,
    /// highest count first.
    pub async fn current_flags(
        &self,
        principal: &Principal,
        today: NaiveDate,
    ) -> HrResult<Vec<DisciplineFlag>> {
        capabilities::require(principal, Action::ViewDisciplineFlags)?;

        let mut flags: Vec<DisciplineFlag> = self
            .store
            .flags_for_month(month_start(today))
            .await?
            .into_iter()
            .filter(DisciplineFlag::is_escalated)
            .collect();
        flags.sort_by(|a, b| b.warning_count.cmp(&a.warning_count));
        Ok(flags)
    }

    /// Notify every RH_SENIOR user. Fires on every increment at or above
    /// the threshold, so repeat offenders keep surfacing.
    async fn escalate(&self, employee: &Employee, count: i32) -> HrResult<()> {
        let name = employee.full_name();
        for user in self.store.users_by_role(Role::RhSenior).await? {
            self.notifier
                .notify(
                    entity_id(&user, "User")?,
                    "Discipline Flag",
                    format!("Employee {name} has reached {count} warnings in the current month."),
                )
                .await?;
        }
        Ok(())
    }
}
