//! Leave request workflow.
//!
//! Submission rules run in a fixed order so the first failing rule
//! determines the error: date presence and range, sick-leave attachment,
//! "one open request at a time", ongoing approved leave, and finally
//! calendar overlap against other accepted leaves. Decisions are taken by
//! a chef of the employee's exact department and are final.

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use hr_auth::{capabilities, Action, Principal};
use hr_core::{parse_date, HrError, HrResult};
use hr_models::{LeaveRequest, LeaveStatus, LeaveType, Role};
use hr_scope::ScopeResolver;

use crate::entity_id;
use crate::notify::Notifier;
use crate::store::Store;

/// Submission input. Dates arrive as raw strings so that presence and
/// format failures stay distinguishable.
#[derive(Debug, Clone, Default)]
pub struct SubmitLeave {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub leave_type: Option<LeaveType>,
    pub reason: String,
    /// Reference into the external file store.
    pub attachment: Option<String>,
}

pub struct LeaveService {
    store: Arc<dyn Store>,
    notifier: Notifier,
}

impl LeaveService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        let notifier = Notifier::new(store.clone());
        Self { store, notifier }
    }

    /// Employee submits a leave request.
    pub async fn submit(
        &self,
        principal: &Principal,
        params: SubmitLeave,
        today: NaiveDate,
    ) -> HrResult<LeaveRequest> {
        capabilities::require(principal, Action::SubmitLeave)?;

        let resolver = ScopeResolver::new(self.store.as_ref());
        let employee = resolver
            .own_employee(principal)
            .await?
            .ok_or_else(|| HrError::validation("employee record not found"))?;
        let employee_id = entity_id(&employee, "Employee")?;

        // Rule 1: dates present, parseable, end >= start
        let (start, end) = match (&params.start_date, &params.end_date) {
            (Some(s), Some(e)) if !s.is_empty() && !e.is_empty() => (parse_date(s)?, parse_date(e)?),
            _ => return Err(HrError::validation("start_date and end_date are required")),
        };
        if end < start {
            return Err(HrError::validation(
                "end_date must be the same or after start_date",
            ));
        }

        // Rule 2: sick leave requires an attachment
        let leave_type = params.leave_type.unwrap_or(LeaveType::Annual);
        if leave_type == LeaveType::Sick && params.attachment.is_none() {
            return Err(HrError::validation("attachment required for sick leave"));
        }

        // Rules 3 and 4: any pending request blocks, as does an accepted
        // leave still in effect today (unconditionally, not an overlap test)
        let existing = self.store.leaves_for_employee(employee_id).await?;
        let blocked = existing.iter().any(|l| l.status == LeaveStatus::Pending)
            || existing.iter().any(|l| l.is_ongoing(today));
        if blocked {
            return Err(HrError::conflict(
                "You can't submit a new leave request while you have a pending request or an ongoing approved leave.",
            ));
        }

        // Rule 5: calendar overlap against remaining accepted leaves
        let overlapping = existing
            .iter()
            .any(|l| l.status == LeaveStatus::Accepted && l.overlaps(start, end));
        if overlapping {
            return Err(HrError::conflict(
                "requested dates overlap an approved leave",
            ));
        }

        let leave = self
            .store
            .insert_leave(LeaveRequest {
                id: None,
                employee_id,
                start_date: start,
                end_date: end,
                leave_type,
                reason: params.reason,
                attachment: params.attachment,
                status: LeaveStatus::Pending,
                chef_comment: String::new(),
                decided_by: None,
                decided_at: None,
                created_at: None,
            })
            .await?;

        self.notify_department_chefs(&employee.email, employee.department_id, |name| {
            (
                "New leave request".to_string(),
                format!("{name} requested leave from {start} to {end}."),
            )
        })
        .await?;

        Ok(leave)
    }

    /// Chef approves or rejects a pending request of their own department.
    pub async fn decide(
        &self,
        principal: &Principal,
        leave_id: i64,
        approve: bool,
        comment: String,
        now: DateTime<Utc>,
    ) -> HrResult<LeaveRequest> {
        capabilities::require(principal, Action::DecideLeave)?;

        let mut leave = self
            .store
            .leave_by_id(leave_id)
            .await?
            .ok_or_else(|| HrError::not_found("LeaveRequest", leave_id))?;

        if leave.status != LeaveStatus::Pending {
            return Err(HrError::conflict("leave not pending"));
        }

        let resolver = ScopeResolver::new(self.store.as_ref());
        let chef = resolver.chef_employee(principal).await?;

        let employee = self
            .store
            .employee_by_id(leave.employee_id)
            .await?
            .ok_or_else(|| HrError::not_found("Employee", leave.employee_id))?;
        if employee.department_id != chef.department_id {
            return Err(HrError::forbidden(
                "cannot decide leave outside your department",
            ));
        }

        leave.status = if approve {
            LeaveStatus::Accepted
        } else {
            LeaveStatus::Refused
        };
        leave.chef_comment = comment;
        leave.decided_by = Some(principal.user_id);
        leave.decided_at = Some(now);
        self.store.update_leave(&leave).await?;

        // notify the employee's user account, matched by email; a missing
        // account is tolerated
        if let Some(user) = self.store.user_by_email(&employee.email).await? {
            let label = if approve { "approved" } else { "rejected" };
            self.notifier
                .notify(
                    entity_id(&user, "User")?,
                    format!("Leave {label}"),
                    format!(
                        "Your leave request from {} to {} has been {label}.",
                        leave.start_date, leave.end_date
                    ),
                )
                .await?;
        }

        Ok(leave)
    }

    /// The caller's own requests, newest first.
    pub async fn my_leaves(&self, principal: &Principal) -> HrResult<Vec<LeaveRequest>> {
        capabilities::require(principal, Action::SubmitLeave)?;
        let resolver = ScopeResolver::new(self.store.as_ref());
        let Some(employee) = resolver.own_employee(principal).await? else {
            return Ok(Vec::new());
        };
        self.store
            .leaves_for_employee(entity_id(&employee, "Employee")?)
            .await
    }

    /// All requests of the chef's department (history and pending),
    /// newest first.
    pub async fn department_leaves(&self, principal: &Principal) -> HrResult<Vec<LeaveRequest>> {
        capabilities::require(principal, Action::ListDepartmentLeaves)?;
        let resolver = ScopeResolver::new(self.store.as_ref());
        let chef = resolver.chef_employee(principal).await?;

        let employees = self
            .store
            .employees_in_department(chef.department_id)
            .await?;
        let ids: Vec<i64> = employees.iter().filter_map(|e| e.id).collect();
        self.store.leaves_for_employees(&ids).await
    }

    /// Notify every CHEF user whose employee record is in the department.
    /// The submitter is matched by email, so a chef submitting leave does
    /// not notify themselves unless another chef shares the department.
    async fn notify_department_chefs<F>(
        &self,
        submitter_email: &str,
        department_id: i64,
        message_for: F,
    ) -> HrResult<()>
    where
        F: Fn(&str) -> (String, String),
    {
        let submitter = self
            .store
            .employee_by_email(submitter_email)
            .await?
            .map(|e| e.full_name())
            .unwrap_or_default();

        let department_emails: Vec<String> = self
            .store
            .employees_in_department(department_id)
            .await?
            .into_iter()
            .map(|e| e.email)
            .collect();

        for chef_user in self.store.users_by_role(Role::Chef).await? {
            if department_emails.iter().any(|e| e == &chef_user.email) {
                let (title, message) = message_for(&submitter);
                self.notifier
                    .notify(entity_id(&chef_user, "User")?, title, message)
                    .await?;
            }
        }
        Ok(())
    }
}
