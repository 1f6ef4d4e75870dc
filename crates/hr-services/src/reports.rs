//! Read-side reporting: scoped counts over a date range.
//!
//! Pure aggregation over the other families' query predicates; creates no
//! state. The range defaults to the current calendar month. A chef with no
//! employee record is scoped to zero rather than rejected.

use std::sync::Arc;

use chrono::NaiveDate;
use hr_auth::{capabilities, Action, Principal};
use hr_core::{DateRange, HrResult};
use hr_models::{DocumentStatus, LeaveStatus};
use hr_scope::{Scope, ScopeResolver};
use serde::Serialize;

use crate::store::Store;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ReportSummary {
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub employees: usize,
    pub attendance_days: usize,
    /// One warning per detected absence, so this doubles as the absence count.
    pub warnings: usize,
    pub discipline_flags: usize,
    pub leaves_pending: usize,
    pub leaves_accepted: usize,
    pub leaves_refused: usize,
    pub documents_created: usize,
    pub documents_validated: usize,
}

pub struct ReportService {
    store: Arc<dyn Store>,
}

impl ReportService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub async fn summary(
        &self,
        principal: &Principal,
        from: Option<&str>,
        to: Option<&str>,
        today: NaiveDate,
    ) -> HrResult<ReportSummary> {
        capabilities::require(principal, Action::ViewReports)?;

        let range = DateRange::resolve(from, to, today)?;

        let resolver = ScopeResolver::new(self.store.as_ref());
        let scope = resolver.resolve_tolerant(principal).await?;
        let employee_ids = self.scoped_employee_ids(&scope).await?;

        // Global passes None so the store skips the id filter entirely.
        let filter: Option<&[i64]> = match scope {
            Scope::Global => None,
            _ => Some(employee_ids.as_slice()),
        };

        let attendance = self.store.attendance_in_range(filter, range).await?;
        let warnings = self.store.warnings_in_range(filter, range).await?;
        let flags = self.store.flags_in_range(filter, range).await?;
        let leaves = self.store.leaves_starting_in_range(filter, range).await?;

        let mut leaves_pending = 0;
        let mut leaves_accepted = 0;
        let mut leaves_refused = 0;
        for leave in &leaves {
            match leave.status {
                LeaveStatus::Pending => leaves_pending += 1,
                LeaveStatus::Accepted => leaves_accepted += 1,
                LeaveStatus::Refused => leaves_refused += 1,
            }
        }

        let documents = self.scoped_documents(principal, &scope, range).await?;
        let documents_validated = documents
            .iter()
            .filter(|d| d.status == DocumentStatus::Validated)
            .count();

        Ok(ReportSummary {
            from: range.from,
            to: range.to,
            employees: employee_ids.len(),
            attendance_days: attendance.len(),
            warnings: warnings.len(),
            discipline_flags: flags.len(),
            leaves_pending,
            leaves_accepted,
            leaves_refused,
            documents_created: documents.len(),
            documents_validated,
        })
    }

    async fn scoped_employee_ids(&self, scope: &Scope) -> HrResult<Vec<i64>> {
        let ids = match scope {
            Scope::Global => self
                .store
                .employees_all()
                .await?
                .iter()
                .filter_map(|e| e.id)
                .collect(),
            Scope::Department(dept) => self
                .store
                .employees_in_department(*dept)
                .await?
                .iter()
                .filter_map(|e| e.id)
                .collect(),
            Scope::SelfOnly(id) => vec![*id],
            Scope::None => Vec::new(),
        };
        Ok(ids)
    }

    async fn scoped_documents(
        &self,
        principal: &Principal,
        scope: &Scope,
        range: DateRange,
    ) -> HrResult<Vec<hr_models::Document>> {
        let in_range = self.store.documents_created_in_range(range).await?;
        let filtered = match scope {
            Scope::Global => in_range,
            Scope::Department(dept) => in_range
                .into_iter()
                .filter(|d| {
                    d.source_department_id == *dept || d.target_department_id == Some(*dept)
                })
                .collect(),
            Scope::SelfOnly(_) => in_range
                .into_iter()
                .filter(|d| d.created_by == Some(principal.user_id))
                .collect(),
            Scope::None => Vec::new(),
        };
        Ok(filtered)
    }
}
