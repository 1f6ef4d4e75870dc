//! # hr-services
//!
//! Business workflows of the HR backend: attendance, leave, discipline,
//! documents, tasks, notifications and reporting. Services are stateless
//! objects holding a store handle; each request-scoped call takes the
//! authenticated principal and the relevant clock values explicitly.
//!
//! The store seam is a set of async traits (one per entity family) with a
//! Postgres implementation in `hr-db` and an in-memory implementation here
//! for development and tests.

pub mod attendance;
pub mod discipline;
pub mod documents;
pub mod employees;
pub mod leaves;
pub mod notify;
pub mod reports;
pub mod store;
pub mod tasks;

pub use attendance::AttendanceService;
pub use discipline::DisciplineService;
pub use documents::DocumentService;
pub use employees::EmployeeService;
pub use leaves::LeaveService;
pub use notify::Notifier;
pub use reports::ReportService;
pub use store::{MemoryStore, Store};
pub use tasks::TaskService;

use hr_core::traits::{Id, Identifiable};
use hr_core::{HrError, HrResult};

/// Id of a persisted entity; an unpersisted one at this point is a bug in
/// the store implementation.
pub(crate) fn entity_id<T: Identifiable>(entity: &T, name: &'static str) -> HrResult<Id> {
    entity
        .id()
        .ok_or_else(|| HrError::Internal(format!("{name} row has no id")))
}
