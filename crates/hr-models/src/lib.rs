//! # hr-models
//!
//! Domain entities for the HR backend. Plain data structs with serde
//! derives; state enums carry their legal-transition logic as methods.

pub mod attendance;
pub mod department;
pub mod discipline;
pub mod document;
pub mod employee;
pub mod leave;
pub mod notification;
pub mod role;
pub mod task;
pub mod user;

pub use attendance::{Attendance, AttendanceState};
pub use department::Department;
pub use discipline::{AbsenceWarning, DisciplineFlag, ESCALATION_THRESHOLD};
pub use document::{
    Document, DocumentAction, DocumentCategory, DocumentHistory, DocumentStatus, DocumentType,
};
pub use employee::Employee;
pub use leave::{LeaveRequest, LeaveStatus, LeaveType};
pub use notification::Notification;
pub use role::Role;
pub use task::{Task, TaskStatus};
pub use user::User;
