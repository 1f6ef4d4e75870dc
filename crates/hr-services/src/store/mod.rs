//! Store abstraction.
//!
//! One async trait per entity family, plus the [`Store`] supertrait the
//! services program against. Concurrency-sensitive operations (check-in,
//! check-out, warning insertion, flag increment) are store methods so each
//! backend can make them atomic: the Postgres store runs them inside a
//! transaction with unique constraints as the authoritative guard, the
//! in-memory store holds its write lock across the read-modify-write.

mod memory;

pub use memory::MemoryStore;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use hr_core::traits::Id;
use hr_core::{DateRange, HrResult};
use hr_models::{
    AbsenceWarning, Attendance, Department, DisciplineFlag, Document, DocumentHistory,
    DocumentType, Employee, LeaveRequest, Notification, Role, Task, User,
};
use hr_scope::EmployeeDirectory;

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn user_by_id(&self, id: Id) -> HrResult<Option<User>>;
    async fn user_by_email(&self, email: &str) -> HrResult<Option<User>>;
    async fn users_by_role(&self, role: Role) -> HrResult<Vec<User>>;
}

#[async_trait]
pub trait DepartmentStore: Send + Sync {
    async fn department_by_id(&self, id: Id) -> HrResult<Option<Department>>;
}

/// Extends the scope resolver's email-lookup seam with the remaining
/// employee queries.
#[async_trait]
pub trait EmployeeStore: EmployeeDirectory {
    async fn employee_by_id(&self, id: Id) -> HrResult<Option<Employee>>;
    /// All employees, ordered by id.
    async fn employees_all(&self) -> HrResult<Vec<Employee>>;
    /// Employees of one department, ordered by id.
    async fn employees_in_department(&self, department_id: Id) -> HrResult<Vec<Employee>>;
}

#[async_trait]
pub trait TaskStore: Send + Sync {
    async fn insert_task(&self, task: Task) -> HrResult<Task>;
    async fn task_by_id(&self, id: Id) -> HrResult<Option<Task>>;
    async fn update_task(&self, task: &Task) -> HrResult<()>;
    /// Tasks assigned to one employee, ordered by id.
    async fn tasks_for_employee(&self, employee_id: Id) -> HrResult<Vec<Task>>;
}

#[async_trait]
pub trait AttendanceStore: Send + Sync {
    /// Atomic get-or-create of the (employee, date) row plus check-in.
    /// Fails with `Conflict` when a check-in already exists for the day.
    async fn check_in(
        &self,
        employee_id: Id,
        date: NaiveDate,
        time: NaiveTime,
    ) -> HrResult<Attendance>;

    /// Atomic check-out of today's row. Fails with `Conflict` when no
    /// check-in exists or the row is already checked out.
    async fn check_out(
        &self,
        employee_id: Id,
        date: NaiveDate,
        time: NaiveTime,
    ) -> HrResult<Attendance>;

    /// Attendance rows in the range, ordered by date, optionally limited
    /// to the given employees.
    async fn attendance_in_range(
        &self,
        employee_ids: Option<&[Id]>,
        range: DateRange,
    ) -> HrResult<Vec<Attendance>>;

    /// Ids of employees having any attendance row on `date`. A row still in
    /// CheckedIn counts as present.
    async fn employee_ids_present_on(&self, date: NaiveDate) -> HrResult<Vec<Id>>;
}

#[async_trait]
pub trait LeaveStore: Send + Sync {
    async fn insert_leave(&self, leave: LeaveRequest) -> HrResult<LeaveRequest>;
    async fn leave_by_id(&self, id: Id) -> HrResult<Option<LeaveRequest>>;
    async fn update_leave(&self, leave: &LeaveRequest) -> HrResult<()>;
    /// One employee's requests, newest first.
    async fn leaves_for_employee(&self, employee_id: Id) -> HrResult<Vec<LeaveRequest>>;
    /// Requests of a set of employees, newest first.
    async fn leaves_for_employees(&self, employee_ids: &[Id]) -> HrResult<Vec<LeaveRequest>>;
    /// Ids of employees covered by an ACCEPTED request on `date`.
    async fn employee_ids_on_accepted_leave(&self, date: NaiveDate) -> HrResult<Vec<Id>>;
    /// Requests whose start date falls inside the range, optionally limited
    /// to the given employees.
    async fn leaves_starting_in_range(
        &self,
        employee_ids: Option<&[Id]>,
        range: DateRange,
    ) -> HrResult<Vec<LeaveRequest>>;
}

#[async_trait]
pub trait DisciplineStore: Send + Sync {
    /// Insert a warning; the (employee, date) unique constraint is the
    /// authoritative duplicate guard and violations map to `Conflict`.
    async fn insert_warning(&self, warning: AbsenceWarning) -> HrResult<AbsenceWarning>;

    /// Atomic get-or-create + increment of the per-(employee, month)
    /// counter. Returns the flag with its new count.
    async fn increment_flag(&self, employee_id: Id, month: NaiveDate) -> HrResult<DisciplineFlag>;

    /// All flags keyed on the given month (first day of month).
    async fn flags_for_month(&self, month: NaiveDate) -> HrResult<Vec<DisciplineFlag>>;

    async fn warnings_in_range(
        &self,
        employee_ids: Option<&[Id]>,
        range: DateRange,
    ) -> HrResult<Vec<AbsenceWarning>>;

    async fn flags_in_range(
        &self,
        employee_ids: Option<&[Id]>,
        range: DateRange,
    ) -> HrResult<Vec<DisciplineFlag>>;
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn doc_type_by_id(&self, id: Id) -> HrResult<Option<DocumentType>>;
    async fn doc_types_all(&self) -> HrResult<Vec<DocumentType>>;
    async fn insert_document(&self, document: Document) -> HrResult<Document>;
    async fn document_by_id(&self, id: Id) -> HrResult<Option<Document>>;
    async fn update_document(&self, document: &Document) -> HrResult<()>;
    /// All documents, newest first.
    async fn documents_all(&self) -> HrResult<Vec<Document>>;
    async fn documents_created_by(&self, user_id: Id) -> HrResult<Vec<Document>>;
    /// Documents with the department as source or target, newest first.
    async fn documents_for_department(&self, department_id: Id) -> HrResult<Vec<Document>>;
    /// Documents created inside the range, newest first.
    async fn documents_created_in_range(&self, range: DateRange) -> HrResult<Vec<Document>>;

    /// Append an audit row. History rows are write-once: no update or
    /// delete operation exists.
    async fn insert_history(&self, entry: DocumentHistory) -> HrResult<DocumentHistory>;
    async fn history_by_id(&self, id: Id) -> HrResult<Option<DocumentHistory>>;
    /// A document's audit trail, oldest first.
    async fn history_for_document(&self, document_id: Id) -> HrResult<Vec<DocumentHistory>>;
}

#[async_trait]
pub trait NotificationStore: Send + Sync {
    async fn insert_notification(&self, notification: Notification) -> HrResult<Notification>;
    async fn notification_by_id(&self, id: Id) -> HrResult<Option<Notification>>;
    /// One user's notifications, newest first.
    async fn notifications_for_user(&self, user_id: Id) -> HrResult<Vec<Notification>>;
    async fn mark_notification_read(&self, id: Id) -> HrResult<()>;
}

/// Aggregate store the services program against.
pub trait Store:
    UserStore
    + DepartmentStore
    + EmployeeStore
    + TaskStore
    + AttendanceStore
    + LeaveStore
    + DisciplineStore
    + DocumentStore
    + NotificationStore
{
}

impl<T> Store for T where
    T: UserStore
        + DepartmentStore
        + EmployeeStore
        + TaskStore
        + AttendanceStore
        + LeaveStore
        + DisciplineStore
        + DocumentStore
        + NotificationStore
{
}
