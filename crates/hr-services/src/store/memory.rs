//! In-memory store for development and testing.
//!
//! A single `RwLock` over all collections; the atomic operations hold the
//! write lock across their read-modify-write, which gives the same
//! guarantees the Postgres store gets from transactions and unique
//! constraints. Ids are monotonic, so "newest first" is id-descending.

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime, Utc};
use tokio::sync::RwLock;

use hr_core::traits::Id;
use hr_core::{DateRange, HrError, HrResult};
use hr_models::{
    AbsenceWarning, Attendance, Department, DisciplineFlag, Document, DocumentCategory,
    DocumentHistory, DocumentType, Employee, LeaveRequest, Notification, Role, Task, User,
};
use hr_scope::EmployeeDirectory;

use super::{
    AttendanceStore, DepartmentStore, DisciplineStore, DocumentStore, EmployeeStore, LeaveStore,
    NotificationStore, TaskStore, UserStore,
};

#[derive(Default)]
struct Inner {
    users: Vec<User>,
    departments: Vec<Department>,
    employees: Vec<Employee>,
    tasks: Vec<Task>,
    attendance: Vec<Attendance>,
    leaves: Vec<LeaveRequest>,
    warnings: Vec<AbsenceWarning>,
    flags: Vec<DisciplineFlag>,
    doc_types: Vec<DocumentType>,
    documents: Vec<Document>,
    history: Vec<DocumentHistory>,
    notifications: Vec<Notification>,
    next_id: Id,
}

impl Inner {
    fn next_id(&mut self) -> Id {
        self.next_id += 1;
        self.next_id
    }
}

pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner::default()),
        }
    }

    // Seeding helpers used by the server bootstrap and tests.

    pub async fn add_department(&self, name: &str) -> Id {
        let mut inner = self.inner.write().await;
        let id = inner.next_id();
        inner.departments.push(Department {
            id: Some(id),
            name: name.to_string(),
        });
        id
    }

    pub async fn add_user(&self, email: &str, role: Role) -> Id {
        let mut inner = self.inner.write().await;
        let id = inner.next_id();
        inner.users.push(User {
            id: Some(id),
            email: email.to_string(),
            password_hash: None,
            role,
            created_at: Some(Utc::now()),
        });
        id
    }

    pub async fn add_employee(
        &self,
        first_name: &str,
        last_name: &str,
        email: &str,
        department_id: Id,
        attendance_pin: Option<&str>,
    ) -> Id {
        let mut inner = self.inner.write().await;
        let id = inner.next_id();
        inner.employees.push(Employee {
            id: Some(id),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            email: email.to_string(),
            hired_at: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap_or_default(),
            department_id,
            salary: 3000.0,
            attendance_pin: attendance_pin.map(str::to_string),
        });
        id
    }

    pub async fn add_doc_type(&self, name: &str, category: DocumentCategory) -> Id {
        let mut inner = self.inner.write().await;
        let id = inner.next_id();
        inner.doc_types.push(DocumentType {
            id: Some(id),
            name: name.to_string(),
            category,
        });
        id
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn user_by_id(&self, id: Id) -> HrResult<Option<User>> {
        let inner = self.inner.read().await;
        Ok(inner.users.iter().find(|u| u.id == Some(id)).cloned())
    }

    async fn user_by_email(&self, email: &str) -> HrResult<Option<User>> {
        let inner = self.inner.read().await;
        Ok(inner.users.iter().find(|u| u.email == email).cloned())
    }

    async fn users_by_role(&self, role: Role) -> HrResult<Vec<User>> {
        let inner = self.inner.read().await;
        Ok(inner
            .users
            .iter()
            .filter(|u| u.role == role)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl DepartmentStore for MemoryStore {
    async fn department_by_id(&self, id: Id) -> HrResult<Option<Department>> {
        let inner = self.inner.read().await;
        Ok(inner.departments.iter().find(|d| d.id == Some(id)).cloned())
    }
}

#[async_trait]
impl EmployeeDirectory for MemoryStore {
    async fn employee_by_email(&self, email: &str) -> HrResult<Option<Employee>> {
        let inner = self.inner.read().await;
        Ok(inner.employees.iter().find(|e| e.email == email).cloned())
    }
}

#[async_trait]
impl EmployeeStore for MemoryStore {
    async fn employee_by_id(&self, id: Id) -> HrResult<Option<Employee>> {
        let inner = self.inner.read().await;
        Ok(inner.employees.iter().find(|e| e.id == Some(id)).cloned())
    }

    async fn employees_all(&self) -> HrResult<Vec<Employee>> {
        let inner = self.inner.read().await;
        let mut employees = inner.employees.clone();
        employees.sort_by_key(|e| e.id);
        Ok(employees)
    }

    async fn employees_in_department(&self, department_id: Id) -> HrResult<Vec<Employee>> {
        let inner = self.inner.read().await;
        let mut employees: Vec<_> = inner
            .employees
            .iter()
            .filter(|e| e.department_id == department_id)
            .cloned()
            .collect();
        employees.sort_by_key(|e| e.id);
        Ok(employees)
    }
}

#[async_trait]
impl TaskStore for MemoryStore {
    async fn insert_task(&self, mut task: Task) -> HrResult<Task> {
        let mut inner = self.inner.write().await;
        task.id = Some(inner.next_id());
        if task.created_at.is_none() {
            task.created_at = Some(Utc::now());
        }
        inner.tasks.push(task.clone());
        Ok(task)
    }

    async fn task_by_id(&self, id: Id) -> HrResult<Option<Task>> {
        let inner = self.inner.read().await;
        Ok(inner.tasks.iter().find(|t| t.id == Some(id)).cloned())
    }

    async fn update_task(&self, task: &Task) -> HrResult<()> {
        let mut inner = self.inner.write().await;
        match inner.tasks.iter_mut().find(|t| t.id == task.id) {
            Some(existing) => {
                *existing = task.clone();
                Ok(())
            }
            None => Err(HrError::not_found("Task", task.id.unwrap_or(0))),
        }
    }

    async fn tasks_for_employee(&self, employee_id: Id) -> HrResult<Vec<Task>> {
        let inner = self.inner.read().await;
        let mut tasks: Vec<_> = inner
            .tasks
            .iter()
            .filter(|t| t.assigned_to == employee_id)
            .cloned()
            .collect();
        tasks.sort_by_key(|t| t.id);
        Ok(tasks)
    }
}

#[async_trait]
impl AttendanceStore for MemoryStore {
    async fn check_in(
        &self,
        employee_id: Id,
        date: NaiveDate,
        time: NaiveTime,
    ) -> HrResult<Attendance> {
        let mut inner = self.inner.write().await;
        if let Some(existing) = inner
            .attendance
            .iter_mut()
            .find(|a| a.employee_id == employee_id && a.date == date)
        {
            if existing.check_in_time.is_some() {
                return Err(HrError::conflict("already checked in"));
            }
            existing.check_in_time = Some(time);
            return Ok(existing.clone());
        }
        let id = inner.next_id();
        let row = Attendance {
            id: Some(id),
            employee_id,
            date,
            check_in_time: Some(time),
            check_out_time: None,
            created_at: Some(Utc::now()),
        };
        inner.attendance.push(row.clone());
        Ok(row)
    }

    async fn check_out(
        &self,
        employee_id: Id,
        date: NaiveDate,
        time: NaiveTime,
    ) -> HrResult<Attendance> {
        let mut inner = self.inner.write().await;
        let row = inner
            .attendance
            .iter_mut()
            .find(|a| a.employee_id == employee_id && a.date == date);
        match row {
            Some(row) if row.check_in_time.is_some() => {
                if row.check_out_time.is_some() {
                    return Err(HrError::conflict("already checked out"));
                }
                row.check_out_time = Some(time);
                Ok(row.clone())
            }
            _ => Err(HrError::conflict("no check-in found for today")),
        }
    }

    async fn attendance_in_range(
        &self,
        employee_ids: Option<&[Id]>,
        range: DateRange,
    ) -> HrResult<Vec<Attendance>> {
        let inner = self.inner.read().await;
        let mut rows: Vec<_> = inner
            .attendance
            .iter()
            .filter(|a| range.contains(a.date))
            .filter(|a| matches_ids(employee_ids, a.employee_id))
            .cloned()
            .collect();
        rows.sort_by_key(|a| a.date);
        Ok(rows)
    }

    async fn employee_ids_present_on(&self, date: NaiveDate) -> HrResult<Vec<Id>> {
        let inner = self.inner.read().await;
        Ok(inner
            .attendance
            .iter()
            .filter(|a| a.date == date)
            .map(|a| a.employee_id)
            .collect())
    }
}

#[async_trait]
impl LeaveStore for MemoryStore {
    async fn insert_leave(&self, mut leave: LeaveRequest) -> HrResult<LeaveRequest> {
        let mut inner = self.inner.write().await;
        leave.id = Some(inner.next_id());
        if leave.created_at.is_none() {
            leave.created_at = Some(Utc::now());
        }
        inner.leaves.push(leave.clone());
        Ok(leave)
    }

    async fn leave_by_id(&self, id: Id) -> HrResult<Option<LeaveRequest>> {
        let inner = self.inner.read().await;
        Ok(inner.leaves.iter().find(|l| l.id == Some(id)).cloned())
    }

    async fn update_leave(&self, leave: &LeaveRequest) -> HrResult<()> {
        let mut inner = self.inner.write().await;
        match inner.leaves.iter_mut().find(|l| l.id == leave.id) {
            Some(existing) => {
                *existing = leave.clone();
                Ok(())
            }
            None => Err(HrError::not_found("LeaveRequest", leave.id.unwrap_or(0))),
        }
    }

    async fn leaves_for_employee(&self, employee_id: Id) -> HrResult<Vec<LeaveRequest>> {
        self.leaves_for_employees(&[employee_id]).await
    }

    async fn leaves_for_employees(&self, employee_ids: &[Id]) -> HrResult<Vec<LeaveRequest>> {
        let inner = self.inner.read().await;
        let mut leaves: Vec<_> = inner
            .leaves
            .iter()
            .filter(|l| employee_ids.contains(&l.employee_id))
            .cloned()
            .collect();
        leaves.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(leaves)
    }

    async fn employee_ids_on_accepted_leave(&self, date: NaiveDate) -> HrResult<Vec<Id>> {
        let inner = self.inner.read().await;
        Ok(inner
            .leaves
            .iter()
            .filter(|l| {
                l.status == hr_models::LeaveStatus::Accepted
                    && l.start_date <= date
                    && l.end_date >= date
            })
            .map(|l| l.employee_id)
            .collect())
    }

    async fn leaves_starting_in_range(
        &self,
        employee_ids: Option<&[Id]>,
        range: DateRange,
    ) -> HrResult<Vec<LeaveRequest>> {
        let inner = self.inner.read().await;
        Ok(inner
            .leaves
            .iter()
            .filter(|l| range.contains(l.start_date))
            .filter(|l| matches_ids(employee_ids, l.employee_id))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl DisciplineStore for MemoryStore {
    async fn insert_warning(&self, mut warning: AbsenceWarning) -> HrResult<AbsenceWarning> {
        let mut inner = self.inner.write().await;
        let duplicate = inner
            .warnings
            .iter()
            .any(|w| w.employee_id == warning.employee_id && w.date == warning.date);
        if duplicate {
            return Err(HrError::conflict(
                "warning for this employee and date already exists",
            ));
        }
        warning.id = Some(inner.next_id());
        if warning.issued_at.is_none() {
            warning.issued_at = Some(Utc::now());
        }
        inner.warnings.push(warning.clone());
        Ok(warning)
    }

    async fn increment_flag(&self, employee_id: Id, month: NaiveDate) -> HrResult<DisciplineFlag> {
        let mut inner = self.inner.write().await;
        if let Some(flag) = inner
            .flags
            .iter_mut()
            .find(|f| f.employee_id == employee_id && f.month == month)
        {
            flag.warning_count += 1;
            return Ok(flag.clone());
        }
        let id = inner.next_id();
        let flag = DisciplineFlag {
            id: Some(id),
            employee_id,
            month,
            warning_count: 1,
        };
        inner.flags.push(flag.clone());
        Ok(flag)
    }

    async fn flags_for_month(&self, month: NaiveDate) -> HrResult<Vec<DisciplineFlag>> {
        let inner = self.inner.read().await;
        Ok(inner
            .flags
            .iter()
            .filter(|f| f.month == month)
            .cloned()
            .collect())
    }

    async fn warnings_in_range(
        &self,
        employee_ids: Option<&[Id]>,
        range: DateRange,
    ) -> HrResult<Vec<AbsenceWarning>> {
        let inner = self.inner.read().await;
        Ok(inner
            .warnings
            .iter()
            .filter(|w| range.contains(w.date))
            .filter(|w| matches_ids(employee_ids, w.employee_id))
            .cloned()
            .collect())
    }

    async fn flags_in_range(
        &self,
        employee_ids: Option<&[Id]>,
        range: DateRange,
    ) -> HrResult<Vec<DisciplineFlag>> {
        let inner = self.inner.read().await;
        Ok(inner
            .flags
            .iter()
            .filter(|f| range.contains(f.month))
            .filter(|f| matches_ids(employee_ids, f.employee_id))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn doc_type_by_id(&self, id: Id) -> HrResult<Option<DocumentType>> {
        let inner = self.inner.read().await;
        Ok(inner.doc_types.iter().find(|t| t.id == Some(id)).cloned())
    }

    async fn doc_types_all(&self) -> HrResult<Vec<DocumentType>> {
        let inner = self.inner.read().await;
        Ok(inner.doc_types.clone())
    }

    async fn insert_document(&self, mut document: Document) -> HrResult<Document> {
        let mut inner = self.inner.write().await;
        document.id = Some(inner.next_id());
        if document.created_at.is_none() {
            document.created_at = Some(Utc::now());
        }
        inner.documents.push(document.clone());
        Ok(document)
    }

    async fn document_by_id(&self, id: Id) -> HrResult<Option<Document>> {
        let inner = self.inner.read().await;
        Ok(inner.documents.iter().find(|d| d.id == Some(id)).cloned())
    }

    async fn update_document(&self, document: &Document) -> HrResult<()> {
        let mut inner = self.inner.write().await;
        match inner.documents.iter_mut().find(|d| d.id == document.id) {
            Some(existing) => {
                *existing = document.clone();
                Ok(())
            }
            None => Err(HrError::not_found("Document", document.id.unwrap_or(0))),
        }
    }

    async fn documents_all(&self) -> HrResult<Vec<Document>> {
        let inner = self.inner.read().await;
        let mut documents = inner.documents.clone();
        documents.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(documents)
    }

    async fn documents_created_by(&self, user_id: Id) -> HrResult<Vec<Document>> {
        let inner = self.inner.read().await;
        let mut documents: Vec<_> = inner
            .documents
            .iter()
            .filter(|d| d.created_by == Some(user_id))
            .cloned()
            .collect();
        documents.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(documents)
    }

    async fn documents_for_department(&self, department_id: Id) -> HrResult<Vec<Document>> {
        let inner = self.inner.read().await;
        let mut documents: Vec<_> = inner
            .documents
            .iter()
            .filter(|d| {
                d.source_department_id == department_id
                    || d.target_department_id == Some(department_id)
            })
            .cloned()
            .collect();
        documents.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(documents)
    }

    async fn documents_created_in_range(&self, range: DateRange) -> HrResult<Vec<Document>> {
        let inner = self.inner.read().await;
        let mut documents: Vec<_> = inner
            .documents
            .iter()
            .filter(|d| {
                d.created_at
                    .map(|at| range.contains(at.date_naive()))
                    .unwrap_or(false)
            })
            .cloned()
            .collect();
        documents.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(documents)
    }

    async fn insert_history(&self, mut entry: DocumentHistory) -> HrResult<DocumentHistory> {
        let mut inner = self.inner.write().await;
        entry.id = Some(inner.next_id());
        if entry.created_at.is_none() {
            entry.created_at = Some(Utc::now());
        }
        inner.history.push(entry.clone());
        Ok(entry)
    }

    async fn history_by_id(&self, id: Id) -> HrResult<Option<DocumentHistory>> {
        let inner = self.inner.read().await;
        Ok(inner.history.iter().find(|h| h.id == Some(id)).cloned())
    }

    async fn history_for_document(&self, document_id: Id) -> HrResult<Vec<DocumentHistory>> {
        let inner = self.inner.read().await;
        let mut entries: Vec<_> = inner
            .history
            .iter()
            .filter(|h| h.document_id == document_id)
            .cloned()
            .collect();
        entries.sort_by_key(|h| h.id);
        Ok(entries)
    }
}

#[async_trait]
impl NotificationStore for MemoryStore {
    async fn insert_notification(&self, mut notification: Notification) -> HrResult<Notification> {
        let mut inner = self.inner.write().await;
        notification.id = Some(inner.next_id());
        if notification.created_at.is_none() {
            notification.created_at = Some(Utc::now());
        }
        inner.notifications.push(notification.clone());
        Ok(notification)
    }

    async fn notification_by_id(&self, id: Id) -> HrResult<Option<Notification>> {
        let inner = self.inner.read().await;
        Ok(inner
            .notifications
            .iter()
            .find(|n| n.id == Some(id))
            .cloned())
    }

    async fn notifications_for_user(&self, user_id: Id) -> HrResult<Vec<Notification>> {
        let inner = self.inner.read().await;
        let mut notifications: Vec<_> = inner
            .notifications
            .iter()
            .filter(|n| n.user_id == user_id)
            .cloned()
            .collect();
        notifications.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(notifications)
    }

    async fn mark_notification_read(&self, id: Id) -> HrResult<()> {
        let mut inner = self.inner.write().await;
        match inner.notifications.iter_mut().find(|n| n.id == Some(id)) {
            Some(notification) => {
                notification.is_read = true;
                Ok(())
            }
            None => Err(HrError::not_found("Notification", id)),
        }
    }
}

fn matches_ids(filter: Option<&[Id]>, id: Id) -> bool {
    match filter {
        Some(ids) => ids.contains(&id),
        None => true,
    }
}
