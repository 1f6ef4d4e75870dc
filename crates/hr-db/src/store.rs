//! PostgreSQL implementation of the store traits.
//!
//! Uniqueness constraints are the authoritative guard against duplicate
//! check-ins and warnings; violations translate into `Conflict`, never
//! leak as raw storage errors. Check-in, check-out and the flag counter
//! are single-statement or transactional read-modify-writes.

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use hr_core::traits::Id;
use hr_core::{DateRange, HrError, HrResult};
use hr_models::{
    AbsenceWarning, Attendance, Department, DisciplineFlag, Document, DocumentHistory,
    DocumentType, Employee, LeaveRequest, Notification, Role, Task, User,
};
use hr_scope::EmployeeDirectory;
use hr_services::store::{
    AttendanceStore, DepartmentStore, DisciplineStore, DocumentStore, EmployeeStore, LeaveStore,
    NotificationStore, TaskStore, UserStore,
};
use sqlx::PgPool;

use crate::rows::{
    AttendanceRow, DepartmentRow, DocumentRow, DocumentTypeRow, EmployeeRow, FlagRow, HistoryRow,
    LeaveRow, NotificationRow, TaskRow, UserRow, WarningRow,
};

/// Store backed by a PostgreSQL pool.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn db_err(e: sqlx::Error) -> HrError {
    HrError::Database(e.to_string())
}

/// Translate a unique-constraint violation into a domain conflict.
fn conflict_on_unique(e: sqlx::Error, message: &str) -> HrError {
    match e.as_database_error() {
        Some(db) if db.is_unique_violation() => HrError::conflict(message),
        _ => db_err(e),
    }
}

fn ids_param(employee_ids: Option<&[Id]>) -> Option<Vec<Id>> {
    employee_ids.map(|ids| ids.to_vec())
}

const USER_COLUMNS: &str = "id, email, password_hash, role, created_at";
const EMPLOYEE_COLUMNS: &str =
    "id, first_name, last_name, email, hired_at, department_id, salary, attendance_pin";
const TASK_COLUMNS: &str =
    "id, title, description, due_date, status, assigned_to, assigned_by, created_at, completed_at";
const ATTENDANCE_COLUMNS: &str =
    "id, employee_id, date, check_in_time, check_out_time, created_at";
const LEAVE_COLUMNS: &str = "id, employee_id, start_date, end_date, leave_type, reason, \
     attachment, status, chef_comment, decided_by, decided_at, created_at";
const DOCUMENT_COLUMNS: &str = "id, title, doc_type_id, file, source_department_id, \
     target_department_id, created_by, status, sent_at, validated_by, validated_at, created_at";
const HISTORY_COLUMNS: &str =
    "id, document_id, parent_id, action, by_user, note, is_private, created_at";

#[async_trait]
impl UserStore for PgStore {
    async fn user_by_id(&self, id: Id) -> HrResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;
        row.map(UserRow::into_model).transpose()
    }

    async fn user_by_email(&self, email: &str) -> HrResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;
        row.map(UserRow::into_model).transpose()
    }

    async fn users_by_role(&self, role: Role) -> HrResult<Vec<User>> {
        let rows = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE role = $1 ORDER BY id"
        ))
        .bind(role.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;
        rows.into_iter().map(UserRow::into_model).collect()
    }
}

#[async_trait]
impl DepartmentStore for PgStore {
    async fn department_by_id(&self, id: Id) -> HrResult<Option<Department>> {
        let row =
            sqlx::query_as::<_, DepartmentRow>("SELECT id, name FROM departments WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(db_err)?;
        Ok(row.map(Department::from))
    }
}

#[async_trait]
impl EmployeeDirectory for PgStore {
    async fn employee_by_email(&self, email: &str) -> HrResult<Option<Employee>> {
        let row = sqlx::query_as::<_, EmployeeRow>(&format!(
            "SELECT {EMPLOYEE_COLUMNS} FROM employees WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(row.map(Employee::from))
    }
}

#[async_trait]
impl EmployeeStore for PgStore {
    async fn employee_by_id(&self, id: Id) -> HrResult<Option<Employee>> {
        let row = sqlx::query_as::<_, EmployeeRow>(&format!(
            "SELECT {EMPLOYEE_COLUMNS} FROM employees WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(row.map(Employee::from))
    }

    async fn employees_all(&self) -> HrResult<Vec<Employee>> {
        let rows = sqlx::query_as::<_, EmployeeRow>(&format!(
            "SELECT {EMPLOYEE_COLUMNS} FROM employees ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(rows.into_iter().map(Employee::from).collect())
    }

    async fn employees_in_department(&self, department_id: Id) -> HrResult<Vec<Employee>> {
        let rows = sqlx::query_as::<_, EmployeeRow>(&format!(
            "SELECT {EMPLOYEE_COLUMNS} FROM employees WHERE department_id = $1 ORDER BY id"
        ))
        .bind(department_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(rows.into_iter().map(Employee::from).collect())
    }
}

#[async_trait]
impl TaskStore for PgStore {
    async fn insert_task(&self, task: Task) -> HrResult<Task> {
        let row = sqlx::query_as::<_, TaskRow>(&format!(
            "INSERT INTO tasks (title, description, due_date, status, assigned_to, assigned_by) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING {TASK_COLUMNS}"
        ))
        .bind(&task.title)
        .bind(&task.description)
        .bind(task.due_date)
        .bind(task.status.as_str())
        .bind(task.assigned_to)
        .bind(task.assigned_by)
        .fetch_one(&self.pool)
        .await
        .map_err(db_err)?;
        row.into_model()
    }

    async fn task_by_id(&self, id: Id) -> HrResult<Option<Task>> {
        let row = sqlx::query_as::<_, TaskRow>(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;
        row.map(TaskRow::into_model).transpose()
    }

    async fn update_task(&self, task: &Task) -> HrResult<()> {
        sqlx::query(
            "UPDATE tasks SET title = $2, description = $3, due_date = $4, status = $5, \
             completed_at = $6 WHERE id = $1",
        )
        .bind(task.id)
        .bind(&task.title)
        .bind(&task.description)
        .bind(task.due_date)
        .bind(task.status.as_str())
        .bind(task.completed_at)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(())
    }

    async fn tasks_for_employee(&self, employee_id: Id) -> HrResult<Vec<Task>> {
        let rows = sqlx::query_as::<_, TaskRow>(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks WHERE assigned_to = $1 ORDER BY id DESC"
        ))
        .bind(employee_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;
        rows.into_iter().map(TaskRow::into_model).collect()
    }
}

#[async_trait]
impl AttendanceStore for PgStore {
    async fn check_in(
        &self,
        employee_id: Id,
        date: NaiveDate,
        time: NaiveTime,
    ) -> HrResult<Attendance> {
        // Get-or-create and set in one statement; the conditional update
        // leaves an already-checked-in row untouched and returns nothing.
        let row = sqlx::query_as::<_, AttendanceRow>(&format!(
            "INSERT INTO attendance (employee_id, date, check_in_time) VALUES ($1, $2, $3) \
             ON CONFLICT (employee_id, date) DO UPDATE SET check_in_time = EXCLUDED.check_in_time \
             WHERE attendance.check_in_time IS NULL \
             RETURNING {ATTENDANCE_COLUMNS}"
        ))
        .bind(employee_id)
        .bind(date)
        .bind(time)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;
        match row {
            Some(row) => Ok(row.into()),
            None => Err(HrError::conflict("already checked in")),
        }
    }

    async fn check_out(
        &self,
        employee_id: Id,
        date: NaiveDate,
        time: NaiveTime,
    ) -> HrResult<Attendance> {
        let mut tx = self.pool.begin().await.map_err(db_err)?;
        let existing = sqlx::query_as::<_, AttendanceRow>(&format!(
            "SELECT {ATTENDANCE_COLUMNS} FROM attendance \
             WHERE employee_id = $1 AND date = $2 FOR UPDATE"
        ))
        .bind(employee_id)
        .bind(date)
        .fetch_optional(&mut *tx)
        .await
        .map_err(db_err)?;

        let row = match existing {
            Some(row) if row.check_in_time.is_some() => {
                if row.check_out_time.is_some() {
                    return Err(HrError::conflict("already checked out"));
                }
                sqlx::query_as::<_, AttendanceRow>(&format!(
                    "UPDATE attendance SET check_out_time = $2 WHERE id = $1 \
                     RETURNING {ATTENDANCE_COLUMNS}"
                ))
                .bind(row.id)
                .bind(time)
                .fetch_one(&mut *tx)
                .await
                .map_err(db_err)?
            }
            _ => return Err(HrError::conflict("no check-in found for today")),
        };
        tx.commit().await.map_err(db_err)?;
        Ok(row.into())
    }

    async fn attendance_in_range(
        &self,
        employee_ids: Option<&[Id]>,
        range: DateRange,
    ) -> HrResult<Vec<Attendance>> {
        let rows = sqlx::query_as::<_, AttendanceRow>(&format!(
            "SELECT {ATTENDANCE_COLUMNS} FROM attendance \
             WHERE date BETWEEN $1 AND $2 \
             AND ($3::bigint[] IS NULL OR employee_id = ANY($3)) \
             ORDER BY date, employee_id"
        ))
        .bind(range.from)
        .bind(range.to)
        .bind(ids_param(employee_ids))
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(rows.into_iter().map(Attendance::from).collect())
    }

    async fn employee_ids_present_on(&self, date: NaiveDate) -> HrResult<Vec<Id>> {
        sqlx::query_scalar::<_, i64>(
            "SELECT employee_id FROM attendance WHERE date = $1 AND check_in_time IS NOT NULL",
        )
        .bind(date)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)
    }
}

#[async_trait]
impl LeaveStore for PgStore {
    async fn insert_leave(&self, leave: LeaveRequest) -> HrResult<LeaveRequest> {
        let row = sqlx::query_as::<_, LeaveRow>(&format!(
            "INSERT INTO leave_requests (employee_id, start_date, end_date, leave_type, reason, \
             attachment, status, chef_comment) VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {LEAVE_COLUMNS}"
        ))
        .bind(leave.employee_id)
        .bind(leave.start_date)
        .bind(leave.end_date)
        .bind(leave.leave_type.as_str())
        .bind(&leave.reason)
        .bind(&leave.attachment)
        .bind(leave.status.as_str())
        .bind(&leave.chef_comment)
        .fetch_one(&self.pool)
        .await
        .map_err(db_err)?;
        row.into_model()
    }

    async fn leave_by_id(&self, id: Id) -> HrResult<Option<LeaveRequest>> {
        let row = sqlx::query_as::<_, LeaveRow>(&format!(
            "SELECT {LEAVE_COLUMNS} FROM leave_requests WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;
        row.map(LeaveRow::into_model).transpose()
    }

    async fn update_leave(&self, leave: &LeaveRequest) -> HrResult<()> {
        sqlx::query(
            "UPDATE leave_requests SET status = $2, chef_comment = $3, decided_by = $4, \
             decided_at = $5 WHERE id = $1",
        )
        .bind(leave.id)
        .bind(leave.status.as_str())
        .bind(&leave.chef_comment)
        .bind(leave.decided_by)
        .bind(leave.decided_at)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(())
    }

    async fn leaves_for_employee(&self, employee_id: Id) -> HrResult<Vec<LeaveRequest>> {
        let rows = sqlx::query_as::<_, LeaveRow>(&format!(
            "SELECT {LEAVE_COLUMNS} FROM leave_requests WHERE employee_id = $1 ORDER BY id DESC"
        ))
        .bind(employee_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;
        rows.into_iter().map(LeaveRow::into_model).collect()
    }

    async fn leaves_for_employees(&self, employee_ids: &[Id]) -> HrResult<Vec<LeaveRequest>> {
        let rows = sqlx::query_as::<_, LeaveRow>(&format!(
            "SELECT {LEAVE_COLUMNS} FROM leave_requests WHERE employee_id = ANY($1) \
             ORDER BY id DESC"
        ))
        .bind(employee_ids.to_vec())
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;
        rows.into_iter().map(LeaveRow::into_model).collect()
    }

    async fn employee_ids_on_accepted_leave(&self, date: NaiveDate) -> HrResult<Vec<Id>> {
        sqlx::query_scalar::<_, i64>(
            "SELECT employee_id FROM leave_requests \
             WHERE status = 'ACCEPTED' AND start_date <= $1 AND end_date >= $1",
        )
        .bind(date)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)
    }

    async fn leaves_starting_in_range(
        &self,
        employee_ids: Option<&[Id]>,
        range: DateRange,
    ) -> HrResult<Vec<LeaveRequest>> {
        let rows = sqlx::query_as::<_, LeaveRow>(&format!(
            "SELECT {LEAVE_COLUMNS} FROM leave_requests \
             WHERE start_date BETWEEN $1 AND $2 \
             AND ($3::bigint[] IS NULL OR employee_id = ANY($3)) \
             ORDER BY id DESC"
        ))
        .bind(range.from)
        .bind(range.to)
        .bind(ids_param(employee_ids))
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;
        rows.into_iter().map(LeaveRow::into_model).collect()
    }
}

#[async_trait]
impl DisciplineStore for PgStore {
    async fn insert_warning(&self, warning: AbsenceWarning) -> HrResult<AbsenceWarning> {
        let row = sqlx::query_as::<_, WarningRow>(
            "INSERT INTO absence_warnings (employee_id, date, comment, issued_by) \
             VALUES ($1, $2, $3, $4) \
             RETURNING id, employee_id, date, comment, issued_by, issued_at",
        )
        .bind(warning.employee_id)
        .bind(warning.date)
        .bind(&warning.comment)
        .bind(warning.issued_by)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            conflict_on_unique(e, "warning for this employee and date already exists")
        })?;
        Ok(row.into())
    }

    async fn increment_flag(&self, employee_id: Id, month: NaiveDate) -> HrResult<DisciplineFlag> {
        let row = sqlx::query_as::<_, FlagRow>(
            "INSERT INTO discipline_flags (employee_id, month, warning_count) \
             VALUES ($1, $2, 1) \
             ON CONFLICT (employee_id, month) \
             DO UPDATE SET warning_count = discipline_flags.warning_count + 1 \
             RETURNING id, employee_id, month, warning_count",
        )
        .bind(employee_id)
        .bind(month)
        .fetch_one(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(row.into())
    }

    async fn flags_for_month(&self, month: NaiveDate) -> HrResult<Vec<DisciplineFlag>> {
        let rows = sqlx::query_as::<_, FlagRow>(
            "SELECT id, employee_id, month, warning_count FROM discipline_flags \
             WHERE month = $1 ORDER BY warning_count DESC",
        )
        .bind(month)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(rows.into_iter().map(DisciplineFlag::from).collect())
    }

    async fn warnings_in_range(
        &self,
        employee_ids: Option<&[Id]>,
        range: DateRange,
    ) -> HrResult<Vec<AbsenceWarning>> {
        let rows = sqlx::query_as::<_, WarningRow>(
            "SELECT id, employee_id, date, comment, issued_by, issued_at FROM absence_warnings \
             WHERE date BETWEEN $1 AND $2 \
             AND ($3::bigint[] IS NULL OR employee_id = ANY($3)) \
             ORDER BY date",
        )
        .bind(range.from)
        .bind(range.to)
        .bind(ids_param(employee_ids))
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(rows.into_iter().map(AbsenceWarning::from).collect())
    }

    async fn flags_in_range(
        &self,
        employee_ids: Option<&[Id]>,
        range: DateRange,
    ) -> HrResult<Vec<DisciplineFlag>> {
        let rows = sqlx::query_as::<_, FlagRow>(
            "SELECT id, employee_id, month, warning_count FROM discipline_flags \
             WHERE month BETWEEN $1 AND $2 \
             AND ($3::bigint[] IS NULL OR employee_id = ANY($3)) \
             ORDER BY warning_count DESC",
        )
        .bind(range.from)
        .bind(range.to)
        .bind(ids_param(employee_ids))
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(rows.into_iter().map(DisciplineFlag::from).collect())
    }
}

#[async_trait]
impl DocumentStore for PgStore {
    async fn doc_type_by_id(&self, id: Id) -> HrResult<Option<DocumentType>> {
        let row = sqlx::query_as::<_, DocumentTypeRow>(
            "SELECT id, name, category FROM document_types WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;
        row.map(DocumentTypeRow::into_model).transpose()
    }

    async fn doc_types_all(&self) -> HrResult<Vec<DocumentType>> {
        let rows = sqlx::query_as::<_, DocumentTypeRow>(
            "SELECT id, name, category FROM document_types ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;
        rows.into_iter().map(DocumentTypeRow::into_model).collect()
    }

    async fn insert_document(&self, document: Document) -> HrResult<Document> {
        let row = sqlx::query_as::<_, DocumentRow>(&format!(
            "INSERT INTO documents (title, doc_type_id, file, source_department_id, \
             target_department_id, created_by, status) VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {DOCUMENT_COLUMNS}"
        ))
        .bind(&document.title)
        .bind(document.doc_type_id)
        .bind(&document.file)
        .bind(document.source_department_id)
        .bind(document.target_department_id)
        .bind(document.created_by)
        .bind(document.status.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(db_err)?;
        row.into_model()
    }

    async fn document_by_id(&self, id: Id) -> HrResult<Option<Document>> {
        let row = sqlx::query_as::<_, DocumentRow>(&format!(
            "SELECT {DOCUMENT_COLUMNS} FROM documents WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;
        row.map(DocumentRow::into_model).transpose()
    }

    async fn update_document(&self, document: &Document) -> HrResult<()> {
        sqlx::query(
            "UPDATE documents SET target_department_id = $2, status = $3, sent_at = $4, \
             validated_by = $5, validated_at = $6 WHERE id = $1",
        )
        .bind(document.id)
        .bind(document.target_department_id)
        .bind(document.status.as_str())
        .bind(document.sent_at)
        .bind(document.validated_by)
        .bind(document.validated_at)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(())
    }

    async fn documents_all(&self) -> HrResult<Vec<Document>> {
        let rows = sqlx::query_as::<_, DocumentRow>(&format!(
            "SELECT {DOCUMENT_COLUMNS} FROM documents ORDER BY id DESC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;
        rows.into_iter().map(DocumentRow::into_model).collect()
    }

    async fn documents_created_by(&self, user_id: Id) -> HrResult<Vec<Document>> {
        let rows = sqlx::query_as::<_, DocumentRow>(&format!(
            "SELECT {DOCUMENT_COLUMNS} FROM documents WHERE created_by = $1 ORDER BY id DESC"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;
        rows.into_iter().map(DocumentRow::into_model).collect()
    }

    async fn documents_for_department(&self, department_id: Id) -> HrResult<Vec<Document>> {
        let rows = sqlx::query_as::<_, DocumentRow>(&format!(
            "SELECT {DOCUMENT_COLUMNS} FROM documents \
             WHERE source_department_id = $1 OR target_department_id = $1 ORDER BY id DESC"
        ))
        .bind(department_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;
        rows.into_iter().map(DocumentRow::into_model).collect()
    }

    async fn documents_created_in_range(&self, range: DateRange) -> HrResult<Vec<Document>> {
        let rows = sqlx::query_as::<_, DocumentRow>(&format!(
            "SELECT {DOCUMENT_COLUMNS} FROM documents \
             WHERE created_at::date BETWEEN $1 AND $2 ORDER BY id DESC"
        ))
        .bind(range.from)
        .bind(range.to)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;
        rows.into_iter().map(DocumentRow::into_model).collect()
    }

    async fn insert_history(&self, entry: DocumentHistory) -> HrResult<DocumentHistory> {
        let row = sqlx::query_as::<_, HistoryRow>(&format!(
            "INSERT INTO document_history (document_id, parent_id, action, by_user, note, \
             is_private) VALUES ($1, $2, $3, $4, $5, $6) RETURNING {HISTORY_COLUMNS}"
        ))
        .bind(entry.document_id)
        .bind(entry.parent_id)
        .bind(entry.action.as_str())
        .bind(entry.by_user)
        .bind(&entry.note)
        .bind(entry.is_private)
        .fetch_one(&self.pool)
        .await
        .map_err(db_err)?;
        row.into_model()
    }

    async fn history_by_id(&self, id: Id) -> HrResult<Option<DocumentHistory>> {
        let row = sqlx::query_as::<_, HistoryRow>(&format!(
            "SELECT {HISTORY_COLUMNS} FROM document_history WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;
        row.map(HistoryRow::into_model).transpose()
    }

    async fn history_for_document(&self, document_id: Id) -> HrResult<Vec<DocumentHistory>> {
        let rows = sqlx::query_as::<_, HistoryRow>(&format!(
            "SELECT {HISTORY_COLUMNS} FROM document_history WHERE document_id = $1 ORDER BY id"
        ))
        .bind(document_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;
        rows.into_iter().map(HistoryRow::into_model).collect()
    }
}

#[async_trait]
impl NotificationStore for PgStore {
    async fn insert_notification(&self, notification: Notification) -> HrResult<Notification> {
        let row = sqlx::query_as::<_, NotificationRow>(
            "INSERT INTO notifications (user_id, title, message, is_read, link) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING id, user_id, title, message, is_read, link, created_at",
        )
        .bind(notification.user_id)
        .bind(&notification.title)
        .bind(&notification.message)
        .bind(notification.is_read)
        .bind(&notification.link)
        .fetch_one(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(row.into())
    }

    async fn notification_by_id(&self, id: Id) -> HrResult<Option<Notification>> {
        let row = sqlx::query_as::<_, NotificationRow>(
            "SELECT id, user_id, title, message, is_read, link, created_at \
             FROM notifications WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(row.map(Notification::from))
    }

    async fn notifications_for_user(&self, user_id: Id) -> HrResult<Vec<Notification>> {
        let rows = sqlx::query_as::<_, NotificationRow>(
            "SELECT id, user_id, title, message, is_read, link, created_at \
             FROM notifications WHERE user_id = $1 ORDER BY id DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(rows.into_iter().map(Notification::from).collect())
    }

    async fn mark_notification_read(&self, id: Id) -> HrResult<()> {
        sqlx::query("UPDATE notifications SET is_read = TRUE WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(())
    }
}
