//! Database row types and their conversions into domain models.
//!
//! Enum-valued columns are stored as their canonical TEXT form; a value
//! the models cannot parse indicates a corrupted row and surfaces as a
//! database error rather than panicking.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use hr_core::{HrError, HrResult};
use hr_models::{
    AbsenceWarning, Attendance, Department, DisciplineFlag, Document, DocumentAction,
    DocumentCategory, DocumentHistory, DocumentStatus, DocumentType, Employee, LeaveRequest,
    LeaveStatus, LeaveType, Notification, Role, Task, TaskStatus, User,
};
use sqlx::FromRow;

fn parse_enum<T>(value: &str, parse: fn(&str) -> Option<T>, what: &str) -> HrResult<T> {
    parse(value).ok_or_else(|| HrError::Database(format!("invalid {what} value '{value}'")))
}

#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub id: i64,
    pub email: String,
    pub password_hash: Option<String>,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

impl UserRow {
    pub fn into_model(self) -> HrResult<User> {
        Ok(User {
            id: Some(self.id),
            email: self.email,
            password_hash: self.password_hash,
            role: parse_enum(&self.role, Role::from_str, "role")?,
            created_at: Some(self.created_at),
        })
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct DepartmentRow {
    pub id: i64,
    pub name: String,
}

impl From<DepartmentRow> for Department {
    fn from(row: DepartmentRow) -> Self {
        Department {
            id: Some(row.id),
            name: row.name,
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct EmployeeRow {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub hired_at: NaiveDate,
    pub department_id: i64,
    pub salary: f64,
    pub attendance_pin: Option<String>,
}

impl From<EmployeeRow> for Employee {
    fn from(row: EmployeeRow) -> Self {
        Employee {
            id: Some(row.id),
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
            hired_at: row.hired_at,
            department_id: row.department_id,
            salary: row.salary,
            attendance_pin: row.attendance_pin,
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct TaskRow {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub due_date: Option<NaiveDate>,
    pub status: String,
    pub assigned_to: i64,
    pub assigned_by: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl TaskRow {
    pub fn into_model(self) -> HrResult<Task> {
        Ok(Task {
            id: Some(self.id),
            title: self.title,
            description: self.description,
            due_date: self.due_date,
            status: parse_enum(&self.status, TaskStatus::from_str, "task status")?,
            assigned_to: self.assigned_to,
            assigned_by: self.assigned_by,
            created_at: Some(self.created_at),
            completed_at: self.completed_at,
        })
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct AttendanceRow {
    pub id: i64,
    pub employee_id: i64,
    pub date: NaiveDate,
    pub check_in_time: Option<NaiveTime>,
    pub check_out_time: Option<NaiveTime>,
    pub created_at: DateTime<Utc>,
}

impl From<AttendanceRow> for Attendance {
    fn from(row: AttendanceRow) -> Self {
        Attendance {
            id: Some(row.id),
            employee_id: row.employee_id,
            date: row.date,
            check_in_time: row.check_in_time,
            check_out_time: row.check_out_time,
            created_at: Some(row.created_at),
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct LeaveRow {
    pub id: i64,
    pub employee_id: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub leave_type: String,
    pub reason: String,
    pub attachment: Option<String>,
    pub status: String,
    pub chef_comment: String,
    pub decided_by: Option<i64>,
    pub decided_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl LeaveRow {
    pub fn into_model(self) -> HrResult<LeaveRequest> {
        Ok(LeaveRequest {
            id: Some(self.id),
            employee_id: self.employee_id,
            start_date: self.start_date,
            end_date: self.end_date,
            leave_type: parse_enum(&self.leave_type, LeaveType::from_str, "leave type")?,
            reason: self.reason,
            attachment: self.attachment,
            status: parse_enum(&self.status, LeaveStatus::from_str, "leave status")?,
            chef_comment: self.chef_comment,
            decided_by: self.decided_by,
            decided_at: self.decided_at,
            created_at: Some(self.created_at),
        })
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct WarningRow {
    pub id: i64,
    pub employee_id: i64,
    pub date: NaiveDate,
    pub comment: String,
    pub issued_by: Option<i64>,
    pub issued_at: DateTime<Utc>,
}

impl From<WarningRow> for AbsenceWarning {
    fn from(row: WarningRow) -> Self {
        AbsenceWarning {
            id: Some(row.id),
            employee_id: row.employee_id,
            date: row.date,
            comment: row.comment,
            issued_by: row.issued_by,
            issued_at: Some(row.issued_at),
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct FlagRow {
    pub id: i64,
    pub employee_id: i64,
    pub month: NaiveDate,
    pub warning_count: i32,
}

impl From<FlagRow> for DisciplineFlag {
    fn from(row: FlagRow) -> Self {
        DisciplineFlag {
            id: Some(row.id),
            employee_id: row.employee_id,
            month: row.month,
            warning_count: row.warning_count,
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct DocumentTypeRow {
    pub id: i64,
    pub name: String,
    pub category: String,
}

impl DocumentTypeRow {
    pub fn into_model(self) -> HrResult<DocumentType> {
        Ok(DocumentType {
            id: Some(self.id),
            name: self.name,
            category: parse_enum(
                &self.category,
                DocumentCategory::from_str,
                "document category",
            )?,
        })
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct DocumentRow {
    pub id: i64,
    pub title: String,
    pub doc_type_id: i64,
    pub file: String,
    pub source_department_id: i64,
    pub target_department_id: Option<i64>,
    pub created_by: Option<i64>,
    pub status: String,
    pub sent_at: Option<DateTime<Utc>>,
    pub validated_by: Option<i64>,
    pub validated_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl DocumentRow {
    pub fn into_model(self) -> HrResult<Document> {
        Ok(Document {
            id: Some(self.id),
            title: self.title,
            doc_type_id: self.doc_type_id,
            file: self.file,
            source_department_id: self.source_department_id,
            target_department_id: self.target_department_id,
            created_by: self.created_by,
            status: parse_enum(&self.status, DocumentStatus::from_str, "document status")?,
            sent_at: self.sent_at,
            validated_by: self.validated_by,
            validated_at: self.validated_at,
            created_at: Some(self.created_at),
        })
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct HistoryRow {
    pub id: i64,
    pub document_id: i64,
    pub parent_id: Option<i64>,
    pub action: String,
    pub by_user: Option<i64>,
    pub note: String,
    pub is_private: bool,
    pub created_at: DateTime<Utc>,
}

impl HistoryRow {
    pub fn into_model(self) -> HrResult<DocumentHistory> {
        Ok(DocumentHistory {
            id: Some(self.id),
            document_id: self.document_id,
            parent_id: self.parent_id,
            action: parse_enum(&self.action, DocumentAction::from_str, "history action")?,
            by_user: self.by_user,
            note: self.note,
            is_private: self.is_private,
            created_at: Some(self.created_at),
        })
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct NotificationRow {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub message: String,
    pub is_read: bool,
    pub link: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<NotificationRow> for Notification {
    fn from(row: NotificationRow) -> Self {
        Notification {
            id: Some(row.id),
            user_id: row.user_id,
            title: row.title,
            message: row.message,
            is_read: row.is_read,
            link: row.link,
            created_at: Some(row.created_at),
        }
    }
}
