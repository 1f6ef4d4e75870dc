//! Task assignment inside a department.

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use hr_auth::{capabilities, Action, Principal};
use hr_core::{HrError, HrResult};
use hr_models::{Task, TaskStatus};
use hr_scope::ScopeResolver;

use crate::entity_id;
use crate::notify::Notifier;
use crate::store::Store;

#[derive(Debug, Clone, Default)]
pub struct CreateTask {
    pub title: String,
    pub description: String,
    pub due_date: Option<NaiveDate>,
    pub assigned_to: i64,
}

pub struct TaskService {
    store: Arc<dyn Store>,
    notifier: Notifier,
}

impl TaskService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        let notifier = Notifier::new(store.clone());
        Self { store, notifier }
    }

    /// Chef assigns a task to an employee of their own department.
    pub async fn create(
        &self,
        principal: &Principal,
        params: CreateTask,
        now: DateTime<Utc>,
    ) -> HrResult<Task> {
        capabilities::require(principal, Action::AssignTask)?;

        if params.title.trim().is_empty() {
            return Err(HrError::validation("title is required"));
        }

        let resolver = ScopeResolver::new(self.store.as_ref());
        let chef = resolver.chef_employee(principal).await?;

        let assignee = self
            .store
            .employee_by_id(params.assigned_to)
            .await?
            .ok_or_else(|| HrError::validation("employee not found"))?;
        if assignee.department_id != chef.department_id {
            return Err(HrError::forbidden(
                "cannot assign tasks outside your department",
            ));
        }

        let task = self
            .store
            .insert_task(Task {
                id: None,
                title: params.title,
                description: params.description,
                due_date: params.due_date,
                status: TaskStatus::Todo,
                assigned_to: params.assigned_to,
                assigned_by: Some(principal.user_id),
                created_at: Some(now),
                completed_at: None,
            })
            .await?;

        if let Some(user) = self.store.user_by_email(&assignee.email).await? {
            self.notifier
                .notify(
                    entity_id(&user, "User")?,
                    "New task",
                    format!("You have been assigned the task '{}'.", task.title),
                )
                .await?;
        }
        Ok(task)
    }

    /// The caller's tasks, newest first. Empty for users without an
    /// employee record.
    pub async fn my_tasks(&self, principal: &Principal) -> HrResult<Vec<Task>> {
        let resolver = ScopeResolver::new(self.store.as_ref());
        let Some(employee) = resolver.own_employee(principal).await? else {
            return Ok(Vec::new());
        };
        self.store
            .tasks_for_employee(entity_id(&employee, "Employee")?)
            .await
    }

    /// Assignee moves a task TODO -> DONE. Already-done tasks are accepted
    /// unchanged.
    pub async fn complete(
        &self,
        principal: &Principal,
        task_id: i64,
        now: DateTime<Utc>,
    ) -> HrResult<Task> {
        let mut task = self
            .store
            .task_by_id(task_id)
            .await?
            .ok_or_else(|| HrError::not_found("Task", task_id))?;

        let resolver = ScopeResolver::new(self.store.as_ref());
        let own = resolver.own_employee(principal).await?;
        let is_assignee = own
            .as_ref()
            .and_then(|e| e.id)
            .map(|id| id == task.assigned_to)
            .unwrap_or(false);
        if !is_assignee {
            return Err(HrError::forbidden("only the assignee can complete a task"));
        }

        if task.status == TaskStatus::Done {
            return Ok(task);
        }
        task.status = TaskStatus::Done;
        task.completed_at = Some(now);
        self.store.update_task(&task).await?;
        Ok(task)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryStore, NotificationStore};
    use chrono::TimeZone;
    use hr_core::traits::Id;
    use hr_models::Role;

    struct Fixture {
        store: Arc<MemoryStore>,
        service: TaskService,
        chef: Principal,
        employee: Principal,
        emp_id: Id,
    }

    async fn fixture() -> Fixture {
        let store = Arc::new(MemoryStore::new());
        let dept = store.add_department("Engineering").await;
        let chef_user = store.add_user("chef@example.com", Role::Chef).await;
        let emp_user = store.add_user("emp@example.com", Role::Employee).await;
        store
            .add_employee("Karim", "Sassi", "chef@example.com", dept, None)
            .await;
        let emp_id = store
            .add_employee("Amel", "Riahi", "emp@example.com", dept, None)
            .await;
        let service = TaskService::new(store.clone());
        Fixture {
            store,
            service,
            chef: Principal::new(chef_user, "chef@example.com", Role::Chef),
            employee: Principal::new(emp_user, "emp@example.com", Role::Employee),
            emp_id,
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 10, 9, 0, 0).unwrap()
    }

    fn params(assigned_to: Id) -> CreateTask {
        CreateTask {
            title: "Prepare onboarding".into(),
            description: "Desk, laptop, accounts".into(),
            due_date: None,
            assigned_to,
        }
    }

    #[tokio::test]
    async fn test_create_assigns_and_notifies() {
        let f = fixture().await;
        let task = f.service.create(&f.chef, params(f.emp_id), now()).await.unwrap();
        assert_eq!(task.status, TaskStatus::Todo);
        assert_eq!(task.assigned_by, Some(f.chef.user_id));

        let inbox = f
            .store
            .notifications_for_user(f.employee.user_id)
            .await
            .unwrap();
        assert_eq!(inbox.len(), 1);
        assert_eq!(inbox[0].title, "New task");

        let mine = f.service.my_tasks(&f.employee).await.unwrap();
        assert_eq!(mine.len(), 1);
    }

    #[tokio::test]
    async fn test_cross_department_assignment_forbidden() {
        let f = fixture().await;
        let other_dept = f.store.add_department("Finance").await;
        let outsider = f
            .store
            .add_employee("Nour", "Haddad", "nour@example.com", other_dept, None)
            .await;
        let err = f
            .service
            .create(&f.chef, params(outsider), now())
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 403);
    }

    #[tokio::test]
    async fn test_only_chef_creates() {
        let f = fixture().await;
        let err = f
            .service
            .create(&f.employee, params(f.emp_id), now())
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 403);
    }

    #[tokio::test]
    async fn test_only_assignee_completes() {
        let f = fixture().await;
        let task = f.service.create(&f.chef, params(f.emp_id), now()).await.unwrap();

        let err = f
            .service
            .complete(&f.chef, task.id.unwrap(), now())
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 403);

        let done = f
            .service
            .complete(&f.employee, task.id.unwrap(), now())
            .await
            .unwrap();
        assert_eq!(done.status, TaskStatus::Done);
        assert!(done.completed_at.is_some());
    }

    #[tokio::test]
    async fn test_completing_done_task_is_a_no_op() {
        let f = fixture().await;
        let task = f.service.create(&f.chef, params(f.emp_id), now()).await.unwrap();
        let first = f
            .service
            .complete(&f.employee, task.id.unwrap(), now())
            .await
            .unwrap();
        let later = Utc.with_ymd_and_hms(2026, 3, 11, 9, 0, 0).unwrap();
        let second = f
            .service
            .complete(&f.employee, task.id.unwrap(), later)
            .await
            .unwrap();
        assert_eq!(second.completed_at, first.completed_at);
    }

    #[tokio::test]
    async fn test_no_employee_record_means_empty_list() {
        let f = fixture().await;
        let loose_user = f.store.add_user("loose@example.com", Role::Employee).await;
        let loose = Principal::new(loose_user, "loose@example.com", Role::Employee);
        assert!(f.service.my_tasks(&loose).await.unwrap().is_empty());
    }
}
