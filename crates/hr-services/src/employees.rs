//! Scoped employee directory.

use std::sync::Arc;

use hr_auth::{capabilities, Action, Principal};
use hr_core::HrResult;
use hr_models::Employee;
use hr_scope::ScopeResolver;

use crate::store::Store;

pub struct EmployeeService {
    store: Arc<dyn Store>,
}

impl EmployeeService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Employees visible to the caller, ordered by id. Global roles see
    /// everyone, a chef their department, an employee themselves.
    pub async fn list(&self, principal: &Principal) -> HrResult<Vec<Employee>> {
        capabilities::require(principal, Action::ListEmployees)?;

        let resolver = ScopeResolver::new(self.store.as_ref());
        let scope = resolver.resolve(principal).await?;

        let mut employees: Vec<Employee> = self
            .store
            .employees_all()
            .await?
            .into_iter()
            .filter(|e| scope.allows_employee(e))
            .collect();
        employees.sort_by_key(|e| e.id);
        Ok(employees)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use hr_core::HrError;
    use hr_models::Role;

    async fn seeded() -> (Arc<MemoryStore>, EmployeeService) {
        let store = Arc::new(MemoryStore::new());
        let eng = store.add_department("Engineering").await;
        let fin = store.add_department("Finance").await;
        store
            .add_employee("Karim", "Sassi", "chef@example.com", eng, None)
            .await;
        store
            .add_employee("Amel", "Riahi", "emp@example.com", eng, None)
            .await;
        store
            .add_employee("Nour", "Haddad", "nour@example.com", fin, None)
            .await;
        let service = EmployeeService::new(store.clone());
        (store, service)
    }

    #[tokio::test]
    async fn test_global_roles_see_everyone() {
        let (store, service) = seeded().await;
        let grh_user = store.add_user("grh@example.com", Role::Grh).await;
        let grh = Principal::new(grh_user, "grh@example.com", Role::Grh);
        let listed = service.list(&grh).await.unwrap();
        assert_eq!(listed.len(), 3);
        // ordered by id
        let ids: Vec<_> = listed.iter().filter_map(|e| e.id).collect();
        let mut sorted = ids.clone();
        sorted.sort();
        assert_eq!(ids, sorted);
    }

    #[tokio::test]
    async fn test_chef_sees_own_department() {
        let (store, service) = seeded().await;
        let chef_user = store.add_user("chef@example.com", Role::Chef).await;
        let chef = Principal::new(chef_user, "chef@example.com", Role::Chef);
        let listed = service.list(&chef).await.unwrap();
        assert_eq!(listed.len(), 2);
        assert!(listed.iter().all(|e| e.email.ends_with("@example.com")));
    }

    #[tokio::test]
    async fn test_employee_sees_only_themselves() {
        let (store, service) = seeded().await;
        let emp_user = store.add_user("emp@example.com", Role::Employee).await;
        let emp = Principal::new(emp_user, "emp@example.com", Role::Employee);
        let listed = service.list(&emp).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].email, "emp@example.com");
    }

    #[tokio::test]
    async fn test_orphan_chef_fails_with_explicit_error() {
        let (store, service) = seeded().await;
        let chef_user = store.add_user("ghost@example.com", Role::Chef).await;
        let chef = Principal::new(chef_user, "ghost@example.com", Role::Chef);
        let err = service.list(&chef).await.unwrap_err();
        assert!(matches!(err, HrError::MissingEmployeeRecord));
    }
}
