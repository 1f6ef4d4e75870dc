//! # hr-scope
//!
//! The scope resolver: given an authenticated principal and an employee
//! directory, computes which records the caller may see. Scope is decided
//! by role and department membership, with the user→employee identity
//! resolved by unique email, never by foreign key.

use async_trait::async_trait;
use hr_auth::Principal;
use hr_core::traits::Id;
use hr_core::{HrError, HrResult};
use hr_models::{Employee, Role};

/// Employee lookup seam. Implemented by both the Postgres store and the
/// in-memory store.
#[async_trait]
pub trait EmployeeDirectory: Send + Sync {
    async fn employee_by_email(&self, email: &str) -> HrResult<Option<Employee>>;
}

/// Visibility computed for a caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// All departments (GRH, RH_SENIOR, RH_SIMPLE).
    Global,
    /// One department's employees (CHEF).
    Department(Id),
    /// Exactly one employee record (EMPLOYEE), by id.
    SelfOnly(Id),
    /// Nothing visible (e.g. an EMPLOYEE account with no roster entry).
    None,
}

impl Scope {
    pub fn allows_employee(&self, employee: &Employee) -> bool {
        match self {
            Scope::Global => true,
            Scope::Department(dept) => employee.department_id == *dept,
            Scope::SelfOnly(id) => employee.id == Some(*id),
            Scope::None => false,
        }
    }

    pub fn department_id(&self) -> Option<Id> {
        match self {
            Scope::Department(id) => Some(*id),
            _ => None,
        }
    }
}

/// Resolves caller scope against the employee directory.
pub struct ScopeResolver<'a, D: EmployeeDirectory + ?Sized> {
    directory: &'a D,
}

impl<'a, D: EmployeeDirectory + ?Sized> ScopeResolver<'a, D> {
    pub fn new(directory: &'a D) -> Self {
        Self { directory }
    }

    /// Resolve the caller's employee-record scope.
    ///
    /// A CHEF without a linked Employee row is a misconfigured account, not
    /// an empty result: that case fails with `MissingEmployeeRecord`.
    pub async fn resolve(&self, principal: &Principal) -> HrResult<Scope> {
        match principal.role {
            Role::Grh | Role::RhSenior | Role::RhSimple => Ok(Scope::Global),
            Role::Chef => {
                let chef = self.chef_employee(principal).await?;
                Ok(Scope::Department(chef.department_id))
            }
            Role::Employee => {
                match self.directory.employee_by_email(&principal.email).await? {
                    Some(emp) => match emp.id {
                        Some(id) => Ok(Scope::SelfOnly(id)),
                        None => Ok(Scope::None),
                    },
                    None => Ok(Scope::None),
                }
            }
        }
    }

    /// Like [`resolve`](Self::resolve), but an orphan chef collapses to
    /// `Scope::None` instead of failing. Reports use this: a chef with no
    /// roster entry sees zero counts, not an error.
    pub async fn resolve_tolerant(&self, principal: &Principal) -> HrResult<Scope> {
        match self.resolve(principal).await {
            Ok(scope) => Ok(scope),
            Err(HrError::MissingEmployeeRecord) => Ok(Scope::None),
            Err(e) => Err(e),
        }
    }

    /// The chef's own Employee row, required for any department-boundary
    /// decision.
    pub async fn chef_employee(&self, principal: &Principal) -> HrResult<Employee> {
        self.directory
            .employee_by_email(&principal.email)
            .await?
            .ok_or(HrError::MissingEmployeeRecord)
    }

    /// The caller's own Employee row (any role), by exact email match.
    pub async fn own_employee(&self, principal: &Principal) -> HrResult<Option<Employee>> {
        self.directory.employee_by_email(&principal.email).await
    }
}
