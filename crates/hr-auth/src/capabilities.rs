//! Declarative role capability table.
//!
//! Each action family maps to the set of roles allowed to invoke it. Checks
//! are pure membership tests; an action missing from the table denies
//! everyone (fail closed).

use std::collections::{HashMap, HashSet};

use hr_core::{HrError, HrResult};
use hr_models::Role;
use once_cell::sync::Lazy;

use crate::principal::Principal;

/// Action families checked per endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    ListEmployees,
    AssignTask,
    CheckAttendance,
    SubmitLeave,
    DecideLeave,
    ListDepartmentLeaves,
    ListAbsences,
    IssueWarning,
    ViewDisciplineFlags,
    UploadDocument,
    ValidateDocument,
    ArchiveDocument,
    ViewReports,
}

static CAPABILITIES: Lazy<HashMap<Action, HashSet<Role>>> = Lazy::new(|| {
    use Role::*;
    let mut table = HashMap::new();
    let mut grant = |action: Action, roles: &[Role]| {
        table.insert(action, roles.iter().copied().collect::<HashSet<_>>());
    };

    grant(Action::ListEmployees, &[Employee, Chef, RhSimple, RhSenior, Grh]);
    grant(Action::AssignTask, &[Chef]);
    grant(Action::CheckAttendance, &[Employee]);
    grant(Action::SubmitLeave, &[Employee]);
    grant(Action::DecideLeave, &[Chef]);
    grant(Action::ListDepartmentLeaves, &[Chef]);
    grant(Action::ListAbsences, &[RhSimple]);
    grant(Action::IssueWarning, &[RhSimple]);
    grant(Action::ViewDisciplineFlags, &[RhSenior]);
    grant(Action::UploadDocument, &[Employee, Chef, RhSimple, RhSenior, Grh]);
    grant(Action::ValidateDocument, &[RhSenior, Grh]);
    grant(Action::ArchiveDocument, &[RhSenior, Grh]);
    grant(Action::ViewReports, &[Employee, Chef, RhSimple, RhSenior, Grh]);

    table
});

/// Whether the principal's role is in the action's allowed set.
pub fn allowed(principal: Option<&Principal>, action: Action) -> bool {
    let Some(principal) = principal else {
        return false;
    };
    CAPABILITIES
        .get(&action)
        .map(|roles| roles.contains(&principal.role))
        .unwrap_or(false)
}

/// Capability check as a `Result`, for use with `?` in services.
pub fn require(principal: &Principal, action: Action) -> HrResult<()> {
    if allowed(Some(principal), action) {
        Ok(())
    } else {
        Err(HrError::forbidden(format!(
            "role {} may not perform this action",
            principal.role
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn principal(role: Role) -> Principal {
        Principal::new(1, "user@example.com", role)
    }

    #[test]
    fn test_fails_closed_without_principal() {
        assert!(!allowed(None, Action::ListEmployees));
        assert!(!allowed(None, Action::ValidateDocument));
    }

    #[test]
    fn test_warning_issuance_is_rh_simple_only() {
        assert!(allowed(Some(&principal(Role::RhSimple)), Action::IssueWarning));
        for role in [Role::Employee, Role::Chef, Role::RhSenior, Role::Grh] {
            assert!(!allowed(Some(&principal(role)), Action::IssueWarning));
        }
    }

    #[test]
    fn test_flat_lattice_no_role_implies_another() {
        // GRH is the director but still cannot issue warnings or decide leave
        let grh = principal(Role::Grh);
        assert!(!allowed(Some(&grh), Action::IssueWarning));
        assert!(!allowed(Some(&grh), Action::DecideLeave));
        assert!(!allowed(Some(&grh), Action::CheckAttendance));
    }

    #[test]
    fn test_validate_archive_restricted() {
        for action in [Action::ValidateDocument, Action::ArchiveDocument] {
            assert!(allowed(Some(&principal(Role::RhSenior)), action));
            assert!(allowed(Some(&principal(Role::Grh)), action));
            assert!(!allowed(Some(&principal(Role::Chef)), action));
            assert!(!allowed(Some(&principal(Role::RhSimple)), action));
        }
    }

    #[test]
    fn test_require_returns_forbidden() {
        let err = require(&principal(Role::Employee), Action::DecideLeave).unwrap_err();
        assert_eq!(err.status_code(), 403);
    }

    #[test]
    fn test_everyone_may_upload_documents() {
        for role in [Role::Employee, Role::Chef, Role::RhSimple, Role::RhSenior, Role::Grh] {
            assert!(allowed(Some(&principal(role)), Action::UploadDocument));
        }
    }
}
