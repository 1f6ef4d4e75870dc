//! The five user roles.
//!
//! The roles form a flat capability lattice: no role implies another's
//! permissions, and authorization is always "is the caller's role in set S",
//! never a ranking comparison.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Employee,
    Chef,
    RhSimple,
    RhSenior,
    Grh,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Employee => "EMPLOYEE",
            Self::Chef => "CHEF",
            Self::RhSimple => "RH_SIMPLE",
            Self::RhSenior => "RH_SENIOR",
            Self::Grh => "GRH",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "EMPLOYEE" => Some(Self::Employee),
            "CHEF" => Some(Self::Chef),
            "RH_SIMPLE" => Some(Self::RhSimple),
            "RH_SENIOR" => Some(Self::RhSenior),
            "GRH" => Some(Self::Grh),
            _ => None,
        }
    }

    /// HR roles with organisation-wide record visibility.
    pub fn is_global(&self) -> bool {
        matches!(self, Self::RhSimple | Self::RhSenior | Self::Grh)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        for role in [Role::Employee, Role::Chef, Role::RhSimple, Role::RhSenior, Role::Grh] {
            assert_eq!(Role::from_str(role.as_str()), Some(role));
        }
        assert_eq!(Role::from_str("ADMIN"), None);
    }

    #[test]
    fn test_global_roles() {
        assert!(Role::Grh.is_global());
        assert!(Role::RhSenior.is_global());
        assert!(Role::RhSimple.is_global());
        assert!(!Role::Chef.is_global());
        assert!(!Role::Employee.is_global());
    }
}
