//! The authenticated caller.

use hr_core::traits::Id;
use hr_models::Role;
use serde::{Deserialize, Serialize};

/// Principal supplied by the authentication provider: user id, email and
/// role. Everything the core needs for authorization and scope resolution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Principal {
    pub user_id: Id,
    pub email: String,
    pub role: Role,
}

impl Principal {
    pub fn new(user_id: Id, email: impl Into<String>, role: Role) -> Self {
        Self {
            user_id,
            email: email.into(),
            role,
        }
    }

    pub fn is_role(&self, role: Role) -> bool {
        self.role == role
    }
}
