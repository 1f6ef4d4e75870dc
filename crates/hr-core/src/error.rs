//! Error taxonomy for the HR backend.
//!
//! Every business-rule failure is recovered at the endpoint boundary and
//! surfaced with a machine-distinguishable kind and a human-readable detail.

use thiserror::Error;

/// Core error type for all HR operations
#[derive(Error, Debug)]
pub enum HrError {
    #[error("Authentication required: {message}")]
    Unauthenticated { message: String },

    #[error("{message}")]
    Forbidden { message: String },

    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    #[error("{message}")]
    Validation { message: String },

    /// Duplicate or state-incompatible action (already checked in, duplicate
    /// warning, non-pending decision, already archived).
    #[error("{message}")]
    Conflict { message: String },

    /// A CHEF principal with no linked Employee row. Distinct from "no
    /// access": the account is misconfigured and the client must see that.
    #[error("Chef has no Employee record / department assigned")]
    MissingEmployeeRecord,

    #[error("Invalid PIN")]
    InvalidPin,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl HrError {
    pub fn unauthenticated(message: impl Into<String>) -> Self {
        HrError::Unauthenticated { message: message.into() }
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        HrError::Forbidden { message: message.into() }
    }

    pub fn not_found(entity: &'static str, id: i64) -> Self {
        HrError::NotFound { entity, id }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        HrError::Validation { message: message.into() }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        HrError::Conflict { message: message.into() }
    }

    /// HTTP status the API layer maps this error to.
    ///
    /// Conflicts surface as 400, not 409: duplicate check-ins, duplicate
    /// warnings and non-pending decisions are contractually 400 responses.
    pub fn status_code(&self) -> u16 {
        match self {
            HrError::Unauthenticated { .. } => 401,
            HrError::Forbidden { .. } | HrError::InvalidPin => 403,
            HrError::NotFound { .. } => 404,
            HrError::Validation { .. }
            | HrError::Conflict { .. }
            | HrError::MissingEmployeeRecord => 400,
            HrError::Database(_) | HrError::Internal(_) | HrError::Config(_) => 500,
        }
    }

    /// Stable machine-readable kind string.
    pub fn kind(&self) -> &'static str {
        match self {
            HrError::Unauthenticated { .. } => "unauthenticated",
            HrError::Forbidden { .. } => "forbidden",
            HrError::NotFound { .. } => "not_found",
            HrError::Validation { .. } => "validation_error",
            HrError::Conflict { .. } => "conflict",
            HrError::MissingEmployeeRecord => "missing_employee_record",
            HrError::InvalidPin => "invalid_pin",
            HrError::Database(_) => "database_error",
            HrError::Internal(_) => "internal_error",
            HrError::Config(_) => "configuration_error",
        }
    }
}

/// Standard Result type for HR operations
pub type HrResult<T> = Result<T, HrError>;
