//! HTTP handlers, one module per endpoint family.

pub mod attendance;
pub mod discipline;
pub mod documents;
pub mod employees;
pub mod leaves;
pub mod notifications;
pub mod reports;
pub mod tasks;
pub mod whoami;

use serde::Deserialize;

/// `?from=YYYY-MM-DD&to=YYYY-MM-DD` pair used by range-scoped listings.
#[derive(Debug, Deserialize, Default)]
pub struct RangeQuery {
    pub from: Option<String>,
    pub to: Option<String>,
}
