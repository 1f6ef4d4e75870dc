//! # hr-core
//!
//! Core types shared across the HR backend crates:
//! - The error taxonomy and result alias
//! - Core traits (`Identifiable`, `Timestamped`)
//! - Shared value types (`DateRange`)
//! - Configuration loading

pub mod config;
pub mod error;
pub mod traits;
pub mod types;

pub use error::{HrError, HrResult};
pub use traits::*;
pub use types::*;
