//! # hr-db
//!
//! PostgreSQL persistence for the HR backend: connection pool management
//! and a [`PgStore`] implementing the store traits from `hr-services`.
//! The schema lives in `migrations/schema.sql`.

pub mod pool;
pub mod rows;
pub mod store;

pub use pool::Database;
pub use store::PgStore;
