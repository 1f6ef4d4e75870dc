//! Core traits shared by the domain models.

use chrono::{DateTime, Utc};

/// Primary key type
pub type Id = i64;

/// Trait for entities that have a primary key
pub trait Identifiable {
    fn id(&self) -> Option<Id>;

    fn is_persisted(&self) -> bool {
        self.id().is_some()
    }
}

/// Trait for entities with a creation timestamp
pub trait Timestamped {
    fn created_at(&self) -> Option<DateTime<Utc>>;
}
