//! Department model.

use hr_core::traits::{Id, Identifiable};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Department {
    pub id: Option<Id>,
    pub name: String,
}

impl Identifiable for Department {
    fn id(&self) -> Option<Id> {
        self.id
    }
}
