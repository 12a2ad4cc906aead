//! Owner domain model.
//!
//! Owners are seeded externally; the core only reads them (plus the seed
//! helper in `crate::seed`).

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier of an owner. Commenters are owners too.
pub type OwnerId = Uuid;

/// A user who can own projects and leave comments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owner {
    pub owner_id: OwnerId,
    pub username: String,
}

impl Owner {
    pub fn new(owner_id: OwnerId, username: impl Into<String>) -> Self {
        Self {
            owner_id,
            username: username.into(),
        }
    }
}
