//! Project domain model and its nested read view.
//!
//! # Invariants
//! - A project belongs to exactly one owner.
//! - `ProjectView::comments` is always the full comment set at read time,
//!   never a partial page.

use crate::model::comment::CommentView;
use crate::model::owner::{Owner, OwnerId};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier of a project.
pub type ProjectId = Uuid;

/// Persisted `projects` row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub project_id: ProjectId,
    pub owner_id: OwnerId,
    pub project_name: String,
}

/// Project with its owner's username and every comment embedded.
///
/// Field names are serialized verbatim and form the external contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectView {
    pub project_id: ProjectId,
    pub owner_id: OwnerId,
    pub owner_username: String,
    pub project_name: String,
    pub comments: Vec<CommentView>,
}

impl ProjectView {
    /// Assembles a view from a project row, its owner and its comments.
    pub fn assemble(project: Project, owner: Owner, comments: Vec<CommentView>) -> Self {
        Self {
            project_id: project.project_id,
            owner_id: project.owner_id,
            owner_username: owner.username,
            project_name: project.project_name,
            comments,
        }
    }
}

/// Owner-agnostic project total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectCount {
    pub project_count: u64,
}
