//! Comment domain model.
//!
//! # Invariants
//! - `commenter_username` is copied from the commenter's owner row when the
//!   comment is written and is never re-synced afterwards. A later rename
//!   does not change existing comments.

use crate::model::owner::OwnerId;
use crate::model::project::ProjectId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier of a comment.
pub type CommentId = Uuid;

/// Persisted `comments` row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub comment_id: CommentId,
    pub commenter_id: OwnerId,
    pub commenter_username: String,
    pub project_id: ProjectId,
    pub message: String,
}

/// Comment as embedded in a `ProjectView` or returned from `add_comment`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentView {
    pub comment_id: CommentId,
    pub commenter_id: OwnerId,
    pub commenter_username: String,
    pub message: String,
}

impl From<Comment> for CommentView {
    fn from(value: Comment) -> Self {
        Self {
            comment_id: value.comment_id,
            commenter_id: value.commenter_id,
            commenter_username: value.commenter_username,
            message: value.message,
        }
    }
}
