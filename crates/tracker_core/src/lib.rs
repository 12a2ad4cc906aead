//! Data-access core for the project/comment tracker.
//! This crate owns every write to owners, projects and comments, and is the
//! single source of truth for their referential invariants.

pub mod db;
pub mod id;
pub mod logging;
pub mod model;
pub mod repo;
pub mod seed;
pub mod service;

pub use db::{
    initialize_schema, open_db, open_db_in_memory, open_db_in_memory_with, open_db_with,
    DbError, DbOptions, DbResult,
};
pub use id::new_id;
pub use logging::{default_log_level, init_logging, logging_status, LoggingConfig};
pub use model::comment::{Comment, CommentId, CommentView};
pub use model::owner::{Owner, OwnerId};
pub use model::project::{Project, ProjectCount, ProjectId, ProjectView};
pub use repo::comment_repo::{CommentRepository, SqliteCommentRepository};
pub use repo::owner_repo::{OwnerRepository, SqliteOwnerRepository};
pub use repo::project_repo::{ProjectRepository, SqliteProjectRepository};
pub use repo::{RepoError, RepoResult};
pub use service::tracker_service::TrackerService;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
