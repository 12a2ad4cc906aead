//! Tracker use-case service.
//!
//! # Responsibility
//! - Provide the request-level entry points used by outer surfaces.
//! - Generate new project ids and delegate everything else to repositories.
//!
//! # Invariants
//! - Service APIs never bypass repository persistence contracts.
//! - Results are returned exactly as repositories produce them.
//! - The caller passes in an already-validated owner id. Auth is not
//!   checked here.

use crate::id::new_id;
use crate::model::comment::{Comment, CommentId, CommentView};
use crate::model::owner::{Owner, OwnerId};
use crate::model::project::{ProjectCount, ProjectId, ProjectView};
use crate::repo::comment_repo::{CommentRepository, SqliteCommentRepository};
use crate::repo::owner_repo::{OwnerRepository, SqliteOwnerRepository};
use crate::repo::project_repo::{ProjectRepository, SqliteProjectRepository};
use crate::repo::{ensure_connection_ready, RepoResult};
use rusqlite::Connection;

/// Use-case service bound to one caller-owned connection.
pub struct TrackerService<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> TrackerService<'conn> {
    /// Creates a service from an initialized connection.
    pub fn try_new(conn: &'conn mut Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }

    /// Creates a project with a freshly generated id.
    pub fn add_project(&mut self, owner_id: OwnerId, project_name: &str) -> RepoResult<ProjectView> {
        let project_id = new_id();
        self.projects().add_project(project_id, owner_id, project_name)
    }

    /// Returns the total number of projects.
    pub fn get_num_projects(&mut self) -> RepoResult<ProjectCount> {
        let project_count = self.projects().project_count()?;
        Ok(ProjectCount { project_count })
    }

    /// Gets one project of `owner_id`; another owner's project is `None`.
    pub fn get_project(
        &mut self,
        owner_id: OwnerId,
        project_id: ProjectId,
    ) -> RepoResult<Option<ProjectView>> {
        self.projects().get_project(owner_id, project_id)
    }

    /// Deletes one project of `owner_id` and returns what was deleted.
    pub fn delete_project(
        &mut self,
        owner_id: OwnerId,
        project_id: ProjectId,
    ) -> RepoResult<Option<ProjectView>> {
        self.projects().delete_project(owner_id, project_id)
    }

    pub fn add_comment(
        &mut self,
        commenter_id: OwnerId,
        project_id: ProjectId,
        message: &str,
    ) -> RepoResult<CommentView> {
        self.comments().add_comment(commenter_id, project_id, message)
    }

    pub fn update_comment(&mut self, comment_id: CommentId, message: &str) -> RepoResult<Comment> {
        self.comments().update_comment(comment_id, message)
    }

    pub fn get_comment(&mut self, comment_id: CommentId) -> RepoResult<Option<Comment>> {
        self.comments().get_comment(comment_id)
    }

    pub fn list_comments(&mut self, project_id: ProjectId) -> RepoResult<Vec<Comment>> {
        self.comments().list_comments(project_id)
    }

    pub fn list_comments_by_owner(&mut self, owner_id: OwnerId) -> RepoResult<Vec<Comment>> {
        self.comments().list_comments_by_owner(owner_id)
    }

    pub fn get_owner(&self, owner_id: OwnerId) -> RepoResult<Option<Owner>> {
        self.owners().get_owner(owner_id)
    }

    pub fn list_owners(&self) -> RepoResult<Vec<Owner>> {
        self.owners().list_owners()
    }

    fn owners(&self) -> SqliteOwnerRepository<'_> {
        SqliteOwnerRepository::from_ready(self.conn)
    }

    fn projects(&mut self) -> SqliteProjectRepository<'_> {
        SqliteProjectRepository::from_ready(self.conn)
    }

    fn comments(&mut self) -> SqliteCommentRepository<'_> {
        SqliteCommentRepository::from_ready(self.conn)
    }
}
