//! Project repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Create, read, count and delete projects.
//! - Assemble `ProjectView` (owner username + full comment list).
//!
//! # Invariants
//! - Reads and deletes are scoped by `(owner_id, project_id)`. A project that
//!   exists under another owner is reported as not found, never as a
//!   distinct "forbidden" outcome; this pair is the authorization boundary.
//! - `delete_project` captures the view before deleting; comments go with
//!   the project through `ON DELETE CASCADE`.

use crate::model::comment::CommentView;
use crate::model::owner::OwnerId;
use crate::model::project::{Project, ProjectId, ProjectView};
use crate::repo::{
    ensure_connection_ready, fetch_comments_for_project, fetch_owner, log_failure, logged,
    parse_uuid, RepoError, RepoResult,
};
use log::{debug, info};
use rusqlite::{params, Connection, OptionalExtension, TransactionBehavior};

/// Repository interface for project operations.
pub trait ProjectRepository {
    /// Inserts one project and returns its (commentless) nested view.
    fn add_project(
        &mut self,
        project_id: ProjectId,
        owner_id: OwnerId,
        project_name: &str,
    ) -> RepoResult<ProjectView>;
    /// Loads one project of one owner with all its comments.
    fn get_project(
        &self,
        owner_id: OwnerId,
        project_id: ProjectId,
    ) -> RepoResult<Option<ProjectView>>;
    /// Deletes one project and its comments, returning the pre-delete view.
    fn delete_project(
        &mut self,
        owner_id: OwnerId,
        project_id: ProjectId,
    ) -> RepoResult<Option<ProjectView>>;
    /// Counts projects across all owners.
    fn project_count(&self) -> RepoResult<u64>;
}

/// SQLite-backed project repository.
pub struct SqliteProjectRepository<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> SqliteProjectRepository<'conn> {
    /// Creates repository from an initialized connection.
    pub fn try_new(conn: &'conn mut Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }

    pub(crate) fn from_ready(conn: &'conn mut Connection) -> Self {
        Self { conn }
    }

    fn insert_project(
        &mut self,
        project_id: ProjectId,
        owner_id: OwnerId,
        project_name: &str,
    ) -> RepoResult<ProjectView> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        let owner = fetch_owner(&tx, owner_id)?;

        // Unknown owners are rejected here by the foreign key.
        tx.execute(
            "INSERT INTO projects (project_id, owner_id, project_name)
             VALUES (?1, ?2, ?3);",
            params![project_id.to_string(), owner_id.to_string(), project_name],
        )?;

        let owner = owner
            .ok_or_else(|| RepoError::ConstraintViolation(format!("unknown owner {owner_id}")))?;
        tx.commit()?;

        // A project that was just inserted cannot have comments yet.
        Ok(ProjectView {
            project_id,
            owner_id,
            owner_username: owner.username,
            project_name: project_name.to_string(),
            comments: Vec::new(),
        })
    }

    fn snapshot_and_delete(
        &mut self,
        owner_id: OwnerId,
        project_id: ProjectId,
    ) -> RepoResult<Option<ProjectView>> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        // Snapshot first: after the delete the name and comments are gone.
        let Some(snapshot) = load_project_view(&tx, owner_id, project_id)? else {
            return Ok(None);
        };

        let changed = tx.execute(
            "DELETE FROM projects WHERE project_id = ?1 AND owner_id = ?2;",
            params![project_id.to_string(), owner_id.to_string()],
        )?;
        if changed != 1 {
            return Err(RepoError::InvalidData(format!(
                "expected to delete one project row for {project_id}, deleted {changed}"
            )));
        }

        tx.commit()?;
        Ok(Some(snapshot))
    }

    fn read_project(
        &self,
        owner_id: OwnerId,
        project_id: ProjectId,
    ) -> RepoResult<Option<ProjectView>> {
        // Read transaction so the project row and its comments come from one snapshot.
        let tx = self.conn.unchecked_transaction()?;
        let view = load_project_view(&tx, owner_id, project_id)?;
        tx.commit()?;
        Ok(view)
    }

    fn count_projects(&self) -> RepoResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM projects;", [], |row| row.get(0))?;
        u64::try_from(count)
            .map_err(|_| RepoError::InvalidData(format!("negative project count {count}")))
    }
}

impl ProjectRepository for SqliteProjectRepository<'_> {
    fn add_project(
        &mut self,
        project_id: ProjectId,
        owner_id: OwnerId,
        project_name: &str,
    ) -> RepoResult<ProjectView> {
        let result = self.insert_project(project_id, owner_id, project_name);

        match &result {
            Ok(_) => info!(
                "event=project_add module=repo status=ok project_id={project_id} owner_id={owner_id}"
            ),
            Err(err) => log_failure("project_add", err),
        }
        result
    }

    fn get_project(
        &self,
        owner_id: OwnerId,
        project_id: ProjectId,
    ) -> RepoResult<Option<ProjectView>> {
        let result = self.read_project(owner_id, project_id);

        match &result {
            Ok(view) => debug!(
                "event=project_get module=repo status=ok project_id={project_id} found={}",
                view.is_some()
            ),
            Err(err) => log_failure("project_get", err),
        }
        result
    }

    fn delete_project(
        &mut self,
        owner_id: OwnerId,
        project_id: ProjectId,
    ) -> RepoResult<Option<ProjectView>> {
        let result = self.snapshot_and_delete(owner_id, project_id);

        match &result {
            Ok(Some(snapshot)) => info!(
                "event=project_delete module=repo status=ok project_id={project_id} comments_removed={}",
                snapshot.comments.len()
            ),
            Ok(None) => debug!(
                "event=project_delete module=repo status=ok project_id={project_id} found=false"
            ),
            Err(err) => log_failure("project_delete", err),
        }
        result
    }

    fn project_count(&self) -> RepoResult<u64> {
        logged("project_count", self.count_projects())
    }
}

fn load_project_view(
    conn: &Connection,
    owner_id: OwnerId,
    project_id: ProjectId,
) -> RepoResult<Option<ProjectView>> {
    let Some(project) = fetch_project(conn, owner_id, project_id)? else {
        return Ok(None);
    };

    let owner = fetch_owner(conn, project.owner_id)?.ok_or_else(|| {
        RepoError::InvalidData(format!(
            "project {} references missing owner {}",
            project.project_id, project.owner_id
        ))
    })?;
    let comments = fetch_comments_for_project(conn, project.project_id)?
        .into_iter()
        .map(CommentView::from)
        .collect();

    Ok(Some(ProjectView::assemble(project, owner, comments)))
}

fn fetch_project(
    conn: &Connection,
    owner_id: OwnerId,
    project_id: ProjectId,
) -> RepoResult<Option<Project>> {
    let row = conn
        .query_row(
            "SELECT project_id, owner_id, project_name
             FROM projects
             WHERE owner_id = ?1 AND project_id = ?2;",
            params![owner_id.to_string(), project_id.to_string()],
            |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                ))
            },
        )
        .optional()?;

    match row {
        Some((project_text, owner_text, project_name)) => Ok(Some(Project {
            project_id: parse_uuid(&project_text, "projects.project_id")?,
            owner_id: parse_uuid(&owner_text, "projects.owner_id")?,
            project_name,
        })),
        None => Ok(None),
    }
}
