//! Comment repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Insert comments with a snapshot of the commenter's username.
//! - Update comment messages by primary key.
//! - Provide point/range reads, including the per-owner read through
//!   `v_owner_project_comments`.
//!
//! # Invariants
//! - `commenter_username` is written once on insert and never re-derived.
//! - Comments are only removed through their project's cascade delete.
//! - Range reads return rows in insertion order.

use crate::id::new_id;
use crate::model::comment::{Comment, CommentId, CommentView};
use crate::model::owner::OwnerId;
use crate::model::project::ProjectId;
use crate::repo::{
    ensure_connection_ready, fetch_comments_for_project, fetch_owner, log_failure, logged,
    parse_comment_row, RepoError, RepoResult, COMMENT_COLUMNS,
};
use log::info;
use rusqlite::{params, Connection, TransactionBehavior};

/// Repository interface for comment operations.
pub trait CommentRepository {
    /// Adds a comment by `commenter_id` to `project_id`.
    fn add_comment(
        &mut self,
        commenter_id: OwnerId,
        project_id: ProjectId,
        message: &str,
    ) -> RepoResult<CommentView>;
    /// Replaces the message of one comment.
    fn update_comment(&mut self, comment_id: CommentId, message: &str) -> RepoResult<Comment>;
    /// Point lookup by primary key.
    fn get_comment(&self, comment_id: CommentId) -> RepoResult<Option<Comment>>;
    /// Lists every comment of one project.
    fn list_comments(&self, project_id: ProjectId) -> RepoResult<Vec<Comment>>;
    /// Lists every comment under every project owned by `owner_id`.
    fn list_comments_by_owner(&self, owner_id: OwnerId) -> RepoResult<Vec<Comment>>;
}

/// SQLite-backed comment repository.
pub struct SqliteCommentRepository<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> SqliteCommentRepository<'conn> {
    /// Creates repository from an initialized connection.
    pub fn try_new(conn: &'conn mut Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }

    pub(crate) fn from_ready(conn: &'conn mut Connection) -> Self {
        Self { conn }
    }

    fn insert_comment(
        &mut self,
        comment_id: CommentId,
        commenter_id: OwnerId,
        project_id: ProjectId,
        message: &str,
    ) -> RepoResult<CommentView> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        let commenter = fetch_owner(&tx, commenter_id)?.ok_or_else(|| {
            RepoError::ConstraintViolation(format!("unknown commenter {commenter_id}"))
        })?;

        // Unknown projects are rejected here by the foreign key.
        tx.execute(
            "INSERT INTO comments (
                comment_id,
                commenter_id,
                commenter_username,
                project_id,
                message
            ) VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                comment_id.to_string(),
                commenter_id.to_string(),
                commenter.username.as_str(),
                project_id.to_string(),
                message,
            ],
        )?;
        tx.commit()?;

        Ok(CommentView {
            comment_id,
            commenter_id,
            commenter_username: commenter.username,
            message: message.to_string(),
        })
    }

    fn replace_message(&mut self, comment_id: CommentId, message: &str) -> RepoResult<Comment> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        let changed = tx.execute(
            "UPDATE comments SET message = ?2 WHERE comment_id = ?1;",
            params![comment_id.to_string(), message],
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "comment",
                id: comment_id,
            });
        }

        let updated = fetch_comment(&tx, comment_id)?.ok_or(RepoError::NotFound {
            entity: "comment",
            id: comment_id,
        })?;
        tx.commit()?;
        Ok(updated)
    }

    fn read_comments_by_owner(&self, owner_id: OwnerId) -> RepoResult<Vec<Comment>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {COMMENT_COLUMNS}
             FROM v_owner_project_comments
             WHERE owner_id = ?1
             ORDER BY comment_seq ASC;"
        ))?;
        let mut rows = stmt.query([owner_id.to_string()])?;
        let mut comments = Vec::new();
        while let Some(row) = rows.next()? {
            comments.push(parse_comment_row(row)?);
        }
        Ok(comments)
    }
}

impl CommentRepository for SqliteCommentRepository<'_> {
    fn add_comment(
        &mut self,
        commenter_id: OwnerId,
        project_id: ProjectId,
        message: &str,
    ) -> RepoResult<CommentView> {
        let comment_id = new_id();
        let result = self.insert_comment(comment_id, commenter_id, project_id, message);

        match &result {
            Ok(_) => info!(
                "event=comment_add module=repo status=ok comment_id={comment_id} project_id={project_id}"
            ),
            Err(err) => log_failure("comment_add", err),
        }
        result
    }

    fn update_comment(&mut self, comment_id: CommentId, message: &str) -> RepoResult<Comment> {
        let result = self.replace_message(comment_id, message);

        match &result {
            Ok(_) => info!("event=comment_update module=repo status=ok comment_id={comment_id}"),
            Err(err) => log_failure("comment_update", err),
        }
        result
    }

    fn get_comment(&self, comment_id: CommentId) -> RepoResult<Option<Comment>> {
        logged("comment_get", fetch_comment(self.conn, comment_id))
    }

    fn list_comments(&self, project_id: ProjectId) -> RepoResult<Vec<Comment>> {
        logged("comment_list", fetch_comments_for_project(self.conn, project_id))
    }

    fn list_comments_by_owner(&self, owner_id: OwnerId) -> RepoResult<Vec<Comment>> {
        logged("comment_list_by_owner", self.read_comments_by_owner(owner_id))
    }
}

fn fetch_comment(conn: &Connection, comment_id: CommentId) -> RepoResult<Option<Comment>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {COMMENT_COLUMNS} FROM comments WHERE comment_id = ?1;"
    ))?;
    let mut rows = stmt.query([comment_id.to_string()])?;
    if let Some(row) = rows.next()? {
        return Ok(Some(parse_comment_row(row)?));
    }
    Ok(None)
}
