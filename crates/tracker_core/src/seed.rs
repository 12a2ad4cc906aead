//! Canonical seed dataset and fixture loader.
//!
//! # Responsibility
//! - Seed owners, which the tracker API never creates itself.
//! - Reset a database to the canonical demo/test dataset.
//!
//! # Invariants
//! - `populate_seed_data` replaces all rows in one transaction.
//! - Seed rows go through the same foreign keys as API writes.

use crate::model::comment::CommentId;
use crate::model::owner::{Owner, OwnerId};
use crate::model::project::ProjectId;
use crate::repo::{ensure_connection_ready, RepoResult};
use log::info;
use rusqlite::{params, Connection, TransactionBehavior};
use uuid::Uuid;

/// One seeded owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedOwner {
    pub owner_id: OwnerId,
    pub username: &'static str,
}

/// One seeded project.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedProject {
    pub project_id: ProjectId,
    pub owner_id: OwnerId,
    pub project_name: &'static str,
}

/// One seeded comment, with its username snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedComment {
    pub comment_id: CommentId,
    pub commenter_id: OwnerId,
    pub commenter_username: &'static str,
    pub project_id: ProjectId,
    pub message: &'static str,
}

pub const OWNER_1: OwnerId = Uuid::from_u128(0x8bde3e84_a964_479c_9c7b_4d7991717a1b);
pub const OWNER_2: OwnerId = Uuid::from_u128(0x45e3c49a_c699_405b_a8b2_f5407bb1a133);
pub const OWNER_3: OwnerId = Uuid::from_u128(0x45e3c49a_c699_405b_a8b2_00000000c0d3);
pub const OWNER_4: OwnerId = Uuid::from_u128(0x8bde3e84_a964_479c_9c7b_00000000c0d4);

pub const PROJECT_11: ProjectId = Uuid::from_u128(0x00000000_0000_4000_8000_000000000011);
pub const PROJECT_12: ProjectId = Uuid::from_u128(0x00000000_0000_4000_8000_000000000012);
pub const PROJECT_21: ProjectId = Uuid::from_u128(0x00000000_0000_4000_8000_000000000021);
pub const PROJECT_31: ProjectId = Uuid::from_u128(0x00000000_0000_4000_8000_000000000031);

pub const SEED_OWNERS: [SeedOwner; 4] = [
    SeedOwner {
        owner_id: OWNER_1,
        username: "challengeuser1",
    },
    SeedOwner {
        owner_id: OWNER_2,
        username: "challengeuser2",
    },
    SeedOwner {
        owner_id: OWNER_3,
        username: "newuser3",
    },
    SeedOwner {
        owner_id: OWNER_4,
        username: "commenter1",
    },
];

pub const SEED_PROJECTS: [SeedProject; 4] = [
    SeedProject {
        project_id: PROJECT_11,
        owner_id: OWNER_1,
        project_name: "Human Gee, Gnome",
    },
    SeedProject {
        project_id: PROJECT_12,
        owner_id: OWNER_1,
        project_name: "Argle-Bargle",
    },
    SeedProject {
        project_id: PROJECT_21,
        owner_id: OWNER_2,
        project_name: "Garden Shed",
    },
    SeedProject {
        project_id: PROJECT_31,
        owner_id: OWNER_3,
        project_name: "Colossus The Forbin Project",
    },
];

pub const SEED_COMMENTS: [SeedComment; 4] = [
    SeedComment {
        comment_id: Uuid::from_u128(0x00000000_0000_4000_9000_000000000011),
        commenter_id: OWNER_1,
        commenter_username: "challengeuser1",
        project_id: PROJECT_11,
        message: "Owner 1, project 1, comment 1",
    },
    SeedComment {
        comment_id: Uuid::from_u128(0x00000000_0000_4000_9000_000000000012),
        commenter_id: OWNER_1,
        commenter_username: "challengeuser1",
        project_id: PROJECT_11,
        message: "Owner 1, project 1, comment 2",
    },
    SeedComment {
        comment_id: Uuid::from_u128(0x00000000_0000_4000_9000_000000000021),
        commenter_id: OWNER_2,
        commenter_username: "challengeuser2",
        project_id: PROJECT_21,
        message: "Owner 2, project 2, comment 1",
    },
    SeedComment {
        comment_id: Uuid::from_u128(0x00000000_0000_4000_9000_000000000031),
        commenter_id: OWNER_3,
        commenter_username: "newuser3",
        project_id: PROJECT_31,
        message: "Owner 3, project 1, comment 1",
    },
];

/// Row counts written by `populate_seed_data`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub owners: usize,
    pub projects: usize,
    pub comments: usize,
}

/// Inserts one owner row.
pub fn seed_owner(conn: &Connection, owner: &Owner) -> RepoResult<()> {
    conn.execute(
        "INSERT INTO owners (owner_id, owner_username) VALUES (?1, ?2);",
        params![owner.owner_id.to_string(), owner.username.as_str()],
    )?;
    Ok(())
}

/// Clears all tracker rows and inserts the canonical dataset.
pub fn populate_seed_data(conn: &mut Connection) -> RepoResult<SeedSummary> {
    ensure_connection_ready(conn)?;
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

    tx.execute_batch(
        "DELETE FROM comments;
         DELETE FROM projects;
         DELETE FROM owners;",
    )?;

    for owner in &SEED_OWNERS {
        tx.execute(
            "INSERT INTO owners (owner_id, owner_username) VALUES (?1, ?2);",
            params![owner.owner_id.to_string(), owner.username],
        )?;
    }
    for project in &SEED_PROJECTS {
        tx.execute(
            "INSERT INTO projects (project_id, owner_id, project_name) VALUES (?1, ?2, ?3);",
            params![
                project.project_id.to_string(),
                project.owner_id.to_string(),
                project.project_name,
            ],
        )?;
    }
    for comment in &SEED_COMMENTS {
        tx.execute(
            "INSERT INTO comments (comment_id, commenter_id, commenter_username, project_id, message)
             VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                comment.comment_id.to_string(),
                comment.commenter_id.to_string(),
                comment.commenter_username,
                comment.project_id.to_string(),
                comment.message,
            ],
        )?;
    }
    tx.commit()?;

    let summary = SeedSummary {
        owners: SEED_OWNERS.len(),
        projects: SEED_PROJECTS.len(),
        comments: SEED_COMMENTS.len(),
    };
    info!(
        "event=seed_populate module=seed status=ok owners={} projects={} comments={}",
        summary.owners, summary.projects, summary.comments
    );
    Ok(summary)
}
