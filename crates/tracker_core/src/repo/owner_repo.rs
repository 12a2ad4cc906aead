//! Owner read repository.
//!
//! Owners are seeded, never written through the tracker API, so this
//! repository is read-only.

use crate::model::owner::{Owner, OwnerId};
use crate::repo::{ensure_connection_ready, fetch_owner, logged, parse_uuid, RepoResult};
use rusqlite::Connection;

/// Repository interface for owner lookups.
pub trait OwnerRepository {
    /// Point lookup by primary key.
    fn get_owner(&self, owner_id: OwnerId) -> RepoResult<Option<Owner>>;
    /// Lists every owner ordered by insertion.
    fn list_owners(&self) -> RepoResult<Vec<Owner>>;
}

/// SQLite-backed owner repository.
pub struct SqliteOwnerRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteOwnerRepository<'conn> {
    /// Creates repository from an initialized connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }

    pub(crate) fn from_ready(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn read_owners(&self) -> RepoResult<Vec<Owner>> {
        let mut stmt = self
            .conn
            .prepare("SELECT owner_id, owner_username FROM owners ORDER BY rowid ASC;")?;
        let mut rows = stmt.query([])?;
        let mut owners = Vec::new();
        while let Some(row) = rows.next()? {
            let id_text: String = row.get("owner_id")?;
            owners.push(Owner {
                owner_id: parse_uuid(&id_text, "owners.owner_id")?,
                username: row.get("owner_username")?,
            });
        }
        Ok(owners)
    }
}

impl OwnerRepository for SqliteOwnerRepository<'_> {
    fn get_owner(&self, owner_id: OwnerId) -> RepoResult<Option<Owner>> {
        logged("owner_get", fetch_owner(self.conn, owner_id))
    }

    fn list_owners(&self) -> RepoResult<Vec<Owner>> {
        logged("owner_list", self.read_owners())
    }
}
