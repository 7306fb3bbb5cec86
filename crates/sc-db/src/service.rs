//! Service layer over `SignDb`.
//!
//! `CorpusService` is the single collaborator the sync pipeline talks to: gloss
//! lookup on one side, frequency persistence on the other. All repo methods
//! are implemented as `impl CorpusService` blocks under [`crate::repos`].

use crate::SignDb;
use crate::error::DatabaseError;

pub struct CorpusService {
    db: SignDb,
}

impl CorpusService {
    /// Create a new service wrapping a local database.
    ///
    /// # Arguments
    ///
    /// * `db_path` - Path to the libSQL database file, or `":memory:"` for tests.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened.
    pub async fn new_local(db_path: &str) -> Result<Self, DatabaseError> {
        Ok(Self {
            db: SignDb::open_local(db_path).await?,
        })
    }

    /// Create from an existing `SignDb`.
    #[must_use]
    pub const fn from_db(db: SignDb) -> Self {
        Self { db }
    }

    /// Access the underlying database handle.
    #[must_use]
    pub const fn db(&self) -> &SignDb {
        &self.db
    }

    pub(crate) const fn conn(&self) -> &libsql::Connection {
        self.db.conn()
    }
}
