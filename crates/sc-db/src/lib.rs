//! # sc-db
//!
//! libSQL persistence for signcount.
//!
//! Holds the small dictionary mirror the pipeline resolves glosses against
//! (datasets, glosses, annotation translations) and the corpus state it
//! maintains (corpora, speakers, documents, frequency records, and the two
//! per-gloss roll-up counters).
//!
//! Uses the `libsql` crate in local mode. Pass `":memory:"` for tests.

pub mod error;
pub mod helpers;
mod migrations;
pub mod repos;
pub mod service;

#[cfg(test)]
mod test_support;

use error::DatabaseError;
use libsql::Builder;

pub use repos::document::{AppliedDocument, DocumentRemoval};
pub use repos::frequency::FrequencyRow;
pub use repos::speaker::SpeakerUpsert;
pub use service::CorpusService;

/// Database handle: a libSQL database and its single connection.
pub struct SignDb {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
}

impl SignDb {
    /// Open a local database at the given path.
    ///
    /// Runs migrations automatically on every open.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;

        // Enable foreign keys (must be per-connection in SQLite)
        conn.execute("PRAGMA foreign_keys = ON", ())
            .await
            .map_err(|e| DatabaseError::Migration(format!("PRAGMA foreign_keys: {e}")))?;

        let sign_db = Self { db, conn };
        sign_db.run_migrations().await?;
        tracing::debug!(path, "db: opened");
        Ok(sign_db)
    }

    /// Access the underlying libSQL connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }
}
