// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Record stores for the school assignment scheduler.
//!
//! Every store implements [`RecordStore`]: list everything, append one
//! record, delete one record by id. Three backends are provided:
//!
//! - **memory**: in-process, for tests and demos
//! - **csv**: a flat file in one of two column layouts ([`SchemaVariant`])
//! - **sqlite**: Diesel over `SQLite` with embedded migrations
//!
//! [`Persistence`] wraps whichever backend the configuration selects.
//!
//! ## Guarantees
//!
//! - Ids are issued by the store and never reused after a delete
//! - A failed append leaves no record behind; a failed delete leaves the
//!   record in place
//! - Stores are `Send + Sync` and serialize their own access
//!
//! Stores do not enforce the daily quota. Callers that need
//! check-then-append to be atomic must serialize it themselves.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod flat_file;
mod memory;
mod sqlite;

#[cfg(test)]
mod tests;

use std::path::Path;

use agenda_domain::{Assignment, AssignmentId, NewAssignment};

pub use error::PersistenceError;
pub use flat_file::{CsvStore, SchemaVariant};
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

/// A durable list of assignment records.
pub trait RecordStore: Send + Sync {
    /// Returns every stored assignment.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read.
    fn list_all(&self) -> Result<Vec<Assignment>, PersistenceError>;

    /// Stores a new assignment and returns the id issued for it.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be written. Nothing is
    /// stored in that case.
    fn append(&self, record: &NewAssignment) -> Result<AssignmentId, PersistenceError>;

    /// Removes the assignment with this id.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if no such assignment exists, or
    /// another error if the backing store cannot be written.
    fn delete_by_id(&self, id: AssignmentId) -> Result<(), PersistenceError>;
}

/// The configured record store.
#[derive(Debug)]
pub enum Persistence {
    /// In-process store.
    Memory(MemoryStore),
    /// Flat CSV file.
    Csv(CsvStore),
    /// `SQLite` database.
    Sqlite(SqliteStore),
}

impl Persistence {
    /// Creates an empty in-process store.
    #[must_use]
    pub const fn new_memory() -> Self {
        Self::Memory(MemoryStore::new())
    }

    /// Opens a CSV store.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing file cannot be loaded.
    pub fn new_csv<P: AsRef<Path>>(path: P, variant: SchemaVariant) -> Result<Self, PersistenceError> {
        Ok(Self::Csv(CsvStore::open(path, variant)?))
    }

    /// Creates a store over a fresh in-memory `SQLite` database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_sqlite_in_memory() -> Result<Self, PersistenceError> {
        Ok(Self::Sqlite(SqliteStore::new_in_memory()?))
    }

    /// Opens a file-based `SQLite` store.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or migrated.
    pub fn new_sqlite_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        Ok(Self::Sqlite(SqliteStore::new_with_file(path)?))
    }

    /// Returns the backend name, for logging.
    #[must_use]
    pub const fn backend_name(&self) -> &'static str {
        match self {
            Self::Memory(_) => "memory",
            Self::Csv(_) => "csv",
            Self::Sqlite(_) => "sqlite",
        }
    }

    fn store(&self) -> &dyn RecordStore {
        match self {
            Self::Memory(store) => store,
            Self::Csv(store) => store,
            Self::Sqlite(store) => store,
        }
    }
}

impl RecordStore for Persistence {
    fn list_all(&self) -> Result<Vec<Assignment>, PersistenceError> {
        self.store().list_all()
    }

    fn append(&self, record: &NewAssignment) -> Result<AssignmentId, PersistenceError> {
        self.store().append(record)
    }

    fn delete_by_id(&self, id: AssignmentId) -> Result<(), PersistenceError> {
        self.store().delete_by_id(id)
    }
}
