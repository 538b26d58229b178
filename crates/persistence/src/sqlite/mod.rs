// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Diesel-backed `SQLite` record store.

use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};

use agenda_domain::{Assignment, AssignmentId, NewAssignment};
use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::{debug, info};

use crate::RecordStore;
use crate::backend;
use crate::data_models::{AssignmentRow, NewAssignmentRow};
use crate::diesel_schema::assignments;
use crate::error::PersistenceError;

static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// A record store over a single `SQLite` connection.
pub struct SqliteStore {
    conn: Mutex<SqliteConnection>,
}

impl std::fmt::Debug for SqliteStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteStore").finish_non_exhaustive()
    }
}

impl SqliteStore {
    /// Creates a store over a fresh, isolated in-memory database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        // Unique shared in-memory database per call so tests are isolated.
        let db_id = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let shared_memory_url = format!("file:agenda_memdb_{db_id}?mode=memory&cache=shared");

        let conn: SqliteConnection = backend::sqlite::initialize_database(&shared_memory_url)?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Creates a store over a database file, creating it if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(path_str)?;
        backend::sqlite::enable_wal_mode(&mut conn)?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, SqliteConnection>, PersistenceError> {
        self.conn.lock().map_err(|_| PersistenceError::LockPoisoned)
    }
}

impl RecordStore for SqliteStore {
    fn list_all(&self) -> Result<Vec<Assignment>, PersistenceError> {
        let mut conn = self.lock()?;
        let rows: Vec<AssignmentRow> = assignments::table
            .select(AssignmentRow::as_select())
            .order(assignments::assignment_id.asc())
            .load(&mut *conn)?;

        debug!(count = rows.len(), "Loaded assignments from SQLite");
        rows.into_iter().map(Assignment::try_from).collect()
    }

    fn append(&self, record: &NewAssignment) -> Result<AssignmentId, PersistenceError> {
        let mut conn = self.lock()?;
        let row: NewAssignmentRow<'_> = NewAssignmentRow::from(record);

        let assignment_id: i64 = diesel::insert_into(assignments::table)
            .values(&row)
            .returning(assignments::assignment_id)
            .get_result(&mut *conn)?;

        info!(assignment_id, course = %record.course, "Inserted assignment");
        Ok(AssignmentId::new(assignment_id))
    }

    fn delete_by_id(&self, id: AssignmentId) -> Result<(), PersistenceError> {
        let mut conn = self.lock()?;
        let rows_affected: usize = diesel::delete(assignments::table)
            .filter(assignments::assignment_id.eq(id.value()))
            .execute(&mut *conn)?;

        if rows_affected == 0 {
            return Err(PersistenceError::NotFound(id.value()));
        }

        info!(assignment_id = id.value(), "Deleted assignment");
        Ok(())
    }
}
