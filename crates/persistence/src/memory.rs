// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! In-process record store.

use std::sync::{Mutex, MutexGuard};

use agenda_domain::{Assignment, AssignmentId, NewAssignment};
use tracing::debug;

use crate::RecordStore;
use crate::error::PersistenceError;

#[derive(Debug)]
struct MemoryState {
    records: Vec<Assignment>,
    next_id: i64,
}

/// A record store that keeps everything in memory.
#[derive(Debug)]
pub struct MemoryStore {
    state: Mutex<MemoryState>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    /// Creates an empty store. Ids start at 1.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: Mutex::new(MemoryState {
                records: Vec::new(),
                next_id: 1,
            }),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, MemoryState>, PersistenceError> {
        self.state.lock().map_err(|_| PersistenceError::LockPoisoned)
    }
}

impl RecordStore for MemoryStore {
    fn list_all(&self) -> Result<Vec<Assignment>, PersistenceError> {
        Ok(self.lock()?.records.clone())
    }

    fn append(&self, record: &NewAssignment) -> Result<AssignmentId, PersistenceError> {
        let mut state = self.lock()?;
        let id: AssignmentId = AssignmentId::new(state.next_id);
        state.next_id += 1;
        state.records.push(record.clone().with_id(id));
        debug!(assignment_id = id.value(), "Appended assignment in memory");
        Ok(id)
    }

    fn delete_by_id(&self, id: AssignmentId) -> Result<(), PersistenceError> {
        let mut state = self.lock()?;
        let position = state
            .records
            .iter()
            .position(|r| r.id == id)
            .ok_or(PersistenceError::NotFound(id.value()))?;
        state.records.remove(position);
        debug!(assignment_id = id.value(), "Deleted assignment in memory");
        Ok(())
    }
}
