// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use std::time::Duration;

use agenda::SchedulingRules;
use agenda_domain::{
    Actor, Assignment, AssignmentDraft, AssignmentId, CalendarProjector, NewAssignment, Subject,
};
use agenda_persistence::{MemoryStore, PersistenceError, RecordStore};

use crate::SchedulingService;

pub fn create_test_service() -> SchedulingService<MemoryStore> {
    create_service_over(MemoryStore::new())
}

pub fn create_service_over<S: RecordStore>(store: S) -> SchedulingService<S> {
    SchedulingService::new(store, SchedulingRules::default(), CalendarProjector::default())
}

pub fn create_math_teacher() -> Actor {
    Actor::teacher("alopez", "Ana Lopez", Subject::new("Math"))
}

pub fn create_science_teacher() -> Actor {
    Actor::teacher("lperez", "Luis Perez", Subject::new("Science"))
}

pub fn create_coordinator() -> Actor {
    Actor::coordinator("coord", "Marta Diaz")
}

pub fn create_draft(course: &str, date: &str, subject: &str, teacher: &str) -> AssignmentDraft {
    AssignmentDraft {
        course: String::from(course),
        due_date: String::from(date),
        due_time: None,
        subject: String::from(subject),
        teacher_name: String::from(teacher),
        task_type: String::from("Exercise"),
        duration_minutes: Some(30),
        description: format!("{subject} homework"),
    }
}

pub fn create_math_draft(date: &str) -> AssignmentDraft {
    create_draft("Third", date, "Math", "Ana Lopez")
}

pub fn create_science_draft(date: &str) -> AssignmentDraft {
    create_draft("Third", date, "Science", "Luis Perez")
}

fn unplugged() -> PersistenceError {
    PersistenceError::Io(String::from("disk unplugged"))
}

/// A store whose every operation fails.
pub struct FailingStore;

impl RecordStore for FailingStore {
    fn list_all(&self) -> Result<Vec<Assignment>, PersistenceError> {
        Err(unplugged())
    }

    fn append(&self, _record: &NewAssignment) -> Result<AssignmentId, PersistenceError> {
        Err(unplugged())
    }

    fn delete_by_id(&self, _id: AssignmentId) -> Result<(), PersistenceError> {
        Err(unplugged())
    }
}

/// A store that reads fine but cannot write.
#[derive(Default)]
pub struct ReadOnlyStore {
    pub inner: MemoryStore,
}

impl RecordStore for ReadOnlyStore {
    fn list_all(&self) -> Result<Vec<Assignment>, PersistenceError> {
        self.inner.list_all()
    }

    fn append(&self, _record: &NewAssignment) -> Result<AssignmentId, PersistenceError> {
        Err(unplugged())
    }

    fn delete_by_id(&self, _id: AssignmentId) -> Result<(), PersistenceError> {
        Err(unplugged())
    }
}

/// A memory store that pauses after every read, widening the window in
/// which unsynchronized submissions would interleave.
#[derive(Default)]
pub struct SlowStore {
    pub inner: MemoryStore,
}

impl RecordStore for SlowStore {
    fn list_all(&self) -> Result<Vec<Assignment>, PersistenceError> {
        let records = self.inner.list_all();
        std::thread::sleep(Duration::from_millis(5));
        records
    }

    fn append(&self, record: &NewAssignment) -> Result<AssignmentId, PersistenceError> {
        self.inner.append(record)
    }

    fn delete_by_id(&self, id: AssignmentId) -> Result<(), PersistenceError> {
        self.inner.delete_by_id(id)
    }
}
