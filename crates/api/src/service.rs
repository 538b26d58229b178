// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The scheduling service.
//!
//! Orchestrates validation, the quota, the record store and the calendar
//! projection. Every operation takes the authenticated `Actor` explicitly.
//!
//! ## Concurrency
//!
//! Submissions for the same (course, due date) run one at a time: each
//! holds a per-day lock across list, quota check and append, so two
//! teachers racing for the last slot cannot both get it. Submissions for
//! different days do not block each other.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use agenda::{Command, Effect, Schedule, SchedulingRules, TransitionResult, apply};
use agenda_domain::{
    Actor, Assignment, AssignmentDraft, AssignmentId, CalendarEvent, CalendarProjector, Course,
    DailyLoad, MAX_DURATION_MINUTES, MIN_DURATION_MINUTES, TaskType, WeekRange,
    calculate_daily_load, validate_draft,
};
use agenda_persistence::RecordStore;
use time::Date;
use tracing::{debug, info, warn};

use crate::error::ApiError;
use crate::request_response::{AssignmentView, CatalogResponse};

type DayKey = (Course, Date);

/// Scheduling operations over a record store.
pub struct SchedulingService<S: RecordStore> {
    store: S,
    rules: SchedulingRules,
    projector: CalendarProjector,
    day_locks: Mutex<HashMap<DayKey, Arc<Mutex<()>>>>,
}

impl<S: RecordStore> SchedulingService<S> {
    /// Creates a service.
    #[must_use]
    pub fn new(store: S, rules: SchedulingRules, projector: CalendarProjector) -> Self {
        Self {
            store,
            rules,
            projector,
            day_locks: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the underlying store.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Returns the rules in force.
    #[must_use]
    pub const fn rules(&self) -> &SchedulingRules {
        &self.rules
    }

    /// Submits a new assignment.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if a field is missing or invalid
    /// - `QuotaExceeded` (with the current count) if the day is full and the
    ///   actor is not a coordinator
    /// - `StoreUnavailable` if the store cannot be read or written
    ///
    /// Nothing is stored on any error.
    pub fn submit(&self, draft: &AssignmentDraft, actor: &Actor) -> Result<AssignmentId, ApiError> {
        let candidate = validate_draft(draft, &self.rules.catalog)?;
        let key: DayKey = (candidate.course, candidate.due_date);

        let day_lock: Arc<Mutex<()>> = self.day_lock(&key)?;
        let result: Result<AssignmentId, ApiError> = match day_lock.lock() {
            Ok(_guard) => self.submit_locked(draft, actor),
            Err(_) => Err(lock_poisoned()),
        };
        self.release_day_lock(&key, day_lock);

        result
    }

    fn submit_locked(&self, draft: &AssignmentDraft, actor: &Actor) -> Result<AssignmentId, ApiError> {
        let schedule: Schedule = Schedule::new(self.store.list_all()?);
        let command: Command = Command::SubmitAssignment {
            draft: draft.clone(),
        };

        let transition: TransitionResult =
            apply(&self.rules, &schedule, command, actor).map_err(|e| {
                warn!(login = actor.login(), error = %e, "Submission rejected");
                ApiError::from(e)
            })?;

        let Effect::Append(record) = &transition.effect else {
            return Err(ApiError::Internal {
                message: String::from("Submission produced a non-append effect"),
            });
        };

        let id: AssignmentId = self.store.append(record)?;
        info!(assignment_id = id.value(), audit = %transition.audit_event, "Assignment submitted");
        Ok(id)
    }

    fn day_lock(&self, key: &DayKey) -> Result<Arc<Mutex<()>>, ApiError> {
        let mut locks = self.day_locks.lock().map_err(|_| lock_poisoned())?;
        Ok(Arc::clone(locks.entry(key.clone()).or_default()))
    }

    // Drops the registry entry once no other submission holds or waits on it.
    fn release_day_lock(&self, key: &DayKey, day_lock: Arc<Mutex<()>>) {
        drop(day_lock);
        if let Ok(mut locks) = self.day_locks.lock() {
            if locks.get(key).is_some_and(|l| Arc::strong_count(l) == 1) {
                locks.remove(key);
            }
        }
    }

    /// Returns one calendar event per assignment of `course`.
    ///
    /// # Errors
    ///
    /// Returns `ValidationFailed` for an unknown course and
    /// `StoreUnavailable` if the store cannot be read.
    pub fn query_calendar(&self, course: &str, actor: &Actor) -> Result<Vec<CalendarEvent>, ApiError> {
        let records: Vec<Assignment> = self.records_for(course)?;
        let events: Vec<CalendarEvent> = self.projector.project(&records, actor)?;
        debug!(course, count = events.len(), "Projected calendar");
        Ok(events)
    }

    /// Like `query_calendar`, restricted to the Monday to Sunday week
    /// containing `week_of`.
    ///
    /// # Errors
    ///
    /// Same as `query_calendar`.
    pub fn query_calendar_week(
        &self,
        course: &str,
        week_of: Date,
        actor: &Actor,
    ) -> Result<(WeekRange, Vec<CalendarEvent>), ApiError> {
        let week: WeekRange = WeekRange::containing(week_of);
        let records: Vec<Assignment> = self
            .records_for(course)?
            .into_iter()
            .filter(|r| week.contains(r.due_date))
            .collect();
        let events: Vec<CalendarEvent> = self.projector.project(&records, actor)?;
        debug!(course, %week, count = events.len(), "Projected weekly calendar");
        Ok((week, events))
    }

    /// Deletes an assignment.
    ///
    /// # Errors
    ///
    /// - `NotFound` if no such assignment exists (including already deleted)
    /// - `Forbidden` if the actor may not delete it
    /// - `StoreUnavailable` if the store fails; the record then remains
    pub fn delete(&self, id: AssignmentId, actor: &Actor) -> Result<(), ApiError> {
        let schedule: Schedule = Schedule::new(self.store.list_all()?);
        let command: Command = Command::DeleteAssignment { assignment_id: id };

        let transition: TransitionResult =
            apply(&self.rules, &schedule, command, actor).map_err(|e| {
                warn!(login = actor.login(), assignment_id = id.value(), error = %e, "Deletion rejected");
                ApiError::from(e)
            })?;

        let Effect::Remove(record) = &transition.effect else {
            return Err(ApiError::Internal {
                message: String::from("Deletion produced a non-remove effect"),
            });
        };

        self.store.delete_by_id(record.id)?;
        info!(assignment_id = id.value(), audit = %transition.audit_event, "Assignment deleted");
        Ok(())
    }

    /// Returns the assignments of `course` sorted by due date, time and id,
    /// with descriptions redacted for the actor.
    ///
    /// # Errors
    ///
    /// Returns `ValidationFailed` for an unknown course and
    /// `StoreUnavailable` if the store cannot be read.
    pub fn list_assignments(&self, course: &str, actor: &Actor) -> Result<Vec<AssignmentView>, ApiError> {
        let mut records: Vec<Assignment> = self.records_for(course)?;
        records.sort_by_key(|r| (r.due_date, r.due_time, r.id));
        Ok(records
            .iter()
            .map(|r| AssignmentView::for_actor(r, actor))
            .collect())
    }

    /// Returns the per-day workload of `course`, ordered by date.
    ///
    /// # Errors
    ///
    /// Returns `ValidationFailed` for an unknown course and
    /// `StoreUnavailable` if the store cannot be read.
    pub fn daily_load(&self, course: &str) -> Result<Vec<DailyLoad>, ApiError> {
        let course: Course = self.rules.catalog.resolve(course)?;
        let records: Vec<Assignment> = self.store.list_all()?;
        Ok(calculate_daily_load(&records, &course))
    }

    /// Returns the submission form options.
    #[must_use]
    pub fn catalog(&self) -> CatalogResponse {
        CatalogResponse {
            courses: self
                .rules
                .catalog
                .courses()
                .iter()
                .map(|c| c.name().to_string())
                .collect(),
            task_types: TaskType::ALL.iter().map(|t| t.as_str().to_string()).collect(),
            min_duration_minutes: MIN_DURATION_MINUTES,
            max_duration_minutes: MAX_DURATION_MINUTES,
            daily_limit: self.rules.quota.limit(),
        }
    }

    fn records_for(&self, course: &str) -> Result<Vec<Assignment>, ApiError> {
        let course: Course = self.rules.catalog.resolve(course)?;
        Ok(self
            .store
            .list_all()?
            .into_iter()
            .filter(|r| r.course == course)
            .collect())
    }
}

fn lock_poisoned() -> ApiError {
    ApiError::Internal {
        message: String::from("Scheduling lock poisoned"),
    }
}
