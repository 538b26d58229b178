// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use agenda_audit::AuditEvent;
use agenda_domain::{Assignment, AssignmentId, Course, CourseCatalog, NewAssignment, QuotaPolicy};
use time::Date;

/// The rules every transition is checked against.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchedulingRules {
    /// The courses assignments may target.
    pub catalog: CourseCatalog,
    /// The per-course daily quota.
    pub quota: QuotaPolicy,
}

impl SchedulingRules {
    /// Creates a rule set.
    #[must_use]
    pub const fn new(catalog: CourseCatalog, quota: QuotaPolicy) -> Self {
        Self { catalog, quota }
    }
}

/// The set of Active assignments a transition is evaluated against.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schedule {
    /// Every Active assignment.
    pub assignments: Vec<Assignment>,
}

impl Schedule {
    /// Creates a schedule from the stored assignments.
    #[must_use]
    pub const fn new(assignments: Vec<Assignment>) -> Self {
        Self { assignments }
    }

    /// Finds an assignment by identifier.
    #[must_use]
    pub fn find(&self, id: AssignmentId) -> Option<&Assignment> {
        self.assignments.iter().find(|a| a.id == id)
    }

    /// Counts the assignments for `course` due on `date`.
    #[must_use]
    pub fn day_count(&self, course: &Course, date: Date) -> usize {
        QuotaPolicy::count_for_day(&self.assignments, course, date)
    }
}

/// The store change a successful transition asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Append the assignment; the store issues its identifier.
    Append(NewAssignment),
    /// Remove the assignment.
    Remove(Assignment),
}

/// The result of a successful state transition.
///
/// Transitions are pure: applying the effect is the caller's job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionResult {
    /// The change to write to the store.
    pub effect: Effect,
    /// The audit event recording this transition.
    pub audit_event: AuditEvent,
}
