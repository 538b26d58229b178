// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

#[cfg(test)]
mod tests;

use agenda_domain::{Course, format_date};
use time::Date;

/// Represents the entity performing an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    /// The login of the authenticated actor.
    pub login: String,
    /// The actor's role (e.g., "teacher", "coordinator").
    pub role: String,
}

impl Actor {
    /// Creates a new Actor.
    ///
    /// # Arguments
    ///
    /// * `login` - The login of the actor
    /// * `role` - The role the actor acted under
    #[must_use]
    pub const fn new(login: String, role: String) -> Self {
        Self { login, role }
    }
}

impl From<&agenda_domain::Actor> for Actor {
    fn from(actor: &agenda_domain::Actor) -> Self {
        Self::new(actor.login().to_string(), actor.role().to_string())
    }
}

/// Represents the specific action performed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    /// The name of the action (e.g., "`SubmitAssignment`").
    pub name: String,
    /// Optional additional details about the action.
    pub details: Option<String>,
}

impl Action {
    /// Creates a new Action.
    #[must_use]
    pub const fn new(name: String, details: Option<String>) -> Self {
        Self { name, details }
    }
}

/// The number of assignments on the affected (course, day) at one point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateSnapshot {
    /// Assignments on the affected day.
    pub day_count: usize,
}

impl StateSnapshot {
    /// Creates a new `StateSnapshot`.
    #[must_use]
    pub const fn new(day_count: usize) -> Self {
        Self { day_count }
    }
}

impl std::fmt::Display for StateSnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "day_count={}", self.day_count)
    }
}

/// An immutable audit event representing a state transition.
///
/// Every successful submit or delete produces exactly one audit event,
/// capturing:
/// - Who performed the action (actor)
/// - What action was performed (action)
/// - Which (course, day) was affected
/// - The day's count before and after the transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditEvent {
    /// The actor who initiated this state change.
    pub actor: Actor,
    /// The action that was performed.
    pub action: Action,
    /// The affected course.
    pub course: Course,
    /// The affected due date.
    pub due_date: Date,
    /// The state before the transition.
    pub before: StateSnapshot,
    /// The state after the transition.
    pub after: StateSnapshot,
}

impl AuditEvent {
    /// Creates a new `AuditEvent`.
    #[must_use]
    pub const fn new(
        actor: Actor,
        action: Action,
        course: Course,
        due_date: Date,
        before: StateSnapshot,
        after: StateSnapshot,
    ) -> Self {
        Self {
            actor,
            action,
            course,
            due_date,
            before,
            after,
        }
    }
}

impl std::fmt::Display for AuditEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} by {} ({}) on {} {}: {} -> {}",
            self.action.name,
            self.actor.login,
            self.actor.role,
            self.course,
            format_date(self.due_date),
            self.before,
            self.after
        )?;
        if let Some(details) = &self.action.details {
            write!(f, " [{details}]")?;
        }
        Ok(())
    }
}
