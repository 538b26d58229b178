// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use agenda_domain::{DomainError, format_date};
use time::Date;

/// Errors that can occur during state transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A domain rule was violated.
    DomainViolation(DomainError),
    /// The (course, day) already holds the maximum number of assignments.
    QuotaExceeded {
        /// The course name.
        course: String,
        /// The due date.
        due_date: Date,
        /// Assignments already on that day.
        count: usize,
        /// The limit in force.
        limit: usize,
    },
    /// The actor may not perform the action on the assignment.
    Forbidden {
        /// The assignment the actor tried to act on.
        assignment_id: i64,
        /// Why the action was refused.
        reason: String,
    },
    /// No assignment with this identifier exists.
    AssignmentNotFound(i64),
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainViolation(err) => write!(f, "Domain violation: {err}"),
            Self::QuotaExceeded {
                course,
                due_date,
                count,
                limit,
            } => write!(
                f,
                "Course '{course}' already has {count} assignments on {} (limit {limit})",
                format_date(*due_date)
            ),
            Self::Forbidden {
                assignment_id,
                reason,
            } => write!(f, "Not allowed to act on assignment {assignment_id}: {reason}"),
            Self::AssignmentNotFound(id) => write!(f, "Assignment {id} not found"),
        }
    }
}

impl std::error::Error for CoreError {}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}
