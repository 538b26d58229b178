// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Daily assignment quota.
//!
//! ## Invariants
//!
//! - At most `limit` Active assignments exist per (course, due date)
//! - Days are compared by date only; the time of day is ignored
//! - Coordinators are exempt from the limit
//!
//! The policy is a pure predicate over the records it is given. Making the
//! count-then-append sequence atomic is the caller's job.

use crate::error::DomainError;
use crate::types::{Actor, Assignment, Course};
use time::Date;

/// Maximum number of assignments per course per calendar day.
pub const DAILY_ASSIGNMENT_LIMIT: usize = 3;

/// Outcome of evaluating the quota for a candidate (course, date).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuotaDecision {
    /// The candidate may be admitted.
    Admit {
        /// Assignments already on that day.
        count: usize,
    },
    /// The day is full.
    Reject {
        /// Assignments already on that day.
        count: usize,
        /// The limit in force.
        limit: usize,
    },
}

impl QuotaDecision {
    /// Returns whether the candidate may be admitted.
    #[must_use]
    pub const fn is_admitted(&self) -> bool {
        matches!(self, Self::Admit { .. })
    }

    /// Returns the number of assignments already on that day.
    #[must_use]
    pub const fn count(&self) -> usize {
        match self {
            Self::Admit { count } | Self::Reject { count, .. } => *count,
        }
    }
}

/// The per-course daily quota rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuotaPolicy {
    limit: usize,
}

impl Default for QuotaPolicy {
    fn default() -> Self {
        Self {
            limit: DAILY_ASSIGNMENT_LIMIT,
        }
    }
}

impl QuotaPolicy {
    /// Creates a policy with a custom daily limit.
    ///
    /// # Errors
    ///
    /// Returns an error if `limit` is zero.
    pub const fn new(limit: usize) -> Result<Self, DomainError> {
        if limit == 0 {
            return Err(DomainError::InvalidQuotaLimit { limit });
        }
        Ok(Self { limit })
    }

    /// Returns the daily limit.
    #[must_use]
    pub const fn limit(&self) -> usize {
        self.limit
    }

    /// Counts the assignments for `course` due on `date`.
    #[must_use]
    pub fn count_for_day(existing: &[Assignment], course: &Course, date: Date) -> usize {
        existing.iter().filter(|a| a.is_on(course, date)).count()
    }

    /// Evaluates the quota for a candidate and reports the current count.
    #[must_use]
    pub fn evaluate(
        &self,
        existing: &[Assignment],
        course: &Course,
        date: Date,
        actor: &Actor,
    ) -> QuotaDecision {
        let count: usize = Self::count_for_day(existing, course, date);
        if count < self.limit || actor.is_coordinator() {
            QuotaDecision::Admit { count }
        } else {
            QuotaDecision::Reject {
                count,
                limit: self.limit,
            }
        }
    }

    /// Returns whether a new assignment may be admitted for (course, date).
    #[must_use]
    pub fn can_admit(
        &self,
        existing: &[Assignment],
        course: &Course,
        date: Date,
        actor: &Actor,
    ) -> bool {
        self.evaluate(existing, course, date, actor).is_admitted()
    }
}
