// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::datetime::{parse_date, parse_time};
use crate::error::DomainError;
use crate::types::{AssignmentDraft, Course, CourseCatalog, NewAssignment, Subject, TaskType};
use std::str::FromStr;
use time::{Date, Time};

/// Smallest accepted declared duration, in minutes.
pub const MIN_DURATION_MINUTES: u16 = 5;

/// Largest accepted declared duration, in minutes.
pub const MAX_DURATION_MINUTES: u16 = 180;

/// Validates a draft submission and converts it into a `NewAssignment`.
///
/// This checks field constraints only. It does NOT check the daily quota
/// (that requires the existing records).
///
/// # Arguments
///
/// * `draft` - The unvalidated submission
/// * `catalog` - The configured course catalog
///
/// # Errors
///
/// Returns an error if:
/// - The course is empty or not in the catalog
/// - The due date or due time cannot be parsed
/// - The subject or teacher name is empty
/// - The task type is unknown
/// - The declared duration is out of range
pub fn validate_draft(
    draft: &AssignmentDraft,
    catalog: &CourseCatalog,
) -> Result<NewAssignment, DomainError> {
    let course: Course = catalog.resolve(&draft.course)?;
    let due_date: Date = parse_date(&draft.due_date)?;

    let due_time: Option<Time> = match draft.due_time.as_deref().map(str::trim) {
        Some(raw) if !raw.is_empty() => Some(parse_time(raw)?),
        _ => None,
    };

    // Rule: subject must not be empty
    let subject: Subject = Subject::new(&draft.subject);
    if subject.value().is_empty() {
        return Err(DomainError::InvalidSubject(String::from(
            "Subject cannot be empty",
        )));
    }

    // Rule: teacher name must not be empty
    let teacher_name: &str = draft.teacher_name.trim();
    if teacher_name.is_empty() {
        return Err(DomainError::InvalidTeacherName(String::from(
            "Teacher name cannot be empty",
        )));
    }

    let task_type: TaskType = TaskType::from_str(&draft.task_type)?;

    if let Some(minutes) = draft.duration_minutes {
        validate_duration(minutes)?;
    }

    Ok(NewAssignment {
        due_date,
        due_time,
        course,
        subject,
        teacher_name: teacher_name.to_string(),
        task_type,
        duration_minutes: draft.duration_minutes,
        description: draft.description.trim().to_string(),
    })
}

/// Validates a declared duration against the accepted range.
///
/// # Errors
///
/// Returns `DomainError::InvalidDuration` if the value is outside
/// `MIN_DURATION_MINUTES..=MAX_DURATION_MINUTES`.
pub const fn validate_duration(minutes: u16) -> Result<(), DomainError> {
    if minutes < MIN_DURATION_MINUTES || minutes > MAX_DURATION_MINUTES {
        return Err(DomainError::InvalidDuration {
            minutes,
            min: MIN_DURATION_MINUTES,
            max: MAX_DURATION_MINUTES,
        });
    }
    Ok(())
}
