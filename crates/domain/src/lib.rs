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
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod access;
mod calendar;
mod datetime;
mod error;
mod load;
mod quota;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use access::{REDACTION_MARKER, can_delete, can_view_description, visible_description};
pub use calendar::{
    CalendarEvent, CalendarProjector, DEFAULT_COLOR, DEFAULT_EVENT_MINUTES, DEFAULT_START_HOUR,
    EventProperties, SubjectPalette, WeekRange,
};
pub use datetime::{
    format_clock_minutes, format_date, format_due_at, format_time, parse_clock_minutes,
    parse_date, parse_due_at, parse_time,
};
pub use error::DomainError;
pub use load::{DailyLoad, calculate_daily_load};
pub use quota::{DAILY_ASSIGNMENT_LIMIT, QuotaDecision, QuotaPolicy};
pub use types::{
    Actor, Assignment, AssignmentDraft, AssignmentId, Course, CourseCatalog, NewAssignment, Role,
    Subject, TaskType,
};
pub use validation::{MAX_DURATION_MINUTES, MIN_DURATION_MINUTES, validate_draft, validate_duration};
