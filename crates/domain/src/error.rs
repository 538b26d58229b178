// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The course is empty or not part of the configured catalog.
    UnknownCourse {
        /// The course as it was supplied.
        course: String,
    },
    /// The course catalog itself is unusable.
    InvalidCourseCatalog(String),
    /// Subject is empty or invalid.
    InvalidSubject(String),
    /// Teacher name is empty or invalid.
    InvalidTeacherName(String),
    /// Task type is not one of the known task types.
    InvalidTaskType(String),
    /// Role is not one of the known roles.
    InvalidRole(String),
    /// Declared duration is outside the accepted range.
    InvalidDuration {
        /// The rejected value in minutes.
        minutes: u16,
        /// Smallest accepted value.
        min: u16,
        /// Largest accepted value.
        max: u16,
    },
    /// Failed to parse date from string.
    DateParseError {
        /// The invalid date string.
        date_string: String,
        /// The parsing error message.
        error: String,
    },
    /// Failed to parse a time of day or a clock-formatted duration.
    TimeParseError {
        /// The invalid time string.
        time_string: String,
        /// The parsing error message.
        error: String,
    },
    /// Timezone is not a known IANA timezone.
    InvalidTimezone(String),
    /// A color is not a `#RRGGBB` value.
    InvalidColor(String),
    /// The daily quota limit must allow at least one assignment.
    InvalidQuotaLimit {
        /// The rejected limit.
        limit: usize,
    },
    /// A calendar window could not be resolved.
    InvalidCalendarWindow {
        /// Description of the failure.
        reason: String,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownCourse { course } => {
                write!(f, "Course '{course}' is not part of the course catalog")
            }
            Self::InvalidCourseCatalog(msg) => write!(f, "Invalid course catalog: {msg}"),
            Self::InvalidSubject(msg) => write!(f, "Invalid subject: {msg}"),
            Self::InvalidTeacherName(msg) => write!(f, "Invalid teacher name: {msg}"),
            Self::InvalidTaskType(value) => write!(
                f,
                "Invalid task type '{value}'. Must be one of Reading, Exercise, Project, Exam, Presentation"
            ),
            Self::InvalidRole(value) => {
                write!(f, "Invalid role '{value}'. Must be 'teacher' or 'coordinator'")
            }
            Self::InvalidDuration { minutes, min, max } => write!(
                f,
                "Invalid duration: {minutes} minutes. Must be between {min} and {max}"
            ),
            Self::DateParseError { date_string, error } => {
                write!(f, "Failed to parse date '{date_string}': {error}")
            }
            Self::TimeParseError { time_string, error } => {
                write!(f, "Failed to parse time '{time_string}': {error}")
            }
            Self::InvalidTimezone(tz) => write!(f, "Invalid timezone: {tz}"),
            Self::InvalidColor(color) => {
                write!(f, "Invalid color '{color}'. Must be in #RRGGBB form")
            }
            Self::InvalidQuotaLimit { limit } => {
                write!(f, "Invalid daily limit: {limit}. Must be greater than 0")
            }
            Self::InvalidCalendarWindow { reason } => {
                write!(f, "Invalid calendar window: {reason}")
            }
        }
    }
}

impl std::error::Error for DomainError {}
