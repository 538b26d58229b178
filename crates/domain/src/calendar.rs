// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Calendar projection of assignments.
//!
//! This module turns assignments into displayable calendar events based on:
//! - The due date and optional time of day
//! - The declared duration (or a default window)
//! - A subject to color palette
//! - The requesting actor's right to read descriptions
//!
//! ## Invariants
//!
//! - Exactly one event per assignment
//! - Event times are wall-clock times in the declared timezone, stored as
//!   UTC RFC 3339 strings
//! - Descriptions the actor may not read are replaced by `REDACTION_MARKER`
//! - Projection keeps no state between calls and returns events in no
//!   particular order

use crate::access::{can_view_description, visible_description};
use crate::datetime::{format_date, format_time};
use crate::error::DomainError;
use crate::types::{Actor, Assignment, Subject};
use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use time::{Date, Time};

/// Event length used when an assignment declares no duration.
pub const DEFAULT_EVENT_MINUTES: u16 = 60;

/// Hour of day used for assignments without a time of day.
pub const DEFAULT_START_HOUR: u32 = 8;

/// Longest DST gap searched when a local start time does not exist.
const MAX_GAP_MINUTES: i64 = 180;

/// Color used for subjects missing from the palette.
pub const DEFAULT_COLOR: &str = "#9E9E9E";

/// Maps subjects to display colors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectPalette {
    entries: Vec<(Subject, String)>,
    default_color: String,
}

impl Default for SubjectPalette {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            default_color: String::from(DEFAULT_COLOR),
        }
    }
}

impl SubjectPalette {
    /// Creates a palette.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidColor` if any color is not `#RRGGBB`.
    pub fn new(
        entries: Vec<(Subject, String)>,
        default_color: String,
    ) -> Result<Self, DomainError> {
        validate_color(&default_color)?;
        for (_, color) in &entries {
            validate_color(color)?;
        }
        Ok(Self {
            entries,
            default_color,
        })
    }

    /// Returns the color for a subject, or the default color.
    #[must_use]
    pub fn color_for(&self, subject: &Subject) -> &str {
        self.entries
            .iter()
            .find(|(s, _)| s.matches(subject))
            .map_or(self.default_color.as_str(), |(_, color)| color.as_str())
    }
}

fn validate_color(color: &str) -> Result<(), DomainError> {
    let valid: bool = color.len() == 7
        && color.starts_with('#')
        && color[1..].chars().all(|c| c.is_ascii_hexdigit());
    if valid {
        Ok(())
    } else {
        Err(DomainError::InvalidColor(color.to_string()))
    }
}

/// Record fields carried by an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventProperties {
    /// The assignment's identifier.
    pub assignment_id: i64,
    /// Course name.
    pub course: String,
    /// Subject name.
    pub subject: String,
    /// Teacher name.
    pub teacher_name: String,
    /// Task type name.
    pub task_type: String,
    /// Due date (`YYYY-MM-DD`).
    pub due_date: String,
    /// Optional time of day (`HH:MM`).
    pub due_time: Option<String>,
    /// Declared duration in minutes.
    pub duration_minutes: Option<u16>,
    /// Description, or the redaction marker.
    pub description: String,
    /// Whether `description` holds the redaction marker.
    pub description_redacted: bool,
}

/// A displayable, read-only projection of an assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
    /// Display title, `"{subject}: {task type}"`.
    pub title: String,
    /// Window start (UTC, RFC 3339).
    pub start: String,
    /// Window end (UTC, RFC 3339).
    pub end: String,
    /// Display color.
    pub color: String,
    /// Record fields.
    pub properties: EventProperties,
}

/// Projects assignments onto calendar events.
#[derive(Debug, Clone)]
pub struct CalendarProjector {
    timezone: Tz,
    default_start: NaiveTime,
    default_minutes: u16,
    palette: SubjectPalette,
}

impl Default for CalendarProjector {
    fn default() -> Self {
        Self {
            timezone: Tz::UTC,
            default_start: NaiveTime::from_hms_opt(DEFAULT_START_HOUR, 0, 0)
                .unwrap_or(NaiveTime::MIN),
            default_minutes: DEFAULT_EVENT_MINUTES,
            palette: SubjectPalette::default(),
        }
    }
}

impl CalendarProjector {
    /// Creates a projector.
    ///
    /// # Arguments
    ///
    /// * `timezone` - IANA timezone the school's wall-clock times are in
    /// * `default_start` - Start time for assignments without a time of day
    /// * `default_minutes` - Window length for assignments without a duration
    /// * `palette` - Subject colors
    ///
    /// # Errors
    ///
    /// Returns an error if the timezone is unknown, the default start time
    /// cannot be represented, or the default window is zero minutes.
    pub fn new(
        timezone: &str,
        default_start: Time,
        default_minutes: u16,
        palette: SubjectPalette,
    ) -> Result<Self, DomainError> {
        let timezone: Tz = timezone
            .parse()
            .map_err(|_| DomainError::InvalidTimezone(timezone.to_string()))?;

        let default_start: NaiveTime = to_naive_time(default_start)?;

        if default_minutes == 0 {
            return Err(DomainError::InvalidCalendarWindow {
                reason: String::from("Default event length must be greater than 0"),
            });
        }

        Ok(Self {
            timezone,
            default_start,
            default_minutes,
            palette,
        })
    }

    /// Projects every record into one event for `actor`.
    ///
    /// Starts that fall on a DST transition never fail: an ambiguous local
    /// time takes its earlier instant, and a skipped local time moves forward
    /// to the first wall-clock minute that exists.
    ///
    /// # Errors
    ///
    /// Returns an error if a stored date or time cannot be represented.
    pub fn project(
        &self,
        records: &[Assignment],
        actor: &Actor,
    ) -> Result<Vec<CalendarEvent>, DomainError> {
        records
            .iter()
            .map(|record| self.project_one(record, actor))
            .collect()
    }

    fn resolve_local(&self, naive: NaiveDateTime) -> DateTime<Tz> {
        if let Some(resolved) = self.timezone.from_local_datetime(&naive).earliest() {
            return resolved;
        }

        // Skipped by a forward DST shift
        (1..=MAX_GAP_MINUTES)
            .find_map(|step| {
                self.timezone
                    .from_local_datetime(&(naive + Duration::minutes(step)))
                    .earliest()
            })
            .unwrap_or_else(|| self.timezone.from_utc_datetime(&naive))
    }

    fn project_one(&self, record: &Assignment, actor: &Actor) -> Result<CalendarEvent, DomainError> {
        let date: NaiveDate = to_naive_date(record.due_date)?;
        let start_time: NaiveTime = match record.due_time {
            Some(t) => to_naive_time(t)?,
            None => self.default_start,
        };
        let minutes: u16 = record.duration_minutes.unwrap_or(self.default_minutes);

        let start: DateTime<Tz> = self.resolve_local(date.and_time(start_time));
        let end = start + Duration::minutes(i64::from(minutes));

        let redacted: bool = !can_view_description(record, actor);

        Ok(CalendarEvent {
            title: format!("{}: {}", record.subject, record.task_type),
            start: start.with_timezone(&chrono::Utc).to_rfc3339(),
            end: end.with_timezone(&chrono::Utc).to_rfc3339(),
            color: self.palette.color_for(&record.subject).to_string(),
            properties: EventProperties {
                assignment_id: record.id.value(),
                course: record.course.name().to_string(),
                subject: record.subject.value().to_string(),
                teacher_name: record.teacher_name.clone(),
                task_type: record.task_type.as_str().to_string(),
                due_date: format_date(record.due_date),
                due_time: record.due_time.map(format_time),
                duration_minutes: record.duration_minutes,
                description: visible_description(record, actor).to_string(),
                description_redacted: redacted,
            },
        })
    }
}

/// A Monday to Sunday week.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekRange {
    start: Date,
    end: Date,
}

impl WeekRange {
    /// Returns the week containing `date`.
    #[must_use]
    pub fn containing(date: Date) -> Self {
        let offset: i64 = i64::from(date.weekday().number_days_from_monday());
        let start: Date = date
            .checked_sub(time::Duration::days(offset))
            .unwrap_or(date);
        let end: Date = start
            .checked_add(time::Duration::days(6))
            .unwrap_or(Date::MAX);
        Self { start, end }
    }

    /// Returns the Monday opening the week.
    #[must_use]
    pub const fn start(&self) -> Date {
        self.start
    }

    /// Returns the Sunday closing the week.
    #[must_use]
    pub const fn end(&self) -> Date {
        self.end
    }

    /// Returns whether `date` falls inside the week.
    #[must_use]
    pub fn contains(&self, date: Date) -> bool {
        date >= self.start && date <= self.end
    }
}

impl std::fmt::Display for WeekRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..{}", format_date(self.start), format_date(self.end))
    }
}

// Convert time::Date to chrono::NaiveDate
fn to_naive_date(date: Date) -> Result<NaiveDate, DomainError> {
    NaiveDate::from_ymd_opt(date.year(), u32::from(u8::from(date.month())), u32::from(date.day()))
        .ok_or_else(|| DomainError::InvalidCalendarWindow {
            reason: format!("Invalid date: {date}"),
        })
}

// Convert time::Time to chrono::NaiveTime
fn to_naive_time(time: Time) -> Result<NaiveTime, DomainError> {
    NaiveTime::from_hms_opt(
        u32::from(time.hour()),
        u32::from(time.minute()),
        u32::from(time.second()),
    )
    .ok_or_else(|| DomainError::InvalidCalendarWindow {
        reason: format!("Invalid time: {time}"),
    })
}
