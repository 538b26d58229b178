// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Text encodings for dates, times of day and clock-formatted durations.
//!
//! Every layer (form input, flat files, database rows) stores these values as
//! text, so the encodings live here once.

use crate::error::DomainError;
use time::macros::format_description;
use time::{Date, Time};

/// Parses a calendar date in `YYYY-MM-DD` form.
///
/// # Errors
///
/// Returns `DomainError::DateParseError` if the string is not a valid date.
pub fn parse_date(value: &str) -> Result<Date, DomainError> {
    let trimmed: &str = value.trim();
    Date::parse(trimmed, format_description!("[year]-[month]-[day]")).map_err(|e| {
        DomainError::DateParseError {
            date_string: value.to_string(),
            error: e.to_string(),
        }
    })
}

/// Formats a date as `YYYY-MM-DD`.
#[must_use]
pub fn format_date(date: Date) -> String {
    format!(
        "{:04}-{:02}-{:02}",
        date.year(),
        u8::from(date.month()),
        date.day()
    )
}

/// Parses a time of day in `H:MM` or `H:MM:SS` form. Fractional seconds are
/// accepted and dropped.
///
/// # Errors
///
/// Returns `DomainError::TimeParseError` if the string is not a valid time.
pub fn parse_time(value: &str) -> Result<Time, DomainError> {
    let trimmed: &str = value.trim();
    let parsed: Time = Time::parse(trimmed, format_description!("[hour padding:none]:[minute]"))
        .or_else(|_| {
            Time::parse(
                trimmed,
                format_description!("[hour padding:none]:[minute]:[second]"),
            )
        })
        .or_else(|_| {
            Time::parse(
                trimmed,
                format_description!("[hour padding:none]:[minute]:[second].[subsecond]"),
            )
        })
        .map_err(|e| DomainError::TimeParseError {
            time_string: value.to_string(),
            error: e.to_string(),
        })?;

    Ok(parsed.replace_nanosecond(0).unwrap_or(parsed))
}

/// Formats a time of day as `HH:MM`.
#[must_use]
pub fn format_time(time: Time) -> String {
    format!("{:02}:{:02}", time.hour(), time.minute())
}

/// Parses a due timestamp: a bare date, or a date followed by a time of day
/// separated by a space or `T`.
///
/// # Errors
///
/// Returns an error if either component fails to parse.
pub fn parse_due_at(value: &str) -> Result<(Date, Option<Time>), DomainError> {
    let trimmed: &str = value.trim();
    match trimmed.get(..10) {
        Some(date_part) if trimmed.len() > 10 => {
            let rest: &str = &trimmed[10..];
            let time_part: &str = rest
                .strip_prefix(' ')
                .or_else(|| rest.strip_prefix('T'))
                .ok_or_else(|| DomainError::DateParseError {
                    date_string: value.to_string(),
                    error: String::from("expected a space or 'T' between date and time"),
                })?;
            let date: Date = parse_date(date_part)?;
            let time: Time = parse_time(time_part)?;
            Ok((date, Some(time)))
        }
        _ => Ok((parse_date(trimmed)?, None)),
    }
}

/// Formats a due timestamp, including the time of day when one is set.
#[must_use]
pub fn format_due_at(date: Date, time: Option<Time>) -> String {
    time.map_or_else(
        || format_date(date),
        |t| format!("{} {}", format_date(date), format_time(t)),
    )
}

/// Parses a clock-formatted duration (`H:MM`) into minutes.
///
/// # Errors
///
/// Returns `DomainError::TimeParseError` if the value is malformed or the
/// minutes component is 60 or more.
pub fn parse_clock_minutes(value: &str) -> Result<u16, DomainError> {
    let err = |error: &str| DomainError::TimeParseError {
        time_string: value.to_string(),
        error: error.to_string(),
    };

    let (hours, minutes) = value
        .trim()
        .split_once(':')
        .ok_or_else(|| err("expected H:MM"))?;
    let hours: u16 = hours.parse().map_err(|_| err("hours is not a number"))?;
    let minutes: u16 = minutes
        .parse()
        .map_err(|_| err("minutes is not a number"))?;
    if minutes >= 60 {
        return Err(err("minutes must be below 60"));
    }

    hours
        .checked_mul(60)
        .and_then(|h| h.checked_add(minutes))
        .ok_or_else(|| err("duration is too long"))
}

/// Formats minutes as a clock-formatted duration (`H:MM`).
#[must_use]
pub fn format_clock_minutes(minutes: u16) -> String {
    format!("{}:{:02}", minutes / 60, minutes % 60)
}
