// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Column layout of the CSV schema variants.
//!
//! Headers are matched after normalization (trimmed, lowercased, spaces to
//! underscores, byte order mark dropped), so `Fecha de entrega` and
//! `fecha_de_entrega` name the same column.

use std::collections::HashMap;
use std::str::FromStr;

use agenda_domain::{
    Assignment, AssignmentId, Course, NewAssignment, Subject, TaskType, format_clock_minutes,
    format_date, format_due_at, parse_clock_minutes, parse_due_at,
};
use csv::StringRecord;
use serde::{Deserialize, Serialize};

use crate::error::PersistenceError;

/// Which set of columns a CSV file is written with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaVariant {
    /// Due date plus duration in whole minutes. The time of day is not kept.
    #[default]
    Duration,
    /// Due date and time in one column plus the allotted time as `H:MM`.
    Timed,
}

impl SchemaVariant {
    /// Header row written for this variant.
    #[must_use]
    pub const fn headers(self) -> [&'static str; 8] {
        match self {
            Self::Duration => [
                "id",
                "due_date",
                "course",
                "subject",
                "teacher",
                "task_type",
                "duration_minutes",
                "description",
            ],
            Self::Timed => [
                "id",
                "due_at",
                "course",
                "subject",
                "teacher",
                "task_type",
                "assignment_time",
                "description",
            ],
        }
    }

    /// Converts this variant to its string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Duration => "duration",
            Self::Timed => "timed",
        }
    }

    /// Renders one record as a row of this variant.
    #[must_use]
    pub fn encode(self, record: &Assignment) -> [String; 8] {
        let (when, effort) = match self {
            Self::Duration => (
                format_date(record.due_date),
                record
                    .duration_minutes
                    .map_or_else(String::new, |m| m.to_string()),
            ),
            Self::Timed => (
                format_due_at(record.due_date, record.due_time),
                record
                    .duration_minutes
                    .map_or_else(String::new, format_clock_minutes),
            ),
        };

        [
            record.id.to_string(),
            when,
            record.course.name().to_string(),
            record.subject.value().to_string(),
            record.teacher_name.clone(),
            record.task_type.as_str().to_string(),
            effort,
            record.description.clone(),
        ]
    }

    /// Reduces a record to what a row of this variant keeps, so the cached
    /// copy matches what a reload of the file yields.
    #[must_use]
    pub fn retained(self, mut record: Assignment) -> Assignment {
        record.due_time = match self {
            Self::Duration => None,
            Self::Timed => record.due_time.map(|t| {
                t.replace_second(0)
                    .and_then(|t| t.replace_nanosecond(0))
                    .unwrap_or(t)
            }),
        };
        record
    }
}

impl FromStr for SchemaVariant {
    type Err = PersistenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "duration" => Ok(Self::Duration),
            "timed" => Ok(Self::Timed),
            _ => Err(PersistenceError::InitializationError(format!(
                "Unknown CSV schema variant '{s}'. Must be 'duration' or 'timed'"
            ))),
        }
    }
}

impl std::fmt::Display for SchemaVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Column {
    Id,
    DueDate,
    DueAt,
    Course,
    Subject,
    Teacher,
    TaskType,
    DurationMinutes,
    AssignmentTime,
    Description,
}

impl Column {
    fn from_header(raw: &str) -> Option<Self> {
        let normalized: String = raw
            .trim_start_matches('\u{feff}')
            .trim()
            .to_lowercase()
            .replace(' ', "_");

        match normalized.as_str() {
            "id" => Some(Self::Id),
            "due_date" | "fecha_de_entrega" => Some(Self::DueDate),
            "due_at" => Some(Self::DueAt),
            "course" | "curso" => Some(Self::Course),
            "subject" | "materia" => Some(Self::Subject),
            "teacher" | "teacher_name" | "profesora" => Some(Self::Teacher),
            "task_type" | "tipo_de_tarea" => Some(Self::TaskType),
            "duration_minutes" | "duración_(min)" | "duracion_(min)" => {
                Some(Self::DurationMinutes)
            }
            "assignment_time" => Some(Self::AssignmentTime),
            "description" | "descripción" | "descripcion" => Some(Self::Description),
            _ => None,
        }
    }
}

/// Positions of the recognized columns in a file's header row.
#[derive(Debug, Clone)]
pub struct HeaderMap {
    positions: HashMap<Column, usize>,
}

impl HeaderMap {
    /// Maps a header row. Unrecognized columns are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if a required column is missing.
    pub fn from_headers(headers: &StringRecord) -> Result<Self, PersistenceError> {
        let mut positions: HashMap<Column, usize> = HashMap::new();
        for (index, header) in headers.iter().enumerate() {
            if let Some(column) = Column::from_header(header) {
                positions.entry(column).or_insert(index);
            }
        }

        let map = Self { positions };
        if !map.has(Column::DueDate) && !map.has(Column::DueAt) {
            return Err(missing_column("due_date or due_at"));
        }
        for (column, name) in [
            (Column::Course, "course"),
            (Column::Subject, "subject"),
            (Column::Teacher, "teacher"),
            (Column::TaskType, "task_type"),
        ] {
            if !map.has(column) {
                return Err(missing_column(name));
            }
        }
        Ok(map)
    }

    fn has(&self, column: Column) -> bool {
        self.positions.contains_key(&column)
    }

    fn get<'r>(&self, record: &'r StringRecord, column: Column) -> Option<&'r str> {
        self.positions
            .get(&column)
            .and_then(|&index| record.get(index))
            .map(str::trim)
    }

    /// Decodes one data row. `row` is the 1-based data row number, used in
    /// error messages.
    ///
    /// Returns the stored id, if the file has one for this row.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::CorruptRecord` if a field cannot be parsed.
    pub fn decode(
        &self,
        record: &StringRecord,
        row: usize,
    ) -> Result<(Option<AssignmentId>, NewAssignment), PersistenceError> {
        let corrupt = |reason: String| PersistenceError::CorruptRecord {
            location: format!("row {row}"),
            reason,
        };
        let text = |column: Column| self.get(record, column).unwrap_or_default();

        let id: Option<AssignmentId> = match text(Column::Id) {
            "" => None,
            raw => Some(AssignmentId::new(
                raw.parse::<i64>()
                    .map_err(|e| corrupt(format!("invalid id '{raw}': {e}")))?,
            )),
        };

        let when: &str = if self.has(Column::DueAt) {
            text(Column::DueAt)
        } else {
            text(Column::DueDate)
        };
        let (due_date, due_time) = parse_due_at(when).map_err(|e| corrupt(e.to_string()))?;

        let effort: &str = if self.has(Column::AssignmentTime) {
            text(Column::AssignmentTime)
        } else {
            text(Column::DurationMinutes)
        };
        let duration_minutes: Option<u16> = parse_minutes(effort).map_err(corrupt)?;

        let task_type: TaskType =
            TaskType::from_str(text(Column::TaskType)).map_err(|e| corrupt(e.to_string()))?;

        Ok((
            id,
            NewAssignment {
                due_date,
                due_time,
                course: Course::new(text(Column::Course)),
                subject: Subject::new(text(Column::Subject)),
                teacher_name: text(Column::Teacher).to_string(),
                task_type,
                duration_minutes,
                description: text(Column::Description).to_string(),
            },
        ))
    }
}

// Accepts whole minutes ("45"), clock form ("0:45") or nothing.
fn parse_minutes(value: &str) -> Result<Option<u16>, String> {
    if value.is_empty() {
        return Ok(None);
    }
    if value.contains(':') {
        return parse_clock_minutes(value)
            .map(Some)
            .map_err(|e| e.to_string());
    }
    value
        .parse::<u16>()
        .map(Some)
        .map_err(|e| format!("invalid duration '{value}': {e}"))
}

fn missing_column(name: &str) -> PersistenceError {
    PersistenceError::Csv(format!("Missing required column: {name}"))
}
