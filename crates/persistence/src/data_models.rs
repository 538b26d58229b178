// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::str::FromStr;

use agenda_domain::{
    Assignment, AssignmentId, Course, NewAssignment, Subject, TaskType, format_date, format_time,
    parse_date, parse_time,
};
use diesel::prelude::*;

use crate::diesel_schema::assignments;
use crate::error::PersistenceError;

/// A row of the `assignments` table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = assignments)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct AssignmentRow {
    pub assignment_id: i64,
    pub due_date: String,
    pub due_time: Option<String>,
    pub course: String,
    pub subject: String,
    pub teacher_name: String,
    pub task_type: String,
    pub duration_minutes: Option<i32>,
    pub description: String,
}

/// Insert form of an assignment; the database issues the id.
#[derive(Debug, Insertable)]
#[diesel(table_name = assignments)]
pub struct NewAssignmentRow<'a> {
    pub due_date: String,
    pub due_time: Option<String>,
    pub course: &'a str,
    pub subject: &'a str,
    pub teacher_name: &'a str,
    pub task_type: &'static str,
    pub duration_minutes: Option<i32>,
    pub description: &'a str,
}

impl<'a> From<&'a NewAssignment> for NewAssignmentRow<'a> {
    fn from(record: &'a NewAssignment) -> Self {
        Self {
            due_date: format_date(record.due_date),
            due_time: record.due_time.map(format_time),
            course: record.course.name(),
            subject: record.subject.value(),
            teacher_name: &record.teacher_name,
            task_type: record.task_type.as_str(),
            duration_minutes: record.duration_minutes.map(i32::from),
            description: &record.description,
        }
    }
}

impl TryFrom<AssignmentRow> for Assignment {
    type Error = PersistenceError;

    fn try_from(row: AssignmentRow) -> Result<Self, Self::Error> {
        let corrupt = |reason: String| PersistenceError::CorruptRecord {
            location: format!("assignment {}", row.assignment_id),
            reason,
        };

        let due_date = parse_date(&row.due_date).map_err(|e| corrupt(e.to_string()))?;
        let due_time = row
            .due_time
            .as_deref()
            .map(parse_time)
            .transpose()
            .map_err(|e| corrupt(e.to_string()))?;
        let task_type = TaskType::from_str(&row.task_type).map_err(|e| corrupt(e.to_string()))?;
        let duration_minutes = row
            .duration_minutes
            .map(u16::try_from)
            .transpose()
            .map_err(|e| corrupt(format!("duration out of range: {e}")))?;

        Ok(Self {
            id: AssignmentId::new(row.assignment_id),
            due_date,
            due_time,
            course: Course::new(&row.course),
            subject: Subject::new(&row.subject),
            teacher_name: row.teacher_name,
            task_type,
            duration_minutes,
            description: row.description,
        })
    }
}
