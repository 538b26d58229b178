// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.

use agenda_domain::{
    Actor, Assignment, CalendarEvent, DailyLoad, WeekRange, can_view_description, format_date,
    format_time, visible_description,
};
use serde::{Deserialize, Serialize};

/// API response for an accepted submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitAssignmentResponse {
    /// The identifier issued by the store.
    pub assignment_id: i64,
    /// A success message.
    pub message: String,
}

/// API response for a deletion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteAssignmentResponse {
    /// The deleted assignment.
    pub assignment_id: i64,
    /// A success message.
    pub message: String,
}

/// One row of the detailed assignment list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentView {
    pub assignment_id: i64,
    pub due_date: String,
    pub due_time: Option<String>,
    pub course: String,
    pub subject: String,
    pub teacher_name: String,
    pub task_type: String,
    pub duration_minutes: Option<u16>,
    /// The description, or the redaction marker.
    pub description: String,
    pub description_redacted: bool,
}

impl AssignmentView {
    /// Renders a record as `actor` may see it.
    #[must_use]
    pub fn for_actor(record: &Assignment, actor: &Actor) -> Self {
        Self {
            assignment_id: record.id.value(),
            due_date: format_date(record.due_date),
            due_time: record.due_time.map(format_time),
            course: record.course.name().to_string(),
            subject: record.subject.value().to_string(),
            teacher_name: record.teacher_name.clone(),
            task_type: record.task_type.as_str().to_string(),
            duration_minutes: record.duration_minutes,
            description: visible_description(record, actor).to_string(),
            description_redacted: !can_view_description(record, actor),
        }
    }
}

/// The Monday to Sunday week a calendar query was restricted to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekView {
    /// First day (`YYYY-MM-DD`).
    pub start: String,
    /// Last day (`YYYY-MM-DD`).
    pub end: String,
}

impl From<WeekRange> for WeekView {
    fn from(week: WeekRange) -> Self {
        Self {
            start: format_date(week.start()),
            end: format_date(week.end()),
        }
    }
}

/// API response for a calendar query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarResponse {
    pub course: String,
    /// Present when the query was restricted to one week.
    pub week: Option<WeekView>,
    pub events: Vec<CalendarEvent>,
}

/// API response for the detailed assignment list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentListResponse {
    pub course: String,
    pub assignments: Vec<AssignmentView>,
}

/// Workload of one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyLoadView {
    pub date: String,
    pub assignment_count: usize,
    pub total_minutes: u32,
}

impl From<DailyLoad> for DailyLoadView {
    fn from(load: DailyLoad) -> Self {
        Self {
            date: format_date(load.date),
            assignment_count: load.assignment_count,
            total_minutes: load.total_minutes,
        }
    }
}

/// API response for a daily load query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyLoadResponse {
    pub course: String,
    pub days: Vec<DailyLoadView>,
}

/// Form options for the submission UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogResponse {
    pub courses: Vec<String>,
    pub task_types: Vec<String>,
    pub min_duration_minutes: u16,
    pub max_duration_minutes: u16,
    pub daily_limit: usize,
}
