// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Daily workload per course.

use crate::types::{Assignment, Course};
use std::collections::BTreeMap;
use time::Date;

/// Total declared work for one course on one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyLoad {
    /// The due date.
    pub date: Date,
    /// Number of assignments due that day.
    pub assignment_count: usize,
    /// Sum of declared durations. Assignments without a duration add nothing.
    pub total_minutes: u32,
}

/// Computes the daily load of `course`, ordered by date.
#[must_use]
pub fn calculate_daily_load(records: &[Assignment], course: &Course) -> Vec<DailyLoad> {
    let mut by_date: BTreeMap<Date, DailyLoad> = BTreeMap::new();

    for record in records.iter().filter(|r| r.course == *course) {
        let entry: &mut DailyLoad = by_date.entry(record.due_date).or_insert(DailyLoad {
            date: record.due_date,
            assignment_count: 0,
            total_minutes: 0,
        });
        entry.assignment_count += 1;
        entry.total_minutes += u32::from(record.duration_minutes.unwrap_or(0));
    }

    by_date.into_values().collect()
}
