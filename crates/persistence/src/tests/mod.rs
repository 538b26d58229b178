// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod csv_tests;

use agenda_domain::{Course, NewAssignment, Subject, TaskType, parse_date};
use time::Time;

pub fn create_test_record(course: &str, date: &str, subject: &str) -> NewAssignment {
    NewAssignment {
        due_date: parse_date(date).unwrap(),
        due_time: None,
        course: Course::new(course),
        subject: Subject::new(subject),
        teacher_name: String::from("Ana Lopez"),
        task_type: TaskType::Exercise,
        duration_minutes: Some(45),
        description: String::from("Pages 10 to 12, \"odd\" problems"),
    }
}

pub fn create_timed_record() -> NewAssignment {
    let mut record = create_test_record("Third", "2025-03-10", "Science");
    record.due_time = Some(Time::from_hms(14, 30, 0).unwrap());
    record.duration_minutes = Some(90);
    record.task_type = TaskType::Presentation;
    record
}
