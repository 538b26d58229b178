// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod types;

use time::{Date, Month};

use crate::{Actor, Assignment, AssignmentId, Course, Subject, TaskType};

/// Returns March 10, 2025 (a Monday).
pub fn create_test_date() -> Date {
    Date::from_calendar_date(2025, Month::March, 10).expect("Valid test date")
}

pub fn create_test_assignment(id: i64, course: &str, subject: &str, teacher: &str) -> Assignment {
    Assignment {
        id: AssignmentId::new(id),
        due_date: create_test_date(),
        due_time: None,
        course: Course::new(course),
        subject: Subject::new(subject),
        teacher_name: String::from(teacher),
        task_type: TaskType::Exercise,
        duration_minutes: Some(30),
        description: String::from("Pages 10 to 12"),
    }
}

pub fn create_math_teacher() -> Actor {
    Actor::teacher("alopez", "Ana Lopez", Subject::new("Math"))
}

pub fn create_coordinator() -> Actor {
    Actor::coordinator("coord", "Marta Diaz")
}
