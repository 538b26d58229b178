// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::Schedule;
use agenda_domain::{
    Actor, Assignment, AssignmentDraft, AssignmentId, Course, Subject, TaskType, parse_date,
};

pub fn create_math_teacher() -> Actor {
    Actor::teacher("alopez", "Ana Lopez", Subject::new("Math"))
}

pub fn create_coordinator() -> Actor {
    Actor::coordinator("coord", "Marta Diaz")
}

pub fn create_test_draft(course: &str, date: &str) -> AssignmentDraft {
    AssignmentDraft {
        course: String::from(course),
        due_date: String::from(date),
        due_time: None,
        subject: String::from("Math"),
        teacher_name: String::from("Ana Lopez"),
        task_type: String::from("Exam"),
        duration_minutes: Some(45),
        description: String::from("Chapter 4"),
    }
}

pub fn create_test_assignment(id: i64, course: &str, date: &str, subject: &str, teacher: &str) -> Assignment {
    Assignment {
        id: AssignmentId::new(id),
        due_date: parse_date(date).unwrap(),
        due_time: None,
        course: Course::new(course),
        subject: Subject::new(subject),
        teacher_name: String::from(teacher),
        task_type: TaskType::Reading,
        duration_minutes: None,
        description: String::from("Read chapter 2"),
    }
}

/// Three assignments for Third on 2025-03-10 plus one for Second.
pub fn create_full_schedule() -> Schedule {
    Schedule::new(vec![
        create_test_assignment(1, "Third", "2025-03-10", "Math", "Ana Lopez"),
        create_test_assignment(2, "Third", "2025-03-10", "Science", "Luis Perez"),
        create_test_assignment(3, "Third", "2025-03-10", "History", "Rosa Gil"),
        create_test_assignment(4, "Second", "2025-03-10", "Math", "Ana Lopez"),
    ])
}
