// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::str::FromStr;

use crate::{Actor, Course, CourseCatalog, DomainError, Role, Subject, TaskType};

use super::{create_test_assignment, create_test_date};

#[test]
fn test_course_trims_whitespace() {
    let course: Course = Course::new("  Third ");
    assert_eq!(course.name(), "Third");
}

#[test]
fn test_course_identity_ignores_case() {
    let stored: Course = Course::new("third");
    let submitted: Course = Course::new("Third");
    assert_eq!(stored, submitted);
    assert_eq!(stored.cmp(&submitted), std::cmp::Ordering::Equal);
    assert!(Course::new("First") < Course::new("second"));

    let keys: std::collections::HashSet<Course> = [stored, submitted].into_iter().collect();
    assert_eq!(keys.len(), 1);

    let record = create_test_assignment(1, "third", "Math", "Ana Lopez");
    assert!(record.is_on(&Course::new("Third"), create_test_date()));
}

#[test]
fn test_default_catalog_lists_five_courses() {
    let catalog: CourseCatalog = CourseCatalog::default();
    let names: Vec<&str> = catalog.courses().iter().map(Course::name).collect();
    assert_eq!(names, vec!["First", "Second", "Third", "Fourth", "Fifth"]);
}

#[test]
fn test_catalog_resolves_case_insensitively_to_canonical_name() {
    let catalog: CourseCatalog = CourseCatalog::default();
    let course: Course = catalog.resolve(" third ").unwrap();
    assert_eq!(course.name(), "Third");
}

#[test]
fn test_catalog_rejects_unknown_course() {
    let catalog: CourseCatalog = CourseCatalog::default();
    let result = catalog.resolve("Sixth");
    assert!(matches!(result, Err(DomainError::UnknownCourse { .. })));
    assert!(!catalog.contains(&Course::new("Sixth")));
    assert!(catalog.contains(&Course::new("Fifth")));
}

#[test]
fn test_catalog_rejects_empty_and_duplicate_entries() {
    assert!(matches!(
        CourseCatalog::new(Vec::<String>::new()),
        Err(DomainError::InvalidCourseCatalog(_))
    ));
    assert!(matches!(
        CourseCatalog::new(["6A", " "]),
        Err(DomainError::InvalidCourseCatalog(_))
    ));
    assert!(matches!(
        CourseCatalog::new(["6A", "6a"]),
        Err(DomainError::InvalidCourseCatalog(_))
    ));
    assert!(CourseCatalog::new(["6A", "6B"]).is_ok());
}

#[test]
fn test_subject_matches_ignores_case() {
    let a: Subject = Subject::new("Math");
    let b: Subject = Subject::new(" math ");
    assert!(a.matches(&b));
    assert!(!a.matches(&Subject::new("Science")));
}

#[test]
fn test_task_type_parses_english_and_legacy_labels() {
    assert_eq!(TaskType::from_str("reading").unwrap(), TaskType::Reading);
    assert_eq!(TaskType::from_str("Lectura").unwrap(), TaskType::Reading);
    assert_eq!(TaskType::from_str("EXAM").unwrap(), TaskType::Exam);
    assert_eq!(
        TaskType::from_str("Presentación").unwrap(),
        TaskType::Presentation
    );
    assert!(matches!(
        TaskType::from_str("Homework"),
        Err(DomainError::InvalidTaskType(_))
    ));
}

#[test]
fn test_task_type_display_round_trips() {
    for task_type in TaskType::ALL {
        assert_eq!(TaskType::from_str(&task_type.to_string()).unwrap(), task_type);
    }
}

#[test]
fn test_role_parsing() {
    assert_eq!(Role::from_str("Teacher").unwrap(), Role::Teacher);
    assert_eq!(Role::from_str("coordinator").unwrap(), Role::Coordinator);
    assert!(Role::from_str("admin").is_err());
}

#[test]
fn test_teacher_actor_carries_one_subject() {
    let actor: Actor = Actor::teacher("alopez", "Ana Lopez", Subject::new("Math"));
    assert_eq!(actor.role(), Role::Teacher);
    assert_eq!(actor.subject().map(Subject::value), Some("Math"));
    assert!(!actor.is_coordinator());
}

#[test]
fn test_coordinator_actor_has_no_subject() {
    let actor: Actor = Actor::coordinator("coord", "Marta Diaz");
    assert!(actor.is_coordinator());
    assert!(actor.subject().is_none());
}

#[test]
fn test_is_on_compares_date_only() {
    let mut record = create_test_assignment(1, "Third", "Math", "Ana Lopez");
    record.due_time = Some(time::Time::from_hms(15, 0, 0).unwrap());

    assert!(record.is_on(&Course::new("Third"), create_test_date()));
    assert!(!record.is_on(&Course::new("Second"), create_test_date()));
    assert!(!record.is_on(&Course::new("Third"), create_test_date().next_day().unwrap()));
}
