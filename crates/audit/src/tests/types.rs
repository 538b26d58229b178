// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{Action, Actor, AuditEvent, StateSnapshot};
use agenda_domain::{Course, Subject};
use time::{Date, Month};

fn create_test_event(details: Option<String>) -> AuditEvent {
    AuditEvent::new(
        Actor::new(String::from("alopez"), String::from("teacher")),
        Action::new(String::from("SubmitAssignment"), details),
        Course::new("Third"),
        Date::from_calendar_date(2025, Month::March, 10).unwrap(),
        StateSnapshot::new(2),
        StateSnapshot::new(3),
    )
}

#[test]
fn test_actor_from_domain_actor() {
    let domain_actor = agenda_domain::Actor::teacher("alopez", "Ana Lopez", Subject::new("Math"));
    let actor: Actor = Actor::from(&domain_actor);

    assert_eq!(actor.login, "alopez");
    assert_eq!(actor.role, "teacher");
}

#[test]
fn test_action_creation_with_details() {
    let action: Action = Action::new(
        String::from("DeleteAssignment"),
        Some(String::from("assignment 7")),
    );

    assert_eq!(action.name, "DeleteAssignment");
    assert_eq!(action.details, Some(String::from("assignment 7")));
}

#[test]
fn test_audit_event_records_before_and_after_counts() {
    let event: AuditEvent = create_test_event(None);

    assert_eq!(event.before.day_count, 2);
    assert_eq!(event.after.day_count, 3);
    assert_eq!(event.course.name(), "Third");
}

#[test]
fn test_audit_event_display() {
    let event: AuditEvent = create_test_event(Some(String::from("Math: Exam")));

    assert_eq!(
        event.to_string(),
        "SubmitAssignment by alopez (teacher) on Third 2025-03-10: day_count=2 -> day_count=3 [Math: Exam]"
    );
}

#[test]
fn test_audit_event_equality() {
    assert_eq!(create_test_event(None), create_test_event(None));
    assert_ne!(
        create_test_event(None),
        create_test_event(Some(String::from("x")))
    );
}
