// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{create_coordinator, create_full_schedule, create_math_teacher};
use crate::{Command, CoreError, Effect, SchedulingRules, TransitionResult, apply};
use agenda_domain::{Actor, AssignmentId, Subject};

#[test]
fn test_owner_deletes_with_normalized_name() {
    let actor: Actor = Actor::teacher("alopez", " ana lopez ", Subject::new("Math"));
    let command: Command = Command::DeleteAssignment {
        assignment_id: AssignmentId::new(1),
    };

    let transition: TransitionResult =
        apply(&SchedulingRules::default(), &create_full_schedule(), command, &actor).unwrap();

    let Effect::Remove(record) = transition.effect else {
        panic!("expected a remove effect");
    };
    assert_eq!(record.id, AssignmentId::new(1));
    assert_eq!(transition.audit_event.action.name, "DeleteAssignment");
    assert_eq!(transition.audit_event.before.day_count, 3);
    assert_eq!(transition.audit_event.after.day_count, 2);
}

#[test]
fn test_teacher_cannot_delete_other_subject() {
    let command: Command = Command::DeleteAssignment {
        assignment_id: AssignmentId::new(2),
    };

    let result = apply(
        &SchedulingRules::default(),
        &create_full_schedule(),
        command,
        &create_math_teacher(),
    );

    assert!(matches!(
        result,
        Err(CoreError::Forbidden {
            assignment_id: 2,
            ..
        })
    ));
}

#[test]
fn test_same_subject_different_teacher_is_forbidden() {
    let actor: Actor = Actor::teacher("jruiz", "Juan Ruiz", Subject::new("Math"));
    let command: Command = Command::DeleteAssignment {
        assignment_id: AssignmentId::new(1),
    };

    let result = apply(&SchedulingRules::default(), &create_full_schedule(), command, &actor);
    assert!(matches!(result, Err(CoreError::Forbidden { .. })));
}

#[test]
fn test_coordinator_deletes_any_assignment() {
    let command: Command = Command::DeleteAssignment {
        assignment_id: AssignmentId::new(3),
    };

    let result = apply(
        &SchedulingRules::default(),
        &create_full_schedule(),
        command,
        &create_coordinator(),
    );
    assert!(result.is_ok());
}

#[test]
fn test_unknown_id_is_not_found() {
    let command: Command = Command::DeleteAssignment {
        assignment_id: AssignmentId::new(99),
    };

    let result = apply(
        &SchedulingRules::default(),
        &create_full_schedule(),
        command,
        &create_coordinator(),
    );
    assert_eq!(result, Err(CoreError::AssignmentNotFound(99)));
}
