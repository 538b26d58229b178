// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use agenda_domain::{Actor, AssignmentId, Subject};
use agenda_persistence::RecordStore;

use crate::ApiError;
use crate::tests::helpers::{
    create_coordinator, create_draft, create_math_draft, create_math_teacher,
    create_science_teacher, create_test_service,
};

#[test]
fn test_owner_can_delete_despite_spacing_and_case() {
    let service = create_test_service();
    let id = service
        .submit(
            &create_draft("Third", "2025-03-10", "Math", " ana lopez "),
            &create_math_teacher(),
        )
        .unwrap();

    service.delete(id, &create_math_teacher()).unwrap();

    assert!(service.store().list_all().unwrap().is_empty());
}

#[test]
fn test_other_subject_teacher_is_forbidden() {
    let service = create_test_service();
    let id = service
        .submit(&create_math_draft("2025-03-10"), &create_math_teacher())
        .unwrap();

    let result = service.delete(id, &create_science_teacher());

    assert!(matches!(result, Err(ApiError::Forbidden { .. })));
    assert_eq!(service.store().list_all().unwrap().len(), 1);
}

#[test]
fn test_same_subject_different_name_is_forbidden() {
    let service = create_test_service();
    let id = service
        .submit(&create_math_draft("2025-03-10"), &create_math_teacher())
        .unwrap();
    let colleague = Actor::teacher("jsoto", "Juan Soto", Subject::new("Math"));

    assert!(matches!(
        service.delete(id, &colleague),
        Err(ApiError::Forbidden { .. })
    ));
}

#[test]
fn test_coordinator_can_delete_anything() {
    let service = create_test_service();
    let id = service
        .submit(&create_math_draft("2025-03-10"), &create_math_teacher())
        .unwrap();

    assert!(service.delete(id, &create_coordinator()).is_ok());
}

#[test]
fn test_second_delete_is_not_found() {
    let service = create_test_service();
    let id = service
        .submit(&create_math_draft("2025-03-10"), &create_math_teacher())
        .unwrap();
    service.delete(id, &create_math_teacher()).unwrap();

    let result = service.delete(id, &create_math_teacher());

    assert!(matches!(result, Err(ApiError::NotFound { .. })));
}

#[test]
fn test_unknown_id_is_not_found_even_for_coordinator() {
    let service = create_test_service();
    let result = service.delete(AssignmentId::new(99), &create_coordinator());
    assert!(matches!(result, Err(ApiError::NotFound { .. })));
}

#[test]
fn test_delete_frees_a_quota_slot() {
    let service = create_test_service();
    let teacher = create_math_teacher();
    let mut ids: Vec<AssignmentId> = Vec::new();
    for _ in 0..3 {
        ids.push(
            service
                .submit(&create_math_draft("2025-03-10"), &teacher)
                .unwrap(),
        );
    }
    assert!(service.submit(&create_math_draft("2025-03-10"), &teacher).is_err());

    service.delete(ids[0], &teacher).unwrap();

    assert!(service.submit(&create_math_draft("2025-03-10"), &teacher).is_ok());
}
