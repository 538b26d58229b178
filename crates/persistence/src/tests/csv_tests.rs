// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::fs;

use agenda_domain::{AssignmentId, TaskType, parse_date};
use tempfile::TempDir;
use time::Time;

use super::{create_test_record, create_timed_record};
use crate::{CsvStore, PersistenceError, RecordStore, SchemaVariant};

#[test]
fn test_missing_file_is_created_on_first_write() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("agenda.csv");

    let store = CsvStore::open(&path, SchemaVariant::Duration).unwrap();
    assert!(!path.exists());

    store
        .append(&create_test_record("Third", "2025-03-10", "Math"))
        .unwrap();

    let contents = fs::read_to_string(&path).unwrap();
    let mut lines = contents.lines();
    assert_eq!(
        lines.next(),
        Some("id,due_date,course,subject,teacher,task_type,duration_minutes,description")
    );
    assert_eq!(
        lines.next(),
        Some("1,2025-03-10,Third,Math,Ana Lopez,Exercise,45,\"Pages 10 to 12, \"\"odd\"\" problems\"")
    );
}

#[test]
fn test_timed_variant_writes_due_at_and_clock_duration() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("agenda.csv");
    let store = CsvStore::open(&path, SchemaVariant::Timed).unwrap();

    store.append(&create_timed_record()).unwrap();

    let contents = fs::read_to_string(&path).unwrap();
    let mut lines = contents.lines();
    assert_eq!(
        lines.next(),
        Some("id,due_at,course,subject,teacher,task_type,assignment_time,description")
    );
    assert!(lines.next().unwrap().starts_with(
        "1,2025-03-10 14:30,Third,Science,Ana Lopez,Presentation,1:30,"
    ));
}

#[test]
fn test_timed_variant_reopens_with_time_of_day() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("agenda.csv");
    {
        let store = CsvStore::open(&path, SchemaVariant::Timed).unwrap();
        store.append(&create_timed_record()).unwrap();
    }

    let store = CsvStore::open(&path, SchemaVariant::Timed).unwrap();
    let records = store.list_all().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].due_time, Some(Time::from_hms(14, 30, 0).unwrap()));
    assert_eq!(records[0].duration_minutes, Some(90));
    assert_eq!(records[0].task_type, TaskType::Presentation);
}

#[test]
fn test_legacy_spanish_file_without_ids_is_numbered_in_row_order() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("tareas.csv");
    fs::write(
        &path,
        "Fecha de entrega,Curso,Materia,Profesora,Tipo de tarea,Duración (min),Descripción\n\
         2025-03-10,Tercero,Matemática,Ana Lopez,Ejercicio,30,Guía 3\n\
         2025-03-11,Tercero,Ciencias,Luis Perez,Examen,90,\n",
    )
    .unwrap();

    let store = CsvStore::open(&path, SchemaVariant::Duration).unwrap();
    let records = store.list_all().unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].id, AssignmentId::new(1));
    assert_eq!(records[0].course.name(), "Tercero");
    assert_eq!(records[0].task_type, TaskType::Exercise);
    assert_eq!(records[0].duration_minutes, Some(30));
    assert_eq!(records[0].description, "Guía 3");
    assert_eq!(records[1].id, AssignmentId::new(2));
    assert_eq!(records[1].task_type, TaskType::Exam);
    assert!(records[1].description.is_empty());

    // The next write persists the assigned ids in the configured layout
    let id = store
        .append(&create_test_record("Tercero", "2025-03-12", "Historia"))
        .unwrap();
    assert_eq!(id, AssignmentId::new(3));
    let contents = fs::read_to_string(&path).unwrap();
    assert!(contents.starts_with("id,due_date,"));
    assert!(contents.contains("\n2,2025-03-11,Tercero,Ciencias,Luis Perez,Exam,90,\n"));
}

#[test]
fn test_rows_without_id_follow_the_highest_stored_id() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("agenda.csv");
    fs::write(
        &path,
        "id,due_date,course,subject,teacher,task_type,duration_minutes,description\n\
         7,2025-03-10,Third,Math,Ana Lopez,Reading,,\n\
         ,2025-03-10,Third,Art,Rosa Gil,Project,60,Collage\n",
    )
    .unwrap();

    let store = CsvStore::open(&path, SchemaVariant::Duration).unwrap();
    let ids: Vec<i64> = store
        .list_all()
        .unwrap()
        .iter()
        .map(|r| r.id.value())
        .collect();
    assert_eq!(ids, vec![7, 8]);
}

#[test]
fn test_deleted_newest_id_is_not_reissued_after_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("agenda.csv");
    let deleted = {
        let store = CsvStore::open(&path, SchemaVariant::Duration).unwrap();
        store
            .append(&create_test_record("Third", "2025-03-10", "Math"))
            .unwrap();
        let newest = store
            .append(&create_test_record("Third", "2025-03-10", "Math"))
            .unwrap();
        store.delete_by_id(newest).unwrap();
        newest
    };

    let store = CsvStore::open(&path, SchemaVariant::Duration).unwrap();
    let next = store
        .append(&create_test_record("Third", "2025-03-10", "Math"))
        .unwrap();
    assert!(next.value() > deleted.value());
}

#[test]
fn test_duration_variant_drops_time_of_day() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("agenda.csv");
    let before_restart = {
        let store = CsvStore::open(&path, SchemaVariant::Duration).unwrap();
        store.append(&create_timed_record()).unwrap();
        store.list_all().unwrap()
    };
    assert!(before_restart[0].due_time.is_none());

    let store = CsvStore::open(&path, SchemaVariant::Duration).unwrap();
    let records = store.list_all().unwrap();
    assert_eq!(records[0].due_date, parse_date("2025-03-10").unwrap());
    assert!(records[0].due_time.is_none());
    assert_eq!(records[0].duration_minutes, Some(90));
    assert_eq!(records, before_restart);
}

#[test]
fn test_timed_variant_lists_the_same_record_before_and_after_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("agenda.csv");
    let mut record = create_timed_record();
    record.due_time = Some(Time::from_hms(14, 30, 15).unwrap());
    let before_restart = {
        let store = CsvStore::open(&path, SchemaVariant::Timed).unwrap();
        store.append(&record).unwrap();
        store.list_all().unwrap()
    };
    assert_eq!(before_restart[0].due_time, Some(Time::from_hms(14, 30, 0).unwrap()));

    let store = CsvStore::open(&path, SchemaVariant::Timed).unwrap();
    assert_eq!(store.list_all().unwrap(), before_restart);
}

#[test]
fn test_missing_required_column_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("agenda.csv");
    fs::write(&path, "id,due_date,course,subject\n1,2025-03-10,Third,Math\n").unwrap();

    let result = CsvStore::open(&path, SchemaVariant::Duration);
    assert!(matches!(result, Err(PersistenceError::Csv(_))));
}

#[test]
fn test_unparseable_row_reports_its_position() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("agenda.csv");
    fs::write(
        &path,
        "due_date,course,subject,teacher,task_type\n\
         2025-03-10,Third,Math,Ana Lopez,Reading\n\
         not-a-date,Third,Math,Ana Lopez,Reading\n",
    )
    .unwrap();

    let result = CsvStore::open(&path, SchemaVariant::Duration);
    match result {
        Err(PersistenceError::CorruptRecord { location, .. }) => assert_eq!(location, "row 2"),
        other => panic!("expected a corrupt record error, got {other:?}"),
    }
}

#[test]
fn test_failed_write_leaves_store_unchanged() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("missing-dir").join("agenda.csv");
    let store = CsvStore::open(&path, SchemaVariant::Duration).unwrap();

    let result = store.append(&create_test_record("Third", "2025-03-10", "Math"));

    assert!(matches!(result, Err(PersistenceError::Io(_))));
    assert!(store.list_all().unwrap().is_empty());
}
