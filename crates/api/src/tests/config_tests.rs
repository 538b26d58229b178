// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::path::PathBuf;

use agenda_domain::{AssignmentDraft, Role};
use agenda_persistence::{RecordStore, SchemaVariant};

use crate::tests::helpers::{create_math_draft, create_math_teacher};
use crate::{AgendaConfig, ConfigError, SchedulingService, StoreConfig, hash_password};

#[test]
fn test_empty_document_uses_defaults() {
    let config = AgendaConfig::from_json_str("{}").unwrap();

    assert_eq!(config, AgendaConfig::default());
    assert_eq!(config.daily_limit, 3);
    assert_eq!(config.default_start_time, "08:00");
    assert_eq!(config.store, StoreConfig::Memory);
    assert!(config.validate().is_ok());
}

#[test]
fn test_full_document_parses() {
    let hash = hash_password("pw", 4).unwrap();
    let json = format!(
        r##"{{
            "courses": ["Kinder", "First"],
            "daily_limit": 2,
            "timezone": "America/Santiago",
            "default_event_minutes": 45,
            "default_start_time": "09:30",
            "subject_colors": {{ "Math": "#1E88E5" }},
            "store": {{ "backend": "csv", "path": "agenda.csv", "variant": "timed" }},
            "credentials": [
                {{ "login": "alopez", "display_name": "Ana Lopez", "role": "teacher",
                   "subject": "Math", "password_hash": "{hash}" }}
            ]
        }}"##
    );

    let config = AgendaConfig::from_json_str(&json).unwrap();

    assert_eq!(config.courses, vec!["Kinder", "First"]);
    assert_eq!(
        config.store,
        StoreConfig::Csv {
            path: PathBuf::from("agenda.csv"),
            variant: SchemaVariant::Timed,
        }
    );
    assert_eq!(config.credentials[0].role, Role::Teacher);
    assert!(config.validate().is_ok());
    assert_eq!(config.scheduling_rules().unwrap().quota.limit(), 2);
    assert_eq!(config.credential_table().unwrap().len(), 1);
}

#[test]
fn test_unknown_fields_are_rejected() {
    let result = AgendaConfig::from_json_str(r#"{ "daily_limt": 4 }"#);
    assert!(matches!(result, Err(ConfigError::Parse(_))));
}

#[test]
fn test_sqlite_store_path_is_optional() {
    let config = AgendaConfig::from_json_str(r#"{ "store": { "backend": "sqlite" } }"#).unwrap();
    assert_eq!(config.store, StoreConfig::Sqlite { path: None });
}

#[test]
fn test_invalid_values_fail_validation() {
    let invalid = [
        r#"{ "daily_limit": 0 }"#,
        r#"{ "courses": [] }"#,
        r#"{ "timezone": "Mars/Olympus" }"#,
        r#"{ "default_start_time": "8 o'clock" }"#,
        r##"{ "subject_colors": { "Math": "blue" } }"##,
    ];

    for json in invalid {
        let config = AgendaConfig::from_json_str(json).unwrap();
        assert!(
            matches!(config.validate(), Err(ConfigError::Invalid(_))),
            "{json} should fail validation"
        );
    }
}

#[test]
fn test_invalid_credentials_fail_validation() {
    let json = r#"{ "credentials": [
        { "login": "alopez", "display_name": "Ana Lopez", "role": "teacher", "password_hash": "x" }
    ] }"#;
    let config = AgendaConfig::from_json_str(json).unwrap();
    assert!(matches!(config.validate(), Err(ConfigError::Credentials(_))));
}

#[test]
fn test_load_reports_missing_file() {
    let result = AgendaConfig::load(std::path::Path::new("/nonexistent/agenda.json"));
    assert!(matches!(result, Err(ConfigError::Read { .. })));
}

#[test]
fn test_configured_csv_store_backs_a_service() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("agenda.csv");
    let config = AgendaConfig {
        store: StoreConfig::Csv {
            path: path.clone(),
            variant: SchemaVariant::Timed,
        },
        ..AgendaConfig::default()
    };

    let service = SchedulingService::new(
        config.store.open().unwrap(),
        config.scheduling_rules().unwrap(),
        config.calendar_projector().unwrap(),
    );
    let mut draft: AssignmentDraft = create_math_draft("2025-03-10");
    draft.due_time = Some(String::from("10:15"));
    let id = service.submit(&draft, &create_math_teacher()).unwrap();

    let reopened = config.store.open().unwrap();
    let records = reopened.list_all().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].id, id);
    assert!(std::fs::read_to_string(&path).unwrap().contains("10:15"));
}

#[test]
fn test_configured_timezone_shifts_event_times() {
    let config = AgendaConfig::from_json_str(r#"{ "timezone": "America/Santiago" }"#).unwrap();
    let service = SchedulingService::new(
        config.store.open().unwrap(),
        config.scheduling_rules().unwrap(),
        config.calendar_projector().unwrap(),
    );
    service
        .submit(&create_math_draft("2025-03-10"), &create_math_teacher())
        .unwrap();

    let events = service
        .query_calendar("Third", &create_math_teacher())
        .unwrap();

    assert_eq!(events[0].start, "2025-03-10T11:00:00+00:00");
}
