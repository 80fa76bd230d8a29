//! Loading route tables from configuration files.

use patient_card_router::config::{load_config, ConfigError, LogFormat, ValidationError};
use patient_card_router::routing::{RouteTable, TableError, NOT_FOUND};

mod common;

#[test]
fn test_empty_file_gives_patient_card_table() {
    let dir = common::scratch_dir();
    let path = dir.path().join("routes.toml");
    std::fs::write(&path, "").unwrap();

    let config = load_config(&path).unwrap();
    let table = RouteTable::from_config(&config).unwrap();
    assert_eq!(table.resolve("/patients/42").name, "single-patient");
}

#[test]
fn test_custom_table() {
    let dir = common::scratch_dir();
    let path = dir.path().join("routes.toml");
    std::fs::write(
        &path,
        r#"
        [matching]
        case_sensitive = true

        [observability]
        log_format = "json"
        metrics_enabled = false

        [[routes]]
        path = "/"
        name = "home"
        view = "views/Home"

          [[routes.children]]
          path = "encounters/:encounterID"
          name = "single-encounter"
          view = "views/SingleEncounter"

        [[routes]]
        path = "*"
        name = "lost"
        view = "views/Lost"
        "#,
    )
    .unwrap();

    let config = load_config(&path).unwrap();
    assert_eq!(config.observability.log_format, LogFormat::Json);
    assert!(!config.observability.metrics_enabled);

    let table = RouteTable::from_config(&config).unwrap();
    let m = table.resolve("/encounters/e1");
    assert_eq!(m.name, "single-encounter");
    assert_eq!(m.param("encounterID"), Some("e1"));

    let m = table.resolve("/Encounters/e1");
    assert_eq!(m.name, "lost");
    assert!(m.fallback);
}

#[test]
fn test_table_without_wildcard_uses_sentinel() {
    let dir = common::scratch_dir();
    let path = dir.path().join("routes.toml");
    std::fs::write(
        &path,
        "[[routes]]\npath = \"patients\"\nname = \"patients\"\nview = \"views/Patients\"\n",
    )
    .unwrap();

    let table = RouteTable::from_config(&load_config(&path).unwrap()).unwrap();
    let m = table.resolve("/medications");
    assert_eq!(m.name, NOT_FOUND);
    assert!(m.matched.is_empty());
}

#[test]
fn test_invalid_table_reports_all_problems() {
    let dir = common::scratch_dir();
    let path = dir.path().join("routes.toml");
    std::fs::write(
        &path,
        r#"
        [views]
        extension = ""

        [[routes]]
        path = "*"
        name = "lost"
        view = "views/Lost"

        [[routes]]
        path = "patients"
        name = "patients"
        view = "views/Patients"
        "#,
    )
    .unwrap();

    let err = load_config(&path).unwrap_err();
    let ConfigError::Validation(errors) = err else {
        panic!("expected validation failure");
    };
    assert_eq!(
        errors,
        vec![
            ValidationError::Route(TableError::WildcardNotLast("lost".into())),
            ValidationError::EmptyViewExtension,
        ]
    );
}

#[test]
fn test_missing_file() {
    let dir = common::scratch_dir();
    let err = load_config(&dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)));
}
