use usuarios::config::{
    AppConfig, DatabaseBackend, DatabaseSection, LogFormat, StatusPolicy,
};

#[test]
fn defaults_target_local_mysql_with_legacy_status_codes() {
    let config = AppConfig::default();

    assert_eq!(config.server.port, 5000);
    assert_eq!(config.api.status_codes, StatusPolicy::Legacy);
    assert!(!config.database.bootstrap_schema);
    assert_eq!(config.database.backend().unwrap(), DatabaseBackend::MySql);
    assert!(matches!(config.logging.format, LogFormat::Json));
    assert!(config.validate().is_ok());
}

#[test]
fn empty_database_url_is_rejected() {
    let config = AppConfig {
        database: DatabaseSection {
            url: "  ".into(),
            bootstrap_schema: false,
        },
        ..Default::default()
    };

    assert!(
        config.validate().is_err(),
        "Expected an empty database url to fail validation"
    );
}

#[test]
fn unsupported_scheme_is_rejected() {
    let section = DatabaseSection {
        url: "postgres://localhost/devbook".into(),
        bootstrap_schema: false,
    };
    assert!(section.backend().is_err());

    let section = DatabaseSection {
        url: "sqlite://./usuarios.db?mode=rwc".into(),
        bootstrap_schema: true,
    };
    assert_eq!(section.backend().unwrap(), DatabaseBackend::Sqlite);
}

#[test]
fn load_reads_file_and_environment() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let path = temp_dir.path().join("usuarios.toml");
    std::fs::write(
        &path,
        r#"
[server]
port = 8080

[database]
url = "sqlite://./usuarios.db?mode=rwc"

[logging]
format = "text"
"#,
    )
    .unwrap();

    std::env::set_var("USUARIOS_CONFIG", &path);
    std::env::set_var("USUARIOS__API__STATUS_CODES", "standard");

    let config = AppConfig::load().expect("configuration should load");

    std::env::remove_var("USUARIOS_CONFIG");
    std::env::remove_var("USUARIOS__API__STATUS_CODES");

    assert_eq!(config.server.port, 8080);
    assert_eq!(config.database.backend().unwrap(), DatabaseBackend::Sqlite);
    assert_eq!(config.api.status_codes, StatusPolicy::Standard);
    assert!(matches!(config.logging.format, LogFormat::Text));
    assert_eq!(config.logging.level, "info");
}
