use catalog_app::Settings;
use catalog_core::ConfigError;

#[test]
fn missing_files_fall_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let settings = Settings::load(dir.path(), "dev").unwrap();
    assert_eq!(settings.server.port, 3000);
    assert_eq!(settings.log.filter, "info,tower_http=debug");
}

#[test]
fn malformed_yaml_stops_startup() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("application.yaml"), "server: [unclosed").unwrap();
    let err = Settings::load(dir.path(), "dev").unwrap_err();
    assert!(matches!(err, ConfigError::Load(_)));
}

#[test]
fn invalid_server_section_stops_startup() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("application.yaml"),
        "server:\n  port: not-a-port\n",
    )
    .unwrap();
    assert!(Settings::load(dir.path(), "dev").is_err());
}
