use testreport::config::Config;
use testreport::report::ReporterOptions;

#[test]
fn test_default_config_values() {
    let config = Config::default();

    assert_eq!(config.reporter.stack_lines_count, 5);
    assert!(config.reporter.color);
    assert_eq!(config.reporter_options(), ReporterOptions::default());
}

#[test]
fn test_write_and_load_default_config() {
    let temp_dir = tempfile::TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join(".testreportrc.toml");

    Config::write_default(&path).expect("Failed to write config");
    let config = Config::load_from_file(&path).expect("Failed to load config");

    assert_eq!(config.reporter.stack_lines_count, 5);
    assert!(config.reporter.color);
}

#[test]
fn test_load_missing_file_fails() {
    let temp_dir = tempfile::TempDir::new().expect("Failed to create temp dir");
    let result = Config::load_from_file(&temp_dir.path().join("missing.toml"));

    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("missing.toml"));
}
