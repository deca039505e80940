use super::*;
use tempfile::tempdir;

fn write_config(dir: &Path, content: &str) -> std::path::PathBuf {
    let path = dir.join("resched.toml");
    std::fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_load_minimal() {
    let dir = tempdir().unwrap();
    let path = write_config(
        dir.path(),
        r#"
locations = ["Vancouver", "Calgary"]
current_appointment_date = "2025-02-28"
"#,
    );

    let config = Config::load(&path).unwrap();
    assert_eq!(
        config.locations,
        vec![Location::Vancouver, Location::Calgary]
    );
    assert_eq!(
        config.current_appointment_date,
        NaiveDate::from_ymd_opt(2025, 2, 28).unwrap()
    );
    assert_eq!(config.base_url, "https://ais.usvisa-info.com/en-ca/niv/");
    assert_eq!(config.delays.min_ms, 500);
    assert_eq!(config.delays.max_ms, 1500);
}

#[test]
fn test_load_with_delays() {
    let dir = tempdir().unwrap();
    let path = write_config(
        dir.path(),
        r#"
locations = ["Toronto"]
current_appointment_date = "2025-06-01"

[delays]
min_ms = 200
max_ms = 900
"#,
    );

    let config = Config::load(&path).unwrap();
    assert_eq!(config.delays.min_ms, 200);
    assert_eq!(config.delays.max_ms, 900);
}

#[test]
fn test_load_missing_file() {
    let dir = tempdir().unwrap();
    let err = Config::load(&dir.path().join("nope.toml")).unwrap_err();
    assert!(err.to_string().contains("Failed to read config file"));
}

#[test]
fn test_load_unknown_location() {
    let dir = tempdir().unwrap();
    let path = write_config(
        dir.path(),
        r#"
locations = ["Winnipeg"]
current_appointment_date = "2025-02-28"
"#,
    );
    assert!(Config::load(&path).is_err());
}

#[test]
fn test_validate_empty_locations() {
    let config = Config {
        base_url: default_base_url(),
        locations: vec![],
        current_appointment_date: NaiveDate::from_ymd_opt(2025, 2, 28).unwrap(),
        delays: DelayConfig::default(),
    };
    let err = validate_config(&config).unwrap_err();
    assert!(err.to_string().contains("locations cannot be empty"));
}

#[test]
fn test_validate_duplicate_location() {
    let config = Config {
        base_url: default_base_url(),
        locations: vec![Location::Ottawa, Location::Ottawa],
        current_appointment_date: NaiveDate::from_ymd_opt(2025, 2, 28).unwrap(),
        delays: DelayConfig::default(),
    };
    let err = validate_config(&config).unwrap_err();
    assert!(err.to_string().contains("more than once"));
}

#[test]
fn test_validate_delay_bounds() {
    let config = Config {
        base_url: default_base_url(),
        locations: vec![Location::Ottawa],
        current_appointment_date: NaiveDate::from_ymd_opt(2025, 2, 28).unwrap(),
        delays: DelayConfig {
            min_ms: 2000,
            max_ms: 100,
        },
    };
    let err = validate_config(&config).unwrap_err();
    assert!(err.to_string().contains("min_ms"));
}

#[test]
fn test_validate_base_url_trailing_slash() {
    let config = Config {
        base_url: "https://ais.usvisa-info.com/en-ca/niv".to_string(),
        locations: vec![Location::Ottawa],
        current_appointment_date: NaiveDate::from_ymd_opt(2025, 2, 28).unwrap(),
        delays: DelayConfig::default(),
    };
    let err = validate_config(&config).unwrap_err();
    assert!(err.to_string().contains("trailing slash"));
}
