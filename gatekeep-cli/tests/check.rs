use gatekeep_cli::commands::check::{self, check_settings};
use gatekeep_core::settings::{MapEnv, RawSettings, SettingsError};
use serial_test::serial;
use std::fs;
use tempfile::TempDir;

const SETTINGS: &str = r#"
access_control_rules:
  - name: "JWT users"
    type: allow
    jwt_auth:
      signature_key: "text:s3cr3t"
  - name: "Broken"
    jwt_auth:
      signature_key: 123456
  - name: "Env key"
    jwt_auth:
      signature_key: "env:GATEKEEP_CLI_TEST_SECRET"
  - type: allow
"#;

#[test]
fn check_settings_reports_each_block() {
    let settings = RawSettings::from_yaml_str(SETTINGS).unwrap();
    let env = MapEnv::new().with("GATEKEEP_CLI_TEST_SECRET", "from-env");

    let reports = check_settings(&settings, &env).unwrap();
    assert_eq!(reports.len(), 4);

    assert_eq!(reports[0].name, "JWT users");
    assert_eq!(reports[0].outcome.as_ref().unwrap(), &vec!["jwt_auth"]);

    assert_eq!(reports[1].name, "Broken");
    assert!(matches!(
        reports[1].outcome,
        Err(SettingsError::WrongFieldType { .. })
    ));

    assert!(reports[2].outcome.is_ok());

    assert_eq!(reports[3].name, "#4");
    assert!(reports[3].outcome.as_ref().unwrap().is_empty());
}

#[test]
fn check_settings_unset_env_secret() {
    let settings = RawSettings::from_yaml_str(SETTINGS).unwrap();
    let reports = check_settings(&settings, &MapEnv::new()).unwrap();
    assert!(matches!(
        reports[2].outcome,
        Err(SettingsError::InvalidFieldValue { .. })
    ));
}

#[test]
fn check_settings_requires_block_list() {
    let settings = RawSettings::from_yaml_str("other: 1\n").unwrap();
    assert!(matches!(
        check_settings(&settings, &MapEnv::new()),
        Err(SettingsError::MissingRequiredField { .. })
    ));

    let settings = RawSettings::from_yaml_str("access_control_rules: oops\n").unwrap();
    assert!(matches!(
        check_settings(&settings, &MapEnv::new()),
        Err(SettingsError::WrongFieldType { .. })
    ));
}

#[test]
fn check_settings_non_map_block() {
    let settings = RawSettings::from_yaml_str("access_control_rules: [plain]\n").unwrap();
    let reports = check_settings(&settings, &MapEnv::new()).unwrap();
    assert_eq!(reports[0].outcome.as_ref().unwrap_err().key(), Some("access_control_rules[0]"));
}

#[test]
#[serial]
fn run_counts_invalid_blocks() {
    let tmp = TempDir::new().unwrap();
    let settings_path = tmp.path().join("settings.yaml");
    let env_path = tmp.path().join("test.env");
    fs::write(&settings_path, SETTINGS).unwrap();
    fs::write(&env_path, "GATEKEEP_CLI_TEST_SECRET=from-file\n").unwrap();

    let failures = check::run(&settings_path, Some(&env_path)).unwrap();
    assert_eq!(failures, 1);
    unsafe { std::env::remove_var("GATEKEEP_CLI_TEST_SECRET") };
}

#[test]
#[serial]
fn run_missing_file() {
    let tmp = TempDir::new().unwrap();
    let result = check::run(&tmp.path().join("absent.yaml"), None);
    assert!(result.is_err());
}
