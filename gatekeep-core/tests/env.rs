use gatekeep_core::settings::{load_dotenv_from, EnvLookup, MapEnv, ProcessEnv};
use serial_test::serial;

#[test]
fn test_map_env() {
    let env = MapEnv::new().with("JWT_SECRET", "s3cr3t");
    assert_eq!(env.var("JWT_SECRET"), Some("s3cr3t".into()));
    assert_eq!(env.var("OTHER"), None);
}

#[test]
fn test_map_env_from_iter() {
    let env: MapEnv = vec![("A", "1"), ("B", "2")].into_iter().collect();
    assert_eq!(env.var("B"), Some("2".into()));
}

#[test]
#[serial]
fn test_process_env() {
    unsafe { std::env::set_var("GATEKEEP_TEST_PROCESS_ENV", "value") };
    assert_eq!(ProcessEnv.var("GATEKEEP_TEST_PROCESS_ENV"), Some("value".into()));
    unsafe { std::env::remove_var("GATEKEEP_TEST_PROCESS_ENV") };
    assert_eq!(ProcessEnv.var("GATEKEEP_TEST_PROCESS_ENV"), None);
}

#[test]
#[serial]
fn test_load_dotenv_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".env");
    std::fs::write(&path, "GATEKEEP_TEST_DOTENV=from-file\n").unwrap();

    load_dotenv_from(&path).unwrap();
    assert_eq!(ProcessEnv.var("GATEKEEP_TEST_DOTENV"), Some("from-file".into()));
    unsafe { std::env::remove_var("GATEKEEP_TEST_DOTENV") };
}

#[test]
#[serial]
fn test_dotenv_does_not_override() {
    unsafe { std::env::set_var("GATEKEEP_TEST_KEEP", "original") };
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".env");
    std::fs::write(&path, "GATEKEEP_TEST_KEEP=overridden\n").unwrap();

    load_dotenv_from(&path).unwrap();
    assert_eq!(ProcessEnv.var("GATEKEEP_TEST_KEEP"), Some("original".into()));
    unsafe { std::env::remove_var("GATEKEEP_TEST_KEEP") };
}

#[test]
fn test_load_dotenv_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    assert!(load_dotenv_from(&dir.path().join("absent.env")).is_err());
}
