use gatekeep_core::settings::{MapEnv, RawSettings, SettingValue, SettingsError};
use gatekeep_security::{parse_block, parse_rule, RuleDefinition, RuleSettings, KNOWN_RULES};

const BLOCK: &str = r#"
name: "JWT users"
type: allow
jwt_auth:
  signature_key: "env:JWT_SECRET"
  roles: [admin]
"#;

#[test]
fn parse_block_builds_known_rules() {
    let block = RawSettings::from_yaml_str(BLOCK).unwrap();
    let env = MapEnv::new().with("JWT_SECRET", "s3cr3t");

    let rules = parse_block(&block, &env).unwrap();
    assert_eq!(rules.len(), 1);
    assert_eq!(rules[0].name(), "jwt_auth");
    let RuleDefinition::JwtAuth(jwt) = &rules[0];
    assert_eq!(jwt.key(), b"s3cr3t");
    assert!(jwt.roles().contains("admin"));
}

#[test]
fn parse_block_propagates_rule_errors() {
    let block = RawSettings::from_yaml_str(BLOCK).unwrap();
    let err = parse_block(&block, &MapEnv::new()).unwrap_err();
    assert_eq!(err.key(), Some("signature_key"));
}

#[test]
fn parse_block_without_rules() {
    let block = RawSettings::from_yaml_str("name: empty\ntype: allow\n").unwrap();
    assert!(parse_block(&block, &MapEnv::new()).unwrap().is_empty());
}

#[test]
fn parse_rule_unknown_name() {
    let value = SettingValue::Map(RawSettings::new());
    assert!(parse_rule("ldap_auth", &value, &MapEnv::new()).is_none());
}

#[test]
fn parse_rule_requires_map() {
    let value = SettingValue::String("secret".into());
    let result = parse_rule("jwt_auth", &value, &MapEnv::new()).unwrap();
    match result {
        Err(SettingsError::WrongFieldType { key, .. }) => assert_eq!(key, "jwt_auth"),
        other => panic!("expected WrongFieldType, got {other:?}"),
    }
}

#[test]
fn known_rules_lists_jwt_auth() {
    assert_eq!(KNOWN_RULES, &["jwt_auth"]);
}
