//! Access-control rule settings.
//!
//! A block is an ordered map whose keys name rules (`jwt_auth: {...}`) and
//! block metadata (`name`, `type`, ...). [`parse_block`] builds the settings
//! of every rule it recognizes.

pub mod jwt_auth;

use gatekeep_core::settings::{EnvLookup, RawSettings, SettingValue, SettingsError};
use tracing::debug;

pub use jwt_auth::JwtAuthRuleSettings;

/// Settings of a named rule.
pub trait RuleSettings: Send + Sync {
    /// The attribute name identifying the rule in a block.
    fn name(&self) -> &'static str;
}

/// Settings of a rule that authenticates with a signing key.
pub trait AuthKeyProviderSettings: RuleSettings {
    fn key(&self) -> &[u8];
}

/// Settings of any known rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleDefinition {
    JwtAuth(JwtAuthRuleSettings),
}

impl RuleSettings for RuleDefinition {
    fn name(&self) -> &'static str {
        match self {
            RuleDefinition::JwtAuth(rule) => rule.name(),
        }
    }
}

/// Names of all rules [`parse_rule`] recognizes.
pub const KNOWN_RULES: &[&str] = &[JwtAuthRuleSettings::ATTRIBUTE_NAME];

/// Build the settings of rule `name` from its value.
///
/// Returns `None` if `name` is not a known rule.
pub fn parse_rule(
    name: &str,
    value: &SettingValue,
    env: &dyn EnvLookup,
) -> Option<Result<RuleDefinition, SettingsError>> {
    match name {
        JwtAuthRuleSettings::ATTRIBUTE_NAME => Some(
            rule_settings(name, value)
                .and_then(|raw| JwtAuthRuleSettings::from_raw_with_env(raw, env))
                .map(RuleDefinition::JwtAuth),
        ),
        _ => None,
    }
}

/// Build every known rule of a block, in block order.
///
/// Unknown keys are skipped. The first invalid rule aborts the block.
pub fn parse_block(
    block: &RawSettings,
    env: &dyn EnvLookup,
) -> Result<Vec<RuleDefinition>, SettingsError> {
    let mut rules = Vec::new();
    for (key, value) in block.iter() {
        match parse_rule(key, value, env) {
            Some(rule) => rules.push(rule?),
            None => debug!(key, "Skipping non-rule block attribute"),
        }
    }
    Ok(rules)
}

fn rule_settings<'a>(name: &str, value: &'a SettingValue) -> Result<&'a RawSettings, SettingsError> {
    value
        .as_map()
        .ok_or_else(|| SettingsError::wrong_type(name, "a map of rule settings", value))
}
