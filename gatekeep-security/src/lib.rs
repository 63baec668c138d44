pub mod rules;
pub mod secret;

// Re-export primary public types for convenience.
pub use rules::jwt_auth::{DEFAULT_HEADER_NAME, DEFAULT_ROLES_CLAIM, DEFAULT_USER_CLAIM};
pub use rules::{
    parse_block, parse_rule, AuthKeyProviderSettings, JwtAuthRuleSettings, RuleDefinition,
    RuleSettings, KNOWN_RULES,
};
pub use secret::PrefixedSecret;
