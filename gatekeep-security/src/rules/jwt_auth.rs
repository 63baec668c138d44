use std::collections::BTreeSet;
use std::str::FromStr;

use gatekeep_core::settings::{EnvLookup, ProcessEnv, RawSettings, SettingValue, SettingsError};
use jsonwebtoken::{Algorithm, DecodingKey};
use tracing::{debug, warn};

use super::{AuthKeyProviderSettings, RuleSettings};
use crate::secret::PrefixedSecret;

const SIGNATURE_ALGO: &str = "signature_algo";
const SIGNATURE_KEY: &str = "signature_key";
const USER_CLAIM: &str = "user_claim";
const ROLES_CLAIM: &str = "roles_claim";
const HEADER_NAME: &str = "header_name";
const ROLES: &str = "roles";

/// Header carrying the bearer token when `header_name` is not set.
pub const DEFAULT_HEADER_NAME: &str = "Authorization";

/// Claim holding the principal when `user_claim` is not set.
pub const DEFAULT_USER_CLAIM: &str = "sub";

/// Claim holding role membership when `roles_claim` is not set.
pub const DEFAULT_ROLES_CLAIM: &str = "roles";

/// Validated settings of the `jwt_auth` rule.
///
/// Built once from the rule's raw settings and immutable afterwards.
///
/// ```yaml
/// jwt_auth:
///   signature_key: "env:JWT_SECRET"
///   signature_algo: HS256
///   user_claim: email
///   roles_claim: groups
///   header_name: X-Auth-Token
///   roles: [admin, ops]
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct JwtAuthRuleSettings {
    key: Vec<u8>,
    algorithm: Option<String>,
    user_claim: Option<String>,
    roles_claim: Option<String>,
    header_name: String,
    roles: BTreeSet<String>,
}

impl JwtAuthRuleSettings {
    /// Name of the rule in access-control blocks.
    pub const ATTRIBUTE_NAME: &'static str = "jwt_auth";

    /// Build from raw settings, resolving `env:` secrets from the process environment.
    pub fn from_raw(settings: &RawSettings) -> Result<Self, SettingsError> {
        Self::from_raw_with_env(settings, &ProcessEnv)
    }

    /// Build from raw settings with an explicit environment.
    ///
    /// # Errors
    ///
    /// - `MissingRequiredField` if `signature_key` is absent
    /// - `WrongFieldType` if `signature_key` is not a string, or an optional
    ///   string attribute holds another kind of value
    /// - `InvalidFieldValue` if `signature_key` resolves to an empty string or
    ///   names an unset environment variable, or `roles` is an empty list
    pub fn from_raw_with_env(
        settings: &RawSettings,
        env: &dyn EnvLookup,
    ) -> Result<Self, SettingsError> {
        let key = resolve_signature_key(settings, env)?;

        let roles: BTreeSet<String> = settings
            .not_empty_set_opt(ROLES)?
            .map(|items| items.iter().map(SettingValue::natural_string).collect())
            .unwrap_or_default();

        let rule = JwtAuthRuleSettings {
            key: key.into_bytes(),
            algorithm: settings.string_opt(SIGNATURE_ALGO)?,
            user_claim: settings.string_opt(USER_CLAIM)?,
            roles_claim: settings.string_opt(ROLES_CLAIM)?,
            header_name: settings
                .string_opt(HEADER_NAME)?
                .unwrap_or_else(|| DEFAULT_HEADER_NAME.to_string()),
            roles,
        };
        debug!(
            header = %rule.header_name,
            algorithm = ?rule.algorithm,
            roles = rule.roles.len(),
            "Parsed jwt_auth rule settings"
        );
        Ok(rule)
    }

    /// Signing key bytes (UTF-8 of the resolved secret).
    pub fn key(&self) -> &[u8] {
        &self.key
    }

    /// Expected signing algorithm name, as configured.
    pub fn algorithm(&self) -> Option<&str> {
        self.algorithm.as_deref()
    }

    pub fn user_claim(&self) -> Option<&str> {
        self.user_claim.as_deref()
    }

    pub fn roles_claim(&self) -> Option<&str> {
        self.roles_claim.as_deref()
    }

    /// Header carrying the token; `Authorization` unless configured.
    pub fn header_name(&self) -> &str {
        &self.header_name
    }

    /// Accepted roles. Empty means no role restriction.
    pub fn roles(&self) -> &BTreeSet<String> {
        &self.roles
    }

    pub fn effective_user_claim(&self) -> &str {
        self.user_claim().unwrap_or(DEFAULT_USER_CLAIM)
    }

    pub fn effective_roles_claim(&self) -> &str {
        self.roles_claim().unwrap_or(DEFAULT_ROLES_CLAIM)
    }

    /// Whether a principal holding `roles` passes the role restriction.
    ///
    /// Always true without a restriction; otherwise at least one role must
    /// be among the accepted ones.
    pub fn accepts_roles<I, S>(&self, roles: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.roles.is_empty() || roles.into_iter().any(|r| self.roles.contains(r.as_ref()))
    }

    /// Parse the configured algorithm name.
    ///
    /// # Errors
    ///
    /// `InvalidFieldValue` naming `signature_algo` for an unknown algorithm.
    pub fn parsed_algorithm(&self) -> Result<Option<Algorithm>, SettingsError> {
        self.algorithm
            .as_deref()
            .map(|name| {
                Algorithm::from_str(name).map_err(|_| {
                    SettingsError::invalid_value(
                        SIGNATURE_ALGO,
                        format!("Attribute '{SIGNATURE_ALGO}' names an unknown algorithm: {name}"),
                    )
                })
            })
            .transpose()
    }

    /// Decoding key for the configured algorithm family.
    ///
    /// HMAC algorithms (and an unspecified algorithm) use the key bytes as a
    /// shared secret; RSA, EC and EdDSA algorithms expect a PEM public key.
    pub fn decoding_key(&self) -> Result<DecodingKey, SettingsError> {
        let algorithm = self.parsed_algorithm()?;
        let pem_error = |e: jsonwebtoken::errors::Error| {
            SettingsError::invalid_value(
                SIGNATURE_KEY,
                format!("Attribute '{SIGNATURE_KEY}' is not a valid PEM public key: {e}"),
            )
        };
        match algorithm {
            None | Some(Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512) => {
                Ok(DecodingKey::from_secret(&self.key))
            }
            Some(
                Algorithm::RS256
                | Algorithm::RS384
                | Algorithm::RS512
                | Algorithm::PS256
                | Algorithm::PS384
                | Algorithm::PS512,
            ) => DecodingKey::from_rsa_pem(&self.key).map_err(pem_error),
            Some(Algorithm::ES256 | Algorithm::ES384) => {
                DecodingKey::from_ec_pem(&self.key).map_err(pem_error)
            }
            Some(Algorithm::EdDSA) => DecodingKey::from_ed_pem(&self.key).map_err(pem_error),
        }
    }
}

fn resolve_signature_key(
    settings: &RawSettings,
    env: &dyn EnvLookup,
) -> Result<String, SettingsError> {
    let raw = settings
        .req(SIGNATURE_KEY)?
        .as_str()
        .ok_or_else(|| SettingsError::WrongFieldType {
            key: SIGNATURE_KEY.to_string(),
            message: format!(
                "Attribute '{SIGNATURE_KEY}' must be a string; if it looks like a number try adding quotation marks"
            ),
        })?;

    let secret = PrefixedSecret::parse(raw);
    match secret.resolve(env) {
        Some(resolved) if !resolved.is_empty() => {
            debug!(source = secret.source(), "Resolved signature key");
            Ok(resolved)
        }
        resolved => {
            // Unset variables and empty values share one error kind; the log keeps them apart.
            if let (PrefixedSecret::Env(name), None) = (secret, &resolved) {
                warn!(variable = name, "Environment variable for signature key is not set");
            }
            Err(SettingsError::invalid_value(
                SIGNATURE_KEY,
                format!("Attribute '{SIGNATURE_KEY}' shall not evaluate to an empty string"),
            ))
        }
    }
}

impl RuleSettings for JwtAuthRuleSettings {
    fn name(&self) -> &'static str {
        Self::ATTRIBUTE_NAME
    }
}

impl AuthKeyProviderSettings for JwtAuthRuleSettings {
    fn key(&self) -> &[u8] {
        &self.key
    }
}

impl std::fmt::Debug for JwtAuthRuleSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtAuthRuleSettings")
            .field("key", &"<redacted>")
            .field("algorithm", &self.algorithm)
            .field("user_claim", &self.user_claim)
            .field("roles_claim", &self.roles_claim)
            .field("header_name", &self.header_name)
            .field("roles", &self.roles)
            .finish()
    }
}
