//! Secret indirection for key material.
//!
//! A secret attribute may hold the secret inline or point at an environment
//! variable:
//!
//! | form | resolves to |
//! |------|-------------|
//! | `text:<secret>` | `<secret>`, prefix stripped |
//! | `env:<NAME>` | value of environment variable `NAME` |
//! | anything else | the string verbatim |

use gatekeep_core::settings::EnvLookup;

const TEXT_PREFIX: &str = "text:";
const ENV_PREFIX: &str = "env:";

/// A secret reference, classified by its prefix.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum PrefixedSecret<'a> {
    /// `text:` prefix; holds the remainder.
    Text(&'a str),
    /// `env:` prefix; holds the variable name.
    Env(&'a str),
    /// No recognized prefix.
    Plain(&'a str),
}

impl<'a> PrefixedSecret<'a> {
    /// Classify a raw attribute value. `text:` is checked before `env:`.
    pub fn parse(raw: &'a str) -> Self {
        if let Some(rest) = raw.strip_prefix(TEXT_PREFIX) {
            PrefixedSecret::Text(rest)
        } else if let Some(name) = raw.strip_prefix(ENV_PREFIX) {
            PrefixedSecret::Env(name)
        } else {
            PrefixedSecret::Plain(raw)
        }
    }

    /// Resolve the secret. `None` only when an `env:` variable is unset.
    pub fn resolve(&self, env: &dyn EnvLookup) -> Option<String> {
        match self {
            PrefixedSecret::Text(secret) | PrefixedSecret::Plain(secret) => {
                Some((*secret).to_string())
            }
            PrefixedSecret::Env(name) => env.var(name),
        }
    }

    /// Short label of the form, safe to log.
    pub fn source(&self) -> &'static str {
        match self {
            PrefixedSecret::Text(_) => "text",
            PrefixedSecret::Env(_) => "env",
            PrefixedSecret::Plain(_) => "plain",
        }
    }
}

// Inline secrets stay out of logs and panic messages.
impl std::fmt::Debug for PrefixedSecret<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PrefixedSecret::Text(_) => f.write_str("Text(<redacted>)"),
            PrefixedSecret::Env(name) => f.debug_tuple("Env").field(name).finish(),
            PrefixedSecret::Plain(_) => f.write_str("Plain(<redacted>)"),
        }
    }
}
