use super::{RawSettings, SettingsError};

/// A single untyped settings value, as produced by the settings loader.
#[derive(Debug, Clone, PartialEq)]
pub enum SettingValue {
    String(String),
    Integer(i128),
    Float(f64),
    Bool(bool),
    Null,
    List(Vec<SettingValue>),
    Map(RawSettings),
}

impl SettingValue {
    pub(crate) fn from_yaml(value: &serde_yaml::Value) -> Self {
        match value {
            serde_yaml::Value::Bool(b) => SettingValue::Bool(*b),
            serde_yaml::Value::Number(n) => {
                // u64 values above i64::MAX stay exact integers.
                if let Some(i) = n.as_i64() {
                    SettingValue::Integer(i.into())
                } else if let Some(u) = n.as_u64() {
                    SettingValue::Integer(u.into())
                } else if let Some(f) = n.as_f64() {
                    SettingValue::Float(f)
                } else {
                    SettingValue::String(n.to_string())
                }
            }
            serde_yaml::Value::String(s) => SettingValue::String(s.clone()),
            serde_yaml::Value::Null => SettingValue::Null,
            serde_yaml::Value::Sequence(seq) => {
                SettingValue::List(seq.iter().map(SettingValue::from_yaml).collect())
            }
            serde_yaml::Value::Mapping(map) => {
                let mut settings = RawSettings::new();
                for (k, v) in map {
                    let key = match k {
                        serde_yaml::Value::String(s) => s.clone(),
                        other => SettingValue::from_yaml(other).natural_string(),
                    };
                    settings.set(key, SettingValue::from_yaml(v));
                }
                SettingValue::Map(settings)
            }
            serde_yaml::Value::Tagged(tagged) => SettingValue::from_yaml(&tagged.value),
        }
    }

    /// Human-readable name of the variant, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            SettingValue::String(_) => "string",
            SettingValue::Integer(_) => "integer",
            SettingValue::Float(_) => "float",
            SettingValue::Bool(_) => "boolean",
            SettingValue::Null => "null",
            SettingValue::List(_) => "list",
            SettingValue::Map(_) => "map",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            SettingValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&RawSettings> {
        match self {
            SettingValue::Map(m) => Some(m),
            _ => None,
        }
    }

    /// The natural string form of a value.
    ///
    /// Strings are returned verbatim, integers and booleans use their display
    /// form, floats keep a fractional part (`1.0`, not `1`), and
    /// lists and maps render as `[a, b]` and `{k: v}` with their elements
    /// converted recursively. Used wherever an untyped element has to be
    /// treated as text (e.g. role names listed without quotes).
    pub fn natural_string(&self) -> String {
        match self {
            SettingValue::String(s) => s.clone(),
            SettingValue::Integer(i) => i.to_string(),
            SettingValue::Float(f) => format!("{f:?}"),
            SettingValue::Bool(b) => b.to_string(),
            SettingValue::Null => "null".to_string(),
            SettingValue::List(items) => {
                let parts: Vec<String> = items.iter().map(SettingValue::natural_string).collect();
                format!("[{}]", parts.join(", "))
            }
            SettingValue::Map(map) => {
                let parts: Vec<String> = map
                    .iter()
                    .map(|(k, v)| format!("{k}: {}", v.natural_string()))
                    .collect();
                format!("{{{}}}", parts.join(", "))
            }
        }
    }
}

/// Trait for converting a `SettingValue` into a concrete type.
///
/// Conversions are strict: a value of the wrong kind is a
/// [`SettingsError::WrongFieldType`], never silently coerced. Use
/// [`SettingValue::natural_string`] when coercion is wanted.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot be read from a settings value",
    label = "not a valid settings value type",
    note = "built-in types: String, i64, bool, Option<T>, Vec<T>. Implement `FromSettingValue` for custom types."
)]
pub trait FromSettingValue: Sized {
    fn from_setting_value(value: &SettingValue, key: &str) -> Result<Self, SettingsError>;
}

impl FromSettingValue for String {
    fn from_setting_value(value: &SettingValue, key: &str) -> Result<Self, SettingsError> {
        match value {
            SettingValue::String(s) => Ok(s.clone()),
            other => Err(SettingsError::wrong_type(key, "a string", other)),
        }
    }
}

impl FromSettingValue for i64 {
    fn from_setting_value(value: &SettingValue, key: &str) -> Result<Self, SettingsError> {
        match value {
            SettingValue::Integer(i) => i64::try_from(*i).map_err(|_| {
                SettingsError::invalid_value(
                    key,
                    format!("Attribute '{key}' is out of range for a 64-bit integer"),
                )
            }),
            other => Err(SettingsError::wrong_type(key, "an integer", other)),
        }
    }
}

impl FromSettingValue for bool {
    fn from_setting_value(value: &SettingValue, key: &str) -> Result<Self, SettingsError> {
        match value {
            SettingValue::Bool(b) => Ok(*b),
            other => Err(SettingsError::wrong_type(key, "a boolean", other)),
        }
    }
}

impl<T: FromSettingValue> FromSettingValue for Option<T> {
    fn from_setting_value(value: &SettingValue, key: &str) -> Result<Self, SettingsError> {
        match value {
            SettingValue::Null => Ok(None),
            v => T::from_setting_value(v, key).map(Some),
        }
    }
}

impl<T: FromSettingValue> FromSettingValue for Vec<T> {
    fn from_setting_value(value: &SettingValue, key: &str) -> Result<Self, SettingsError> {
        match value {
            SettingValue::List(items) => items
                .iter()
                .enumerate()
                .map(|(i, v)| T::from_setting_value(v, &format!("{key}[{i}]")))
                .collect(),
            // Fallback: single value -> vec of one
            other => Ok(vec![T::from_setting_value(other, key)?]),
        }
    }
}
