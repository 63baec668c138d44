pub mod env;
mod loader;
pub mod value;

use std::path::Path;

pub use env::{load_dotenv, load_dotenv_from, EnvLookup, MapEnv, ProcessEnv};
pub use value::{FromSettingValue, SettingValue};

/// Error type for settings validation and loading.
///
/// Every validation variant names the offending attribute so the operator
/// can locate it in the settings file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsError {
    /// A required attribute is absent (or explicitly null).
    MissingRequiredField { key: String },
    /// The attribute holds a value of the wrong kind.
    WrongFieldType { key: String, message: String },
    /// The attribute has the right kind but an unacceptable value.
    InvalidFieldValue { key: String, message: String },
    /// An I/O or YAML parsing error occurred while loading settings.
    Load(String),
}

impl SettingsError {
    /// Build a `WrongFieldType` error with the standard message.
    pub fn wrong_type(key: &str, expected: &str, found: &SettingValue) -> Self {
        SettingsError::WrongFieldType {
            key: key.to_string(),
            message: format!(
                "Attribute '{key}' must be {expected}, found {}",
                found.type_name()
            ),
        }
    }

    pub fn invalid_value(key: &str, message: impl Into<String>) -> Self {
        SettingsError::InvalidFieldValue {
            key: key.to_string(),
            message: message.into(),
        }
    }

    /// The attribute this error refers to, if any.
    pub fn key(&self) -> Option<&str> {
        match self {
            SettingsError::MissingRequiredField { key }
            | SettingsError::WrongFieldType { key, .. }
            | SettingsError::InvalidFieldValue { key, .. } => Some(key),
            SettingsError::Load(_) => None,
        }
    }
}

impl std::fmt::Display for SettingsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SettingsError::MissingRequiredField { key } => {
                write!(f, "Missing required attribute '{key}'")
            }
            SettingsError::WrongFieldType { message, .. } => write!(f, "{message}"),
            SettingsError::InvalidFieldValue { message, .. } => write!(f, "{message}"),
            SettingsError::Load(msg) => write!(f, "Settings load error: {msg}"),
        }
    }
}

impl std::error::Error for SettingsError {}

/// Ordered, untyped key/value settings.
///
/// Keys keep the order in which they appear in the source document.
/// Setting an existing key replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawSettings {
    entries: Vec<(String, SettingValue)>,
}

impl RawSettings {
    /// Create empty settings (useful for testing).
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse settings from a YAML document whose root is a mapping.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, SettingsError> {
        loader::load_yaml_str(yaml)
    }

    /// Load settings from a YAML file.
    pub fn load_file(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        loader::load_yaml_file(path.as_ref())
    }

    /// Set a value programmatically.
    pub fn set(&mut self, key: impl Into<String>, value: SettingValue) {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Builder-style variant of [`set`](Self::set).
    pub fn with(mut self, key: impl Into<String>, value: SettingValue) -> Self {
        self.set(key, value);
        self
    }

    pub fn value(&self, key: &str) -> Option<&SettingValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SettingValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Fetch a required value.
    ///
    /// # Errors
    ///
    /// `MissingRequiredField` if the key is absent or null.
    pub fn req(&self, key: &str) -> Result<&SettingValue, SettingsError> {
        match self.value(key) {
            None | Some(SettingValue::Null) => Err(SettingsError::MissingRequiredField {
                key: key.to_string(),
            }),
            Some(value) => Ok(value),
        }
    }

    /// Get a typed value for a required key.
    pub fn get<V: FromSettingValue>(&self, key: &str) -> Result<V, SettingsError> {
        V::from_setting_value(self.req(key)?, key)
    }

    /// Get a typed value, `None` if the key is absent or null.
    pub fn opt<V: FromSettingValue>(&self, key: &str) -> Result<Option<V>, SettingsError> {
        match self.value(key) {
            None => Ok(None),
            Some(value) => Option::<V>::from_setting_value(value, key),
        }
    }

    /// Fetch an optional string value.
    ///
    /// # Errors
    ///
    /// `WrongFieldType` if the key holds something other than a string.
    pub fn string_opt(&self, key: &str) -> Result<Option<String>, SettingsError> {
        self.opt::<String>(key)
    }

    /// Fetch the elements of an optional, non-empty set of untyped values.
    ///
    /// A list yields its elements and a single scalar yields a one-element
    /// slice. Duplicates are left for the caller to collapse.
    ///
    /// # Errors
    ///
    /// `InvalidFieldValue` if the key holds an empty list.
    pub fn not_empty_set_opt(&self, key: &str) -> Result<Option<&[SettingValue]>, SettingsError> {
        match self.value(key) {
            None | Some(SettingValue::Null) => Ok(None),
            Some(SettingValue::List(items)) if items.is_empty() => Err(
                SettingsError::invalid_value(key, format!("Attribute '{key}' shall not be an empty set")),
            ),
            Some(SettingValue::List(items)) => Ok(Some(items.as_slice())),
            Some(other) => Ok(Some(std::slice::from_ref(other))),
        }
    }

    /// Fetch an optional nested settings map.
    pub fn inner(&self, key: &str) -> Result<Option<&RawSettings>, SettingsError> {
        match self.value(key) {
            None | Some(SettingValue::Null) => Ok(None),
            Some(SettingValue::Map(map)) => Ok(Some(map)),
            Some(other) => Err(SettingsError::wrong_type(key, "a map", other)),
        }
    }
}

impl<K: Into<String>> FromIterator<(K, SettingValue)> for RawSettings {
    fn from_iter<I: IntoIterator<Item = (K, SettingValue)>>(iter: I) -> Self {
        let mut settings = RawSettings::new();
        for (k, v) in iter {
            settings.set(k, v);
        }
        settings
    }
}
