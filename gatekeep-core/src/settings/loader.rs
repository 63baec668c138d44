use std::path::Path;

use tracing::debug;

use super::value::SettingValue;
use super::{RawSettings, SettingsError};

/// Load and parse a YAML settings file.
pub(crate) fn load_yaml_file(path: &Path) -> Result<RawSettings, SettingsError> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| SettingsError::Load(format!("{}: {e}", path.display())))?;
    let settings = load_yaml_str(&content)?;
    debug!(path = %path.display(), keys = settings.len(), "Loaded settings file");
    Ok(settings)
}

/// Parse a YAML document into settings. An empty document yields empty settings.
pub(crate) fn load_yaml_str(content: &str) -> Result<RawSettings, SettingsError> {
    let yaml: serde_yaml::Value =
        serde_yaml::from_str(content).map_err(|e| SettingsError::Load(e.to_string()))?;
    match SettingValue::from_yaml(&yaml) {
        SettingValue::Map(settings) => Ok(settings),
        SettingValue::Null => Ok(RawSettings::new()),
        other => Err(SettingsError::Load(format!(
            "settings root must be a map, found {}",
            other.type_name()
        ))),
    }
}
