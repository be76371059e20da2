//! Settings file loading.

use std::path::Path;

use super::{
    ConfigError,
    LabSettings,
};

/// Name of the settings file looked up in the working directory.
const SETTINGS_FILE: &str = ".lab-server.json";

/// Load settings from a directory.
///
/// # Returns
/// - `Ok(Some(settings))`: the settings file was found and parsed
/// - `Ok(None)`: no settings file in this directory
/// - `Err(ConfigError)`: read or parse failure
///
/// # Errors
/// - File read error
/// - JSON parse error
pub(super) fn load_from_dir(dir: &Path) -> Result<Option<LabSettings>, ConfigError> {
    let config_path = dir.join(SETTINGS_FILE);

    if !config_path.exists() {
        tracing::debug!("Configuration file not found: {:?}", config_path);
        return Ok(None);
    }

    tracing::debug!("Loading configuration from: {:?}", config_path);

    let content = std::fs::read_to_string(&config_path)?;
    let settings: LabSettings = serde_json::from_str(&content)?;

    Ok(Some(settings))
}
