//! Settings management.

use std::path::PathBuf;

use super::{
    ConfigError,
    LabSettings,
    loader,
};

/// Holds the validated server settings.
#[derive(Default, Debug, Clone)]
pub struct ConfigManager {
    /// Current settings
    current_settings: LabSettings,

    /// Directory the settings were loaded from
    config_dir: Option<PathBuf>,
}

impl ConfigManager {
    #[must_use]
    pub fn new() -> Self {
        Self { current_settings: LabSettings::default(), config_dir: None }
    }

    /// Load settings from `config_dir`, falling back to defaults when no
    /// settings file exists there.
    ///
    /// On any error the previously held settings stay in place.
    ///
    /// # Errors
    /// - File read error
    /// - JSON parse error
    /// - Validation error
    pub fn load_settings(&mut self, config_dir: Option<PathBuf>) -> Result<(), ConfigError> {
        tracing::debug!("Loading settings from: {:?}", config_dir);

        let settings = if let Some(dir) = &config_dir {
            loader::load_from_dir(dir)?.map_or_else(LabSettings::default, |loaded| {
                tracing::debug!("Loaded settings: {:?}", loaded);
                loaded
            })
        } else {
            LabSettings::default()
        };

        settings.validate().map_err(ConfigError::ValidationErrors)?;

        self.current_settings = settings;
        self.config_dir = config_dir;
        tracing::debug!("Settings loaded successfully: {:?}", self.current_settings);

        Ok(())
    }

    /// Replace the current settings after validating them.
    ///
    /// # Errors
    /// - Validation error
    pub fn update_settings(&mut self, new_settings: LabSettings) -> Result<(), ConfigError> {
        tracing::debug!("Updating settings...");

        new_settings.validate().map_err(ConfigError::ValidationErrors)?;

        self.current_settings = new_settings;
        tracing::debug!("Settings updated successfully");

        Ok(())
    }

    /// Current settings
    #[must_use]
    pub const fn get_settings(&self) -> &LabSettings {
        &self.current_settings
    }

    /// Directory the settings were loaded from
    #[must_use]
    pub const fn config_dir(&self) -> Option<&PathBuf> {
        self.config_dir.as_ref()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::fs;

    use rstest::rstest;
    use tempfile::TempDir;

    use super::*;

    #[rstest]
    fn test_new_creates_default_settings() {
        let manager = ConfigManager::new();

        assert_eq!(manager.get_settings().listen, "127.0.0.1:8888");
        assert!(manager.config_dir().is_none());
    }

    #[rstest]
    fn test_load_settings_without_config_dir() {
        let mut manager = ConfigManager::new();

        let result = manager.load_settings(None);

        assert!(result.is_ok());
        assert_eq!(manager.get_settings().themes_url, "/lab/api/themes");
        assert!(manager.config_dir().is_none());
    }

    #[rstest]
    fn test_load_settings_with_config_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_content = r#"{"themesUrl": "/custom/themes"}"#;
        fs::write(temp_dir.path().join(".lab-server.json"), config_content).unwrap();

        let mut manager = ConfigManager::new();
        let result = manager.load_settings(Some(temp_dir.path().to_path_buf()));

        assert!(result.is_ok());
        assert_eq!(manager.get_settings().themes_url, "/custom/themes");
        assert!(manager.config_dir().is_some());
    }

    #[rstest]
    fn test_load_settings_without_config_file() {
        let temp_dir = TempDir::new().unwrap();

        let mut manager = ConfigManager::new();
        let result = manager.load_settings(Some(temp_dir.path().to_path_buf()));

        assert!(result.is_ok());
        assert_eq!(manager.get_settings().themes_url, "/lab/api/themes");
    }

    #[rstest]
    fn test_load_settings_invalid_keeps_previous() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join(".lab-server.json"), r#"{"themesUrl": "no-slash"}"#)
            .unwrap();

        let mut manager = ConfigManager::new();
        let result = manager.load_settings(Some(temp_dir.path().to_path_buf()));

        assert!(result.is_err());
        assert_eq!(manager.get_settings().themes_url, "/lab/api/themes");
    }

    #[rstest]
    fn test_update_settings_valid() {
        let mut manager = ConfigManager::new();
        let new_settings =
            LabSettings { themes_url: "/other/themes".to_string(), ..LabSettings::default() };

        let result = manager.update_settings(new_settings);

        assert!(result.is_ok());
        assert_eq!(manager.get_settings().themes_url, "/other/themes");
    }

    #[rstest]
    fn test_update_settings_invalid() {
        let mut manager = ConfigManager::new();
        let new_settings = LabSettings { listen: String::new(), ..LabSettings::default() };

        let result = manager.update_settings(new_settings);

        assert!(result.is_err());
    }
}
