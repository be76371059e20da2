use std::net::SocketAddr;
use std::path::PathBuf;

use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration error in '{field_path}': {message}")]
pub struct ValidationError {
    /// JSON path to the field (e.g., "languagePackRoots[0]")
    pub field_path: String,
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    ValidationErrors(Vec<ValidationError>),

    #[error("Failed to load configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),
}

fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {} - {}", i + 1, err.field_path, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Server settings, read from `.lab-server.json` in the working directory.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LabSettings {
    /// Address the server binds to.
    pub listen: String,

    /// Directory holding the installed theme assets.
    pub themes_dir: PathBuf,
    /// Public mount prefix of the theme handler.
    pub themes_url: String,

    /// Public mount prefix of the translations API.
    pub translations_url: String,

    /// Directories scanned for core language packs (one subdirectory per
    /// locale).
    pub language_pack_roots: Vec<PathBuf>,
    /// Directories scanned for packages that ship their own translations
    /// under `<package>/locales/`.
    pub package_roots: Vec<PathBuf>,

    /// External discovery command replacing the directory scan.
    ///
    /// Invoked with a single subcommand argument; must print
    /// `{"data": {...}, "message": "..."}` on stdout.
    pub discovery_command: Option<Vec<String>>,

    /// Glob selecting the payload files inside a pack directory.
    pub pack_file_pattern: String,

    /// When set, logs additionally go to a daily-rolling file in this
    /// directory.
    pub log_dir: Option<PathBuf>,
}

impl LabSettings {
    /// # Errors
    /// - Unparsable listen address
    /// - Mount prefix not starting with `/`
    /// - Invalid or empty payload glob pattern
    /// - Empty discovery command
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.listen.parse::<SocketAddr>().is_err() {
            errors.push(ValidationError::new(
                "listen",
                format!(
                    "'{}' is not a valid socket address. Example: \"127.0.0.1:8888\"",
                    self.listen
                ),
            ));
        }

        for (field, url) in
            [("themesUrl", &self.themes_url), ("translationsUrl", &self.translations_url)]
        {
            if !url.starts_with('/') || url.len() < 2 {
                errors.push(ValidationError::new(
                    field,
                    format!("'{url}' must be an absolute URL path. Example: \"/lab/api/themes\""),
                ));
            }
        }

        if self.pack_file_pattern.is_empty() {
            errors.push(ValidationError::new(
                "packFilePattern",
                "The pattern cannot be empty. Example: \"*.json\"",
            ));
        } else if let Err(e) = globset::Glob::new(&self.pack_file_pattern) {
            errors.push(ValidationError::new(
                "packFilePattern",
                format!("Invalid glob pattern '{}': {e}", self.pack_file_pattern),
            ));
        }

        if let Some(command) = &self.discovery_command
            && command.is_empty()
        {
            errors.push(ValidationError::new(
                "discoveryCommand",
                "The command cannot be empty. Provide the program and its arguments, or remove this field",
            ));
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

impl Default for LabSettings {
    fn default() -> Self {
        Self {
            listen: "127.0.0.1:8888".to_string(),
            themes_dir: PathBuf::from("themes"),
            themes_url: "/lab/api/themes".to_string(),
            translations_url: "/lab/api/translations".to_string(),
            language_pack_roots: vec![PathBuf::from("language-packs")],
            package_roots: vec![PathBuf::from("packages")],
            discovery_command: None,
            pack_file_pattern: "*.json".to_string(),
            log_dir: None,
        }
    }
}
