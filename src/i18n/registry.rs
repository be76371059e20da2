//! Package discovery: which installed packages ship translation data.
//!
//! The host runtime owns the real package registry, so discovery is a seam:
//! [`ScanRegistry`] walks configured directories in-process, while
//! [`CommandRegistry`] shells out to an external enumeration command. Both
//! report failures through the `message` channel instead of erroring, since
//! a broken registry must not take the translations endpoint down with it.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::process::Command;

use ignore::WalkBuilder;
use serde::Deserialize;

use super::locales::is_valid_locale;

/// Subcommand asking the discovery command for core language pack locales.
pub const LANGUAGE_PACKS_SUBCOMMAND: &str = "language-pack-locales";
/// Subcommand asking the discovery command for per-package locale roots.
pub const PACKAGE_LOCALES_SUBCOMMAND: &str = "package-locales";

/// Directory name under which a package advertises its translations.
const PACKAGE_LOCALES_DIR: &str = "locales";

/// Result of one discovery pass: entries plus a human-readable status.
#[derive(Debug, Clone, Default)]
pub struct DiscoveredEntries {
    /// Discovered name (locale or package) to directory mapping.
    pub entries: BTreeMap<String, PathBuf>,
    /// Status text; empty on success, the failure text otherwise.
    pub message: String,
}

impl DiscoveredEntries {
    fn failed(message: impl Into<String>) -> Self {
        Self { entries: BTreeMap::new(), message: message.into() }
    }
}

/// Discovery seam over the host package registry.
pub trait PackRegistry: Send + Sync {
    /// Locales for which a core language pack is installed, mapped to the
    /// directory holding that pack's payload files.
    fn language_pack_locales(&self) -> DiscoveredEntries;

    /// Packages shipping their own translations, mapped to their locales
    /// directory.
    fn package_locale_roots(&self) -> DiscoveredEntries;
}

/// In-process discovery walking the configured roots.
///
/// A core language pack is a direct subdirectory of a pack root named by its
/// locale (`<root>/es_CO/`). A package advertises translations by shipping a
/// `locales/` directory (`<root>/<package>/locales/`).
#[derive(Debug, Clone, Default)]
pub struct ScanRegistry {
    language_pack_roots: Vec<PathBuf>,
    package_roots: Vec<PathBuf>,
}

impl ScanRegistry {
    #[must_use]
    pub fn new(language_pack_roots: Vec<PathBuf>, package_roots: Vec<PathBuf>) -> Self {
        Self { language_pack_roots, package_roots }
    }
}

impl PackRegistry for ScanRegistry {
    fn language_pack_locales(&self) -> DiscoveredEntries {
        let mut entries = BTreeMap::new();
        for root in &self.language_pack_roots {
            for result in WalkBuilder::new(root).max_depth(Some(1)).hidden(false).build() {
                let entry = match result {
                    Ok(entry) => entry,
                    Err(err) => {
                        tracing::warn!(root = %root.display(), %err, "Failed to scan pack root");
                        continue;
                    }
                };
                // Only `<root>/<locale>` directories count.
                if entry.depth() != 1 || !entry.file_type().is_some_and(|ft| ft.is_dir()) {
                    continue;
                }
                let Some(name) = entry.file_name().to_str() else {
                    continue;
                };
                if is_valid_locale(name) {
                    entries.insert(name.to_string(), entry.path().to_path_buf());
                }
            }
        }
        DiscoveredEntries { entries, message: String::new() }
    }

    fn package_locale_roots(&self) -> DiscoveredEntries {
        let mut entries = BTreeMap::new();
        for root in &self.package_roots {
            for result in WalkBuilder::new(root).max_depth(Some(2)).hidden(false).build() {
                let entry = match result {
                    Ok(entry) => entry,
                    Err(err) => {
                        tracing::warn!(root = %root.display(), %err, "Failed to scan package root");
                        continue;
                    }
                };
                // Only `<root>/<package>/locales` directories count.
                if entry.depth() != 2 || !entry.file_type().is_some_and(|ft| ft.is_dir()) {
                    continue;
                }
                if entry.file_name().to_str() != Some(PACKAGE_LOCALES_DIR) {
                    continue;
                }
                let package = entry
                    .path()
                    .parent()
                    .and_then(|package_dir| package_dir.file_name())
                    .and_then(|name| name.to_str());
                let Some(package) = package else {
                    continue;
                };
                entries.insert(package.to_string(), entry.path().to_path_buf());
            }
        }
        DiscoveredEntries { entries, message: String::new() }
    }
}

/// JSON payload printed by a discovery command.
#[derive(Debug, Deserialize, Default)]
struct DiscoveryPayload {
    #[serde(default)]
    data: BTreeMap<String, PathBuf>,
    #[serde(default)]
    message: String,
}

/// Out-of-process discovery.
///
/// The command is invoked once per request with a single subcommand argument
/// and must print `{"data": {...}, "message": "..."}` on stdout. Spawn
/// failures, non-zero exits and malformed payloads all surface through the
/// returned `message`.
#[derive(Debug, Clone)]
pub struct CommandRegistry {
    command: Vec<String>,
}

impl CommandRegistry {
    #[must_use]
    pub fn new(command: Vec<String>) -> Self {
        Self { command }
    }

    fn run_discovery(&self, subcommand: &str) -> DiscoveredEntries {
        let Some((program, args)) = self.command.split_first() else {
            return DiscoveredEntries::failed("Discovery command is empty");
        };

        let output = match Command::new(program).args(args).arg(subcommand).output() {
            Ok(output) => output,
            Err(err) => {
                return DiscoveredEntries::failed(format!(
                    "Failed to run discovery command '{program}': {err}"
                ));
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stderr = stderr.trim();
            let message = if stderr.is_empty() {
                format!("Discovery command '{program}' failed: {}", output.status)
            } else {
                stderr.to_string()
            };
            return DiscoveredEntries::failed(message);
        }

        match serde_json::from_slice::<DiscoveryPayload>(&output.stdout) {
            Ok(payload) => {
                DiscoveredEntries { entries: payload.data, message: payload.message }
            }
            Err(err) => DiscoveredEntries::failed(format!(
                "Failed to parse discovery output for '{subcommand}': {err}"
            )),
        }
    }
}

impl PackRegistry for CommandRegistry {
    fn language_pack_locales(&self) -> DiscoveredEntries {
        self.run_discovery(LANGUAGE_PACKS_SUBCOMMAND)
    }

    fn package_locale_roots(&self) -> DiscoveredEntries {
        self.run_discovery(PACKAGE_LOCALES_SUBCOMMAND)
    }
}
