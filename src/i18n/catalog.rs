//! Language pack resolution: discovery, loading and merging per locale.

use std::collections::BTreeMap;
use std::path::{
    Path,
    PathBuf,
};
use std::sync::Arc;

use globset::{
    Glob,
    GlobMatcher,
};
use serde::Serialize;

use super::locales::{
    DEFAULT_LOCALE,
    display_name,
    is_valid_locale,
    normalize_locale_code,
};
use super::pack::{
    TranslationTable,
    merge_locale_data,
};
use super::registry::PackRegistry;

/// Listing entry describing one installed language pack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguagePackInfo {
    pub display_name: String,
    pub native_name: String,
}

/// Combined translation tables for one locale, keyed by package domain.
pub type LanguagePackData = BTreeMap<String, TranslationTable>;

/// Resolves locales against the discovered packs and merges their tables.
///
/// All failure paths are reported through the returned message string; the
/// data half is simply empty when nothing could be resolved.
#[derive(Clone)]
pub struct TranslationCatalog {
    registry: Arc<dyn PackRegistry>,
    payload_matcher: GlobMatcher,
}

impl std::fmt::Debug for TranslationCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TranslationCatalog")
            .field("payload_matcher", &self.payload_matcher.glob().glob())
            .finish_non_exhaustive()
    }
}

impl TranslationCatalog {
    /// # Errors
    /// Returns an error if `pack_file_pattern` is not a valid glob.
    pub fn new(
        registry: Arc<dyn PackRegistry>,
        pack_file_pattern: &str,
    ) -> Result<Self, globset::Error> {
        let payload_matcher = Glob::new(pack_file_pattern)?.compile_matcher();
        Ok(Self { registry, payload_matcher })
    }

    /// All locales for which a core language pack ships, `en` included.
    ///
    /// Display names are rendered in `display_locale`; the native name is the
    /// pack's own language.
    pub fn language_packs(
        &self,
        display_locale: &str,
    ) -> (BTreeMap<String, LanguagePackInfo>, String) {
        let discovered = self.registry.language_pack_locales();

        let mut data = BTreeMap::new();
        for locale in discovered.entries.keys() {
            data.insert(
                locale.clone(),
                LanguagePackInfo {
                    display_name: display_name(locale, display_locale),
                    native_name: display_name(locale, locale),
                },
            );
        }
        // English is the source language and is always available.
        data.entry(DEFAULT_LOCALE.to_string()).or_insert_with(|| LanguagePackInfo {
            display_name: display_name(DEFAULT_LOCALE, display_locale),
            native_name: display_name(DEFAULT_LOCALE, DEFAULT_LOCALE),
        });

        (data, discovered.message)
    }

    /// The merged language pack for `locale`.
    ///
    /// Invalid locales yield a "not valid" message, valid but undiscovered
    /// ones a "not installed" message; both with empty data. Discovery
    /// failures from either source are joined into the returned message.
    pub async fn language_pack(&self, locale: &str) -> (LanguagePackData, String) {
        let mut data = LanguagePackData::new();

        if !is_valid_locale(locale) {
            return (data, format!("Language pack '{locale}' not valid!"));
        }

        let packs = self.registry.language_pack_locales();
        let normalized = normalize_locale_code(locale);
        let pack_dir = packs
            .entries
            .iter()
            .find(|(name, _)| normalize_locale_code(name) == normalized)
            .map(|(_, dir)| dir.clone());

        let Some(pack_dir) = pack_dir else {
            let message = if packs.message.is_empty() {
                format!("Language pack '{locale}' not installed!")
            } else {
                packs.message
            };
            return (data, message);
        };

        for (domain, table) in self.load_tables(&pack_dir).await {
            data.insert(domain, table);
        }

        let packages = self.registry.package_locale_roots();
        for locales_root in packages.entries.values() {
            let Some(locale_dir) = find_locale_dir(locales_root, &normalized).await else {
                continue;
            };
            for (domain, table) in self.load_tables(&locale_dir).await {
                match data.get(&domain) {
                    Some(existing) => {
                        data.insert(domain, merge_locale_data(existing, &table));
                    }
                    None => {
                        data.insert(domain, table);
                    }
                }
            }
        }

        let message = [packs.message, packages.message]
            .into_iter()
            .filter(|message| !message.is_empty())
            .collect::<Vec<_>>()
            .join("\n");

        (data, message)
    }

    /// Load every payload file of a pack directory, keyed by domain
    /// (the file stem). Unreadable or malformed files are skipped.
    async fn load_tables(&self, dir: &Path) -> Vec<(String, TranslationTable)> {
        let files = self.payload_files(dir).await;
        let loads = files.iter().map(|path| load_table(path));

        futures::future::join_all(loads).await.into_iter().flatten().collect()
    }

    async fn payload_files(&self, dir: &Path) -> Vec<PathBuf> {
        let mut read_dir = match tokio::fs::read_dir(dir).await {
            Ok(read_dir) => read_dir,
            Err(err) => {
                tracing::warn!(dir = %dir.display(), %err, "Failed to read pack directory");
                return Vec::new();
            }
        };

        let mut files = Vec::new();
        while let Ok(Some(entry)) = read_dir.next_entry().await {
            if !entry.file_type().await.is_ok_and(|ft| ft.is_file()) {
                continue;
            }
            if self.payload_matcher.is_match(Path::new(&entry.file_name())) {
                files.push(entry.path());
            }
        }
        files.sort();
        files
    }
}

/// Find the subdirectory of `locales_root` matching a normalized locale.
async fn find_locale_dir(locales_root: &Path, normalized: &str) -> Option<PathBuf> {
    let mut read_dir = tokio::fs::read_dir(locales_root).await.ok()?;
    while let Ok(Some(entry)) = read_dir.next_entry().await {
        if !entry.file_type().await.is_ok_and(|ft| ft.is_dir()) {
            continue;
        }
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };
        if normalize_locale_code(name) == normalized {
            return Some(entry.path());
        }
    }
    None
}

async fn load_table(path: &Path) -> Option<(String, TranslationTable)> {
    let domain = path.file_stem()?.to_str()?.to_string();

    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(err) => {
            tracing::warn!(path = %path.display(), %err, "Failed to read translation file");
            return None;
        }
    };

    match serde_json::from_str::<serde_json::Value>(&content) {
        Ok(serde_json::Value::Object(table)) => Some((domain, table)),
        Ok(_) => {
            tracing::warn!(path = %path.display(), "Translation file is not a JSON object");
            None
        }
        Err(err) => {
            tracing::warn!(path = %path.display(), %err, "Failed to parse translation file");
            None
        }
    }
}
