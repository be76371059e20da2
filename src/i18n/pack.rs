//! Translation tables and the version-aware merge between them.
//!
//! A table is the parsed content of one `<domain>.json` payload: message keys
//! mapped to localized strings, plus a distinguished empty-key entry carrying
//! the pack metadata (domain, version, language).

use std::cmp::Ordering;

use serde::{
    Deserialize,
    Serialize,
};
use serde_json::Value;

/// One localized string table, keyed by message key.
pub type TranslationTable = serde_json::Map<String, Value>;

/// Key of the distinguished metadata entry inside a table.
pub const METADATA_KEY: &str = "";

/// Metadata carried by the empty-key entry of a translation table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct PackMetadata {
    pub domain: Option<String>,
    pub version: Option<String>,
    pub language: Option<String>,
}

/// Metadata of a table, if its empty-key entry is present and well formed.
#[must_use]
pub fn metadata(table: &TranslationTable) -> Option<PackMetadata> {
    let value = table.get(METADATA_KEY)?;
    serde_json::from_value(value.clone()).ok()
}

/// Compare two dotted version strings (`1.1.0` is newer than `1.0.0`).
///
/// Each segment is compared by its numeric prefix first, then lexically by
/// whatever suffix remains; missing segments count as zero.
#[must_use]
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    fn segment(raw: Option<&str>) -> (u64, String) {
        let raw = raw.unwrap_or("");
        let digits: String = raw.chars().take_while(char::is_ascii_digit).collect();
        let number = digits.parse().unwrap_or(0);
        (number, raw[digits.len()..].to_string())
    }

    let mut left = a.split('.');
    let mut right = b.split('.');
    loop {
        let (l, r) = (left.next(), right.next());
        if l.is_none() && r.is_none() {
            return Ordering::Equal;
        }
        let ordering = segment(l).cmp(&segment(r));
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
}

/// Merge `incoming` into `existing`, honoring domain and version metadata.
///
/// `incoming` only takes effect when both tables declare a domain and a
/// version, the domains match, and `incoming` is strictly newer; in that case
/// its entries overlay `existing`. In every other case (missing metadata,
/// differing domains, older or equal version) `existing` is returned
/// unchanged, so tables for different domains never interfere.
#[must_use]
pub fn merge_locale_data(
    existing: &TranslationTable,
    incoming: &TranslationTable,
) -> TranslationTable {
    let Some(incoming_meta) = metadata(incoming) else {
        return existing.clone();
    };
    let Some(existing_meta) = metadata(existing) else {
        return existing.clone();
    };

    let (Some(incoming_domain), Some(incoming_version)) =
        (incoming_meta.domain, incoming_meta.version)
    else {
        return existing.clone();
    };
    let (Some(existing_domain), Some(existing_version)) =
        (existing_meta.domain, existing_meta.version)
    else {
        return existing.clone();
    };

    if incoming_domain != existing_domain {
        return existing.clone();
    }

    if compare_versions(&incoming_version, &existing_version) == Ordering::Greater {
        let mut merged = existing.clone();
        for (key, value) in incoming {
            merged.insert(key.clone(), value.clone());
        }
        return merged;
    }

    existing.clone()
}
