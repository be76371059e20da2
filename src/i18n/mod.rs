//! Translation subsystem: locale validation, pack discovery and merging.

pub mod catalog;
pub mod locales;
pub mod pack;
pub mod registry;

pub use catalog::{
    LanguagePackData,
    LanguagePackInfo,
    TranslationCatalog,
};
pub use locales::{
    DEFAULT_LOCALE,
    display_name,
    is_valid_locale,
    normalize_locale_code,
};
pub use pack::{
    PackMetadata,
    TranslationTable,
    merge_locale_data,
};
pub use registry::{
    CommandRegistry,
    DiscoveredEntries,
    PackRegistry,
    ScanRegistry,
};
