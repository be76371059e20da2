//! lab-server
//!
//! Theme asset and translation endpoints for an extensible notebook
//! application.

pub mod config;
pub mod i18n;
pub mod themes;
pub mod web;

pub use i18n::TranslationCatalog;
pub use themes::ThemesService;
