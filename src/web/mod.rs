//! REST surface over the translation catalog and the theme assets.

use std::sync::Arc;

use axum::{
    Json,
    Router,
};
use axum::extract::{
    Path,
    State,
};
use axum::routing::get;
use serde::Serialize;
use serde_json::Value;

use crate::config::LabSettings;
use crate::i18n::{
    CommandRegistry,
    DEFAULT_LOCALE,
    PackRegistry,
    ScanRegistry,
    TranslationCatalog,
};
use crate::themes::ThemesService;

/// JSON envelope of every translations response.
#[derive(Debug, Serialize)]
pub struct ApiResponse {
    pub data: Value,
    pub message: String,
}

/// Shared state of the translations routes.
#[derive(Debug, Clone)]
pub struct AppState {
    pub catalog: Arc<TranslationCatalog>,
}

/// `GET {translationsUrl}` - every locale the core application ships a pack
/// for, `en` included.
pub async fn list_language_packs(State(state): State<AppState>) -> Json<ApiResponse> {
    let (data, message) = state.catalog.language_packs(DEFAULT_LOCALE);

    Json(ApiResponse { data: serde_json::to_value(data).unwrap_or_default(), message })
}

/// `GET {translationsUrl}/{locale}` - the merged language pack for one
/// locale. The empty locale and the `default` sentinel fall back to the
/// listing.
pub async fn get_language_pack(
    State(state): State<AppState>,
    Path(locale): Path<String>,
) -> Json<ApiResponse> {
    let locale = locale.trim();
    if locale.is_empty() || locale == "default" {
        return list_language_packs(State(state)).await;
    }

    let (data, message) = state.catalog.language_pack(locale).await;

    Json(ApiResponse { data: serde_json::to_value(data).unwrap_or_default(), message })
}

/// Build the discovery registry the settings call for.
#[must_use]
pub fn build_registry(settings: &LabSettings) -> Arc<dyn PackRegistry> {
    match &settings.discovery_command {
        Some(command) => Arc::new(CommandRegistry::new(command.clone())),
        None => Arc::new(ScanRegistry::new(
            settings.language_pack_roots.clone(),
            settings.package_roots.clone(),
        )),
    }
}

/// Assemble the application router, nesting both surfaces under their
/// configured mount prefixes.
#[must_use]
pub fn build_router(settings: &LabSettings, catalog: Arc<TranslationCatalog>) -> Router {
    let translations = Router::new()
        .route("/", get(list_language_packs))
        .route("/{locale}", get(get_language_pack))
        .with_state(AppState { catalog });

    let themes =
        ThemesService::new(settings.themes_dir.clone(), settings.themes_url.clone()).router();

    Router::new()
        .nest(&settings.translations_url, translations)
        .nest(&settings.themes_url, themes)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use googletest::prelude::*;

    use super::*;

    fn state() -> AppState {
        let registry = ScanRegistry::new(vec![], vec![]);
        let catalog = TranslationCatalog::new(Arc::new(registry), "*.json").unwrap();
        AppState { catalog: Arc::new(catalog) }
    }

    #[tokio::test]
    async fn listing_contains_english() {
        let Json(response) = list_language_packs(State(state())).await;

        assert_that!(response.message, eq(""));
        expect_that!(&response.data["en"]["displayName"], eq(&serde_json::json!("English")));
    }

    #[tokio::test]
    async fn default_sentinel_falls_back_to_listing() {
        let Json(response) =
            get_language_pack(State(state()), Path("default".to_string())).await;

        expect_that!(&response.data["en"]["nativeName"], eq(&serde_json::json!("English")));
    }

    #[tokio::test]
    async fn invalid_locale_reports_not_valid() {
        let Json(response) =
            get_language_pack(State(state()), Path("foo_BAR".to_string())).await;

        expect_that!(&response.data, eq(&serde_json::json!({})));
        expect_that!(response.message, contains_substring("not valid"));
    }
}
