//! Entry point for the lab server.

use std::sync::Arc;

use lab_server::config::{
    ConfigManager,
    LabSettings,
};
use lab_server::i18n::TranslationCatalog;
use lab_server::web;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let mut config_manager = ConfigManager::new();
    let load_result = config_manager.load_settings(std::env::current_dir().ok());
    let settings = config_manager.get_settings().clone();

    let _log_guard = init_tracing(&settings);

    if let Err(error) = load_result {
        // The manager keeps the default settings in place on load failure.
        tracing::error!("Configuration error: {error}");
    }

    let registry = web::build_registry(&settings);
    let catalog = match TranslationCatalog::new(registry, &settings.pack_file_pattern) {
        Ok(catalog) => catalog,
        Err(error) => {
            tracing::error!("Invalid pack file pattern: {error}");
            return;
        }
    };

    let app = web::build_router(&settings, Arc::new(catalog));

    let listener = match tokio::net::TcpListener::bind(&settings.listen).await {
        Ok(listener) => listener,
        Err(error) => {
            tracing::error!("Failed to bind {}: {error}", settings.listen);
            return;
        }
    };
    tracing::info!("Listening on {}", settings.listen);

    if let Err(error) = axum::serve(listener, app).await {
        tracing::error!("Server error: {error}");
    }
}

/// Initialize logging. The returned guard keeps the file writer alive for
/// the lifetime of the process.
fn init_tracing(settings: &LabSettings) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    match &settings.log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "lab-server.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(writer)
                .with_ansi(false)
                .init();
            Some(guard)
        }
        None => {
            tracing_subscriber::fmt().with_env_filter(filter).init();
            None
        }
    }
}
