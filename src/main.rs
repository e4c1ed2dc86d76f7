//! Flashdeck Server
//!
//! Main entry point: loads configuration, connects to PostgreSQL, applies
//! migrations and serves the HTTP API.

use tracing_subscriber::{EnvFilter, fmt};

use flashdeck_core::config::AppConfig;
use flashdeck_core::error::AppError;
use flashdeck_database::{DatabasePool, Stores};

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!(error = %e, "Server error");
        std::process::exit(1);
    }
}

/// Load configuration from file and environment.
///
/// `FLASHDECK_CONFIG` names an explicit file; otherwise `config/default.toml`
/// is merged with the `FLASHDECK_ENV` overlay.
fn load_configuration() -> Result<AppConfig, AppError> {
    match std::env::var("FLASHDECK_CONFIG") {
        Ok(path) => AppConfig::from_file(&path),
        Err(_) => {
            let env = std::env::var("FLASHDECK_ENV").unwrap_or_else(|_| "development".to_string());
            AppConfig::load(&env)
        }
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting Flashdeck v{}", env!("CARGO_PKG_VERSION"));

    tracing::info!("Connecting to database...");
    let db = DatabasePool::connect(&config.database).await?;

    tracing::info!("Running database migrations...");
    flashdeck_database::migration::run_migrations(db.pool()).await?;

    let stores = Stores::postgres(db.pool().clone());
    flashdeck_api::run_server(config, stores, Some(db)).await
}
