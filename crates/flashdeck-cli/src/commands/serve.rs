//! Start the Flashdeck server.

use clap::Args;

use flashdeck_core::error::AppError;
use flashdeck_database::{MemoryStore, Stores};

/// Arguments for the serve command
#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Override the server port
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Override the server host
    #[arg(long)]
    pub host: Option<String>,

    /// Serve from an in-process store instead of PostgreSQL (data is lost on exit)
    #[arg(long)]
    pub in_memory: bool,

    /// Do not apply pending migrations on startup
    #[arg(long, conflicts_with = "in_memory")]
    pub skip_migrations: bool,
}

/// Execute the serve command
pub async fn execute(args: &ServeArgs, config_path: &str) -> Result<(), AppError> {
    let mut config = super::load_config(config_path)?;

    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(ref host) = args.host {
        config.server.host = host.clone();
    }

    println!("Starting Flashdeck server...");
    crate::output::print_kv("Host", &config.server.host);
    crate::output::print_kv("Port", &config.server.port.to_string());

    if args.in_memory {
        crate::output::print_kv("Store", "in-memory");
        let stores = Stores::memory(MemoryStore::new());
        return flashdeck_api::run_server(config, stores, None).await;
    }

    let db = super::connect(&config).await?;

    if !args.skip_migrations {
        println!("Running database migrations...");
        flashdeck_database::migration::run_migrations(db.pool()).await?;
        crate::output::print_success("Migrations applied.");
    }

    let stores = Stores::postgres(db.pool().clone());
    flashdeck_api::run_server(config, stores, Some(db)).await
}
