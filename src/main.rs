//! Luciole server entry point.
//!
//! Loads configuration, initializes logging, connects to Postgres, runs
//! migrations, and starts the HTTP server.

use tracing_subscriber::{EnvFilter, fmt};

use luciole_core::config::AppConfig;
use luciole_core::error::AppError;
use luciole_database::connect_pool;

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
        tracing::error!("Server error: {e}");
        std::process::exit(1);
    }
}

/// Load configuration from files and environment.
fn load_configuration() -> Result<AppConfig, AppError> {
    let env = std::env::var("LUCIOLE_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load(&env)
}

/// Initialize tracing/logging.
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
    tracing::info!("Starting Luciole v{}", env!("CARGO_PKG_VERSION"));

    tracing::info!("Connecting to database...");
    let pool = connect_pool(&config.database).await?;

    tracing::info!("Running database migrations...");
    luciole_database::migration::run_migrations(&pool).await?;
    tracing::info!("Database migrations complete");

    luciole_api::run_server(config, pool).await?;

    tracing::info!("Luciole server shut down gracefully");
    Ok(())
}
