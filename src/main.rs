//! # Chat Backend
//!
//! Application entry point that initializes:
//! - Tracing/logging subsystem
//! - Configuration loading
//! - Database connection pool and migrations
//! - HTTP server

use anyhow::Result;
use tracing::info;

use chat_backend::config::Settings;
use chat_backend::presentation::http::handlers::health;
use chat_backend::startup::Application;

#[tokio::main]
async fn main() -> Result<()> {
    // LOG_FORMAT and RUST_LOG may come from .env
    let _ = dotenvy::dotenv();

    // Initialize tracing subscriber for structured logging
    chat_backend::telemetry::init_tracing();

    info!("Starting Chat Backend...");
    health::init_server_start();

    // Load configuration from environment and config files
    let settings = Settings::load()?;
    info!(
        host = %settings.server.host,
        port = %settings.server.port,
        environment = %settings.environment,
        edit_policy = ?settings.messages.edit_policy,
        "Configuration loaded"
    );

    // Build and run the application
    let application = Application::build(settings).await?;

    info!("Server ready to accept connections");
    application.run_until_stopped().await?;

    Ok(())
}
