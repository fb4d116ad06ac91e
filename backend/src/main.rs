//! # Vendor Account Backend Service
//!
//! Entry point for the produce marketplace's vendor account service. It
//! provides:
//!
//! - Vendor registration and login with salted password hashes
//! - Signed, time-limited session tokens
//! - Profile read/update/delete for the logged-in vendor
//! - A public vendor listing for buyers
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                        BACKEND SERVICE                           │
//! │                                                                  │
//! │  ┌──────────────────────────────────────────────────────────┐   │
//! │  │                   REST API (Actix)                        │   │
//! │  │   /auth/register   /auth/login   /vendors   /vendors/me   │   │
//! │  └──────────────────────────────────────────────────────────┘   │
//! │                          │                                       │
//! │  ┌───────────────────────┴───────────────────────────────────┐  │
//! │  │                    SERVICE LAYER                           │  │
//! │  │  ┌──────────────┐ ┌──────────────┐ ┌──────────────────┐   │  │
//! │  │  │VendorManager │ │PasswordHasher│ │TokenIssuer       │   │  │
//! │  │  └──────────────┘ └──────────────┘ └──────────────────┘   │  │
//! │  └───────────────────────────────────────────────────────────┘  │
//! │                          │                                       │
//! │                   ┌──────┴──────┐                                │
//! │                   │  PostgreSQL │                                │
//! │                   │  (vendors)  │                                │
//! │                   └─────────────┘                                │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! 1. Set up PostgreSQL and create the database
//! 2. Copy `.env.example` to `.env` and configure
//! 3. Start the server: `cargo run` (the schema is applied on startup)
//!
//! ## Environment Variables
//!
//! See `.env.example` and the `config` module.

use std::sync::Arc;

use actix_web::{web, App, HttpServer, middleware};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

mod api;
mod config;
mod db;
mod models;
mod services;
mod utils;

use config::AppConfig;
use db::{Database, PgVendorStore};
use services::VendorManager;

/// Application state shared across all handlers.
pub struct AppState {
    /// Vendor account service
    pub vendor_manager: VendorManager,

    /// Application configuration
    pub config: AppConfig,
}

fn startup_error(step: &str, e: impl std::fmt::Display) -> std::io::Error {
    error!("{} failed: {}", step, e);
    std::io::Error::other(format!("{}: {}", step, e))
}

/// Main entry point for the backend service.
///
/// 1. Initializes logging
/// 2. Loads configuration from environment
/// 3. Connects to the database and applies the schema
/// 4. Builds the vendor manager
/// 5. Launches the HTTP server
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // =========================================
    // STEP 1: Load .env and Initialize Logging
    // =========================================
    dotenvy::dotenv().ok(); // It's okay if .env doesn't exist

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| std::io::Error::other(format!("Failed to set tracing subscriber: {}", e)))?;

    info!("Starting Vendor Account Backend Service");

    // =========================================
    // STEP 2: Load Configuration
    // =========================================
    let config = AppConfig::from_env()
        .map_err(|e| startup_error("Loading configuration", e))?;

    info!("Configuration loaded");
    info!("   Token lifetime: {}ms", config.jwt_lifetime.num_milliseconds());
    info!("   bcrypt cost: {}", config.bcrypt_cost);

    // =========================================
    // STEP 3: Initialize Database
    // =========================================
    let db = Database::connect(&config.database_url)
        .await
        .map_err(|e| startup_error("Connecting to database", e))?;

    db.run_migrations()
        .await
        .map_err(|e| startup_error("Running migrations", e))?;

    info!("Database ready");

    // =========================================
    // STEP 4: Initialize Services
    // =========================================
    let store = Arc::new(PgVendorStore::new(db));
    let vendor_manager = VendorManager::from_config(store, &config)
        .map_err(|e| startup_error("Initializing vendor manager", e))?;

    let app_state = Arc::new(AppState {
        vendor_manager,
        config: config.clone(),
    });

    // =========================================
    // STEP 5: Start HTTP Server
    // =========================================
    let server_host = config.server_host.clone();
    let server_port = config.server_port;

    info!("Starting HTTP server on {}:{}", server_host, server_port);

    HttpServer::new(move || {
        App::new()
            // Attach shared application state
            .app_data(web::Data::new(app_state.clone()))

            // Add logging middleware
            .wrap(middleware::Logger::default())

            // Configure API routes
            .configure(api::configure_routes)
    })
    .bind(format!("{}:{}", server_host, server_port))?
    .run()
    .await
}
