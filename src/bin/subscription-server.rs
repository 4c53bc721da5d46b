// ABOUTME: Server binary for the subscription cost service
// ABOUTME: Loads configuration, initializes logging and storage, then serves HTTP until shutdown
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Subscription Server Binary
//!
//! Starts the subscription REST API. Settings come from the environment
//! (and `.env`); `--http-port` overrides `HTTP_PORT`.

use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use subscription_service::{
    config::ServerConfig, database_plugins::factory::Database, logging::LoggingConfig,
    resources::ServerResources, server,
};
use tracing::{error, info};

/// Command-line arguments for the subscription server
#[derive(Parser)]
#[command(name = "subscription-server")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Subscription cost service - CRUD API with period cost aggregation")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = ServerConfig::from_env()?;
    if let Some(port) = args.http_port {
        config.http.port = port;
        config.validate()?;
    }

    LoggingConfig::from_env().init()?;
    info!("{}", config.summary());

    let database = match Database::from_config(&config.database).await {
        Ok(db) => db,
        Err(e) => {
            error!("Failed to initialize database: {e}");
            return Err(e.into());
        }
    };
    info!("Database initialized: {}", database.backend_info());

    let resources = Arc::new(ServerResources::new(database, config));
    server::run(resources).await?;

    Ok(())
}
