// ABOUTME: Server binary for the Portfolio & Marketplace API
// ABOUTME: Loads configuration, opens the database, bootstraps the administrator and serves HTTP
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Portfolio API Server Binary
//!
//! Starts the REST API with the administrator account bootstrapped from
//! `ADMIN_EMAIL` / `ADMIN_PASSWORD`.

use anyhow::Result;
use clap::Parser;
use portfolio_api::{
    admin::bootstrap_administrator, config::ServerConfig, database::Database, logging,
    resources::ServerResources, server::PortfolioServer,
};
use std::sync::Arc;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "portfolio-api-server")]
#[command(about = "Portfolio & Marketplace API - catalog, orders and content backend")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,

    /// Override database URL
    #[arg(long)]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    logging::init_from_env()?;

    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http.port = http_port;
    }
    if let Some(database_url) = args.database_url {
        config.database.url = database_url;
    }
    info!("{}", config.summary());

    let database = Database::new(&config.database.url).await?;
    info!("Database initialized: {}", config.database.url);

    let resources = Arc::new(ServerResources::new(config, database));
    let admin = bootstrap_administrator(
        resources.admin_repository.as_ref(),
        &resources.config.auth,
    )
    .await?;
    info!(admin_id = admin.id, email = %admin.email, "Administrator ready");

    let server = PortfolioServer::new(resources);
    if let Err(e) = server.run().await {
        error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
