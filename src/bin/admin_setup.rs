// ABOUTME: Operator command-line utility for the administrator account
// ABOUTME: Bootstraps the admin, prints bcrypt hashes and mints session tokens
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Usage:
//! ```bash
//! # Ensure the configured administrator exists
//! cargo run --bin admin-setup -- bootstrap
//!
//! # Print a bcrypt hash for a password
//! cargo run --bin admin-setup -- hash-password --password s3cret
//!
//! # Mint a session token for the configured administrator, valid for 60 minutes
//! cargo run --bin admin-setup -- issue-token --ttl-minutes 60
//! ```

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use portfolio_api::{
    admin::{bootstrap_administrator, hash_password, SessionTokenManager},
    config::{token_ttl_from_minutes, ServerConfig},
    constants::limits,
    database::{AdminRepository, Database},
};
use tracing::info;

#[derive(Parser)]
#[command(
    name = "admin-setup",
    about = "Portfolio API administrator management",
    long_about = "Manage the single administrator account of the Portfolio API: create it from configuration, hash passwords and mint session tokens."
)]
struct AdminSetupArgs {
    #[command(subcommand)]
    command: AdminCommand,

    /// Database URL override
    #[arg(long)]
    database_url: Option<String>,

    /// Enable debug logging
    #[arg(long, short = 'v')]
    verbose: bool,
}

#[derive(Subcommand)]
enum AdminCommand {
    /// Create the configured administrator if it does not exist
    Bootstrap,

    /// Print a bcrypt hash of a password
    HashPassword {
        /// Password to hash
        #[arg(long)]
        password: String,
    },

    /// Mint a session token for the configured administrator
    IssueToken {
        /// Token lifetime in minutes (defaults to ACCESS_TOKEN_EXPIRE_MINUTES)
        #[arg(long)]
        ttl_minutes: Option<i64>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = AdminSetupArgs::parse();

    let log_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt().with_env_filter(log_level).init();

    let mut config = ServerConfig::from_env()?;
    if let Some(database_url) = args.database_url {
        config.database.url = database_url;
    }

    match args.command {
        AdminCommand::Bootstrap => bootstrap_command(&config).await,
        AdminCommand::HashPassword { password } => {
            let hash = hash_password(&password, config.auth.bcrypt_cost)?;
            println!("{hash}");
            Ok(())
        }
        AdminCommand::IssueToken { ttl_minutes } => issue_token_command(&config, ttl_minutes).await,
    }
}

async fn bootstrap_command(config: &ServerConfig) -> Result<()> {
    info!("Connecting to database: {}", config.database.url);
    let database = Database::new(&config.database.url).await?;
    let admins = database.admins();

    let admin = bootstrap_administrator(&admins, &config.auth).await?;
    info!(
        "Administrator {} ready (id {}, {} account(s) total)",
        admin.email,
        admin.id,
        admins.count_admins().await?
    );
    Ok(())
}

async fn issue_token_command(config: &ServerConfig, ttl_minutes: Option<i64>) -> Result<()> {
    let ttl = ttl_minutes
        .map(|minutes| {
            token_ttl_from_minutes(minutes).ok_or_else(|| {
                anyhow!(
                    "--ttl-minutes must be between 1 and {}",
                    limits::MAX_TOKEN_TTL_MINUTES
                )
            })
        })
        .transpose()?;

    let database = Database::new(&config.database.url).await?;
    let admin = database
        .admins()
        .find_admin_by_email(&config.auth.admin_email)
        .await?
        .ok_or_else(|| {
            anyhow!(
                "Administrator {} does not exist; run `admin-setup bootstrap` first",
                config.auth.admin_email
            )
        })?;

    let tokens = SessionTokenManager::from_config(&config.auth);
    let token = tokens.issue(&admin.email, ttl)?;
    info!(
        "Issued token for {} valid for {} minutes",
        admin.email,
        ttl.unwrap_or_else(|| tokens.default_ttl()).num_minutes()
    );
    println!("{token}");
    Ok(())
}
