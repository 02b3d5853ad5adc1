//! CLI module for the ISO Management API
//!
//! - `serve`: run the HTTP API
//! - `migrate`: create tables and indexes for the configured backend

pub mod migrate;
pub mod serve;

use anyhow::Context;
use clap::{Parser, Subcommand};

use crate::config::AppConfig;
use crate::infrastructure::logging;

/// ISO Management API - multi-tenant backend for ISO quality records
#[derive(Parser)]
#[command(name = "iso-management-api")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP API server
    Serve(serve::ServeArgs),

    /// Apply storage migrations and exit
    Migrate,
}

/// Load `.env`, the layered configuration and the tracing subscriber
pub(crate) fn bootstrap() -> anyhow::Result<AppConfig> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Failed to load configuration")?;
    logging::init_logging(&config.logging);

    Ok(config)
}
