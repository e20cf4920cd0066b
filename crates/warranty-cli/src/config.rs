//! Command-line and environment configuration.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use warranty_core::date::parse_reference_date;

#[derive(Debug, Parser)]
#[command(name = "warranty-days", version, about = "Repair days per warranty year, by VIN")]
pub struct Cli {
    /// DuckDB database file holding the claims table.
    #[arg(long, env = "WARRANTY_DB", default_value = "warranty.duckdb", global = true)]
    pub db: PathBuf,

    /// Log level: debug, info, warn, error. `RUST_LOG` takes precedence.
    #[arg(long, env = "LOG_LEVEL", default_value = "info", global = true)]
    pub log_level: String,

    /// Deployment environment. Empty, dev, development and local log as text;
    /// anything else logs JSON.
    #[arg(long, env = "APP_ENV", global = true)]
    pub app_env: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Serve the HTTP API.
    Serve {
        #[arg(long, env = "HTTP_ADDR", default_value = "0.0.0.0:8080")]
        http_addr: String,
    },
    /// Load a claims export (.csv or .parquet) into the database.
    Import { path: PathBuf },
    /// List every claim on file for a VIN.
    Claims {
        #[arg(long)]
        vin: String,
        #[arg(long)]
        json: bool,
    },
    /// Repair days per warranty year for a VIN.
    WarrantyYear {
        #[arg(long)]
        vin: String,
        /// Reference date (YYYY-MM-DD or RFC 3339); defaults to today in UTC.
        #[arg(long, value_parser = parse_now)]
        now: Option<NaiveDate>,
        #[arg(long)]
        json: bool,
    },
}

fn parse_now(raw: &str) -> Result<NaiveDate, String> {
    parse_reference_date(raw).map_err(|err| format!("expected YYYY-MM-DD or RFC 3339: {err}"))
}
