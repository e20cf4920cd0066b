mod config;
mod display;
mod logging;

use std::path::Path;

use anyhow::Context;
use chrono::{NaiveDate, Utc};
use clap::Parser;
use tracing::{error, info};
use warranty_api::{AppState, build_router};
use warranty_core::date::calendar_date;
use warranty_store::{ClaimRepo, DuckStore};

use config::{Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.app_env.as_deref().unwrap_or_default(), &cli.log_level)?;
    info!(version = env!("CARGO_PKG_VERSION"), db = %cli.db.display(), "warranty-days");

    match cli.command {
        Command::Serve { http_addr } => serve(&cli.db, &http_addr).await,
        Command::Import { path } => import(&cli.db, &path),
        Command::Claims { vin, json } => list_claims(&cli.db, &vin, json),
        Command::WarrantyYear { vin, now, json } => warranty_year(&cli.db, &vin, now, json),
    }
}

fn open_store(db: &Path) -> anyhow::Result<DuckStore> {
    DuckStore::open_persistent(db).with_context(|| format!("opening claims database {}", db.display()))
}

async fn serve(db: &Path, http_addr: &str) -> anyhow::Result<()> {
    let store = open_store(db)?;
    let app = build_router(AppState::new(Box::new(store)));

    let listener = tokio::net::TcpListener::bind(http_addr)
        .await
        .with_context(|| format!("failed to bind to {http_addr}"))?;
    info!(http_addr, "http server starting");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("http server stopped")?;
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("shutdown signal received"),
        Err(err) => {
            error!(error = %err, "unable to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    }
}

fn import(db: &Path, path: &Path) -> anyhow::Result<()> {
    let store = open_store(db)?;
    let rows = store
        .load_claims(path)
        .with_context(|| format!("importing {}", path.display()))?;
    println!("imported {rows} claims ({} on file)", store.claims_count()?);
    Ok(())
}

fn list_claims(db: &Path, vin: &str, json: bool) -> anyhow::Result<()> {
    let repo = ClaimRepo::new(open_store(db)?);
    let claims = repo.list_by_vin(vin)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&claims)?);
    } else {
        print!("{}", display::render_claims(vin.trim(), &claims));
    }
    Ok(())
}

fn warranty_year(db: &Path, vin: &str, now: Option<NaiveDate>, json: bool) -> anyhow::Result<()> {
    let now = now.unwrap_or_else(|| calendar_date(&Utc::now()));
    let repo = ClaimRepo::new(open_store(db)?);
    let report = repo.warranty_years(vin, now)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", display::render_report(&report));
    }
    Ok(())
}
