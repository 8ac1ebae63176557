//! Application flow for pricecheck
//!
//! A run makes sure a lootpool snapshot is on disk (downloading it when it
//! is missing), loads the price list and prints the per-location report.

use std::io::{self, Write};

use chrono::{DateTime, Local};
use reqwest::StatusCode;
use thiserror::Error;
use tracing::{info, warn};

use crate::cache::{CacheError, CacheStatus, LootCache};
use crate::cli::Settings;
use crate::data::{FetchOutcome, NoriClient, NoriError, PriceListError, PriceTable};
use crate::report::{Report, ReportOptions};

/// Errors that end a run
#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Cache(#[from] CacheError),

    #[error(transparent)]
    Prices(#[from] PriceListError),

    #[error(transparent)]
    Nori(#[from] NoriError),

    /// The download was refused, so there is nothing to report on
    #[error("Lootpool unavailable: the API answered with status {status}")]
    LootPoolUnavailable { status: StatusCode },

    #[error("Failed to write output: {0}")]
    Output(#[from] io::Error),
}

/// Where the lootpool for this run came from
#[derive(Debug, Clone, PartialEq)]
pub enum LootpoolSource {
    /// A snapshot was already on disk; no request was made
    Cached { modified: Option<DateTime<Local>> },
    /// The snapshot was downloaded and saved during this run
    Downloaded,
    /// The API refused the request; nothing was saved
    Rejected { status: StatusCode },
}

/// Makes sure a lootpool snapshot is on disk
///
/// An existing cache file short-circuits before any request is made.
/// Otherwise a token is requested, then the lootpool; a 200 body is saved
/// verbatim and any other status leaves the cache untouched.
pub async fn ensure_lootpool<W: Write>(
    cache: &LootCache,
    client: &NoriClient,
    out: &mut W,
) -> Result<LootpoolSource, RunError> {
    if let CacheStatus::Cached { modified } = cache.status() {
        info!("Using cached lootpool at {}", cache.path().display());
        return Ok(LootpoolSource::Cached { modified });
    }

    info!("No cached lootpool at {}", cache.path().display());
    writeln!(out, "Local lootpool file does not exist. Grabbing from Nori API...")?;
    writeln!(out, "NORI  | Getting Token...")?;

    let session = client.request_token().await?;

    writeln!(out, "NORI  | Getting response from {}...", client.lootpool_url())?;

    match client.request_lootpool(&session).await? {
        FetchOutcome::Downloaded(body) => {
            cache.write(&body)?;
            info!("Saved lootpool to {}", cache.path().display());
            writeln!(out, "NORI  | Response Saved at `{}`.", cache.path().display())?;
            Ok(LootpoolSource::Downloaded)
        }
        FetchOutcome::Rejected { status } => {
            warn!("Lootpool request failed with status {}", status.as_u16());
            writeln!(out, "ERROR | Status Code {}", status.as_u16())?;
            Ok(LootpoolSource::Rejected { status })
        }
    }
}

/// Runs the whole check: fetch if needed, then price and report
pub async fn run<W: Write>(settings: &Settings, out: &mut W) -> Result<Report, RunError> {
    let cache = LootCache::new(&settings.lootpool_path);
    let client = NoriClient::with_base_url(&settings.api_url)?;

    match ensure_lootpool(&cache, &client, out).await? {
        LootpoolSource::Rejected { status } => {
            return Err(RunError::LootPoolUnavailable { status });
        }
        LootpoolSource::Cached {
            modified: Some(modified),
        } => {
            writeln!(
                out,
                "Using lootpool saved {}",
                modified.format("%Y-%m-%d %H:%M")
            )?;
        }
        LootpoolSource::Cached { modified: None } | LootpoolSource::Downloaded => {}
    }

    writeln!(out, "Getting Mythics...")?;
    let lootpool = cache.read()?;
    let prices = PriceTable::load(&settings.prices_path)?;
    if prices.is_empty() {
        warn!("Price list {} has no usable rows", settings.prices_path.display());
    }
    info!(
        "Loaded {} locations and {} prices",
        lootpool.locations().count(),
        prices.len()
    );

    let report = Report::build(&lootpool, &prices);
    report.write_to(
        out,
        ReportOptions {
            show_items: settings.show_items,
        },
    )?;

    Ok(report)
}
