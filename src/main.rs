//! pricecheck - Price the weekly lootpool
//!
//! Downloads the lootpool from the Nori API when no local copy exists,
//! averages the mythic prices of every lootrun location and recommends the
//! most valuable one.

use std::io;
use std::process::ExitCode;

use clap::Parser;
use tracing::instrument::WithSubscriber;

use pricecheck::app;
use pricecheck::cli::{Cli, Settings};
use pricecheck::logging;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let settings = match Settings::from_cli(&cli) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("ERROR | {}", e);
            return Ok(ExitCode::FAILURE);
        }
    };

    let log_file = logging::open_log_file(&settings.log_path)?;
    let subscriber = logging::file_subscriber(log_file, logging::default_filter());

    let result = async {
        tracing::info!("Started logging...");
        let mut stdout = io::stdout();
        let result = app::run(&settings, &mut stdout).await;
        if let Err(ref e) = result {
            tracing::error!("{}", e);
        }
        result
    }
    .with_subscriber(subscriber)
    .await;

    match result {
        Ok(_) => Ok(ExitCode::SUCCESS),
        Err(e) => {
            eprintln!("ERROR | {}", e);
            Ok(ExitCode::FAILURE)
        }
    }
}
