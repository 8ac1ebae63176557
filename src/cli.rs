//! Command-line interface parsing for pricecheck
//!
//! Every flag is optional. Without arguments the tool reads and writes the
//! same files in the working directory and talks to the public Nori API.

use std::path::PathBuf;

use clap::Parser;
use reqwest::Url;
use thiserror::Error;

use crate::data::nori::NORI_BASE_URL;

/// Default location of the cached lootpool
pub const DEFAULT_LOOTPOOL_PATH: &str = "./lootpool.json";

/// Default location of the mythic price list
pub const DEFAULT_PRICES_PATH: &str = "./mythic_prices.csv";

/// Default log file
pub const DEFAULT_LOG_PATH: &str = "pricecheck.log";

/// Error types for CLI argument parsing
#[derive(Debug, Error)]
pub enum CliError {
    /// The API URL could not be parsed or is not http(s)
    #[error("Invalid API URL: '{0}'. Expected an http or https URL")]
    InvalidApiUrl(String),
}

/// pricecheck - Price the weekly lootpool and pick the best location
#[derive(Parser, Debug)]
#[command(name = "pricecheck")]
#[command(about = "Average mythic prices per lootrun location and recommend the best one")]
#[command(version)]
pub struct Cli {
    /// Base URL of the Nori API
    #[arg(long, value_name = "URL", default_value = NORI_BASE_URL)]
    pub api_url: String,

    /// Cached lootpool file; downloaded when it does not exist
    #[arg(long, value_name = "PATH", default_value = DEFAULT_LOOTPOOL_PATH)]
    pub lootpool: PathBuf,

    /// Mythic price list (`name,price` rows)
    #[arg(long, value_name = "PATH", default_value = DEFAULT_PRICES_PATH)]
    pub prices: PathBuf,

    /// File that log entries are appended to
    #[arg(long, value_name = "PATH", default_value = DEFAULT_LOG_PATH)]
    pub log_file: PathBuf,

    /// Also print the price of every mythic
    #[arg(long)]
    pub items: bool,
}

/// Validated settings for a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_url: String,
    pub lootpool_path: PathBuf,
    pub prices_path: PathBuf,
    pub log_path: PathBuf,
    pub show_items: bool,
}

/// Checks that a string is an absolute http(s) URL
pub fn parse_api_url(s: &str) -> Result<Url, CliError> {
    match Url::parse(s) {
        Ok(url) if matches!(url.scheme(), "http" | "https") && url.has_host() => Ok(url),
        _ => Err(CliError::InvalidApiUrl(s.to_string())),
    }
}

impl Settings {
    /// Creates Settings from parsed CLI arguments.
    ///
    /// # Returns
    /// * `Ok(Settings)` with the paths and URL to use
    /// * `Err(CliError)` if the API URL is not usable
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        parse_api_url(&cli.api_url)?;

        Ok(Settings {
            api_url: cli.api_url.clone(),
            lootpool_path: cli.lootpool.clone(),
            prices_path: cli.prices.clone(),
            log_path: cli.log_file.clone(),
            show_items: cli.items,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_api_url_accepts_http_and_https() {
        assert!(parse_api_url("https://nori.fish").is_ok());
        assert!(parse_api_url("http://127.0.0.1:8080").is_ok());
    }

    #[test]
    fn test_parse_api_url_rejects_other_schemes() {
        assert!(parse_api_url("ftp://nori.fish").is_err());
        assert!(parse_api_url("file:///tmp/lootpool.json").is_err());
    }

    #[test]
    fn test_parse_api_url_rejects_garbage() {
        let err = parse_api_url("nori").unwrap_err();
        assert!(err.to_string().contains("Invalid API URL"));
        assert!(err.to_string().contains("nori"));
    }

    #[test]
    fn test_cli_parse_no_args_uses_defaults() {
        let cli = Cli::parse_from(["pricecheck"]);
        assert_eq!(cli.api_url, "https://nori.fish");
        assert_eq!(cli.lootpool, PathBuf::from("./lootpool.json"));
        assert_eq!(cli.prices, PathBuf::from("./mythic_prices.csv"));
        assert_eq!(cli.log_file, PathBuf::from("pricecheck.log"));
        assert!(!cli.items);
    }

    #[test]
    fn test_settings_from_cli_defaults() {
        let cli = Cli::parse_from(["pricecheck"]);
        let settings = Settings::from_cli(&cli).unwrap();
        assert_eq!(
            settings,
            Settings {
                api_url: NORI_BASE_URL.to_string(),
                lootpool_path: PathBuf::from(DEFAULT_LOOTPOOL_PATH),
                prices_path: PathBuf::from(DEFAULT_PRICES_PATH),
                log_path: PathBuf::from(DEFAULT_LOG_PATH),
                show_items: false,
            }
        );
    }

    #[test]
    fn test_settings_from_cli_overrides() {
        let cli = Cli::parse_from([
            "pricecheck",
            "--api-url",
            "http://localhost:3000",
            "--lootpool",
            "/tmp/pool.json",
            "--prices",
            "/tmp/prices.csv",
            "--log-file",
            "/tmp/check.log",
            "--items",
        ]);
        let settings = Settings::from_cli(&cli).unwrap();
        assert_eq!(settings.api_url, "http://localhost:3000");
        assert_eq!(settings.lootpool_path, PathBuf::from("/tmp/pool.json"));
        assert_eq!(settings.prices_path, PathBuf::from("/tmp/prices.csv"));
        assert_eq!(settings.log_path, PathBuf::from("/tmp/check.log"));
        assert!(settings.show_items);
    }

    #[test]
    fn test_settings_from_cli_invalid_url() {
        let cli = Cli::parse_from(["pricecheck", "--api-url", "not a url"]);
        assert!(Settings::from_cli(&cli).is_err());
    }
}
