//! Command line flags.

use super::app_config::LogLevel;
use crate::application::MAX_PER_PAGE;
use clap::Parser;
use std::path::PathBuf;

/// Command line arguments. Each one overrides the matching `config.toml` value.
#[derive(Debug, Parser)]
#[command(
    name = "photogrid",
    version,
    about = "A terminal gallery for curated Pexels photos with offline caching",
    long_about = None
)]
pub struct CliArgs {
    /// Configuration file path.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[arg(long, value_name = "PATH")]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Pexels API key.
    #[arg(long, env = "PEXELS_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// API base URL.
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// Photos requested per page.
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=i64::from(MAX_PER_PAGE)))]
    pub per_page: Option<u32>,
}
