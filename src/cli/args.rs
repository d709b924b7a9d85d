//! Command-line argument parsing.

use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

use crate::config::{MonitorConfig, BASE_URL_ENV};

/// Watch a BirdEdge microphone unit from the terminal.
#[derive(Debug, Parser)]
#[command(name = "birdedge-monitor", version, about)]
pub struct Cli {
    /// Base URL of the microphone unit (e.g. http://birdclient-1a2b.local)
    #[arg(short, long, env = BASE_URL_ENV)]
    pub url: Option<String>,

    /// Poll interval in milliseconds
    #[arg(short, long, default_value_t = 5000, value_parser = clap::value_parser!(u64).range(100..))]
    pub interval_ms: u64,

    /// Log file path (defaults to the user cache directory)
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Fold the arguments over the default configuration.
    pub fn into_config(self) -> MonitorConfig {
        let mut config =
            MonitorConfig::new().with_poll_interval(Duration::from_millis(self.interval_ms));
        if let Some(url) = self.url {
            config = config.with_base_url(url);
        }
        if self.log_file.is_some() {
            config = config.with_log_file(self.log_file);
        }
        config
    }
}
