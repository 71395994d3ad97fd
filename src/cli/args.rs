use crate::io::OutputFormat;
use crate::strategy::WatchConfig;
use crate::types::QueryFilter;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::time::Duration;

/// Index token transfers and answer address and value queries
#[derive(Parser, Debug)]
#[command(name = "transfer-index")]
#[command(about = "Index token transfers and answer address and value queries", long_about = None)]
pub struct CliArgs {
    /// Explorer response file (JSON envelope with a `result` array)
    #[arg(value_name = "INPUT", help = "Path to the explorer response JSON file")]
    pub input_file: PathBuf,

    /// Sender address filter
    #[arg(long = "from", value_name = "ADDRESS")]
    pub from: Option<String>,

    /// Recipient address filter
    #[arg(long = "to", value_name = "ADDRESS")]
    pub to: Option<String>,

    /// Only keep transfers whose value is strictly greater than this
    #[arg(
        long = "above-value",
        value_name = "AMOUNT",
        allow_hyphen_values = true
    )]
    pub above_value: Option<String>,

    // Offset and limit stay raw; malformed values are tolerated at query time
    /// Number of matching records to skip
    #[arg(long = "offset", value_name = "N", allow_hyphen_values = true)]
    pub offset: Option<String>,

    /// Maximum number of records to return
    #[arg(long = "limit", value_name = "N", allow_hyphen_values = true)]
    pub limit: Option<String>,

    /// Output rendering
    #[arg(long = "format", value_name = "FORMAT", default_value = "json")]
    pub format: OutputFormat,

    /// Run mode
    #[arg(
        long = "mode",
        value_name = "MODE",
        default_value = "once",
        help = "Run mode: 'once' to answer and exit or 'watch' to refresh periodically"
    )]
    pub mode: ModeType,

    /// Seconds between refreshes (watch mode only)
    #[arg(
        long = "interval-secs",
        value_name = "SECS",
        help = "Seconds between refreshes (default: 60)"
    )]
    pub interval_secs: Option<u64>,

    /// Number of runtime worker threads (watch mode only)
    #[arg(
        long = "worker-threads",
        value_name = "COUNT",
        help = "Number of runtime worker threads (default: CPU cores)"
    )]
    pub worker_threads: Option<usize>,

    /// Stop after this many refreshes (watch mode only)
    #[arg(long = "max-refreshes", value_name = "COUNT")]
    pub max_refreshes: Option<usize>,

    /// Log filter used when RUST_LOG is not set
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "warn")]
    pub log_level: String,
}

/// Available run modes
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ModeType {
    Once,
    Watch,
}

impl CliArgs {
    /// Create a WatchConfig from CLI arguments
    ///
    /// Missing values take defaults; zero values are replaced by defaults
    /// with a warning.
    pub fn to_watch_config(&self) -> WatchConfig {
        if self.interval_secs.is_some() || self.worker_threads.is_some() {
            let default = WatchConfig::default();
            WatchConfig::new(
                self.interval_secs
                    .map(Duration::from_secs)
                    .unwrap_or(default.interval),
                self.worker_threads.unwrap_or(default.worker_threads),
                self.max_refreshes,
            )
        } else {
            WatchConfig {
                max_refreshes: self.max_refreshes,
                ..WatchConfig::default()
            }
        }
    }

    /// Build the query filter from the raw filter flags
    pub fn to_filter(&self) -> QueryFilter {
        QueryFilter::from_params(
            self.from.as_deref(),
            self.to.as_deref(),
            self.above_value.as_deref(),
            self.offset.as_deref(),
            self.limit.as_deref(),
        )
    }
}
