//! Transfer Index CLI
//!
//! Command-line interface for querying token transfers from a saved explorer
//! response.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- transfers.json
//! cargo run -- --from 0xabc --to 0xdef transfers.json
//! cargo run -- --above-value 1000000 --offset 10 --limit 10 --format csv transfers.json
//! cargo run -- --mode watch --interval-secs 30 --max-refreshes 5 transfers.json
//! ```
//!
//! Results go to stdout, logs go to stderr. The log filter comes from
//! `RUST_LOG` when set, otherwise from `--log-level`.
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (file not found, rejected upstream payload, invalid threshold, etc.)

use std::process;
use std::sync::Arc;
use tracing::error;
use tracing_subscriber::EnvFilter;
use transfer_index::cli;
use transfer_index::io::FileSource;
use transfer_index::strategy;

fn main() {
    let args = cli::parse_args();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let strategy = {
        let config = if matches!(args.mode, cli::ModeType::Watch) {
            Some(args.to_watch_config())
        } else {
            None
        };
        strategy::create_strategy(args.mode, config)
    };

    let source = Arc::new(FileSource::new(&args.input_file));
    let mut output = std::io::stdout();
    if let Err(e) = strategy.run(source, &args.to_filter(), args.format, &mut output) {
        error!(error = %e, "query failed");
        process::exit(1);
    }
}
