use clap::{Parser, ValueEnum};
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub(crate) struct Args {
    /// Host to send logs to
    #[arg(long, default_value = "localhost")]
    pub(crate) host: String,

    /// Port to send logs to
    #[arg(long, default_value_t = 8080)]
    pub(crate) port: u16,

    /// Path of the log ingestion endpoint
    #[arg(long, default_value = "/logs")]
    pub(crate) endpoint: String,

    /// Seconds between batches, fractional values allowed
    #[arg(long, default_value_t = 1.0)]
    pub(crate) interval: f64,

    /// Number of logs to send in each batch
    #[arg(long, default_value_t = 1)]
    pub(crate) batch_size: usize,

    /// How long to run in seconds, 0 runs until interrupted
    #[arg(long, default_value_t = 0)]
    pub(crate) run_time: u64,

    /// Color output settings: always, auto, never
    #[arg(long, value_enum, default_value = "auto")]
    pub(crate) color: ColorOption,
}

#[derive(Debug)]
pub(crate) struct Config {
    pub(crate) host: String,
    pub(crate) port: u16,
    pub(crate) endpoint: String,
    pub(crate) interval: Duration,
    pub(crate) batch_size: usize,
    pub(crate) run_time: Option<Duration>,
    pub(crate) color: ColorOption,
}

impl Config {
    pub(crate) fn new(args: Args) -> Self {
        Self {
            host: args.host,
            port: args.port,
            endpoint: args.endpoint,
            interval: Duration::from_secs_f64(args.interval),
            batch_size: args.batch_size,
            run_time: (args.run_time > 0).then(|| Duration::from_secs(args.run_time)),
            color: args.color,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum ColorOption {
    Always,
    Auto,
    Never,
}
