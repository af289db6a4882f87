use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueHint, builder::BoolishValueParser};

use crate::domain::content::Niche;

/// Command-line arguments for the feedcache binary.
#[derive(Debug, Parser)]
#[command(
    name = "feedcache",
    version,
    about = "Cached content feed queries with a periodic expiry sweep"
)]
pub struct CliArgs {
    /// Optional path to a configuration file.
    #[arg(long = "config-file", env = "FEEDCACHE_CONFIG_FILE", value_name = "PATH")]
    pub config_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Run a content query through the cache and print the records as JSON.
    Query(QueryArgs),
}

#[derive(Debug, Args, Clone)]
pub struct QueryArgs {
    #[command(flatten)]
    pub overrides: QueryOverrides,

    /// Restrict results to one niche (tech|security|gaming); all niches when omitted.
    #[arg(long, value_name = "NICHE")]
    pub niche: Option<Niche>,

    /// Maximum number of records to return.
    #[arg(long, default_value_t = 10, value_name = "COUNT")]
    pub limit: u32,

    /// How many times to issue the query.
    #[arg(long, default_value_t = 1, value_name = "COUNT")]
    pub repeat: u32,

    /// Pause between repeated queries, in milliseconds.
    #[arg(long = "interval-ms", default_value_t = 1_000, value_name = "MILLIS")]
    pub interval_ms: u64,
}

#[derive(Debug, Args, Default, Clone)]
pub struct QueryOverrides {
    /// Override the JSON content file queries are answered from.
    #[arg(long = "source-path", value_name = "PATH", value_hint = ValueHint::FilePath)]
    pub source_path: Option<PathBuf>,

    /// Override the base log level (trace|debug|info|warn|error).
    #[arg(long = "log-level", value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Toggle JSON logging.
    #[arg(
        long = "log-json",
        value_name = "BOOL",
        value_parser = BoolishValueParser::new()
    )]
    pub log_json: Option<bool>,

    /// Override the default cache entry lifetime.
    #[arg(long = "cache-ttl-ms", value_name = "MILLIS")]
    pub cache_ttl_ms: Option<u64>,

    /// Override the expired-entry sweep interval.
    #[arg(long = "cache-sweep-interval-ms", value_name = "MILLIS")]
    pub cache_sweep_interval_ms: Option<u64>,

    /// Disable the periodic expired-entry sweep.
    #[arg(long = "no-sweep", action = clap::ArgAction::SetTrue)]
    pub no_sweep: bool,
}
