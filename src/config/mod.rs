//! Configuration layer: typed settings with layered precedence (file → env → CLI).

use std::{path::PathBuf, str::FromStr};

use clap::Parser;
use config::{Config, Environment, File};
use serde::Deserialize;
use thiserror::Error;
use tracing::level_filters::LevelFilter;

use crate::cache::{CacheConfig, DEFAULT_SWEEP_INTERVAL_MS, DEFAULT_TTL_MS};

mod cli;

pub use cli::{CliArgs, Command, QueryArgs, QueryOverrides};

const DEFAULT_CONFIG_BASENAME: &str = "config/default";
const LOCAL_CONFIG_BASENAME: &str = "feedcache";
const DEFAULT_SOURCE_PATH: &str = "content.json";

/// Fully-resolved settings after precedence resolution and validation.
#[derive(Debug, Clone)]
pub struct Settings {
    pub logging: LoggingSettings,
    pub cache: CacheConfig,
    pub source: SourceSettings,
}

#[derive(Debug, Clone)]
pub struct LoggingSettings {
    pub level: LevelFilter,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy)]
pub enum LogFormat {
    Json,
    Compact,
}

#[derive(Debug, Clone)]
pub struct SourceSettings {
    pub path: PathBuf,
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to build configuration: {0}")]
    Build(#[from] config::ConfigError),
    #[error("invalid configuration for `{key}`: {reason}")]
    Invalid { key: &'static str, reason: String },
}

impl LoadError {
    fn invalid(key: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            key,
            reason: reason.into(),
        }
    }
}

/// Load settings using the configured precedence (file → environment → CLI).
pub fn load(cli: &CliArgs) -> Result<Settings, LoadError> {
    let mut builder = Config::builder()
        .add_source(File::with_name(DEFAULT_CONFIG_BASENAME).required(false))
        .add_source(File::with_name(LOCAL_CONFIG_BASENAME).required(false));

    if let Some(path) = cli.config_file.as_ref() {
        builder = builder.add_source(File::from(path.as_path()).required(true));
    }

    builder = builder.add_source(Environment::with_prefix("FEEDCACHE").separator("__"));

    let mut raw: RawSettings = builder.build()?.try_deserialize()?;

    match &cli.command {
        Command::Query(args) => raw.apply_query_overrides(&args.overrides),
    }

    Settings::from_raw(raw)
}

/// Resolve configuration using the process arguments, returning both for downstream use.
pub fn load_with_cli() -> Result<(CliArgs, Settings), LoadError> {
    let args = CliArgs::parse();
    let settings = load(&args)?;
    Ok((args, settings))
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawSettings {
    logging: RawLoggingSettings,
    cache: RawCacheSettings,
    source: RawSourceSettings,
}

impl RawSettings {
    fn apply_query_overrides(&mut self, overrides: &QueryOverrides) {
        if let Some(path) = overrides.source_path.as_ref() {
            self.source.path = Some(path.clone());
        }
        if let Some(level) = overrides.log_level.as_ref() {
            self.logging.level = Some(level.clone());
        }
        if let Some(json) = overrides.log_json {
            self.logging.json = Some(json);
        }
        if let Some(ttl) = overrides.cache_ttl_ms {
            self.cache.default_ttl_ms = Some(ttl);
        }
        if let Some(interval) = overrides.cache_sweep_interval_ms {
            self.cache.sweep_interval_ms = Some(interval);
        }
        if overrides.no_sweep {
            self.cache.sweep_enabled = Some(false);
        }
    }
}

impl Settings {
    fn from_raw(raw: RawSettings) -> Result<Self, LoadError> {
        let RawSettings {
            logging,
            cache,
            source,
        } = raw;

        Ok(Self {
            logging: build_logging_settings(logging)?,
            cache: build_cache_settings(cache)?,
            source: build_source_settings(source)?,
        })
    }
}

fn build_logging_settings(logging: RawLoggingSettings) -> Result<LoggingSettings, LoadError> {
    let level = match logging.level {
        Some(level) => LevelFilter::from_str(level.as_str()).map_err(|err| {
            LoadError::invalid("logging.level", format!("failed to parse: {err}"))
        })?,
        None => LevelFilter::INFO,
    };

    let format = if logging.json.unwrap_or(false) {
        LogFormat::Json
    } else {
        LogFormat::Compact
    };

    Ok(LoggingSettings { level, format })
}

fn build_cache_settings(cache: RawCacheSettings) -> Result<CacheConfig, LoadError> {
    let default_ttl_ms = cache.default_ttl_ms.unwrap_or(DEFAULT_TTL_MS);
    if default_ttl_ms == 0 {
        return Err(LoadError::invalid(
            "cache.default_ttl_ms",
            "must be greater than zero",
        ));
    }

    let sweep_interval_ms = cache.sweep_interval_ms.unwrap_or(DEFAULT_SWEEP_INTERVAL_MS);
    if sweep_interval_ms == 0 {
        return Err(LoadError::invalid(
            "cache.sweep_interval_ms",
            "must be greater than zero",
        ));
    }

    Ok(CacheConfig {
        default_ttl_ms,
        sweep_interval_ms,
        sweep_enabled: cache.sweep_enabled.unwrap_or(true),
    })
}

fn build_source_settings(source: RawSourceSettings) -> Result<SourceSettings, LoadError> {
    let path = source
        .path
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SOURCE_PATH));
    if path.as_os_str().is_empty() {
        return Err(LoadError::invalid("source.path", "path must not be empty"));
    }

    Ok(SourceSettings { path })
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawLoggingSettings {
    level: Option<String>,
    json: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawCacheSettings {
    default_ttl_ms: Option<u64>,
    sweep_interval_ms: Option<u64>,
    sweep_enabled: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawSourceSettings {
    path: Option<PathBuf>,
}
