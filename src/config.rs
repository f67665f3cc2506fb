use std::{
    env,
    fmt::{self, Display},
    num::{NonZeroU64, NonZeroUsize},
    path::{Path, PathBuf},
    str::FromStr,
    sync::Arc,
    time::Duration,
};

use averager_core::{Category, EndpointMap};
use thiserror::Error;

pub const DEFAULT_API_PORT: u16 = 9876;
pub const DEFAULT_WINDOW_SIZE: NonZeroUsize = NonZeroUsize::new(10).unwrap();
pub const DEFAULT_UPSTREAM_TIMEOUT_MS: u64 = 500;
pub const DEFAULT_UPSTREAM_URL: &str = "http://20.244.56.144/evaluation-service";
const DEFAULT_LOGGER_LEVEL: &str = "info,averager=info,averager_core=info";

#[derive(Debug, Clone)]
pub struct Config {
    pub api_port: u16,
    pub window_size: NonZeroUsize,
    pub upstream: UpstreamConfig,
    pub logger: LoggerConfig,
}

#[derive(Clone)]
pub struct UpstreamConfig {
    pub base_url: String,
    pub endpoints: EndpointMap,
    pub timeout: Duration,
    pub bearer_token: Option<Arc<str>>,
}

impl fmt::Debug for UpstreamConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpstreamConfig")
            .field("base_url", &self.base_url)
            .field("endpoints", &self.endpoints)
            .field("timeout", &self.timeout)
            .field("bearer_token", &self.bearer_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct LoggerConfig {
    pub stdio_level: String,
    pub file_level: String,
    pub format: LoggerFormat,
    pub log_file: Option<Arc<Path>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoggerFormat {
    Pretty,
    Json,
    Compact,
}

impl FromStr for LoggerFormat {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "json" => Ok(LoggerFormat::Json),
            "pretty" => Ok(LoggerFormat::Pretty),
            "compact" => Ok(LoggerFormat::Compact),
            _ => Err("invalid logger format, expected one of: pretty, json, compact"),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Invalid value \"{value}\" for {variable}: {reason}")]
pub struct ConfigError {
    pub variable: &'static str,
    pub value: String,
    pub reason: String,
}

pub fn read_config() -> Config {
    try_read_config(|key| env::var(key).ok())
        .unwrap_or_else(|err| panic!("Failed to read configuration.\n{err}"))
}

/// Builds the configuration from `lookup`, which resolves an environment
/// variable name to its value. Unset and empty variables take their default.
pub fn try_read_config(lookup: impl Fn(&str) -> Option<String>) -> Result<Config, ConfigError> {
    let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

    let api_port = parse_var(&var, "AVERAGER_API_PORT")?.unwrap_or(DEFAULT_API_PORT);

    let window_size = parse_var::<NonZeroUsize>(&var, "AVERAGER_WINDOW_SIZE")?
        .unwrap_or(DEFAULT_WINDOW_SIZE);

    let timeout_ms = parse_var::<NonZeroU64>(&var, "AVERAGER_UPSTREAM_TIMEOUT_MS")?
        .map(NonZeroU64::get)
        .unwrap_or(DEFAULT_UPSTREAM_TIMEOUT_MS);

    let endpoint = |key: &str, category: Category| {
        var(key).unwrap_or_else(|| category.default_endpoint().to_string())
    };
    let upstream = UpstreamConfig {
        base_url: var("AVERAGER_UPSTREAM_URL").unwrap_or_else(|| DEFAULT_UPSTREAM_URL.to_string()),
        endpoints: EndpointMap::new(
            endpoint("AVERAGER_PRIMES_ENDPOINT", Category::Primes),
            endpoint("AVERAGER_FIBONACCI_ENDPOINT", Category::Fibonacci),
            endpoint("AVERAGER_EVEN_ENDPOINT", Category::Even),
            endpoint("AVERAGER_RANDOM_ENDPOINT", Category::Random),
        ),
        timeout: Duration::from_millis(timeout_ms),
        bearer_token: var("AVERAGER_UPSTREAM_TOKEN").map(|token| token.trim().into()),
    };

    let stdio_level =
        var("AVERAGER_LOGGER_LEVEL").unwrap_or_else(|| DEFAULT_LOGGER_LEVEL.to_string());
    let logger = LoggerConfig {
        file_level: var("AVERAGER_FILE_LOGGER_LEVEL").unwrap_or_else(|| stdio_level.clone()),
        stdio_level,
        format: parse_var(&var, "AVERAGER_LOGGER_FORMAT")?.unwrap_or(LoggerFormat::Compact),
        log_file: var("AVERAGER_LOG_FILE").map(|path| PathBuf::from(path).into()),
    };

    Ok(Config {
        api_port,
        window_size,
        upstream,
        logger,
    })
}

fn parse_var<T>(
    var: &impl Fn(&str) -> Option<String>,
    variable: &'static str,
) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    let Some(value) = var(variable) else {
        return Ok(None);
    };
    match value.trim().parse() {
        Ok(parsed) => Ok(Some(parsed)),
        Err(err) => Err(ConfigError {
            variable,
            reason: err.to_string(),
            value,
        }),
    }
}
