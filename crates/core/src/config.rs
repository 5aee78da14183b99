use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const MEMORY_STORAGE_URL: &str = "memory://";

#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    pub storage: StorageConfig,
    pub backend: BackendConfig,
    pub logging: LoggingConfig,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StorageConfig {
    /// `sqlite://...` for durable storage, `memory://` for a process-local store.
    pub url: String,
    pub max_connections: u32,
    pub timeout_secs: u64,
}

/// Knobs for the simulated backend.
#[derive(Clone, Debug, PartialEq)]
pub struct BackendConfig {
    pub simulate_latency: bool,
    /// Multiplier applied to every simulated delay.
    pub latency_scale: f64,
    /// Probability that a batch product fetch fails with a transient network error.
    pub failure_rate: f64,
    /// Seed for shuffles, delays and failure rolls; OS randomness when absent.
    pub random_seed: Option<u64>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    pub storage_url: Option<String>,
    pub log_level: Option<String>,
    pub log_format: Option<LogFormat>,
    pub simulate_latency: Option<bool>,
    pub failure_rate: Option<f64>,
    pub random_seed: Option<u64>,
}

#[derive(Clone, Debug, Default)]
pub struct LoadOptions {
    pub config_path: Option<PathBuf>,
    pub require_file: bool,
    pub overrides: ConfigOverrides,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file `{path}`: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("could not parse config file `{path}`: {source}")]
    ParseFile { path: PathBuf, source: toml::de::Error },
    #[error("required config file was not found: `{0}`")]
    MissingConfigFile(PathBuf),
    #[error("environment variable interpolation failed for `{var}`")]
    MissingEnvInterpolation { var: String },
    #[error("unterminated environment interpolation expression")]
    UnterminatedInterpolation,
    #[error("invalid environment override for `{key}`: `{value}`")]
    InvalidEnvOverride { key: String, value: String },
    #[error("configuration validation failed: {0}")]
    Validation(String),
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage: StorageConfig {
                url: "sqlite://giftwise.db?mode=rwc".to_string(),
                max_connections: 1,
                timeout_secs: 30,
            },
            backend: BackendConfig {
                simulate_latency: true,
                latency_scale: 1.0,
                failure_rate: 0.02,
                random_seed: None,
            },
            logging: LoggingConfig { level: "info".to_string(), format: LogFormat::Compact },
        }
    }
}

impl std::str::FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(ConfigError::Validation(format!(
                "unsupported log format `{other}` (expected compact|pretty|json)"
            ))),
        }
    }
}

impl StorageConfig {
    pub fn is_memory(&self) -> bool {
        self.url.trim() == MEMORY_STORAGE_URL
    }
}

impl AppConfig {
    pub fn load(options: LoadOptions) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        let explicit_path = options
            .config_path
            .clone()
            .or_else(|| read_env("GIFTWISE_CONFIG").map(PathBuf::from));
        let maybe_path = resolve_config_path(explicit_path.as_deref());

        if let Some(path) = maybe_path {
            let patch = read_patch(&path)?;
            config.apply_patch(patch);
        } else if options.require_file {
            let expected = explicit_path.unwrap_or_else(|| PathBuf::from("giftwise.toml"));
            return Err(ConfigError::MissingConfigFile(expected));
        }

        config.apply_env_overrides()?;
        config.apply_overrides(options.overrides);
        config.validate()?;

        Ok(config)
    }

    fn apply_patch(&mut self, patch: ConfigPatch) {
        if let Some(storage) = patch.storage {
            if let Some(url) = storage.url {
                self.storage.url = url;
            }
            if let Some(max_connections) = storage.max_connections {
                self.storage.max_connections = max_connections;
            }
            if let Some(timeout_secs) = storage.timeout_secs {
                self.storage.timeout_secs = timeout_secs;
            }
        }

        if let Some(backend) = patch.backend {
            if let Some(simulate_latency) = backend.simulate_latency {
                self.backend.simulate_latency = simulate_latency;
            }
            if let Some(latency_scale) = backend.latency_scale {
                self.backend.latency_scale = latency_scale;
            }
            if let Some(failure_rate) = backend.failure_rate {
                self.backend.failure_rate = failure_rate;
            }
            if let Some(random_seed) = backend.random_seed {
                self.backend.random_seed = Some(random_seed);
            }
        }

        if let Some(logging) = patch.logging {
            if let Some(level) = logging.level {
                self.logging.level = level;
            }
            if let Some(format) = logging.format {
                self.logging.format = format;
            }
        }
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Some(value) = read_env("GIFTWISE_STORAGE_URL") {
            self.storage.url = value;
        }
        if let Some(value) = read_env("GIFTWISE_STORAGE_MAX_CONNECTIONS") {
            self.storage.max_connections = parse_u32("GIFTWISE_STORAGE_MAX_CONNECTIONS", &value)?;
        }
        if let Some(value) = read_env("GIFTWISE_STORAGE_TIMEOUT_SECS") {
            self.storage.timeout_secs = parse_u64("GIFTWISE_STORAGE_TIMEOUT_SECS", &value)?;
        }

        if let Some(value) = read_env("GIFTWISE_SIMULATE_LATENCY") {
            self.backend.simulate_latency = parse_bool("GIFTWISE_SIMULATE_LATENCY", &value)?;
        }
        if let Some(value) = read_env("GIFTWISE_LATENCY_SCALE") {
            self.backend.latency_scale = parse_f64("GIFTWISE_LATENCY_SCALE", &value)?;
        }
        if let Some(value) = read_env("GIFTWISE_FAILURE_RATE") {
            self.backend.failure_rate = parse_f64("GIFTWISE_FAILURE_RATE", &value)?;
        }
        if let Some(value) = read_env("GIFTWISE_RANDOM_SEED") {
            self.backend.random_seed = Some(parse_u64("GIFTWISE_RANDOM_SEED", &value)?);
        }

        let log_level =
            read_env("GIFTWISE_LOGGING_LEVEL").or_else(|| read_env("GIFTWISE_LOG_LEVEL"));
        if let Some(value) = log_level {
            self.logging.level = value;
        }
        let log_format =
            read_env("GIFTWISE_LOGGING_FORMAT").or_else(|| read_env("GIFTWISE_LOG_FORMAT"));
        if let Some(value) = log_format {
            self.logging.format = value.parse()?;
        }

        Ok(())
    }

    fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(storage_url) = overrides.storage_url {
            self.storage.url = storage_url;
        }
        if let Some(log_level) = overrides.log_level {
            self.logging.level = log_level;
        }
        if let Some(log_format) = overrides.log_format {
            self.logging.format = log_format;
        }
        if let Some(simulate_latency) = overrides.simulate_latency {
            self.backend.simulate_latency = simulate_latency;
        }
        if let Some(failure_rate) = overrides.failure_rate {
            self.backend.failure_rate = failure_rate;
        }
        if let Some(random_seed) = overrides.random_seed {
            self.backend.random_seed = Some(random_seed);
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_storage(&self.storage)?;
        validate_backend(&self.backend)?;
        validate_logging(&self.logging)?;
        Ok(())
    }
}

fn resolve_config_path(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        return path.exists().then_some(path.to_path_buf());
    }

    [PathBuf::from("giftwise.toml"), PathBuf::from("config/giftwise.toml")]
        .into_iter()
        .find(|path| path.exists())
}

fn read_patch(path: &Path) -> Result<ConfigPatch, ConfigError> {
    let raw = fs::read_to_string(path)
        .map_err(|source| ConfigError::ReadFile { path: path.to_path_buf(), source })?;

    let interpolated = interpolate_env_vars(&raw)?;
    toml::from_str::<ConfigPatch>(&interpolated)
        .map_err(|source| ConfigError::ParseFile { path: path.to_path_buf(), source })
}

fn interpolate_env_vars(input: &str) -> Result<String, ConfigError> {
    let mut output = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '$' && matches!(chars.peek(), Some('{')) {
            chars.next();
            let mut key = String::new();

            loop {
                match chars.next() {
                    Some('}') => break,
                    Some(next) => key.push(next),
                    None => return Err(ConfigError::UnterminatedInterpolation),
                }
            }

            let value = env::var(&key)
                .map_err(|_| ConfigError::MissingEnvInterpolation { var: key.clone() })?;
            output.push_str(&value);
            continue;
        }

        output.push(ch);
    }

    Ok(output)
}

fn validate_storage(storage: &StorageConfig) -> Result<(), ConfigError> {
    let url = storage.url.trim();
    let supported =
        url.starts_with("sqlite://") || url.starts_with("sqlite::") || url == MEMORY_STORAGE_URL;
    if !supported {
        return Err(ConfigError::Validation(format!(
            "storage.url must be a sqlite URL (`sqlite://...`, `sqlite::...`) or \
             `{MEMORY_STORAGE_URL}`"
        )));
    }

    if storage.max_connections == 0 {
        return Err(ConfigError::Validation(
            "storage.max_connections must be greater than zero".to_string(),
        ));
    }

    if storage.timeout_secs == 0 || storage.timeout_secs > 300 {
        return Err(ConfigError::Validation(
            "storage.timeout_secs must be in range 1..=300".to_string(),
        ));
    }

    Ok(())
}

fn validate_backend(backend: &BackendConfig) -> Result<(), ConfigError> {
    if !(0.0..=1.0).contains(&backend.failure_rate) {
        return Err(ConfigError::Validation(
            "backend.failure_rate must be in range 0.0..=1.0".to_string(),
        ));
    }

    if !backend.latency_scale.is_finite() || backend.latency_scale < 0.0 {
        return Err(ConfigError::Validation(
            "backend.latency_scale must be a non-negative number".to_string(),
        ));
    }

    Ok(())
}

fn validate_logging(logging: &LoggingConfig) -> Result<(), ConfigError> {
    let level = logging.level.trim().to_ascii_lowercase();
    match level.as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
        _ => Err(ConfigError::Validation(
            "logging.level must be one of trace|debug|info|warn|error".to_string(),
        )),
    }
}

fn read_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn parse_u32(key: &str, value: &str) -> Result<u32, ConfigError> {
    value.trim().parse::<u32>().map_err(|_| invalid_override(key, value))
}

fn parse_u64(key: &str, value: &str) -> Result<u64, ConfigError> {
    value.trim().parse::<u64>().map_err(|_| invalid_override(key, value))
}

fn parse_f64(key: &str, value: &str) -> Result<f64, ConfigError> {
    value.trim().parse::<f64>().map_err(|_| invalid_override(key, value))
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(invalid_override(key, value)),
    }
}

fn invalid_override(key: &str, value: &str) -> ConfigError {
    ConfigError::InvalidEnvOverride { key: key.to_string(), value: value.to_string() }
}

#[derive(Debug, Default, Deserialize)]
struct ConfigPatch {
    storage: Option<StoragePatch>,
    backend: Option<BackendPatch>,
    logging: Option<LoggingPatch>,
}

#[derive(Debug, Default, Deserialize)]
struct StoragePatch {
    url: Option<String>,
    max_connections: Option<u32>,
    timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
struct BackendPatch {
    simulate_latency: Option<bool>,
    latency_scale: Option<f64>,
    failure_rate: Option<f64>,
    random_seed: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
struct LoggingPatch {
    level: Option<String>,
    format: Option<LogFormat>,
}
