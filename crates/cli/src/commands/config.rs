use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use giftwise_core::config::{AppConfig, LoadOptions};
use serde::Serialize;
use toml::Value;

use crate::commands::{CommandResult, EXIT_BAD_REQUEST};

#[derive(Debug, Serialize)]
struct ConfigEntry {
    key: &'static str,
    value: String,
    source: String,
}

struct FileDoc {
    path: PathBuf,
    doc: Value,
}

/// Effective configuration with the layer each value came from.
pub fn run(options: &LoadOptions) -> CommandResult {
    let config = match AppConfig::load(options.clone()) {
        Ok(config) => config,
        Err(error) => {
            return CommandResult::failure(
                "config",
                "config_validation",
                format!("config validation failed: {error}"),
                EXIT_BAD_REQUEST,
            );
        }
    };

    let file = detect_config_path(options.config_path.as_deref()).and_then(|path| {
        let doc = fs::read_to_string(&path).ok()?.parse::<Value>().ok()?;
        Some(FileDoc { path, doc })
    });
    let overrides = &options.overrides;
    let source = |key: &str, env_keys: &[&str], overridden: bool| {
        field_source(key, env_keys, overridden, file.as_ref())
    };

    let seed =
        config.backend.random_seed.map_or_else(|| "<unset>".to_string(), |seed| seed.to_string());
    let entries = vec![
        ConfigEntry {
            key: "storage.url",
            value: config.storage.url.clone(),
            source: source(
                "storage.url",
                &["GIFTWISE_STORAGE_URL"],
                overrides.storage_url.is_some(),
            ),
        },
        ConfigEntry {
            key: "storage.max_connections",
            value: config.storage.max_connections.to_string(),
            source: source("storage.max_connections", &["GIFTWISE_STORAGE_MAX_CONNECTIONS"], false),
        },
        ConfigEntry {
            key: "storage.timeout_secs",
            value: config.storage.timeout_secs.to_string(),
            source: source("storage.timeout_secs", &["GIFTWISE_STORAGE_TIMEOUT_SECS"], false),
        },
        ConfigEntry {
            key: "backend.simulate_latency",
            value: config.backend.simulate_latency.to_string(),
            source: source(
                "backend.simulate_latency",
                &["GIFTWISE_SIMULATE_LATENCY"],
                overrides.simulate_latency.is_some(),
            ),
        },
        ConfigEntry {
            key: "backend.latency_scale",
            value: config.backend.latency_scale.to_string(),
            source: source("backend.latency_scale", &["GIFTWISE_LATENCY_SCALE"], false),
        },
        ConfigEntry {
            key: "backend.failure_rate",
            value: config.backend.failure_rate.to_string(),
            source: source(
                "backend.failure_rate",
                &["GIFTWISE_FAILURE_RATE"],
                overrides.failure_rate.is_some(),
            ),
        },
        ConfigEntry {
            key: "backend.random_seed",
            value: seed,
            source: source(
                "backend.random_seed",
                &["GIFTWISE_RANDOM_SEED"],
                overrides.random_seed.is_some(),
            ),
        },
        ConfigEntry {
            key: "logging.level",
            value: config.logging.level.clone(),
            source: source(
                "logging.level",
                &["GIFTWISE_LOGGING_LEVEL", "GIFTWISE_LOG_LEVEL"],
                overrides.log_level.is_some(),
            ),
        },
        ConfigEntry {
            key: "logging.format",
            value: format!("{:?}", config.logging.format).to_lowercase(),
            source: source(
                "logging.format",
                &["GIFTWISE_LOGGING_FORMAT", "GIFTWISE_LOG_FORMAT"],
                overrides.log_format.is_some(),
            ),
        },
    ];

    CommandResult::success(
        "config",
        "effective config (source precedence: override > env > file > default)",
        entries,
    )
}

fn detect_config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    let explicit = explicit
        .map(Path::to_path_buf)
        .or_else(|| env::var_os("GIFTWISE_CONFIG").map(PathBuf::from));
    if let Some(path) = explicit {
        return path.exists().then_some(path);
    }

    [PathBuf::from("giftwise.toml"), PathBuf::from("config/giftwise.toml")]
        .into_iter()
        .find(|path| path.exists())
}

fn field_source(
    key_path: &str,
    env_keys: &[&str],
    overridden: bool,
    file: Option<&FileDoc>,
) -> String {
    if overridden {
        return "override".to_string();
    }

    for env_key in env_keys {
        let set = env::var(env_key).map(|value| !value.trim().is_empty()).unwrap_or(false);
        if set {
            return format!("env ({env_key})");
        }
    }

    if let Some(file) = file {
        if contains_path(&file.doc, key_path) {
            return format!("file ({})", file.path.display());
        }
    }

    "default".to_string()
}

fn contains_path(root: &Value, key_path: &str) -> bool {
    let mut current = root;
    for key in key_path.split('.') {
        let Some(next) = current.get(key) else {
            return false;
        };
        current = next;
    }
    true
}
