use std::sync::Arc;

use giftwise_core::catalog::Catalog;
use giftwise_core::config::{AppConfig, BackendConfig, ConfigError, LoadOptions};
use giftwise_core::random::{RandomSource, SeededRandom, SystemRandom};
use giftwise_db::{open_storage, RepositoryError};
use thiserror::Error;
use tracing::info;

use crate::backend::MockBackend;
use crate::client::Client;
use crate::latency::Latency;
use crate::policy::ProbabilisticFailure;

pub struct Application {
    pub config: AppConfig,
    pub client: Client,
}

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("storage initialization failed: {0}")]
    Storage(#[from] RepositoryError),
}

pub async fn bootstrap(options: LoadOptions) -> Result<Application, BootstrapError> {
    info!(event_name = "system.bootstrap.start", "starting application bootstrap");
    let config = AppConfig::load(options)?;
    bootstrap_with_config(config).await
}

/// Wires storage, the sample catalog and the simulation policies from an already loaded config.
pub async fn bootstrap_with_config(config: AppConfig) -> Result<Application, BootstrapError> {
    let storage = open_storage(&config.storage).await?;
    info!(
        event_name = "system.bootstrap.storage_ready",
        memory = config.storage.is_memory(),
        "storage ready"
    );

    let backend = MockBackend::new(Catalog::sample(), storage)
        .with_random(random_source(&config.backend))
        .with_failure_policy(Arc::new(ProbabilisticFailure::new(config.backend.failure_rate)))
        .with_latency(Latency::from_config(&config.backend));

    info!(
        event_name = "system.bootstrap.complete",
        products = backend.catalog().len(),
        simulate_latency = config.backend.simulate_latency,
        failure_rate = config.backend.failure_rate,
        "application ready"
    );

    Ok(Application { config, client: Client::new(backend) })
}

pub fn random_source(config: &BackendConfig) -> Arc<dyn RandomSource> {
    match config.random_seed {
        Some(seed) => Arc::new(SeededRandom::new(seed)),
        None => Arc::new(SystemRandom),
    }
}

#[cfg(test)]
mod tests {
    use giftwise_core::config::{ConfigOverrides, LoadOptions};

    use super::bootstrap;

    #[tokio::test]
    async fn bootstrap_rejects_invalid_failure_rate() {
        let result = bootstrap(LoadOptions {
            config_path: Some("does-not-exist.toml".into()),
            overrides: ConfigOverrides {
                storage_url: Some("memory://".to_string()),
                failure_rate: Some(2.0),
                ..ConfigOverrides::default()
            },
            ..LoadOptions::default()
        })
        .await;

        let message = result.err().map(|error| error.to_string()).unwrap_or_default();
        assert!(message.contains("backend.failure_rate"), "unexpected error: {message}");
    }

    #[tokio::test]
    async fn bootstrap_with_memory_storage_serves_the_sample_catalog() {
        let app = bootstrap(LoadOptions {
            config_path: Some("does-not-exist.toml".into()),
            overrides: ConfigOverrides {
                storage_url: Some("memory://".to_string()),
                simulate_latency: Some(false),
                failure_rate: Some(0.0),
                random_seed: Some(1),
                ..ConfigOverrides::default()
            },
            ..LoadOptions::default()
        })
        .await
        .expect("bootstrap should succeed");

        assert_eq!(app.client.backend().catalog().len(), 14);
        let wishlist = app.client.wishlist().get_all().await.expect("wishlist");
        assert!(wishlist.is_empty());
    }
}
