use std::time::Duration;

use giftwise_core::config::BackendConfig;

/// Simulated network delay applied by the mock backend.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Latency {
    enabled: bool,
    scale: f64,
}

impl Latency {
    pub fn new(scale: f64) -> Self {
        let scale = if scale.is_finite() { scale.max(0.0) } else { 0.0 };
        Self { enabled: true, scale }
    }

    pub fn disabled() -> Self {
        Self { enabled: false, scale: 0.0 }
    }

    pub fn from_config(config: &BackendConfig) -> Self {
        if config.simulate_latency {
            Self::new(config.latency_scale)
        } else {
            Self::disabled()
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled && self.scale > 0.0
    }

    pub fn scaled(&self, base: Duration) -> Duration {
        if self.is_enabled() {
            base.mul_f64(self.scale)
        } else {
            Duration::ZERO
        }
    }

    pub async fn pause(&self, base: Duration) {
        let delay = self.scaled(base);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}

impl Default for Latency {
    fn default() -> Self {
        Self::new(1.0)
    }
}
