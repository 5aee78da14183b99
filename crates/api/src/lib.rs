pub mod backend;
pub mod bootstrap;
pub mod client;
pub mod latency;
pub mod policy;

pub use backend::MockBackend;
pub use bootstrap::{bootstrap, bootstrap_with_config, Application, BootstrapError};
pub use client::Client;
pub use latency::Latency;
pub use policy::{AlwaysFail, FailurePolicy, NeverFail, ProbabilisticFailure};
