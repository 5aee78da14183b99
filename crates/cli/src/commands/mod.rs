pub mod answers;
pub mod catalog;
pub mod config;
pub mod doctor;
pub mod product;
pub mod profile;
pub mod recommend;
pub mod settings;
pub mod wishlist;

use std::future::Future;

use giftwise_api::{bootstrap_with_config, Application};
use giftwise_core::config::{AppConfig, LoadOptions};
use giftwise_core::domain::product::Product;
use giftwise_core::errors::{ApplicationError, InterfaceError};
use serde::Serialize;
use serde_json::Value;
use tracing::warn;

pub const EXIT_OK: u8 = 0;
pub const EXIT_BAD_REQUEST: u8 = 2;
pub const EXIT_STARTUP: u8 = 3;
pub const EXIT_NOT_FOUND: u8 = 4;
pub const EXIT_UNAVAILABLE: u8 = 5;
pub const EXIT_INTERNAL: u8 = 6;

/// Attempts per call when the backend reports a transient failure.
pub const MAX_ATTEMPTS: usize = 3;

#[derive(Debug, Clone)]
pub struct CommandResult {
    pub exit_code: u8,
    pub output: String,
}

#[derive(Debug, Serialize)]
struct CommandOutcome {
    command: String,
    status: String,
    error_class: Option<String>,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<Value>,
}

impl CommandResult {
    pub fn success(command: &str, message: impl Into<String>, data: impl Serialize) -> Self {
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "ok".to_string(),
            error_class: None,
            message: message.into(),
            data: serde_json::to_value(data).ok(),
        };
        Self { exit_code: EXIT_OK, output: serialize_payload(payload) }
    }

    pub fn failure(
        command: &str,
        error_class: &str,
        message: impl Into<String>,
        exit_code: u8,
    ) -> Self {
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "error".to_string(),
            error_class: Some(error_class.to_string()),
            message: message.into(),
            data: None,
        };
        Self { exit_code, output: serialize_payload(payload) }
    }

    pub fn from_error(command: &str, error: ApplicationError) -> Self {
        let detail = error.to_string();
        let retryable = error.is_retryable();
        let mapped = error.into_interface(command);

        let (error_class, exit_code) = match mapped {
            InterfaceError::BadRequest { .. } => ("bad_request", EXIT_BAD_REQUEST),
            InterfaceError::NotFound { .. } => ("not_found", EXIT_NOT_FOUND),
            InterfaceError::ServiceUnavailable { .. } => ("service_unavailable", EXIT_UNAVAILABLE),
            InterfaceError::Internal { .. } => ("internal", EXIT_INTERNAL),
        };
        let hint = if retryable { " (retry the command)" } else { "" };

        Self::failure(
            command,
            error_class,
            format!("{} {detail}{hint}", mapped.user_message()),
            exit_code,
        )
    }
}

/// A bootstrapped application plus the runtime that drives it for one command.
pub struct Session {
    // Dropped before the runtime so storage shuts down inside it.
    pub app: Application,
    runtime: tokio::runtime::Runtime,
}

impl Session {
    pub fn open(command: &str, options: &LoadOptions) -> Result<Self, CommandResult> {
        let config = AppConfig::load(options.clone()).map_err(|error| {
            CommandResult::failure(
                command,
                "config_validation",
                format!("configuration issue: {error}"),
                EXIT_BAD_REQUEST,
            )
        })?;

        let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build().map_err(
            |error| {
                CommandResult::failure(
                    command,
                    "runtime_init",
                    format!("failed to initialize async runtime: {error}"),
                    EXIT_STARTUP,
                )
            },
        )?;

        let app = runtime.block_on(bootstrap_with_config(config)).map_err(|error| {
            CommandResult::failure(command, "storage_init", error.to_string(), EXIT_STARTUP)
        })?;

        Ok(Self { app, runtime })
    }

    pub fn block_on<F: Future>(&self, future: F) -> F::Output {
        self.runtime.block_on(future)
    }
}

/// Re-runs `operation` while it fails with a retryable error, up to [`MAX_ATTEMPTS`] times.
pub async fn with_retry<T, F, Fut>(
    operation_name: &str,
    mut operation: F,
) -> Result<T, ApplicationError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ApplicationError>>,
{
    let mut attempt = 1;
    loop {
        match operation().await {
            Err(error) if error.is_retryable() && attempt < MAX_ATTEMPTS => {
                warn!(
                    event_name = "cli.retry",
                    operation = operation_name,
                    attempt,
                    error = %error,
                    "retrying after transient failure"
                );
                attempt += 1;
            }
            result => return result,
        }
    }
}

/// Condensed product row for list output.
#[derive(Debug, Serialize)]
pub struct ProductSummary {
    pub id: String,
    pub title: String,
    pub price: u32,
    pub currency: String,
    pub category: String,
    pub marketplace: String,
}

impl From<&Product> for ProductSummary {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.to_string(),
            title: product.title.clone(),
            price: product.price,
            currency: product.currency.clone(),
            category: product.category.clone(),
            marketplace: product.marketplace.label().to_string(),
        }
    }
}

pub fn summarize(products: &[Product]) -> Vec<ProductSummary> {
    products.iter().map(ProductSummary::from).collect()
}

fn serialize_payload(payload: CommandOutcome) -> String {
    serde_json::to_string(&payload).unwrap_or_else(|error| {
        format!(
            "{{\"command\":\"unknown\",\"status\":\"error\",\
             \"error_class\":\"serialization\",\"message\":\"{}\"}}",
            error.to_string().replace('\\', "\\\\").replace('"', "\\\"")
        )
    })
}

#[cfg(test)]
mod tests {
    use giftwise_core::errors::{ApplicationError, DomainError};
    use serde_json::Value;

    use super::{CommandResult, EXIT_BAD_REQUEST, EXIT_NOT_FOUND, EXIT_UNAVAILABLE};

    fn payload(result: &CommandResult) -> Value {
        serde_json::from_str(&result.output).expect("command output is json")
    }

    #[test]
    fn application_errors_map_to_exit_codes() {
        let missing =
            CommandResult::from_error("product", ApplicationError::not_found("product", "999"));
        assert_eq!(missing.exit_code, EXIT_NOT_FOUND);
        assert_eq!(payload(&missing)["error_class"], "not_found");

        let invalid = CommandResult::from_error(
            "answers",
            ApplicationError::Domain(DomainError::MissingField { field: "budget" }),
        );
        assert_eq!(invalid.exit_code, EXIT_BAD_REQUEST);

        let flaky = CommandResult::from_error(
            "product",
            ApplicationError::TransientNetwork { operation: "products.get_many" },
        );
        assert_eq!(flaky.exit_code, EXIT_UNAVAILABLE);
        let message = payload(&flaky)["message"].as_str().unwrap_or_default().to_string();
        assert!(message.contains("retry"), "retry hint missing: {message}");
    }

    #[test]
    fn success_payload_carries_data() {
        let result = CommandResult::success("catalog", "listed 1 products", vec!["5"]);
        let value = payload(&result);

        assert_eq!(result.exit_code, 0);
        assert_eq!(value["status"], "ok");
        assert_eq!(value["data"][0], "5");
        assert!(value["error_class"].is_null());
    }
}
