use std::collections::HashSet;

use giftwise_core::catalog::Catalog;
use giftwise_core::config::{AppConfig, LoadOptions};
use giftwise_core::domain::answers::QuizAnswers;
use giftwise_core::recommendation::RecommendationEngine;
use giftwise_core::wire::{product_from_wire, product_to_wire};
use giftwise_db::open_storage;
use serde::Serialize;

use crate::commands::{CommandResult, EXIT_OK};

const EXIT_CHECK_FAILED: u8 = 1;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
enum CheckStatus {
    Pass,
    Fail,
    Skipped,
}

#[derive(Debug, Serialize)]
struct DoctorCheck {
    name: &'static str,
    status: CheckStatus,
    details: String,
}

impl DoctorCheck {
    fn pass(name: &'static str, details: impl Into<String>) -> Self {
        Self { name, status: CheckStatus::Pass, details: details.into() }
    }

    fn fail(name: &'static str, details: impl Into<String>) -> Self {
        Self { name, status: CheckStatus::Fail, details: details.into() }
    }
}

#[derive(Debug, Serialize)]
struct DoctorReport {
    overall_status: CheckStatus,
    summary: String,
    checks: Vec<DoctorCheck>,
}

pub fn run(options: &LoadOptions, json_output: bool) -> CommandResult {
    let report = build_report(options);
    let exit_code =
        if report.overall_status == CheckStatus::Pass { EXIT_OK } else { EXIT_CHECK_FAILED };

    let output = if json_output {
        serde_json::to_string_pretty(&report).unwrap_or_else(|error| {
            format!(
                "{{\"overall_status\":\"fail\",\"summary\":\"doctor serialization failed\",\
                 \"error\":\"{}\"}}",
                escape_json(&error.to_string())
            )
        })
    } else {
        render_human(&report)
    };

    CommandResult { exit_code, output }
}

fn build_report(options: &LoadOptions) -> DoctorReport {
    let mut checks = Vec::new();

    match AppConfig::load(options.clone()) {
        Ok(config) => {
            checks.push(DoctorCheck::pass(
                "config_validation",
                "configuration loaded and validated",
            ));
            checks.push(check_storage(&config));
        }
        Err(error) => {
            checks.push(DoctorCheck::fail("config_validation", error.to_string()));
            checks.push(DoctorCheck {
                name: "storage_connectivity",
                status: CheckStatus::Skipped,
                details: "skipped because configuration did not load".to_string(),
            });
        }
    }

    let catalog = Catalog::sample();
    checks.push(check_catalog(&catalog));
    checks.push(check_recommendations(&catalog));

    let all_pass = checks.iter().all(|check| check.status == CheckStatus::Pass);
    let overall_status = if all_pass { CheckStatus::Pass } else { CheckStatus::Fail };
    let summary = if all_pass {
        "doctor: all readiness checks passed".to_string()
    } else {
        "doctor: one or more readiness checks failed".to_string()
    };

    DoctorReport { overall_status, summary, checks }
}

fn check_storage(config: &AppConfig) -> DoctorCheck {
    const NAME: &str = "storage_connectivity";

    let runtime = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(error) => {
            return DoctorCheck::fail(NAME, format!("failed to initialize async runtime: {error}"));
        }
    };

    let result = runtime.block_on(async {
        let storage = open_storage(&config.storage)
            .await
            .map_err(|error| format!("failed to open storage: {error}"))?;
        storage.dev_mode().await.map_err(|error| format!("storage read failed: {error}"))?;
        Ok::<(), String>(())
    });

    match result {
        Ok(()) => DoctorCheck::pass(NAME, format!("opened `{}`", config.storage.url)),
        Err(error) => DoctorCheck::fail(NAME, error),
    }
}

fn check_catalog(catalog: &Catalog) -> DoctorCheck {
    const NAME: &str = "catalog_integrity";

    let mut seen = HashSet::new();
    if let Some(duplicate) = catalog.products().iter().find(|product| !seen.insert(&product.id)) {
        return DoctorCheck::fail(NAME, format!("duplicate product id {}", duplicate.id));
    }

    for product in catalog.products() {
        match product_from_wire(product_to_wire(product)) {
            Ok(decoded) if decoded == *product => {}
            Ok(_) => {
                let details = format!("product {} changes in transfer form", product.id);
                return DoctorCheck::fail(NAME, details);
            }
            Err(error) => {
                return DoctorCheck::fail(NAME, format!("product {}: {error}", product.id));
            }
        }
    }

    DoctorCheck::pass(NAME, format!("{} products with unique ids", catalog.len()))
}

fn check_recommendations(catalog: &Catalog) -> DoctorCheck {
    const NAME: &str = "recommendation_smoke";

    let answers = QuizAnswers::new("Анна", "16-24", "Мама", "2 000 - 5 000", "уют");
    let result = RecommendationEngine::new().recommend(&answers, catalog);

    if result.featured.as_str() == "5" && result.total > 0 {
        let details = format!("featured {} out of {} ranked", result.featured, result.total);
        DoctorCheck::pass(NAME, details)
    } else {
        DoctorCheck::fail(NAME, format!("unexpected featured gift {}", result.featured))
    }
}

fn render_human(report: &DoctorReport) -> String {
    let mut lines = Vec::new();
    lines.push(report.summary.clone());

    for check in &report.checks {
        let marker = match check.status {
            CheckStatus::Pass => "ok",
            CheckStatus::Fail => "fail",
            CheckStatus::Skipped => "skip",
        };
        lines.push(format!("- [{marker}] {}: {}", check.name, check.details));
    }

    lines.join("\n")
}

fn escape_json(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}
