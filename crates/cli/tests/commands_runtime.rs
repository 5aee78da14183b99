use std::env;
use std::sync::{Mutex, OnceLock};

use giftwise_cli::commands::answers::{AnswerArgs, AnswersCommand};
use giftwise_cli::commands::catalog::CatalogArgs;
use giftwise_cli::commands::profile::ProfileCommand;
use giftwise_cli::commands::recommend::RecommendArgs;
use giftwise_cli::commands::settings::DevModeArgs;
use giftwise_cli::commands::wishlist::WishlistCommand;
use giftwise_cli::commands::{
    answers, catalog, config, doctor, product, profile, recommend, settings, wishlist,
};
use giftwise_core::config::LoadOptions;
use serde_json::Value;
use tempfile::TempDir;

const QUIET_MEMORY: &[(&str, &str)] = &[
    ("GIFTWISE_STORAGE_URL", "memory://"),
    ("GIFTWISE_SIMULATE_LATENCY", "false"),
    ("GIFTWISE_FAILURE_RATE", "0"),
];

fn mother_answers() -> AnswerArgs {
    AnswerArgs {
        name: Some("Анна".to_string()),
        age_group: Some("16-24".to_string()),
        relationship: Some("Мама".to_string()),
        budget: Some("2 000 - 5 000".to_string()),
        interests: Some("уют".to_string()),
    }
}

#[test]
fn catalog_filters_by_tag() {
    with_env(QUIET_MEMORY, || {
        let args = CatalogArgs { tag: Some("зима".to_string()), ..CatalogArgs::default() };
        let result = catalog::run(&LoadOptions::default(), &args);
        assert_eq!(result.exit_code, 0, "expected catalog listing to succeed");

        let payload = parse_payload(&result.output);
        assert_eq!(payload["command"], "catalog");
        assert_eq!(payload["status"], "ok");
        assert_eq!(payload["data"].as_array().map(Vec::len), Some(3));
    });
}

#[test]
fn unknown_product_maps_to_not_found() {
    with_env(QUIET_MEMORY, || {
        let result = product::run(&LoadOptions::default(), "999");
        assert_eq!(result.exit_code, 4, "expected not-found exit code");

        let payload = parse_payload(&result.output);
        assert_eq!(payload["status"], "error");
        assert_eq!(payload["error_class"], "not_found");
    });
}

#[test]
fn similar_products_rank_by_tag_overlap() {
    with_env(QUIET_MEMORY, || {
        let result = product::similar(&LoadOptions::default(), "5");
        assert_eq!(result.exit_code, 0);

        let payload = parse_payload(&result.output);
        let first = &payload["data"][0];
        assert_eq!(first["id"], "13");
    });
}

#[test]
fn recommend_features_the_cozy_gift_for_mother() {
    with_env(QUIET_MEMORY, || {
        let args = RecommendArgs { answers: mother_answers(), submit: false, explain: true };
        let result = recommend::run(&LoadOptions::default(), &args);
        assert_eq!(result.exit_code, 0, "expected recommendation to succeed");

        let payload = parse_payload(&result.output);
        assert_eq!(payload["command"], "recommend");
        assert_eq!(payload["data"]["featured"], "5");

        let total = payload["data"]["total"].as_u64().unwrap_or_default() as usize;
        assert!(total > 0);
        assert_eq!(payload["data"]["products"].as_array().map(Vec::len), Some(total));
        assert_eq!(payload["data"]["explanation"].as_array().map(Vec::len), Some(total));
    });
}

#[test]
fn submitting_incomplete_answers_is_a_bad_request() {
    with_env(QUIET_MEMORY, || {
        let answers = AnswerArgs { name: None, ..mother_answers() };
        let args = RecommendArgs { answers, submit: true, explain: false };
        let result = recommend::run(&LoadOptions::default(), &args);
        assert_eq!(result.exit_code, 2, "expected validation failure code");

        let payload = parse_payload(&result.output);
        assert_eq!(payload["error_class"], "bad_request");
    });
}

#[test]
fn invalid_failure_rate_fails_config_validation() {
    with_env(
        &[("GIFTWISE_STORAGE_URL", "memory://"), ("GIFTWISE_FAILURE_RATE", "1.5")],
        || {
            let result = catalog::run(&LoadOptions::default(), &CatalogArgs::default());
            assert_eq!(result.exit_code, 2, "expected config validation failure code");

            let payload = parse_payload(&result.output);
            assert_eq!(payload["command"], "catalog");
            assert_eq!(payload["error_class"], "config_validation");
        },
    );
}

#[test]
fn certain_failure_surfaces_as_service_unavailable() {
    with_env(
        &[
            ("GIFTWISE_STORAGE_URL", "memory://"),
            ("GIFTWISE_SIMULATE_LATENCY", "false"),
            ("GIFTWISE_FAILURE_RATE", "1"),
        ],
        || {
            let args = RecommendArgs { answers: mother_answers(), submit: false, explain: false };
            let result = recommend::run(&LoadOptions::default(), &args);
            assert_eq!(result.exit_code, 5, "expected unavailable exit code after retries");

            let payload = parse_payload(&result.output);
            assert_eq!(payload["error_class"], "service_unavailable");
            let message = payload["message"].as_str().unwrap_or_default();
            assert!(message.contains("retry"));
        },
    );
}

#[test]
fn state_persists_across_commands_with_sqlite() {
    let dir = TempDir::new().expect("temp dir");
    let url = format!("sqlite://{}", dir.path().join("giftwise.db").display());
    let vars = [
        ("GIFTWISE_STORAGE_URL", url.as_str()),
        ("GIFTWISE_SIMULATE_LATENCY", "false"),
        ("GIFTWISE_FAILURE_RATE", "0"),
    ];

    with_env(&vars, || {
        let options = LoadOptions::default();

        for _ in 0..2 {
            let added = wishlist::run(&options, &WishlistCommand::Add { id: "5".to_string() });
            assert_eq!(added.exit_code, 0, "expected wishlist add to succeed");
        }
        let missing = wishlist::run(&options, &WishlistCommand::Add { id: "999".to_string() });
        assert_eq!(missing.exit_code, 4, "expected unknown product to be rejected");

        let listed = parse_payload(&wishlist::run(&options, &WishlistCommand::List).output);
        assert_eq!(listed["data"]["ids"], serde_json::json!(["5"]));
        assert_eq!(listed["data"]["products"][0]["id"], "5");

        let event = ProfileCommand::AddEvent {
            title: "День рождения".to_string(),
            date: "2026-12-01".to_string(),
            person: "Мама".to_string(),
            relationship: "Мама".to_string(),
            id: Some("birthday".to_string()),
        };
        assert_eq!(profile::run(&options, &event).exit_code, 0);
        let shown = parse_payload(&profile::run(&options, &ProfileCommand::Show).output);
        assert_eq!(shown["data"]["events"][0]["id"], "birthday");

        let unknown = ProfileCommand::RemoveEvent { id: "nope".to_string() };
        assert_eq!(profile::run(&options, &unknown).exit_code, 4);

        let enabled = settings::dev_mode(&options, &DevModeArgs { on: true, off: false });
        assert_eq!(enabled.exit_code, 0);
        let shown = parse_payload(&settings::dev_mode(&options, &DevModeArgs::default()).output);
        assert_eq!(shown["data"]["dev_mode"], true);
    });
}

#[test]
fn answers_draft_then_submit_round_trip() {
    let dir = TempDir::new().expect("temp dir");
    let url = format!("sqlite://{}", dir.path().join("answers.db").display());
    let vars = [("GIFTWISE_STORAGE_URL", url.as_str()), ("GIFTWISE_SIMULATE_LATENCY", "false")];

    with_env(&vars, || {
        let options = LoadOptions::default();
        let partial = AnswerArgs { name: Some("Анна".to_string()), ..AnswerArgs::default() };

        let saved = answers::run(&options, &AnswersCommand::SaveDraft(partial));
        assert_eq!(saved.exit_code, 0);
        let payload = parse_payload(&saved.output);
        assert_eq!(payload["data"]["draft"]["name"], "Анна");
        assert_eq!(payload["data"]["submitted"], Value::Null);

        let rest = AnswerArgs { name: None, ..mother_answers() };
        let submitted = answers::run(&options, &AnswersCommand::Submit(rest));
        assert_eq!(submitted.exit_code, 0, "expected completed draft to submit");
        let payload = parse_payload(&submitted.output);
        assert_eq!(payload["data"]["draft"], Value::Null);
        assert_eq!(payload["data"]["submitted"]["relationship"], "Мама");

        let recommended = recommend::run(&options, &RecommendArgs::default());
        let payload = parse_payload(&recommended.output);
        assert_eq!(payload["data"]["answers"]["name"], "Анна");
        assert_eq!(payload["data"]["featured"], "5");
    });
}

#[test]
fn config_reports_env_sources() {
    with_env(QUIET_MEMORY, || {
        let result = config::run(&LoadOptions::default());
        assert_eq!(result.exit_code, 0);

        let payload = parse_payload(&result.output);
        let entries = payload["data"].as_array().cloned().unwrap_or_default();
        let entry = |key: &str| {
            entries.iter().find(|entry| entry["key"] == key).cloned().expect("config entry")
        };

        let storage = entry("storage.url");
        assert_eq!(storage["value"], "memory://");
        assert_eq!(storage["source"], "env (GIFTWISE_STORAGE_URL)");

        let level = entry("logging.level");
        assert_eq!(level["source"], "default");
    });
}

#[test]
fn missing_explicit_config_file_is_rejected() {
    with_env(QUIET_MEMORY, || {
        let options = LoadOptions {
            config_path: Some("definitely-missing-giftwise.toml".into()),
            require_file: true,
            ..LoadOptions::default()
        };
        let result = config::run(&options);
        assert_eq!(result.exit_code, 2);
        assert_eq!(parse_payload(&result.output)["error_class"], "config_validation");
    });
}

#[test]
fn doctor_passes_with_memory_storage() {
    with_env(QUIET_MEMORY, || {
        let result = doctor::run(&LoadOptions::default(), true);
        assert_eq!(result.exit_code, 0, "expected all doctor checks to pass");

        let payload = parse_payload(&result.output);
        assert_eq!(payload["overall_status"], "pass");
        assert_eq!(payload["checks"].as_array().map(Vec::len), Some(4));
    });
}

#[test]
fn doctor_reports_config_failure_in_human_output() {
    with_env(&[("GIFTWISE_STORAGE_URL", "postgres://nope")], || {
        let result = doctor::run(&LoadOptions::default(), false);
        assert_eq!(result.exit_code, 1);
        assert!(result.output.contains("[fail] config_validation"));
        assert!(result.output.contains("[skip] storage_connectivity"));
        assert!(result.output.contains("[ok] catalog_integrity"));
    });
}

fn parse_payload(output: &str) -> Value {
    serde_json::from_str(output).expect("command output should be valid JSON")
}

fn with_env(vars: &[(&str, &str)], test_fn: impl FnOnce()) {
    static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    let _guard =
        ENV_LOCK.get_or_init(|| Mutex::new(())).lock().expect("env mutex should not be poisoned");

    let keys = [
        "GIFTWISE_CONFIG",
        "GIFTWISE_STORAGE_URL",
        "GIFTWISE_STORAGE_MAX_CONNECTIONS",
        "GIFTWISE_STORAGE_TIMEOUT_SECS",
        "GIFTWISE_SIMULATE_LATENCY",
        "GIFTWISE_LATENCY_SCALE",
        "GIFTWISE_FAILURE_RATE",
        "GIFTWISE_RANDOM_SEED",
        "GIFTWISE_LOGGING_LEVEL",
        "GIFTWISE_LOGGING_FORMAT",
        "GIFTWISE_LOG_LEVEL",
        "GIFTWISE_LOG_FORMAT",
    ];

    let previous_values: Vec<(&str, Option<String>)> =
        keys.iter().map(|key| (*key, env::var(key).ok())).collect();

    for key in &keys {
        env::remove_var(key);
    }
    for (key, value) in vars {
        env::set_var(key, value);
    }

    test_fn();

    for (key, value) in previous_values {
        if let Some(value) = value {
            env::set_var(key, value);
        } else {
            env::remove_var(key);
        }
    }
}
