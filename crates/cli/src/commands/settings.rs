use clap::Args;
use giftwise_core::config::LoadOptions;
use giftwise_core::errors::ApplicationError;
use serde_json::json;

use crate::commands::{CommandResult, Session};

#[derive(Debug, Clone, Default, Args)]
pub struct DevModeArgs {
    #[arg(long, conflicts_with = "off", help = "Enable developer mode")]
    pub on: bool,
    #[arg(long, help = "Disable developer mode")]
    pub off: bool,
}

impl DevModeArgs {
    fn requested(&self) -> Option<bool> {
        match (self.on, self.off) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }
}

/// Shows the developer-mode flag, switching it first when `--on` or `--off` is given.
pub fn dev_mode(options: &LoadOptions, args: &DevModeArgs) -> CommandResult {
    let session = match Session::open("dev-mode", options) {
        Ok(session) => session,
        Err(result) => return result,
    };
    let settings = session.app.client.settings();

    let outcome = session.block_on(async {
        if let Some(enabled) = args.requested() {
            settings.set_dev_mode(enabled).await?;
        }
        Ok::<_, ApplicationError>(settings.dev_mode().await?)
    });

    match outcome {
        Ok(enabled) => CommandResult::success(
            "dev-mode",
            if enabled { "developer mode on" } else { "developer mode off" },
            json!({ "dev_mode": enabled }),
        ),
        Err(error) => CommandResult::from_error("dev-mode", error),
    }
}
