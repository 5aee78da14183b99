pub mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use giftwise_core::config::{ConfigOverrides, LoadOptions};

use crate::commands::answers::AnswersCommand;
use crate::commands::catalog::CatalogArgs;
use crate::commands::profile::ProfileCommand;
use crate::commands::recommend::RecommendArgs;
use crate::commands::settings::DevModeArgs;
use crate::commands::wishlist::WishlistCommand;
use crate::commands::CommandResult;

#[derive(Debug, Parser)]
#[command(
    name = "giftwise",
    about = "Giftwise gift recommendation CLI",
    long_about = "Browse the gift catalog, answer the questionnaire, get ranked recommendations, \
                  and manage the wishlist, profile and calendar.",
    after_help = "Examples:\n  giftwise catalog --tag зима\n  \
                  giftwise recommend --relationship Мама --budget \"2 000 - 5 000\"\n  \
                  giftwise wishlist add 5\n  giftwise doctor --json"
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Default, Args)]
pub struct GlobalArgs {
    #[arg(long, global = true, help = "Path to a giftwise.toml; it must exist when given")]
    pub config: Option<PathBuf>,
    #[arg(
        long,
        global = true,
        help = "Storage URL, e.g. sqlite://giftwise.db?mode=rwc or memory://"
    )]
    pub storage_url: Option<String>,
    #[arg(long, global = true, help = "Seed for deterministic shuffles and failure injection")]
    pub seed: Option<u64>,
    #[arg(long, global = true, help = "Skip simulated network delays")]
    pub no_latency: bool,
}

impl GlobalArgs {
    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            config_path: self.config.clone(),
            require_file: self.config.is_some(),
            overrides: ConfigOverrides {
                storage_url: self.storage_url.clone(),
                random_seed: self.seed,
                simulate_latency: self.no_latency.then_some(false),
                ..ConfigOverrides::default()
            },
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    #[command(about = "List catalog products, optionally filtered by tag and category")]
    Catalog(CatalogArgs),
    #[command(about = "Show one product with its reviews")]
    Product { id: String },
    #[command(about = "List products sharing the category or a tag, closest tag overlap first")]
    Similar { id: String },
    #[command(about = "Rank the catalog for the questionnaire answers")]
    Recommend(RecommendArgs),
    #[command(about = "Manage saved products")]
    Wishlist {
        #[command(subcommand)]
        command: WishlistCommand,
    },
    #[command(about = "Show or edit the profile and its calendar events")]
    Profile {
        #[command(subcommand)]
        command: ProfileCommand,
    },
    #[command(about = "Manage questionnaire drafts and submitted answers")]
    Answers {
        #[command(subcommand)]
        command: AnswersCommand,
    },
    #[command(about = "Show or toggle the developer-mode flag")]
    DevMode(DevModeArgs),
    #[command(about = "Inspect effective configuration values with source attribution")]
    Config,
    #[command(about = "Validate config, storage connectivity, catalog integrity and ranking")]
    Doctor {
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
}

pub fn execute(cli: &Cli) -> CommandResult {
    let options = cli.global.load_options();

    match &cli.command {
        Command::Catalog(args) => commands::catalog::run(&options, args),
        Command::Product { id } => commands::product::run(&options, id),
        Command::Similar { id } => commands::product::similar(&options, id),
        Command::Recommend(args) => commands::recommend::run(&options, args),
        Command::Wishlist { command } => commands::wishlist::run(&options, command),
        Command::Profile { command } => commands::profile::run(&options, command),
        Command::Answers { command } => commands::answers::run(&options, command),
        Command::DevMode(args) => commands::settings::dev_mode(&options, args),
        Command::Config => commands::config::run(&options),
        Command::Doctor { json } => commands::doctor::run(&options, *json),
    }
}

pub fn run(cli: &Cli) -> ExitCode {
    let result = execute(cli);
    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}
