use clap::Args;
use giftwise_core::catalog::ProductQuery;
use giftwise_core::config::LoadOptions;

use crate::commands::{summarize, CommandResult, Session};

#[derive(Debug, Clone, Default, Args)]
pub struct CatalogArgs {
    #[arg(long, help = "Case-insensitive tag substring")]
    pub tag: Option<String>,
    #[arg(long, help = "Exact category name")]
    pub category: Option<String>,
    #[arg(long, help = "Maximum number of products")]
    pub limit: Option<usize>,
}

impl CatalogArgs {
    fn query(&self) -> ProductQuery {
        ProductQuery { limit: self.limit, tag: self.tag.clone(), category: self.category.clone() }
    }
}

pub fn run(options: &LoadOptions, args: &CatalogArgs) -> CommandResult {
    let session = match Session::open("catalog", options) {
        Ok(session) => session,
        Err(result) => return result,
    };

    let client = &session.app.client;
    let query = args.query();
    match session.block_on(client.products().list(&query)) {
        Ok(products) => CommandResult::success(
            "catalog",
            format!("listed {} products", products.len()),
            summarize(&products),
        ),
        Err(error) => CommandResult::from_error("catalog", error),
    }
}
