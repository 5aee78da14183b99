use clap::Subcommand;
use giftwise_core::config::LoadOptions;
use giftwise_core::domain::product::ProductId;
use giftwise_core::errors::ApplicationError;
use serde::Serialize;

use crate::commands::{summarize, with_retry, CommandResult, ProductSummary, Session};

#[derive(Debug, Clone, Subcommand)]
pub enum WishlistCommand {
    #[command(about = "Show saved products in the order they were added")]
    List,
    #[command(about = "Save a product; saving it twice keeps one entry")]
    Add { id: String },
    #[command(about = "Forget a saved product")]
    Remove { id: String },
}

#[derive(Debug, Serialize)]
struct WishlistView {
    ids: Vec<ProductId>,
    products: Vec<ProductSummary>,
}

pub fn run(options: &LoadOptions, command: &WishlistCommand) -> CommandResult {
    let session = match Session::open("wishlist", options) {
        Ok(session) => session,
        Err(result) => return result,
    };
    let client = &session.app.client;

    let outcome = session.block_on(async {
        let ids = match command {
            WishlistCommand::List => client.wishlist().get_all().await?,
            WishlistCommand::Add { id } => {
                let id = ProductId::new(id.trim());
                client.products().get_by_id(&id).await?;
                client.wishlist().add(&id).await?
            }
            WishlistCommand::Remove { id } => {
                client.wishlist().remove(&ProductId::new(id.trim())).await?
            }
        };

        let lookup = &ids;
        let products = with_retry("products.get_many", || async move {
            client.products().get_many(lookup).await
        })
        .await?;

        Ok::<_, ApplicationError>(WishlistView { products: summarize(&products), ids })
    });

    match outcome {
        Ok(view) => CommandResult::success(
            "wishlist",
            format!("{} saved products", view.ids.len()),
            view,
        ),
        Err(error) => CommandResult::from_error("wishlist", error),
    }
}
