use giftwise_core::config::LoadOptions;
use giftwise_core::domain::product::ProductId;

use crate::commands::{summarize, CommandResult, Session};

/// Full product record, including reviews when present.
pub fn run(options: &LoadOptions, id: &str) -> CommandResult {
    let session = match Session::open("product", options) {
        Ok(session) => session,
        Err(result) => return result,
    };

    let client = &session.app.client;
    let id = ProductId::new(id.trim());
    match session.block_on(client.products().get_by_id(&id)) {
        Ok(product) => CommandResult::success("product", product.title.clone(), &product),
        Err(error) => CommandResult::from_error("product", error),
    }
}

pub fn similar(options: &LoadOptions, id: &str) -> CommandResult {
    let session = match Session::open("similar", options) {
        Ok(session) => session,
        Err(result) => return result,
    };

    let client = &session.app.client;
    let id = ProductId::new(id.trim());
    match session.block_on(client.products().get_similar(&id)) {
        Ok(products) => CommandResult::success(
            "similar",
            format!("{} products similar to {id}", products.len()),
            summarize(&products),
        ),
        Err(error) => CommandResult::from_error("similar", error),
    }
}
