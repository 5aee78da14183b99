use clap::Args;
use giftwise_core::config::LoadOptions;
use giftwise_core::domain::answers::QuizAnswers;
use giftwise_core::errors::ApplicationError;
use giftwise_core::recommendation::ScoredProduct;
use serde::Serialize;

use crate::commands::answers::AnswerArgs;
use crate::commands::{summarize, with_retry, CommandResult, ProductSummary, Session};

#[derive(Debug, Clone, Default, Args)]
pub struct RecommendArgs {
    #[command(flatten)]
    pub answers: AnswerArgs,
    #[arg(long, help = "Validate the answers and store them as submitted before ranking")]
    pub submit: bool,
    #[arg(long, help = "Include per-rule points for every ranked product")]
    pub explain: bool,
}

#[derive(Debug, Serialize)]
struct RecommendationView {
    answers: QuizAnswers,
    featured: String,
    total: usize,
    products: Vec<ProductSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    explanation: Option<Vec<ScoredProduct>>,
}

/// Without answer flags the last submitted answers are used, then the draft.
pub fn run(options: &LoadOptions, args: &RecommendArgs) -> CommandResult {
    let session = match Session::open("recommend", options) {
        Ok(session) => session,
        Err(result) => return result,
    };
    let client = &session.app.client;

    let outcome = session.block_on(async {
        let base = if args.answers.is_empty() {
            match client.answers().last_submitted().await? {
                Some(answers) => answers,
                None => client.answers().draft().await?.unwrap_or_default(),
            }
        } else {
            QuizAnswers::default()
        };
        let answers = args.answers.apply_to(base);

        if args.submit {
            client.answers().submit(&answers).await?;
        }

        let result = client.recommendations().create(&answers).await?;
        let ranked_ids = &result.ranked;
        let products = with_retry("products.get_many", || async move {
            client.products().get_many(ranked_ids).await
        })
        .await?;

        let explanation = if args.explain {
            let mut ranked = client.recommendations().explain(&answers).await;
            ranked.truncate(result.total);
            Some(ranked)
        } else {
            None
        };

        Ok::<_, ApplicationError>(RecommendationView {
            answers,
            featured: result.featured.to_string(),
            total: result.total,
            products: summarize(&products),
            explanation,
        })
    });

    match outcome {
        Ok(view) => CommandResult::success(
            "recommend",
            format!("featured gift {} out of {} ranked", view.featured, view.total),
            view,
        ),
        Err(error) => CommandResult::from_error("recommend", error),
    }
}
