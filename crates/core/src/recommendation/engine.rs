//! Recommendation engine implementation

use super::scoring::ScoreCalculator;
use super::signals::AnswerSignals;
use super::types::ScoredProduct;
use super::{FALLBACK_FEATURED_ID, MAX_RECOMMENDATIONS};
use crate::catalog::Catalog;
use crate::domain::answers::QuizAnswers;
use crate::domain::product::ProductId;
use crate::domain::recommendation::RecommendationResult;

/// Ranks catalog products against questionnaire answers.
#[derive(Debug, Clone)]
pub struct RecommendationEngine {
    calculator: ScoreCalculator,
    max_results: usize,
}

impl RecommendationEngine {
    pub fn new() -> Self {
        Self { calculator: ScoreCalculator::new(), max_results: MAX_RECOMMENDATIONS }
    }

    pub fn with_calculator(calculator: ScoreCalculator) -> Self {
        Self { calculator, max_results: MAX_RECOMMENDATIONS }
    }

    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    /// Every catalog product with its score, best first. Equal scores keep catalog order.
    pub fn rank(&self, answers: &QuizAnswers, catalog: &Catalog) -> Vec<ScoredProduct> {
        let signals = AnswerSignals::from_answers(answers);

        let mut scored: Vec<ScoredProduct> = catalog
            .products()
            .iter()
            .enumerate()
            .map(|(catalog_position, product)| {
                let breakdown = self.calculator.score(&signals, product);
                ScoredProduct {
                    product_id: product.id.clone(),
                    title: product.title.clone(),
                    score: breakdown.total(),
                    breakdown,
                    catalog_position,
                }
            })
            .collect();

        // Vec::sort_by is stable, so ties stay in catalog order.
        scored.sort_by(|left, right| right.score.cmp(&left.score));
        scored
    }

    /// Top products for the answers; the first one is featured.
    pub fn recommend(&self, answers: &QuizAnswers, catalog: &Catalog) -> RecommendationResult {
        let ranked: Vec<ProductId> = self
            .rank(answers, catalog)
            .into_iter()
            .take(self.max_results)
            .map(|scored| scored.product_id)
            .collect();

        let featured =
            ranked.first().cloned().unwrap_or_else(|| ProductId::new(FALLBACK_FEATURED_ID));

        RecommendationResult { featured, total: ranked.len(), ranked }
    }
}

impl Default for RecommendationEngine {
    fn default() -> Self {
        Self::new()
    }
}
