use serde::{Deserialize, Serialize};

use crate::domain::product::ProductId;

/// Ranked outcome of a questionnaire submission.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationResult {
    /// Top pick; the fallback id when nothing was ranked.
    pub featured: ProductId,
    /// Best first.
    pub ranked: Vec<ProductId>,
    pub total: usize,
}
