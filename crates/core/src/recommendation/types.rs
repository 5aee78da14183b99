//! Types for the recommendation engine

use serde::{Deserialize, Serialize};

use crate::domain::product::ProductId;

/// Points contributed by each scoring rule
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    /// Within-budget reward or over-budget penalty
    pub budget: i32,
    /// Relationship match plus relationship-specific bonuses
    pub relationship: i32,
    /// Interest tokens found in tags and title
    pub interests: i32,
    /// Target age inside the product's age range
    pub age: i32,
}

impl ScoreBreakdown {
    pub fn total(&self) -> i32 {
        self.budget + self.relationship + self.interests + self.age
    }
}

/// A catalog product with its computed score
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoredProduct {
    pub product_id: ProductId,
    pub title: String,
    pub score: i32,
    pub breakdown: ScoreBreakdown,
    /// Index in the catalog, used as the tie-breaker
    pub catalog_position: usize,
}
