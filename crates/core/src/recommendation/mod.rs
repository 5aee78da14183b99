//! Gift recommendation engine
//!
//! Scores every catalog product against the questionnaire answers with fixed additive weights,
//! then ranks by score with catalog order breaking ties. Scoring is pure and deterministic:
//! the same answers and catalog always produce the same ranking.

mod engine;
mod scoring;
mod signals;
mod types;

pub use engine::RecommendationEngine;
pub use scoring::{ScoreCalculator, ScoringWeights};
pub use signals::{AnswerSignals, BudgetCeiling};
pub use types::{ScoreBreakdown, ScoredProduct};

/// Default scoring weights
pub const DEFAULT_WEIGHTS: ScoringWeights = ScoringWeights {
    within_budget: 5,
    over_budget: -10,
    relationship_match: 5,
    partner_bonus: 3,
    family_bonus: 5,
    parent_bonus: 2,
    interest_in_tags: 4,
    interest_in_title: 3,
    age_fit: 3,
};

/// Maximum products returned in a recommendation
pub const MAX_RECOMMENDATIONS: usize = 10;

/// Featured id reported when nothing could be ranked
pub const FALLBACK_FEATURED_ID: &str = "1";

/// A product is within budget when its price is at most this share of the ceiling
pub const BUDGET_TOLERANCE_PERCENT: u64 = 120;

/// Budget ceilings a budget label snaps up to; anything above the last one is unbounded
pub const BUDGET_BREAKPOINTS: [u32; 4] = [2_000, 5_000, 10_000, 30_000];

/// Representative recipient ages per age group
pub const CHILD_AGE: u32 = 8;
pub const YOUNG_AGE: u32 = 20;
pub const ADULT_AGE: u32 = 35;
pub const SENIOR_AGE: u32 = 65;

/// Interest tokens this short or shorter are ignored
pub const MIN_INTEREST_TOKEN_CHARS: usize = 3;
