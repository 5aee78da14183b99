pub mod catalog;
pub mod config;
pub mod domain;
pub mod errors;
pub mod random;
pub mod recommendation;
pub mod wire;

pub use catalog::{Catalog, ProductQuery};
pub use domain::answers::QuizAnswers;
pub use domain::product::{AgeRange, Marketplace, Product, ProductId};
pub use domain::profile::{CalendarEvent, ProfilePatch, UserProfile};
pub use domain::recommendation::RecommendationResult;
pub use domain::review::{Review, ReviewSource, ReviewSummary};
pub use errors::{ApplicationError, DomainError, InterfaceError, MappingError};
pub use random::{FixedRandom, RandomSource, SeededRandom, SystemRandom};
pub use recommendation::{
    RecommendationEngine, ScoreBreakdown, ScoreCalculator, ScoredProduct, ScoringWeights,
};
