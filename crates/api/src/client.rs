//! Resource-oriented facade over the backend.
//!
//! Handles call the backend, map wire records into domain records and return. Errors pass
//! through unchanged so callers can tell a missing product from a retryable network failure.

use std::sync::Arc;

use giftwise_core::catalog::ProductQuery;
use giftwise_core::domain::answers::QuizAnswers;
use giftwise_core::domain::product::{Product, ProductId};
use giftwise_core::domain::profile::{CalendarEvent, ProfilePatch, UserProfile};
use giftwise_core::domain::recommendation::RecommendationResult;
use giftwise_core::errors::ApplicationError;
use giftwise_core::recommendation::ScoredProduct;
use giftwise_core::wire::{product_from_wire, recommendation_from_wire, ProductWire};

use crate::backend::MockBackend;

#[derive(Clone)]
pub struct Client {
    backend: Arc<MockBackend>,
}

impl Client {
    pub fn new(backend: MockBackend) -> Self {
        Self { backend: Arc::new(backend) }
    }

    pub fn backend(&self) -> &MockBackend {
        &self.backend
    }

    pub fn products(&self) -> Products<'_> {
        Products { backend: &self.backend }
    }

    pub fn recommendations(&self) -> Recommendations<'_> {
        Recommendations { backend: &self.backend }
    }

    pub fn wishlist(&self) -> Wishlist<'_> {
        Wishlist { backend: &self.backend }
    }

    pub fn profile(&self) -> Profile<'_> {
        Profile { backend: &self.backend }
    }

    pub fn answers(&self) -> Answers<'_> {
        Answers { backend: &self.backend }
    }

    pub fn settings(&self) -> Settings<'_> {
        Settings { backend: &self.backend }
    }
}

fn map_products(wires: Vec<ProductWire>) -> Result<Vec<Product>, ApplicationError> {
    wires.into_iter().map(|wire| product_from_wire(wire).map_err(ApplicationError::from)).collect()
}

pub struct Products<'a> {
    backend: &'a MockBackend,
}

impl Products<'_> {
    pub async fn get_by_id(&self, id: &ProductId) -> Result<Product, ApplicationError> {
        let wire = self.backend.get_product_by_id(id).await?;
        Ok(product_from_wire(wire)?)
    }

    pub async fn get_many(&self, ids: &[ProductId]) -> Result<Vec<Product>, ApplicationError> {
        map_products(self.backend.get_products_by_ids(ids).await?)
    }

    pub async fn list(&self, query: &ProductQuery) -> Result<Vec<Product>, ApplicationError> {
        map_products(self.backend.list_products(query).await)
    }

    pub async fn get_similar(&self, id: &ProductId) -> Result<Vec<Product>, ApplicationError> {
        map_products(self.backend.get_similar_products(id).await?)
    }
}

pub struct Recommendations<'a> {
    backend: &'a MockBackend,
}

impl Recommendations<'_> {
    /// Ranks the catalog for the answers as given; incomplete answers are not rejected here.
    pub async fn create(
        &self,
        answers: &QuizAnswers,
    ) -> Result<RecommendationResult, ApplicationError> {
        Ok(recommendation_from_wire(self.backend.generate_recommendations(answers).await))
    }

    pub async fn explain(&self, answers: &QuizAnswers) -> Vec<ScoredProduct> {
        self.backend.rank_products(answers).await
    }
}

pub struct Wishlist<'a> {
    backend: &'a MockBackend,
}

impl Wishlist<'_> {
    pub async fn get_all(&self) -> Result<Vec<ProductId>, ApplicationError> {
        self.backend.wishlist().await
    }

    pub async fn add(&self, id: &ProductId) -> Result<Vec<ProductId>, ApplicationError> {
        self.backend.add_to_wishlist(id).await
    }

    pub async fn remove(&self, id: &ProductId) -> Result<Vec<ProductId>, ApplicationError> {
        self.backend.remove_from_wishlist(id).await
    }

    pub async fn contains(&self, id: &ProductId) -> Result<bool, ApplicationError> {
        Ok(self.get_all().await?.contains(id))
    }
}

pub struct Profile<'a> {
    backend: &'a MockBackend,
}

impl Profile<'_> {
    pub async fn get(&self) -> Result<UserProfile, ApplicationError> {
        self.backend.profile().await
    }

    pub async fn update(&self, patch: ProfilePatch) -> Result<UserProfile, ApplicationError> {
        self.backend.update_profile(patch).await
    }

    pub async fn add_event(&self, event: CalendarEvent) -> Result<CalendarEvent, ApplicationError> {
        self.backend.add_event(event).await
    }

    pub async fn remove_event(&self, id: &str) -> Result<UserProfile, ApplicationError> {
        self.backend.remove_event(id).await
    }
}

pub struct Answers<'a> {
    backend: &'a MockBackend,
}

impl Answers<'_> {
    pub async fn save_draft(&self, answers: &QuizAnswers) -> Result<(), ApplicationError> {
        self.backend.save_draft_answers(answers).await
    }

    pub async fn draft(&self) -> Result<Option<QuizAnswers>, ApplicationError> {
        self.backend.draft_answers().await
    }

    pub async fn submit(&self, answers: &QuizAnswers) -> Result<(), ApplicationError> {
        self.backend.submit_answers(answers).await
    }

    pub async fn last_submitted(&self) -> Result<Option<QuizAnswers>, ApplicationError> {
        self.backend.final_answers().await
    }

    pub async fn clear(&self) -> Result<(), ApplicationError> {
        self.backend.clear_answers().await
    }
}

pub struct Settings<'a> {
    backend: &'a MockBackend,
}

impl Settings<'_> {
    pub async fn dev_mode(&self) -> Result<bool, ApplicationError> {
        self.backend.dev_mode().await
    }

    pub async fn set_dev_mode(&self, enabled: bool) -> Result<(), ApplicationError> {
        self.backend.set_dev_mode(enabled).await
    }
}
