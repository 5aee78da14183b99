//! In-process stand-in for the remote gift service.
//!
//! Each operation sleeps for the delay a real network call would take, then answers from the
//! catalog, the recommendation engine or storage. Product data leaves in wire shape so the
//! client maps it the same way it would map a remote response.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use giftwise_core::catalog::{Catalog, ProductQuery};
use giftwise_core::domain::answers::QuizAnswers;
use giftwise_core::domain::product::ProductId;
use giftwise_core::domain::profile::{CalendarEvent, ProfilePatch, UserProfile};
use giftwise_core::errors::ApplicationError;
use giftwise_core::random::{RandomSource, SystemRandom};
use giftwise_core::recommendation::{RecommendationEngine, ScoredProduct};
use giftwise_core::wire::{product_to_wire, recommendation_to_wire, ProductWire, RecommendationWire};
use giftwise_db::Storage;

use crate::latency::Latency;
use crate::policy::{FailurePolicy, ProbabilisticFailure};

pub const LIST_DELAY: Duration = Duration::from_millis(300);
pub const SINGLE_DELAY: Duration = Duration::from_millis(200);
pub const SIMILAR_DELAY: Duration = Duration::from_millis(300);
pub const RECOMMEND_DELAY: Duration = Duration::from_millis(1_200);
/// Inclusive millisecond bounds for batch fetches.
pub const BATCH_DELAY_MS: (u64, u64) = (300, 700);
/// Inclusive millisecond bounds for storage pass-throughs.
pub const STORAGE_DELAY_MS: (u64, u64) = (200, 400);

const BATCH_OPERATION: &str = "products.get_many";

pub struct MockBackend {
    catalog: Arc<Catalog>,
    engine: RecommendationEngine,
    storage: Storage,
    random: Arc<dyn RandomSource>,
    failure: Arc<dyn FailurePolicy>,
    latency: Latency,
}

impl MockBackend {
    pub fn new(catalog: Catalog, storage: Storage) -> Self {
        Self {
            catalog: Arc::new(catalog),
            engine: RecommendationEngine::new(),
            storage,
            random: Arc::new(SystemRandom),
            failure: Arc::new(ProbabilisticFailure::default()),
            latency: Latency::default(),
        }
    }

    pub fn with_random(mut self, random: Arc<dyn RandomSource>) -> Self {
        self.random = random;
        self
    }

    pub fn with_failure_policy(mut self, failure: Arc<dyn FailurePolicy>) -> Self {
        self.failure = failure;
        self
    }

    pub fn with_latency(mut self, latency: Latency) -> Self {
        self.latency = latency;
        self
    }

    pub fn with_engine(mut self, engine: RecommendationEngine) -> Self {
        self.engine = engine;
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    pub async fn list_products(&self, query: &ProductQuery) -> Vec<ProductWire> {
        self.latency.pause(LIST_DELAY).await;

        let products = self.catalog.query(query, self.random.as_ref());
        debug!(
            event_name = "backend.products.listed",
            count = products.len(),
            tag = query.tag.as_deref().unwrap_or(""),
            category = query.category.as_deref().unwrap_or(""),
            "listed catalog products"
        );
        products.iter().map(product_to_wire).collect()
    }

    /// Batch lookup in request order; unknown ids are skipped. May fail transiently.
    pub async fn get_products_by_ids(
        &self,
        ids: &[ProductId],
    ) -> Result<Vec<ProductWire>, ApplicationError> {
        let (low, high) = BATCH_DELAY_MS;
        self.latency.pause(Duration::from_millis(self.random.next_in_range(low, high))).await;

        if self.failure.should_fail(BATCH_OPERATION, self.random.as_ref()) {
            warn!(
                event_name = "backend.products.batch_failed",
                requested = ids.len(),
                "injected transient network failure"
            );
            return Err(ApplicationError::TransientNetwork { operation: BATCH_OPERATION });
        }

        let products = self.catalog.find_many(ids);
        debug!(
            event_name = "backend.products.batch_fetched",
            requested = ids.len(),
            found = products.len(),
            "fetched products by id"
        );
        Ok(products.iter().map(product_to_wire).collect())
    }

    pub async fn get_product_by_id(&self, id: &ProductId) -> Result<ProductWire, ApplicationError> {
        self.latency.pause(SINGLE_DELAY).await;

        match self.catalog.find(id) {
            Some(product) => Ok(product_to_wire(product)),
            None => {
                debug!(
                    event_name = "backend.products.not_found",
                    product_id = %id,
                    "unknown product"
                );
                Err(ApplicationError::not_found("product", id.as_str()))
            }
        }
    }

    pub async fn get_similar_products(
        &self,
        id: &ProductId,
    ) -> Result<Vec<ProductWire>, ApplicationError> {
        self.latency.pause(SIMILAR_DELAY).await;

        if self.catalog.find(id).is_none() {
            return Err(ApplicationError::not_found("product", id.as_str()));
        }
        Ok(self.catalog.similar_to(id).iter().map(product_to_wire).collect())
    }

    /// Never fails on sparse answers; blank fields simply score nothing.
    pub async fn generate_recommendations(&self, answers: &QuizAnswers) -> RecommendationWire {
        self.latency.pause(RECOMMEND_DELAY).await;

        let result = self.engine.recommend(answers, &self.catalog);
        info!(
            event_name = "backend.recommendations.generated",
            featured = %result.featured,
            total = result.total,
            "generated recommendations"
        );
        recommendation_to_wire(&result)
    }

    /// Full ranking with per-rule points, for diagnostics.
    pub async fn rank_products(&self, answers: &QuizAnswers) -> Vec<ScoredProduct> {
        self.latency.pause(RECOMMEND_DELAY).await;
        self.engine.rank(answers, &self.catalog)
    }

    pub async fn wishlist(&self) -> Result<Vec<ProductId>, ApplicationError> {
        self.storage_pause().await;
        self.storage.wishlist().await
    }

    pub async fn add_to_wishlist(
        &self,
        id: &ProductId,
    ) -> Result<Vec<ProductId>, ApplicationError> {
        self.storage_pause().await;
        let wishlist = self.storage.add_to_wishlist(id).await?;
        debug!(
            event_name = "backend.wishlist.added",
            product_id = %id,
            size = wishlist.len(),
            "wishlist updated"
        );
        Ok(wishlist)
    }

    pub async fn remove_from_wishlist(
        &self,
        id: &ProductId,
    ) -> Result<Vec<ProductId>, ApplicationError> {
        self.storage_pause().await;
        let wishlist = self.storage.remove_from_wishlist(id).await?;
        debug!(
            event_name = "backend.wishlist.removed",
            product_id = %id,
            size = wishlist.len(),
            "wishlist updated"
        );
        Ok(wishlist)
    }

    pub async fn profile(&self) -> Result<UserProfile, ApplicationError> {
        self.storage_pause().await;
        self.storage.profile().await
    }

    pub async fn update_profile(
        &self,
        patch: ProfilePatch,
    ) -> Result<UserProfile, ApplicationError> {
        self.storage_pause().await;
        self.storage.update_profile(patch).await
    }

    pub async fn add_event(&self, event: CalendarEvent) -> Result<CalendarEvent, ApplicationError> {
        self.storage_pause().await;
        let event = self.storage.add_event(event).await?;
        debug!(
            event_name = "backend.profile.event_added",
            event_id = %event.id,
            date = %event.date,
            "calendar event added"
        );
        Ok(event)
    }

    pub async fn remove_event(&self, id: &str) -> Result<UserProfile, ApplicationError> {
        self.storage_pause().await;
        self.storage.remove_event(id).await
    }

    pub async fn save_draft_answers(&self, answers: &QuizAnswers) -> Result<(), ApplicationError> {
        self.storage_pause().await;
        self.storage.save_draft_answers(answers).await
    }

    pub async fn draft_answers(&self) -> Result<Option<QuizAnswers>, ApplicationError> {
        self.storage_pause().await;
        self.storage.draft_answers().await
    }

    pub async fn submit_answers(&self, answers: &QuizAnswers) -> Result<(), ApplicationError> {
        self.storage_pause().await;
        self.storage.submit_answers(answers).await?;
        info!(
            event_name = "backend.answers.submitted",
            relationship = %answers.relationship,
            "answers submitted"
        );
        Ok(())
    }

    pub async fn final_answers(&self) -> Result<Option<QuizAnswers>, ApplicationError> {
        self.storage_pause().await;
        self.storage.final_answers().await
    }

    pub async fn clear_answers(&self) -> Result<(), ApplicationError> {
        self.storage_pause().await;
        self.storage.clear_answers().await
    }

    pub async fn dev_mode(&self) -> Result<bool, ApplicationError> {
        self.storage_pause().await;
        self.storage.dev_mode().await
    }

    pub async fn set_dev_mode(&self, enabled: bool) -> Result<(), ApplicationError> {
        self.storage_pause().await;
        self.storage.set_dev_mode(enabled).await
    }

    async fn storage_pause(&self) {
        let (low, high) = STORAGE_DELAY_MS;
        self.latency.pause(Duration::from_millis(self.random.next_in_range(low, high))).await;
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use giftwise_core::catalog::{Catalog, ProductQuery};
    use giftwise_core::domain::answers::QuizAnswers;
    use giftwise_core::domain::product::ProductId;
    use giftwise_core::errors::ApplicationError;
    use giftwise_core::random::FixedRandom;
    use giftwise_db::Storage;

    use super::MockBackend;
    use crate::latency::Latency;
    use crate::policy::{AlwaysFail, NeverFail};

    fn backend() -> MockBackend {
        MockBackend::new(Catalog::sample(), Storage::in_memory())
            .with_latency(Latency::disabled())
            .with_failure_policy(Arc::new(NeverFail))
            .with_random(Arc::new(FixedRandom::default()))
    }

    #[tokio::test]
    async fn unknown_product_is_not_found() {
        let error = backend().get_product_by_id(&ProductId::from("999")).await;
        assert_eq!(error, Err(ApplicationError::not_found("product", "999")));
    }

    #[tokio::test]
    async fn batch_fetch_failure_is_retryable() {
        let backend = backend().with_failure_policy(Arc::new(AlwaysFail));
        let result = backend.get_products_by_ids(&[ProductId::from("1")]).await;

        let error = result.expect_err("injected failure");
        assert!(error.is_retryable());
    }

    #[tokio::test]
    async fn batch_fetch_keeps_request_order() {
        let ids = [ProductId::from("13"), ProductId::from("999"), ProductId::from("2")];
        let wires = backend().get_products_by_ids(&ids).await.expect("batch");

        let returned: Vec<&str> = wires.iter().map(|wire| wire.id.as_str()).collect();
        assert_eq!(returned, vec!["13", "2"]);
    }

    #[tokio::test]
    async fn tag_filter_is_case_insensitive() {
        let wires = backend().list_products(&ProductQuery::default().with_tag("ЗИМА")).await;

        let ids: Vec<&str> = wires.iter().map(|wire| wire.id.as_str()).collect();
        assert_eq!(ids, vec!["2", "5", "10"]);
    }

    #[tokio::test]
    async fn similar_products_require_a_known_id() {
        let backend = backend();
        assert!(matches!(
            backend.get_similar_products(&ProductId::from("999")).await,
            Err(ApplicationError::NotFound { .. })
        ));

        let similar = backend.get_similar_products(&ProductId::from("5")).await.expect("similar");
        assert!(!similar.is_empty());
        assert!(similar.iter().all(|wire| wire.id != "5"));
    }

    #[tokio::test]
    async fn recommendations_rank_blanket_first_for_mother() {
        let answers = QuizAnswers::new("Анна", "16-24", "Мама", "2 000 - 5 000", "уют");
        let wire = backend().generate_recommendations(&answers).await;

        assert_eq!(wire.featured_gift_id, "5");
        assert_eq!(wire.gift_ids.first().map(String::as_str), Some("5"));
        assert_eq!(wire.total, wire.gift_ids.len());
    }

    #[tokio::test(start_paused = true)]
    async fn recommendation_takes_simulated_time() {
        let backend = MockBackend::new(Catalog::sample(), Storage::in_memory())
            .with_random(Arc::new(FixedRandom::default()));
        let started = tokio::time::Instant::now();

        backend.generate_recommendations(&QuizAnswers::default()).await;
        assert!(started.elapsed() >= Duration::from_millis(1_200));
    }

    #[tokio::test(start_paused = true)]
    async fn storage_calls_wait_at_least_the_lower_bound() {
        let backend = MockBackend::new(Catalog::sample(), Storage::in_memory())
            .with_random(Arc::new(FixedRandom::default()));
        let started = tokio::time::Instant::now();

        backend.wishlist().await.expect("wishlist");
        assert!(started.elapsed() >= Duration::from_millis(200));
    }
}
