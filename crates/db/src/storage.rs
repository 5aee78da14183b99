//! Typed records on top of a [`KeyValueStore`].
//!
//! Every record is stored as JSON under its [`StorageKey`]. A value that no longer decodes is
//! logged and read as absent, so a corrupt entry never stops the reader; the next write replaces
//! it. Read-modify-write sequences are not atomic across callers and the last write wins.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use giftwise_core::domain::answers::QuizAnswers;
use giftwise_core::domain::product::ProductId;
use giftwise_core::domain::profile::{CalendarEvent, ProfilePatch, UserProfile};
use giftwise_core::errors::ApplicationError;

use crate::repositories::{InMemoryKeyValueStore, KeyValueStore, RepositoryError, StorageKey};

#[derive(Clone)]
pub struct Storage {
    store: Arc<dyn KeyValueStore>,
}

impl Storage {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryKeyValueStore::new()))
    }

    pub fn store(&self) -> &Arc<dyn KeyValueStore> {
        &self.store
    }

    pub async fn wishlist(&self) -> Result<Vec<ProductId>, ApplicationError> {
        Ok(self.read::<Vec<ProductId>>(StorageKey::Wishlist).await?.unwrap_or_default())
    }

    /// Appends the id unless it is already present.
    pub async fn add_to_wishlist(
        &self,
        id: &ProductId,
    ) -> Result<Vec<ProductId>, ApplicationError> {
        let mut wishlist = self.wishlist().await?;
        if wishlist.contains(id) {
            return Ok(wishlist);
        }

        wishlist.push(id.clone());
        self.write(StorageKey::Wishlist, &wishlist).await?;
        Ok(wishlist)
    }

    pub async fn remove_from_wishlist(
        &self,
        id: &ProductId,
    ) -> Result<Vec<ProductId>, ApplicationError> {
        let mut wishlist = self.wishlist().await?;
        let before = wishlist.len();
        wishlist.retain(|existing| existing != id);

        if wishlist.len() != before {
            self.write(StorageKey::Wishlist, &wishlist).await?;
        }
        Ok(wishlist)
    }

    /// Get-or-create: the default profile is persisted the first time it is read.
    pub async fn profile(&self) -> Result<UserProfile, ApplicationError> {
        if let Some(mut profile) = self.read::<UserProfile>(StorageKey::UserProfile).await? {
            if !profile.events_sorted() {
                profile.sort_events();
            }
            return Ok(profile);
        }

        let profile = UserProfile::default();
        self.write(StorageKey::UserProfile, &profile).await?;
        debug!(event_name = "storage.profile.created", "default profile persisted");
        Ok(profile)
    }

    pub async fn update_profile(
        &self,
        patch: ProfilePatch,
    ) -> Result<UserProfile, ApplicationError> {
        let mut profile = self.profile().await?;
        profile.apply(patch);
        self.write(StorageKey::UserProfile, &profile).await?;
        Ok(profile)
    }

    pub async fn add_event(&self, event: CalendarEvent) -> Result<CalendarEvent, ApplicationError> {
        let mut profile = self.profile().await?;
        let added = profile.add_event(event)?.clone();
        self.write(StorageKey::UserProfile, &profile).await?;
        Ok(added)
    }

    /// Removing an unknown id leaves the profile unchanged.
    pub async fn remove_event(&self, id: &str) -> Result<UserProfile, ApplicationError> {
        let mut profile = self.profile().await?;
        if profile.remove_event(id) {
            self.write(StorageKey::UserProfile, &profile).await?;
        }
        Ok(profile)
    }

    pub async fn draft_answers(&self) -> Result<Option<QuizAnswers>, ApplicationError> {
        Ok(self.read(StorageKey::AnswersDraft).await?)
    }

    /// Overwrites the draft; partially filled answers are accepted.
    pub async fn save_draft_answers(&self, answers: &QuizAnswers) -> Result<(), ApplicationError> {
        self.write(StorageKey::AnswersDraft, answers).await
    }

    pub async fn final_answers(&self) -> Result<Option<QuizAnswers>, ApplicationError> {
        Ok(self.read(StorageKey::AnswersFinal).await?)
    }

    /// Validates, stores the submitted snapshot and drops the draft.
    pub async fn submit_answers(&self, answers: &QuizAnswers) -> Result<(), ApplicationError> {
        answers.validate()?;
        self.write(StorageKey::AnswersFinal, answers).await?;
        self.store.remove(StorageKey::AnswersDraft.as_str()).await?;
        Ok(())
    }

    pub async fn clear_answers(&self) -> Result<(), ApplicationError> {
        self.store.remove(StorageKey::AnswersDraft.as_str()).await?;
        self.store.remove(StorageKey::AnswersFinal.as_str()).await?;
        Ok(())
    }

    pub async fn dev_mode(&self) -> Result<bool, ApplicationError> {
        Ok(self.read::<bool>(StorageKey::DevMode).await?.unwrap_or(false))
    }

    pub async fn set_dev_mode(&self, enabled: bool) -> Result<(), ApplicationError> {
        self.write(StorageKey::DevMode, &enabled).await
    }

    async fn read<T: DeserializeOwned>(
        &self,
        key: StorageKey,
    ) -> Result<Option<T>, RepositoryError> {
        let Some(raw) = self.store.get(key.as_str()).await? else {
            return Ok(None);
        };

        match serde_json::from_str::<T>(&raw) {
            Ok(value) => Ok(Some(value)),
            Err(error) => {
                warn!(
                    event_name = "storage.malformed_record",
                    key = key.as_str(),
                    error = %error,
                    "stored record could not be decoded; treating as absent"
                );
                Ok(None)
            }
        }
    }

    async fn write<T: Serialize + ?Sized>(
        &self,
        key: StorageKey,
        value: &T,
    ) -> Result<(), ApplicationError> {
        let encoded = serde_json::to_string(value)
            .map_err(|error| RepositoryError::Encode(error.to_string()))?;
        self.store.set(key.as_str(), encoded).await?;
        Ok(())
    }
}
