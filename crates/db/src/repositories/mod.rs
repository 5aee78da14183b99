use async_trait::async_trait;
use thiserror::Error;

use giftwise_core::errors::ApplicationError;

pub mod kv;
pub mod memory;

pub use kv::SqlKeyValueStore;
pub use memory::InMemoryKeyValueStore;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
    #[error("encode error: {0}")]
    Encode(String),
}

impl From<RepositoryError> for ApplicationError {
    fn from(error: RepositoryError) -> Self {
        ApplicationError::Persistence(error.to_string())
    }
}

/// Logical records kept in the key-value store.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StorageKey {
    Wishlist,
    UserProfile,
    AnswersDraft,
    AnswersFinal,
    DevMode,
}

impl StorageKey {
    pub const ALL: [StorageKey; 5] = [
        StorageKey::Wishlist,
        StorageKey::UserProfile,
        StorageKey::AnswersDraft,
        StorageKey::AnswersFinal,
        StorageKey::DevMode,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            StorageKey::Wishlist => "wishlist",
            StorageKey::UserProfile => "user_profile",
            StorageKey::AnswersDraft => "quiz_answers_draft",
            StorageKey::AnswersFinal => "quiz_answers_final",
            StorageKey::DevMode => "dev_mode",
        }
    }
}

/// Durable string storage addressed by key. Values are opaque to the store.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, RepositoryError>;

    /// Full overwrite.
    async fn set(&self, key: &str, value: String) -> Result<(), RepositoryError>;

    /// Returns whether a value was present.
    async fn remove(&self, key: &str) -> Result<bool, RepositoryError>;
}
