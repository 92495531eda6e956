//! Port definitions (traits) for external collaborators
//!
//! Key normalization policy and content loading live outside the core.
//! Adapters implement these traits.

use async_trait::async_trait;
use thiserror::Error;

use crate::model::Page;

/// Turns a raw term into the key used for identity and lookup
pub trait KeyNormalizer: Send + Sync {
    fn normalize(&self, term: &str) -> String;
}

impl<F> KeyNormalizer for F
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn normalize(&self, term: &str) -> String {
        self(term)
    }
}

/// Error type for content sources
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error in {source_name}: {message}")]
    Parse {
        source_name: String,
        message: String,
    },
    #[error("Duplicate item ID '{id}'")]
    DuplicateId { id: String },
    #[error("Invalid item: {0}")]
    Invalid(String),
}

/// Port for loading classified content items
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Load every page of the current generation
    async fn load(&self) -> Result<Vec<Page>, ContentError>;
}
