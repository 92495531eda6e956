//! In-memory content source for testing and embedding

use async_trait::async_trait;
use std::sync::RwLock;
use taxonomy_index_domain::{ContentError, ContentSource, Page};

use crate::content_json::validate_pages;

/// In-memory content source; pages can be replaced between generations
pub struct InMemoryContentSource {
    pages: RwLock<Vec<Page>>,
}

impl InMemoryContentSource {
    pub fn new(pages: Vec<Page>) -> Self {
        Self {
            pages: RwLock::new(pages),
        }
    }

    /// Replace the pages served to the next generation
    pub fn replace(&self, pages: Vec<Page>) -> Result<(), ContentError> {
        let mut current = self
            .pages
            .write()
            .map_err(|e| ContentError::Invalid(e.to_string()))?;
        *current = pages;
        Ok(())
    }
}

impl Default for InMemoryContentSource {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

#[async_trait]
impl ContentSource for InMemoryContentSource {
    async fn load(&self) -> Result<Vec<Page>, ContentError> {
        let pages = self
            .pages
            .read()
            .map_err(|e| ContentError::Invalid(e.to_string()))?
            .clone();
        validate_pages(&pages)?;
        Ok(pages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(id: &str) -> Page {
        Page {
            id: id.to_string(),
            title: String::new(),
            dates: Default::default(),
            taxonomies: Default::default(),
            weights: Default::default(),
        }
    }

    #[tokio::test]
    async fn test_load_and_replace() {
        let source = InMemoryContentSource::new(vec![page("a")]);
        assert_eq!(source.load().await.unwrap().len(), 1);

        source.replace(vec![page("b"), page("c")]).unwrap();
        let pages = source.load().await.unwrap();
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].id, "b");
    }

    #[tokio::test]
    async fn test_duplicate_ids_rejected() {
        let source = InMemoryContentSource::new(vec![page("a"), page("a")]);
        assert!(matches!(
            source.load().await,
            Err(ContentError::DuplicateId { .. })
        ));
    }

    #[tokio::test]
    async fn test_default_is_empty() {
        let source = InMemoryContentSource::default();
        assert!(source.load().await.unwrap().is_empty());
    }
}
