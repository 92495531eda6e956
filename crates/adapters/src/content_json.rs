//! JSON manifest content source
//!
//! A manifest is a JSON array of pages:
//!
//! ```json
//! [{"id": "hello", "date": "2020-01-01T00:00:00Z",
//!   "taxonomies": {"tags": ["go"]}, "weights": {"tags": 2}}]
//! ```

use async_trait::async_trait;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use taxonomy_index_domain::{ContentError, ContentSource, Page};

/// Content source reading a single JSON manifest file
pub struct JsonManifestSource {
    path: PathBuf,
}

impl JsonManifestSource {
    /// Create a source for the manifest at `path`; the file must exist
    pub fn new(path: impl AsRef<Path>) -> Result<Self, ContentError> {
        let path = path.as_ref().to_path_buf();

        if !path.is_file() {
            return Err(ContentError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("Content manifest not found: {}", path.display()),
            )));
        }

        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn parse(&self, content: &str) -> Result<Vec<Page>, ContentError> {
        serde_json::from_str(content).map_err(|e| ContentError::Parse {
            source_name: self.path.display().to_string(),
            message: e.to_string(),
        })
    }
}

/// Reject pages without an id and duplicate ids
pub(crate) fn validate_pages(pages: &[Page]) -> Result<(), ContentError> {
    let mut seen = HashSet::new();
    for page in pages {
        if page.id.trim().is_empty() {
            return Err(ContentError::Invalid(format!(
                "page titled '{}' has an empty id",
                page.title
            )));
        }
        if !seen.insert(page.id.as_str()) {
            return Err(ContentError::DuplicateId {
                id: page.id.clone(),
            });
        }
    }
    Ok(())
}

#[async_trait]
impl ContentSource for JsonManifestSource {
    async fn load(&self) -> Result<Vec<Page>, ContentError> {
        let content = std::fs::read_to_string(&self.path)?;
        let pages = self.parse(&content)?;
        validate_pages(&pages)?;

        tracing::info!(
            manifest = %self.path.display(),
            pages = pages.len(),
            "Loaded content manifest"
        );

        Ok(pages)
    }
}
