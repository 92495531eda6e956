//! taxonomy-index adapters crate
//!
//! Infrastructure adapters implementing the domain ports:
//! - `content`: JSON manifest and in-memory content sources

mod content_json;
mod content_memory;

/// Re-exports for content adapters
pub mod content {
    pub use crate::content_json::JsonManifestSource;
    pub use crate::content_memory::InMemoryContentSource;
}
