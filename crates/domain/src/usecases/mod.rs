//! Application use cases

pub mod build;
pub mod listing;
pub mod term_pages;

pub use build::{BuildConfig, BuildError, IndexBuilder, TaxonomyDef, TaxonomyIndex};
pub use listing::{Lister, ListingConfig, ListingError, TaxonomyListing, TermSummary};
pub use term_pages::bind_term_pages;
