//! Listing use case - ordered term summaries for the rendering layer

use serde::Serialize;

use crate::{
    model::Dates,
    taxonomy::{SortOrder, Taxonomy},
    usecases::build::TaxonomyIndex,
};

/// How terms are listed
#[derive(Debug, Clone, Default)]
pub struct ListingConfig {
    pub order: SortOrder,
    /// Flip the order after sorting
    pub reverse: bool,
    /// Keep only the first N terms (None = all)
    pub limit: Option<usize>,
}

/// One term in a listing
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TermSummary {
    pub key: String,
    /// Original display term
    pub term: String,
    pub count: usize,
    #[serde(flatten)]
    pub dates: Dates,
}

/// All listed terms of one taxonomy
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaxonomyListing {
    pub plural: String,
    pub singular: String,
    #[serde(flatten)]
    pub dates: Dates,
    pub terms: Vec<TermSummary>,
}

/// Errors from listing
#[derive(Debug, thiserror::Error)]
pub enum ListingError {
    #[error("Unknown taxonomy '{0}'")]
    UnknownTaxonomy(String),
}

/// Builds listings from a frozen index
pub struct Lister {
    config: ListingConfig,
}

impl Lister {
    pub fn new(config: ListingConfig) -> Self {
        Self { config }
    }

    /// Listings for every taxonomy, sorted by plural
    pub fn list_all<I: Clone>(&self, index: &TaxonomyIndex<I>) -> Vec<TaxonomyListing> {
        index
            .taxonomies()
            .plurals()
            .into_iter()
            .filter_map(|plural| {
                let taxonomy = index.taxonomies().get(plural)?;
                Some(self.build(index, plural, taxonomy))
            })
            .collect()
    }

    /// Listing for a single taxonomy
    pub fn list<I: Clone>(
        &self,
        index: &TaxonomyIndex<I>,
        plural: &str,
    ) -> Result<TaxonomyListing, ListingError> {
        let taxonomy = index
            .taxonomies()
            .get(plural)
            .ok_or_else(|| ListingError::UnknownTaxonomy(plural.to_string()))?;
        Ok(self.build(index, plural, taxonomy))
    }

    fn build<I: Clone>(
        &self,
        index: &TaxonomyIndex<I>,
        plural: &str,
        taxonomy: &Taxonomy<I>,
    ) -> TaxonomyListing {
        let mut ordered = taxonomy.ordered(self.config.order);
        if self.config.reverse {
            ordered.reverse();
        }
        if let Some(limit) = self.config.limit {
            ordered.truncate(limit);
        }

        let terms = ordered
            .entries()
            .iter()
            .map(|entry| {
                let node = index.term_node(plural, entry.term());
                TermSummary {
                    key: entry.term().to_string(),
                    term: node
                        .map(|n| n.term().to_string())
                        .unwrap_or_else(|| entry.term().to_string()),
                    count: entry.count(),
                    dates: node.map(|n| n.dates()).unwrap_or_default(),
                }
            })
            .collect();

        let root = index.nodes().root(plural).map(|id| index.nodes().node(id));

        TaxonomyListing {
            plural: plural.to_string(),
            singular: root.map(|n| n.singular().to_string()).unwrap_or_default(),
            dates: root.map(|n| n.dates()).unwrap_or_default(),
            terms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ClassifiedItem, Membership, Page};
    use crate::policy::PathKeyNormalizer;
    use crate::usecases::build::{BuildConfig, IndexBuilder};
    use std::sync::Arc;

    fn sample_index() -> TaxonomyIndex<Arc<Page>> {
        let builder = IndexBuilder::new(
            &BuildConfig::default(),
            Arc::new(PathKeyNormalizer::default()),
        );
        let assignments: &[(&str, &[&str])] = &[
            ("a", &["Go", "Rust"]),
            ("b", &["Go", "Zig"]),
            ("c", &["Go", "Rust"]),
            ("d", &["C"]),
        ];
        for (id, tags) in assignments {
            let page = Page {
                id: id.to_string(),
                title: String::new(),
                dates: Default::default(),
                taxonomies: Default::default(),
                weights: Default::default(),
            };
            let memberships = tags.iter().map(|t| Membership::new("tags", *t, 0)).collect();
            builder
                .classify(ClassifiedItem::new(Arc::new(page), memberships))
                .unwrap();
        }
        builder.freeze().unwrap()
    }

    fn keys(listing: &TaxonomyListing) -> Vec<&str> {
        listing.terms.iter().map(|t| t.key.as_str()).collect()
    }

    #[test]
    fn test_list_by_count_with_display_terms() {
        let index = sample_index();
        let lister = Lister::new(ListingConfig {
            order: SortOrder::ByCount,
            ..Default::default()
        });

        let listing = lister.list(&index, "tags").unwrap();
        assert_eq!(keys(&listing), vec!["go", "rust", "c", "zig"]);
        assert_eq!(listing.terms[0].term, "Go");
        assert_eq!(listing.terms[0].count, 3);
        assert_eq!(listing.singular, "tag");
    }

    #[test]
    fn test_list_reversed_and_limited() {
        let index = sample_index();
        let lister = Lister::new(ListingConfig {
            order: SortOrder::Alphabetical,
            reverse: true,
            limit: Some(2),
        });

        let listing = lister.list(&index, "tags").unwrap();
        assert_eq!(keys(&listing), vec!["zig", "rust"]);
    }

    #[test]
    fn test_list_all_includes_empty_taxonomies() {
        let index = sample_index();
        let listings = Lister::new(ListingConfig::default()).list_all(&index);

        let plurals: Vec<_> = listings.iter().map(|l| l.plural.as_str()).collect();
        assert_eq!(plurals, vec!["categories", "tags"]);
        assert!(listings[0].terms.is_empty());
    }

    #[test]
    fn test_unknown_taxonomy() {
        let index = sample_index();
        let result = Lister::new(ListingConfig::default()).list(&index, "series");
        assert!(matches!(result, Err(ListingError::UnknownTaxonomy(_))));
    }

    #[test]
    fn test_listing_serializes_dates_inline() {
        let index = sample_index();
        let listing = Lister::new(ListingConfig::default())
            .list(&index, "tags")
            .unwrap();

        let value = serde_json::to_value(&listing).unwrap();
        assert_eq!(value["plural"], "tags");
        assert!(value["terms"][0].get("date").is_some());
    }
}
