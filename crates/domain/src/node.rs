//! Taxonomy term nodes

use serde::Serialize;
use std::fmt;

use crate::model::{Dated, Dates, OwnerPage, PageId};

/// Index of a node inside its [`TaxonomyNodeRegistry`](crate::registry::TaxonomyNodeRegistry)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node#{}", self.0)
    }
}

/// Metadata about a taxonomy (root node) or one of its terms.
#[derive(Debug, Clone, Serialize)]
pub struct TaxonomyNode {
    pub(crate) plural: String,

    // Maps "tags" to "tag".
    pub(crate) singular: String,

    // Normalized for paths; may or may not be lowercased.
    pub(crate) term_key: String,

    // The original, unedited term. Empty for a root node.
    pub(crate) term: String,

    pub(crate) dates: Dates,

    pub(crate) parent: Option<NodeId>,

    // Bound once the rendering layer has built the page for this node.
    pub(crate) owner: Option<PageId>,
}

impl TaxonomyNode {
    pub(crate) fn new(plural: &str, term_key: String, term: &str) -> Self {
        Self {
            plural: plural.to_string(),
            singular: String::new(),
            term_key,
            term: term.to_string(),
            dates: Dates::default(),
            parent: None,
            owner: None,
        }
    }

    pub fn plural(&self) -> &str {
        &self.plural
    }

    pub fn singular(&self) -> &str {
        &self.singular
    }

    pub fn term_key(&self) -> &str {
        &self.term_key
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    /// True for the node representing the taxonomy itself
    pub fn is_root(&self) -> bool {
        self.term.is_empty()
    }

    pub fn dates(&self) -> Dates {
        self.dates
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn owner(&self) -> Option<PageId> {
        self.owner
    }

    /// Fold an item's dates into the aggregate, keeping the latest values
    pub fn update_from_item(&mut self, item: &(impl Dated + ?Sized)) {
        self.dates.update_if_after(item);
    }

    /// Bind the page rendering this node.
    ///
    /// A page that declares neither a date nor a lastmod inherits the
    /// aggregated dates of the node. Must be called at most once per node.
    pub fn transfer_values(&mut self, page: &mut impl OwnerPage) {
        debug_assert!(
            self.owner.is_none(),
            "taxonomy node {:?}/{:?} already bound to {:?}",
            self.plural,
            self.term,
            self.owner
        );
        self.owner = Some(page.page_id());
        if page.date().is_none() && page.lastmod().is_none() {
            page.dates_mut().update_if_after(&self.dates);
        }
    }
}

impl Dated for TaxonomyNode {
    fn date(&self) -> Option<time::OffsetDateTime> {
        self.dates.date
    }

    fn lastmod(&self) -> Option<time::OffsetDateTime> {
        self.dates.lastmod
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{PageKind, TermPage};
    use time::macros::datetime;

    fn dated(date: time::OffsetDateTime, lastmod: time::OffsetDateTime) -> Dates {
        Dates::new(Some(date), Some(lastmod))
    }

    fn permutations(items: &[Dates]) -> Vec<Vec<Dates>> {
        if items.len() <= 1 {
            return vec![items.to_vec()];
        }
        let mut result = Vec::new();
        for i in 0..items.len() {
            let mut rest = items.to_vec();
            let head = rest.remove(i);
            for mut tail in permutations(&rest) {
                tail.insert(0, head);
                result.push(tail);
            }
        }
        result
    }

    #[test]
    fn test_aggregation_is_order_independent() {
        let items = vec![
            dated(datetime!(2020-01-01 0:00 UTC), datetime!(2020-08-01 0:00 UTC)),
            dated(datetime!(2020-06-15 0:00 UTC), datetime!(2020-06-15 0:00 UTC)),
            dated(datetime!(2019-12-01 0:00 UTC), datetime!(2021-02-01 0:00 UTC)),
        ];

        for order in permutations(&items) {
            let mut node = TaxonomyNode::new("tags", "go".to_string(), "Go");
            for item in &order {
                node.update_from_item(item);
            }
            assert_eq!(node.dates().date, Some(datetime!(2020-06-15 0:00 UTC)));
            assert_eq!(node.dates().lastmod, Some(datetime!(2021-02-01 0:00 UTC)));
        }
    }

    #[test]
    fn test_zero_dates_never_advance_aggregate() {
        let mut node = TaxonomyNode::new("tags", "go".to_string(), "Go");
        node.update_from_item(&Dates::default());
        assert!(node.dates().is_zero());

        node.update_from_item(&Dates::new(Some(datetime!(2020-01-01 0:00 UTC)), None));
        node.update_from_item(&Dates::default());
        assert_eq!(node.dates().date, Some(datetime!(2020-01-01 0:00 UTC)));
        assert!(node.dates().lastmod.is_none());
    }

    #[test]
    fn test_transfer_values_backfills_undated_page() {
        let mut node = TaxonomyNode::new("tags", "go".to_string(), "Go");
        node.update_from_item(&dated(
            datetime!(2020-06-15 0:00 UTC),
            datetime!(2020-07-01 0:00 UTC),
        ));

        let mut page = TermPage::new(PageId(7), PageKind::Term, "tags", "Go", "Go");
        node.transfer_values(&mut page);

        assert_eq!(node.owner(), Some(PageId(7)));
        assert_eq!(page.dates, node.dates());
    }

    #[test]
    fn test_transfer_values_keeps_explicit_page_date() {
        let mut node = TaxonomyNode::new("tags", "go".to_string(), "Go");
        node.update_from_item(&dated(
            datetime!(2020-06-15 0:00 UTC),
            datetime!(2020-07-01 0:00 UTC),
        ));

        let explicit = Dates::new(Some(datetime!(2018-03-03 0:00 UTC)), None);
        let mut page =
            TermPage::new(PageId(1), PageKind::Term, "tags", "Go", "Go").with_dates(explicit);
        node.transfer_values(&mut page);

        assert_eq!(node.owner(), Some(PageId(1)));
        assert_eq!(page.dates, explicit);
    }
}
