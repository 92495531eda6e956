//! Term page binding - gives every taxonomy node its page

use crate::{
    model::{PageId, PageKind, TermPage},
    usecases::build::TaxonomyIndex,
};

/// Materialize a page for every node of a frozen index and bind it.
///
/// Root nodes get a [`PageKind::TaxonomyList`] page, terms a
/// [`PageKind::Term`] page. Page ids are assigned from `first_id` upward
/// in node creation order. Call once per index: nodes accept a single
/// owner.
pub fn bind_term_pages<I>(index: &mut TaxonomyIndex<I>, first_id: usize) -> Vec<TermPage> {
    let nodes = index.nodes_mut();
    let ids: Vec<_> = nodes.nodes().map(|(id, _)| id).collect();

    let mut pages = Vec::with_capacity(ids.len());
    for (offset, id) in ids.into_iter().enumerate() {
        let node = nodes.node_mut(id);
        let (kind, title) = if node.is_root() {
            (PageKind::TaxonomyList, title_case(node.plural()))
        } else {
            (PageKind::Term, node.term().to_string())
        };

        let mut page = TermPage::new(
            PageId(first_id + offset),
            kind,
            node.plural(),
            node.term(),
            title,
        );
        node.transfer_values(&mut page);
        pages.push(page);
    }

    tracing::debug!(pages = pages.len(), "Bound term pages");

    pages
}

fn title_case(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ClassifiedItem, Dates, Membership, Page};
    use crate::policy::PathKeyNormalizer;
    use crate::usecases::build::{BuildConfig, IndexBuilder};
    use std::sync::Arc;
    use time::macros::datetime;

    #[test]
    fn test_binds_every_node_once() {
        let builder = IndexBuilder::new(
            &BuildConfig::default(),
            Arc::new(PathKeyNormalizer::default()),
        );
        let page = Page {
            id: "post".to_string(),
            title: "Post".to_string(),
            dates: Dates::new(
                Some(datetime!(2021-03-01 0:00 UTC)),
                Some(datetime!(2021-04-01 0:00 UTC)),
            ),
            taxonomies: Default::default(),
            weights: Default::default(),
        };
        builder
            .classify(ClassifiedItem::new(
                Arc::new(page),
                vec![Membership::new("tags", "Rust Lang", 0)],
            ))
            .unwrap();
        let mut index = builder.freeze().unwrap();

        let pages = bind_term_pages(&mut index, 100);

        // tags root, categories root, one term
        assert_eq!(pages.len(), 3);
        assert_eq!(pages[0].kind, PageKind::TaxonomyList);
        assert_eq!(pages[0].title, "Tags");

        let term = pages.iter().find(|p| p.kind == PageKind::Term).unwrap();
        assert_eq!(term.title, "Rust Lang");
        assert_eq!(term.dates.lastmod, Some(datetime!(2021-04-01 0:00 UTC)));

        let node = index.term_node("tags", "rust-lang").unwrap();
        assert_eq!(node.owner(), Some(term.id));

        // A taxonomy without items keeps zero dates
        let categories = pages.iter().find(|p| p.plural == "categories").unwrap();
        assert!(categories.dates.is_zero());
        assert_eq!(categories.id, PageId(101));
    }
}
