//! Taxonomy groups and their ordered views
//!
//! A [`Taxonomy`] maps term keys to the weighted items carrying that term.
//! Maps have no order, so listings go through an [`OrderedTaxonomy`].

use sha2::{Digest, Sha256};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;

use crate::model::ContentItem;

/// An item paired with its ordering weight inside one term
#[derive(Debug, Clone, PartialEq)]
pub struct WeightedItem<I> {
    pub item: I,
    pub weight: i32,
}

impl<I> WeightedItem<I> {
    pub fn new(item: I, weight: i32) -> Self {
        Self { item, weight }
    }
}

/// The items of a single term, in arrival order
#[derive(Debug, Clone, PartialEq)]
pub struct WeightedItems<I>(Vec<WeightedItem<I>>);

impl<I> Default for WeightedItems<I> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<I> WeightedItems<I> {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, WeightedItem<I>> {
        self.0.iter()
    }

    /// The items without their weights, in stored order
    pub fn items(&self) -> Vec<&I> {
        self.0.iter().map(|w| &w.item).collect()
    }

    fn push(&mut self, item: WeightedItem<I>) {
        self.0.push(item);
    }
}

impl<I: ContentItem> WeightedItems<I> {
    /// Sort by ascending weight; equal weights put the most recent item
    /// first, then fall back to item identity.
    pub fn sort_by_weight(&mut self) {
        self.0.sort_by(|a, b| {
            a.weight
                .cmp(&b.weight)
                .then_with(|| b.item.date().cmp(&a.item.date()))
                .then_with(|| a.item.identity().cmp(b.item.identity()))
        });
    }
}

impl<I> From<Vec<WeightedItem<I>>> for WeightedItems<I> {
    fn from(items: Vec<WeightedItem<I>>) -> Self {
        Self(items)
    }
}

impl<'a, I> IntoIterator for &'a WeightedItems<I> {
    type Item = &'a WeightedItem<I>;
    type IntoIter = std::slice::Iter<'a, WeightedItem<I>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Term key to weighted items, e.g. `tags["go"]`
#[derive(Debug, Clone)]
pub struct Taxonomy<I> {
    terms: HashMap<String, WeightedItems<I>>,
}

impl<I> Default for Taxonomy<I> {
    fn default() -> Self {
        Self {
            terms: HashMap::new(),
        }
    }
}

impl<I> Taxonomy<I> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an item under `key`. Adding the same item twice stores it twice.
    pub fn add(&mut self, key: impl Into<String>, item: WeightedItem<I>) {
        self.terms.entry(key.into()).or_default().push(item);
    }

    /// Number of terms
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Count of items for `key`, zero when unknown
    pub fn count(&self, key: &str) -> usize {
        self.terms.get(key).map_or(0, WeightedItems::len)
    }
}

impl<I: Clone> Taxonomy<I> {
    /// Items for `key`, empty when unknown
    pub fn get(&self, key: &str) -> WeightedItems<I> {
        self.terms.get(key).cloned().unwrap_or_default()
    }

    /// Snapshot of every term in unspecified order
    pub fn to_array(&self) -> OrderedTaxonomy<I> {
        OrderedTaxonomy(
            self.terms
                .iter()
                .map(|(name, items)| OrderedTaxonomyEntry {
                    name: name.clone(),
                    items: items.clone(),
                })
                .collect(),
        )
    }

    /// Snapshot sorted by the given order
    pub fn ordered(&self, order: SortOrder) -> OrderedTaxonomy<I> {
        let mut ordered = self.to_array();
        order.sort(&mut ordered.0);
        ordered
    }

    /// Terms ascending by name
    pub fn alphabetical(&self) -> OrderedTaxonomy<I> {
        self.ordered(SortOrder::Alphabetical)
    }

    /// Terms by descending item count, ties ascending by name
    pub fn by_count(&self) -> OrderedTaxonomy<I> {
        self.ordered(SortOrder::ByCount)
    }
}

/// How to order the entries of a taxonomy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    #[default]
    Alphabetical,
    #[serde(alias = "count")]
    ByCount,
}

impl SortOrder {
    pub fn compare<I>(self, a: &OrderedTaxonomyEntry<I>, b: &OrderedTaxonomyEntry<I>) -> Ordering {
        match self {
            SortOrder::Alphabetical => by_name(a, b),
            SortOrder::ByCount => b.count().cmp(&a.count()).then_with(|| by_name(a, b)),
        }
    }

    /// Stable sort of `entries`
    fn sort<I>(self, entries: &mut [OrderedTaxonomyEntry<I>]) {
        entries.sort_by(|a, b| self.compare(a, b));
    }
}

fn by_name<I>(a: &OrderedTaxonomyEntry<I>, b: &OrderedTaxonomyEntry<I>) -> Ordering {
    a.name.as_bytes().cmp(b.name.as_bytes())
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortOrder::Alphabetical => f.write_str("alphabetical"),
            SortOrder::ByCount => f.write_str("by_count"),
        }
    }
}

/// A term with its items, detached from the source taxonomy
#[derive(Debug, Clone, PartialEq)]
pub struct OrderedTaxonomyEntry<I> {
    pub name: String,
    pub items: WeightedItems<I>,
}

impl<I> OrderedTaxonomyEntry<I> {
    pub fn items(&self) -> Vec<&I> {
        self.items.items()
    }

    pub fn count(&self) -> usize {
        self.items.len()
    }

    pub fn term(&self) -> &str {
        &self.name
    }
}

/// A taxonomy materialized as a sequence of entries
#[derive(Debug, Clone, PartialEq)]
pub struct OrderedTaxonomy<I>(Vec<OrderedTaxonomyEntry<I>>);

impl<I> OrderedTaxonomy<I> {
    pub fn entries(&self) -> &[OrderedTaxonomyEntry<I>] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Reverse the entries in place
    pub fn reverse(&mut self) -> &mut Self {
        let len = self.0.len();
        for i in 0..len / 2 {
            self.0.swap(i, len - 1 - i);
        }
        self
    }

    pub fn reversed(mut self) -> Self {
        self.reverse();
        self
    }

    pub fn truncate(&mut self, len: usize) {
        self.0.truncate(len);
    }

    pub fn into_entries(self) -> Vec<OrderedTaxonomyEntry<I>> {
        self.0
    }
}

impl<'a, I> IntoIterator for &'a OrderedTaxonomy<I> {
    type Item = &'a OrderedTaxonomyEntry<I>;
    type IntoIter = std::slice::Iter<'a, OrderedTaxonomyEntry<I>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Taxonomy plural to taxonomy, e.g. `list["tags"]`
#[derive(Debug, Clone)]
pub struct TaxonomyList<I> {
    taxonomies: HashMap<String, Taxonomy<I>>,
}

impl<I> Default for TaxonomyList<I> {
    fn default() -> Self {
        Self {
            taxonomies: HashMap::new(),
        }
    }
}

impl<I> TaxonomyList<I> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make sure a taxonomy exists even before any item is added to it
    pub fn ensure(&mut self, plural: impl Into<String>) -> &mut Taxonomy<I> {
        self.taxonomies.entry(plural.into()).or_default()
    }

    pub fn add(&mut self, plural: &str, key: impl Into<String>, item: WeightedItem<I>) {
        match self.taxonomies.get_mut(plural) {
            Some(taxonomy) => taxonomy.add(key, item),
            None => self.ensure(plural).add(key, item),
        }
    }

    pub fn get(&self, plural: &str) -> Option<&Taxonomy<I>> {
        self.taxonomies.get(plural)
    }

    pub fn len(&self) -> usize {
        self.taxonomies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.taxonomies.is_empty()
    }

    /// Taxonomy plurals in sorted order
    pub fn plurals(&self) -> Vec<&str> {
        let mut plurals: Vec<_> = self.taxonomies.keys().map(String::as_str).collect();
        plurals.sort_unstable();
        plurals
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Taxonomy<I>)> {
        self.taxonomies.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<I: ContentItem> TaxonomyList<I> {
    /// Deterministic hash of every (plural, term, item, weight) assignment.
    /// Two generations with the same classification hash identically.
    pub fn fingerprint(&self) -> String {
        let mut rows: Vec<(&str, &str, &str, i32)> = self
            .taxonomies
            .iter()
            .flat_map(|(plural, taxonomy)| {
                taxonomy.terms.iter().flat_map(move |(term, items)| {
                    items
                        .iter()
                        .map(move |w| (plural.as_str(), term.as_str(), w.item.identity(), w.weight))
                })
            })
            .collect();
        rows.sort_unstable();

        let mut hasher = Sha256::new();
        for (plural, term, identity, weight) in rows {
            hasher.update(plural.as_bytes());
            hasher.update([0]);
            hasher.update(term.as_bytes());
            hasher.update([0]);
            hasher.update(identity.as_bytes());
            hasher.update([0]);
            hasher.update(weight.to_le_bytes());
        }
        format!("{:x}", hasher.finalize())
    }
}

impl<I> fmt::Display for TaxonomyList<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TaxonomyList({})", self.taxonomies.len())
    }
}
