//! Domain models and value objects

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use time::OffsetDateTime;

/// Anything carrying a publication date and a last-modified date.
///
/// `None` stands for the zero/unset date.
pub trait Dated {
    fn date(&self) -> Option<OffsetDateTime>;
    fn lastmod(&self) -> Option<OffsetDateTime>;
}

/// A content item that can be classified into taxonomies
pub trait ContentItem: Dated {
    /// Stable identity, used for ordering ties and fingerprints
    fn identity(&self) -> &str;
}

impl<T: Dated + ?Sized> Dated for Arc<T> {
    fn date(&self) -> Option<OffsetDateTime> {
        (**self).date()
    }

    fn lastmod(&self) -> Option<OffsetDateTime> {
        (**self).lastmod()
    }
}

impl<T: ContentItem + ?Sized> ContentItem for Arc<T> {
    fn identity(&self) -> &str {
        (**self).identity()
    }
}

/// A date/lastmod pair
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dates {
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub date: Option<OffsetDateTime>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub lastmod: Option<OffsetDateTime>,
}

impl Dates {
    pub fn new(date: Option<OffsetDateTime>, lastmod: Option<OffsetDateTime>) -> Self {
        Self { date, lastmod }
    }

    /// True when neither date is set
    pub fn is_zero(&self) -> bool {
        self.date.is_none() && self.lastmod.is_none()
    }

    /// Advance each field to the value carried by `other` if that value is
    /// strictly later. An unset value never replaces anything.
    pub fn update_if_after(&mut self, other: &(impl Dated + ?Sized)) {
        // `None` orders below every `Some`, so an unset candidate never wins.
        if other.date() > self.date {
            self.date = other.date();
        }
        if other.lastmod() > self.lastmod {
            self.lastmod = other.lastmod();
        }
    }
}

impl Dated for Dates {
    fn date(&self) -> Option<OffsetDateTime> {
        self.date
    }

    fn lastmod(&self) -> Option<OffsetDateTime> {
        self.lastmod
    }
}

/// A content page as supplied by a content source, already classified
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// Stable identifier
    pub id: String,
    /// Display title
    #[serde(default)]
    pub title: String,
    #[serde(flatten)]
    pub dates: Dates,
    /// Terms per taxonomy plural, e.g. `tags => [go, rust]`
    #[serde(default)]
    pub taxonomies: BTreeMap<String, Vec<String>>,
    /// Ordering weight per taxonomy plural
    #[serde(default)]
    pub weights: BTreeMap<String, i32>,
}

impl Page {
    /// Flatten the page's taxonomy assignments into memberships
    pub fn memberships(&self) -> Vec<Membership> {
        self.taxonomies
            .iter()
            .flat_map(|(plural, terms)| {
                let weight = self.weights.get(plural).copied().unwrap_or(0);
                terms.iter().map(move |term| Membership {
                    plural: plural.clone(),
                    term: term.clone(),
                    weight,
                })
            })
            .collect()
    }
}

impl Dated for Page {
    fn date(&self) -> Option<OffsetDateTime> {
        self.dates.date
    }

    fn lastmod(&self) -> Option<OffsetDateTime> {
        self.dates.lastmod
    }
}

impl ContentItem for Page {
    fn identity(&self) -> &str {
        &self.id
    }
}

/// One taxonomy assignment of an item: the item carries `term` in `plural`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Membership {
    pub plural: String,
    /// Raw, un-normalized term
    pub term: String,
    pub weight: i32,
}

impl Membership {
    pub fn new(plural: impl Into<String>, term: impl Into<String>, weight: i32) -> Self {
        Self {
            plural: plural.into(),
            term: term.into(),
            weight,
        }
    }
}

/// An item together with the taxonomy memberships decided by the caller
#[derive(Debug, Clone)]
pub struct ClassifiedItem<I> {
    pub item: I,
    pub memberships: Vec<Membership>,
}

impl<I> ClassifiedItem<I> {
    pub fn new(item: I, memberships: Vec<Membership>) -> Self {
        Self { item, memberships }
    }
}

impl From<Page> for ClassifiedItem<Arc<Page>> {
    fn from(page: Page) -> Self {
        let memberships = page.memberships();
        Self {
            item: Arc::new(page),
            memberships,
        }
    }
}

/// Index of a page produced by the rendering layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PageId(pub usize);

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "page#{}", self.0)
    }
}

/// A page-like entity that can own a taxonomy node
pub trait OwnerPage: Dated {
    fn page_id(&self) -> PageId;
    fn dates_mut(&mut self) -> &mut Dates;
}

/// Kind of page materialized for a taxonomy node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageKind {
    /// The listing of all terms in a taxonomy (root node)
    TaxonomyList,
    /// The page of a single term
    Term,
}

/// A page representing a taxonomy or a term
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TermPage {
    pub id: PageId,
    pub kind: PageKind,
    pub plural: String,
    /// Raw term, empty for a taxonomy list page
    pub term: String,
    pub title: String,
    #[serde(flatten)]
    pub dates: Dates,
}

impl TermPage {
    pub fn new(
        id: PageId,
        kind: PageKind,
        plural: impl Into<String>,
        term: impl Into<String>,
        title: impl Into<String>,
    ) -> Self {
        Self {
            id,
            kind,
            plural: plural.into(),
            term: term.into(),
            title: title.into(),
            dates: Dates::default(),
        }
    }

    /// Set explicit dates declared by the page itself
    pub fn with_dates(mut self, dates: Dates) -> Self {
        self.dates = dates;
        self
    }
}

impl Dated for TermPage {
    fn date(&self) -> Option<OffsetDateTime> {
        self.dates.date
    }

    fn lastmod(&self) -> Option<OffsetDateTime> {
        self.dates.lastmod
    }
}

impl OwnerPage for TermPage {
    fn page_id(&self) -> PageId {
        self.id
    }

    fn dates_mut(&mut self) -> &mut Dates {
        &mut self.dates
    }
}
