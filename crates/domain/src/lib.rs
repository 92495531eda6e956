//! taxonomy-index domain crate
//!
//! The core of the taxonomy index, following hexagonal architecture:
//! - `model`: Content items, dates and term pages
//! - `taxonomy`: Taxonomy groups and their ordered views
//! - `node` / `registry`: Per-term metadata nodes and their registry
//! - `ports`: Trait definitions for external collaborators
//! - `policy`: Default term key normalization
//! - `usecases`: Build generations, term page binding and listings

pub mod model;
pub mod node;
pub mod policy;
pub mod ports;
pub mod registry;
pub mod taxonomy;
pub mod usecases;

pub use model::*;
pub use node::{NodeId, TaxonomyNode};
pub use policy::PathKeyNormalizer;
pub use ports::*;
pub use registry::TaxonomyNodeRegistry;
pub use taxonomy::{
    OrderedTaxonomy, OrderedTaxonomyEntry, SortOrder, Taxonomy, TaxonomyList, WeightedItem,
    WeightedItems,
};
