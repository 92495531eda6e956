//! Build use case - classifies items into a fresh taxonomy index generation

use std::sync::{Arc, Mutex};
use std::thread;
use uuid::Uuid;

use crate::{
    model::{ClassifiedItem, ContentItem},
    node::{NodeId, TaxonomyNode},
    ports::KeyNormalizer,
    registry::TaxonomyNodeRegistry,
    taxonomy::{TaxonomyList, WeightedItem},
};

/// A configured taxonomy, e.g. `tag` / `tags`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaxonomyDef {
    pub singular: String,
    pub plural: String,
}

impl TaxonomyDef {
    pub fn new(singular: impl Into<String>, plural: impl Into<String>) -> Self {
        Self {
            singular: singular.into(),
            plural: plural.into(),
        }
    }
}

/// Configuration for a build generation
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Taxonomies registered before any item is classified
    pub taxonomies: Vec<TaxonomyDef>,
    /// Worker threads used by `classify_all`
    pub max_workers: usize,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            taxonomies: vec![
                TaxonomyDef::new("tag", "tags"),
                TaxonomyDef::new("category", "categories"),
            ],
            max_workers: 4,
        }
    }
}

/// Errors from a build generation
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Build state poisoned: a classification worker panicked")]
    Poisoned,
}

struct BuildState<I> {
    taxonomies: TaxonomyList<I>,
    nodes: TaxonomyNodeRegistry,
    items: usize,
    skipped: usize,
}

/// One build generation, open for classification.
///
/// Writers may classify from many threads; everything sits behind a
/// single lock. [`IndexBuilder::freeze`] ends the generation and is the
/// only way to obtain ordered views.
pub struct IndexBuilder<I> {
    generation: Uuid,
    max_workers: usize,
    state: Mutex<BuildState<I>>,
}

impl<I> IndexBuilder<I>
where
    I: ContentItem + Clone + Send,
{
    /// Start a generation, registering every configured taxonomy root
    pub fn new(config: &BuildConfig, normalizer: Arc<dyn KeyNormalizer>) -> Self {
        let generation = Uuid::new_v4();
        let mut nodes = TaxonomyNodeRegistry::new(normalizer);
        let mut taxonomies = TaxonomyList::new();

        for def in &config.taxonomies {
            nodes.register_taxonomy(&def.plural, &def.singular);
            taxonomies.ensure(def.plural.clone());
        }

        tracing::info!(
            generation = %generation,
            taxonomies = ?config.taxonomies.iter().map(|t| &t.plural).collect::<Vec<_>>(),
            "Started taxonomy generation"
        );

        Self {
            generation,
            max_workers: config.max_workers.max(1),
            state: Mutex::new(BuildState {
                taxonomies,
                nodes,
                items: 0,
                skipped: 0,
            }),
        }
    }

    pub fn generation(&self) -> Uuid {
        self.generation
    }

    /// Add one item to every taxonomy term it belongs to.
    ///
    /// Memberships in unregistered taxonomies, or with a term that
    /// normalizes to an empty key, are skipped.
    pub fn classify(&self, classified: ClassifiedItem<I>) -> Result<(), BuildError> {
        let mut state = self.state.lock().map_err(|_| BuildError::Poisoned)?;
        let BuildState {
            taxonomies,
            nodes,
            items,
            skipped,
        } = &mut *state;

        let item = classified.item;
        for membership in &classified.memberships {
            let plural = membership.plural.as_str();
            let Some(root) = nodes.root(plural) else {
                tracing::warn!(
                    item = %item.identity(),
                    plural = %plural,
                    "Skipping membership in unregistered taxonomy"
                );
                *skipped += 1;
                continue;
            };

            let key = nodes.normalize(&membership.term);
            if key.is_empty() {
                tracing::warn!(
                    item = %item.identity(),
                    plural = %plural,
                    term = %membership.term,
                    "Skipping term with empty key"
                );
                *skipped += 1;
                continue;
            }

            taxonomies.add(plural, key, WeightedItem::new(item.clone(), membership.weight));

            let node = nodes.get_or_add(plural, &membership.term);
            nodes.node_mut(node).update_from_item(&item);
            nodes.node_mut(root).update_from_item(&item);
        }

        *items += 1;
        tracing::debug!(
            item = %item.identity(),
            memberships = classified.memberships.len(),
            "Classified item"
        );

        Ok(())
    }

    /// Classify a batch, spreading it across the configured workers
    pub fn classify_all(&self, batch: Vec<ClassifiedItem<I>>) -> Result<usize, BuildError> {
        let total = batch.len();
        if total == 0 {
            return Ok(0);
        }

        let workers = self.max_workers.min(total);
        let mut shards: Vec<Vec<ClassifiedItem<I>>> = (0..workers).map(|_| Vec::new()).collect();
        for (i, classified) in batch.into_iter().enumerate() {
            shards[i % workers].push(classified);
        }

        thread::scope(|scope| {
            let handles: Vec<_> = shards
                .into_iter()
                .map(|shard| {
                    scope.spawn(move || {
                        for classified in shard {
                            self.classify(classified)?;
                        }
                        Ok::<(), BuildError>(())
                    })
                })
                .collect();

            // Join every worker before reporting so none is left to re-panic the scope
            let results: Vec<_> = handles
                .into_iter()
                .map(|handle| handle.join().unwrap_or(Err(BuildError::Poisoned)))
                .collect();
            results.into_iter().collect::<Result<(), BuildError>>()
        })?;

        Ok(total)
    }

    /// End the generation; the result is read-only for rendering
    pub fn freeze(self) -> Result<TaxonomyIndex<I>, BuildError> {
        let state = self.state.into_inner().map_err(|_| BuildError::Poisoned)?;

        tracing::info!(
            generation = %self.generation,
            items = state.items,
            skipped_memberships = state.skipped,
            taxonomies = state.taxonomies.len(),
            nodes = state.nodes.len(),
            "Froze taxonomy generation"
        );

        Ok(TaxonomyIndex {
            generation: self.generation,
            taxonomies: state.taxonomies,
            nodes: state.nodes,
            items: state.items,
        })
    }
}

/// A frozen generation: taxonomy groups plus the node registry
#[derive(Debug)]
pub struct TaxonomyIndex<I> {
    generation: Uuid,
    taxonomies: TaxonomyList<I>,
    nodes: TaxonomyNodeRegistry,
    items: usize,
}

impl<I> TaxonomyIndex<I> {
    pub fn generation(&self) -> Uuid {
        self.generation
    }

    pub fn taxonomies(&self) -> &TaxonomyList<I> {
        &self.taxonomies
    }

    pub fn nodes(&self) -> &TaxonomyNodeRegistry {
        &self.nodes
    }

    /// Mutable access for binding term pages
    pub fn nodes_mut(&mut self) -> &mut TaxonomyNodeRegistry {
        &mut self.nodes
    }

    /// Number of items classified in this generation
    pub fn item_count(&self) -> usize {
        self.items
    }

    /// Node for a taxonomy term given its key
    pub fn term_node(&self, plural: &str, term_key: &str) -> Option<&TaxonomyNode> {
        self.node_id(plural, term_key).map(|id| self.nodes.node(id))
    }

    fn node_id(&self, plural: &str, term_key: &str) -> Option<NodeId> {
        self.nodes.get(&[plural, term_key])
    }
}
