//! Registry of taxonomy nodes
//!
//! Nodes are keyed by a path built from the taxonomy plural and the
//! normalized term: `tags` for the taxonomy itself, `tags/go` for a term.
//! The registry owns every node; parents are referenced by [`NodeId`].

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::node::{NodeId, TaxonomyNode};
use crate::ports::KeyNormalizer;

/// Maps either `plural` or `plural/term` to a taxonomy node
pub struct TaxonomyNodeRegistry {
    nodes: Vec<TaxonomyNode>,
    by_key: HashMap<String, NodeId>,
    normalizer: Arc<dyn KeyNormalizer>,
}

impl TaxonomyNodeRegistry {
    pub fn new(normalizer: Arc<dyn KeyNormalizer>) -> Self {
        Self {
            nodes: Vec::new(),
            by_key: HashMap::new(),
            normalizer,
        }
    }

    /// Path-style join of the non-empty segments.
    ///
    /// Segments must not contain `/` themselves.
    pub fn key(segments: &[&str]) -> String {
        segments
            .iter()
            .map(|s| s.trim_matches('/'))
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join("/")
    }

    /// Register the taxonomy itself, recording its singular label
    pub fn register_taxonomy(&mut self, plural: &str, singular: &str) -> NodeId {
        let id = self.get_or_create(plural, "");
        let root = &mut self.nodes[id.0];
        if root.singular.is_empty() {
            root.singular = singular.to_string();
        }
        id
    }

    /// Get the node for `plural`/`term`, creating it if missing.
    /// An existing node is returned untouched.
    pub fn get_or_create(&mut self, plural: &str, term: &str) -> NodeId {
        let term_key = self.normalizer.normalize(term);
        let key = Self::key(&[plural, &term_key]);

        if let Some(&id) = self.by_key.get(&key) {
            return id;
        }

        let id = NodeId(self.nodes.len());
        self.nodes.push(TaxonomyNode::new(plural, term_key, term));
        self.by_key.insert(key, id);

        tracing::trace!(plural = %plural, term = %term, node = %id, "Created taxonomy node");

        id
    }

    /// Get or create the term node and link it to its taxonomy root.
    ///
    /// # Panics
    ///
    /// Panics if the root for `plural` was never registered. Roots are
    /// registered before any term; a missing root means the build ran out
    /// of order.
    pub fn get_or_add(&mut self, plural: &str, term: &str) -> NodeId {
        let Some(parent) = self.root(plural) else {
            panic!("no parent found with plural {plural:?} (term {term:?})");
        };

        let child = self.get_or_create(plural, term);
        if child != parent {
            let singular = self.nodes[parent.0].singular.clone();
            let node = &mut self.nodes[child.0];
            node.parent = Some(parent);
            if node.singular.is_empty() {
                node.singular = singular;
            }
        }
        child
    }

    /// Look up a node by its path segments, e.g. `["tags", "go"]`.
    /// Segments are used verbatim; term segments must already be keys.
    pub fn get(&self, segments: &[&str]) -> Option<NodeId> {
        self.by_key.get(&Self::key(segments)).copied()
    }

    /// The root node of `plural`, keyed the way `register_taxonomy` stores it
    pub fn root(&self, plural: &str) -> Option<NodeId> {
        let root_key = self.normalizer.normalize("");
        self.get(&[plural, &root_key])
    }

    /// Look up a term node by its raw term
    pub fn find(&self, plural: &str, term: &str) -> Option<NodeId> {
        let term_key = self.normalizer.normalize(term);
        self.get(&[plural, &term_key])
    }

    pub fn node(&self, id: NodeId) -> &TaxonomyNode {
        &self.nodes[id.0]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut TaxonomyNode {
        &mut self.nodes[id.0]
    }

    /// Every node, in creation order
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &TaxonomyNode)> {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeId(i), n))
    }

    /// Term nodes whose parent is `root`
    pub fn children(&self, root: NodeId) -> impl Iterator<Item = (NodeId, &TaxonomyNode)> {
        self.nodes().filter(move |(_, n)| n.parent == Some(root))
    }

    /// Root nodes, one per registered taxonomy
    pub fn roots(&self) -> impl Iterator<Item = (NodeId, &TaxonomyNode)> {
        self.nodes().filter(|(_, n)| n.is_root())
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn normalize(&self, term: &str) -> String {
        self.normalizer.normalize(term)
    }
}

impl fmt::Debug for TaxonomyNodeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaxonomyNodeRegistry")
            .field("nodes", &self.nodes.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::PathKeyNormalizer;

    fn registry() -> TaxonomyNodeRegistry {
        TaxonomyNodeRegistry::new(Arc::new(PathKeyNormalizer::default()))
    }

    #[test]
    fn test_key_joins_segments() {
        assert_eq!(TaxonomyNodeRegistry::key(&["tags"]), "tags");
        assert_eq!(TaxonomyNodeRegistry::key(&["tags", ""]), "tags");
        assert_eq!(TaxonomyNodeRegistry::key(&["tags", "go"]), "tags/go");
    }

    #[test]
    fn test_get_or_create_is_idempotent() {
        let mut registry = registry();
        let first = registry.get_or_create("tags", "Go Lang");
        let second = registry.get_or_create("tags", "go lang");

        assert_eq!(first, second);
        assert_eq!(registry.len(), 1);

        let node = registry.node(first);
        assert_eq!(node.term_key(), "go-lang");
        // The first raw term wins
        assert_eq!(node.term(), "Go Lang");
        assert_eq!(node.plural(), "tags");
        assert!(node.owner().is_none());
    }

    #[test]
    fn test_get_or_add_links_parent() {
        let mut registry = registry();
        let root = registry.register_taxonomy("tags", "tag");
        let child = registry.get_or_add("tags", "Go");

        assert_eq!(registry.node(child).parent(), Some(root));
        assert_eq!(registry.get_or_create("tags", ""), root);
        assert!(registry.node(root).parent().is_none());
        assert_eq!(registry.node(child).singular(), "tag");

        // Repeating keeps the same node and parent
        assert_eq!(registry.get_or_add("tags", "go"), child);
        assert_eq!(registry.node(child).parent(), Some(root));
    }

    #[test]
    #[should_panic(expected = "no parent found with plural \"tags\"")]
    fn test_get_or_add_without_root_panics() {
        let mut registry = registry();
        registry.get_or_add("tags", "go");
    }

    #[test]
    fn test_get_returns_none_for_unknown() {
        let mut registry = registry();
        registry.register_taxonomy("tags", "tag");
        let go = registry.get_or_add("tags", "Go");

        assert_eq!(registry.get(&["tags", "go"]), Some(go));
        assert_eq!(registry.find("tags", "GO"), Some(go));
        assert!(registry.get(&["tags", "rust"]).is_none());
        assert!(registry.get(&["categories"]).is_none());
    }

    #[test]
    fn test_children_and_roots() {
        let mut registry = registry();
        let tags = registry.register_taxonomy("tags", "tag");
        let categories = registry.register_taxonomy("categories", "category");
        registry.get_or_add("tags", "go");
        registry.get_or_add("tags", "rust");
        registry.get_or_add("categories", "dev");

        let tag_terms: Vec<_> = registry.children(tags).map(|(_, n)| n.term()).collect();
        assert_eq!(tag_terms, vec!["go", "rust"]);
        assert_eq!(registry.children(categories).count(), 1);
        assert_eq!(registry.roots().count(), 2);
    }

    #[test]
    fn test_custom_normalizer() {
        let mut registry = TaxonomyNodeRegistry::new(Arc::new(|term: &str| term.to_string()));
        registry.register_taxonomy("tags", "tag");
        let upper = registry.get_or_add("tags", "Go");
        let lower = registry.get_or_add("tags", "go");

        assert_ne!(upper, lower);
    }

    #[test]
    fn test_prefixing_normalizer_finds_registered_root() {
        let normalizer = |term: &str| format!("t-{}", term.to_lowercase());
        let mut registry = TaxonomyNodeRegistry::new(Arc::new(normalizer));
        let root = registry.register_taxonomy("tags", "tag");

        assert_eq!(registry.root("tags"), Some(root));
        assert_eq!(registry.get_or_create("tags", ""), root);

        let go = registry.get_or_add("tags", "Go");
        assert_ne!(go, root);
        assert_eq!(registry.node(go).parent(), Some(root));
        assert_eq!(registry.node(go).term_key(), "t-go");
        assert_eq!(registry.roots().count(), 1);
    }
}
