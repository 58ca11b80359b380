//! Named relationship edges between frame identities.
//!
//! Targets are plain identity strings, not ownership pointers: an edge may
//! reference an identity that does not exist yet (a forward reference).
//! Referential integrity is never required at write time — writes stay O(1)
//! amortized per edge — and [`RelationshipGraph::resolve`] classifies each
//! target against live presence lazily at query time.

use std::collections::{BTreeMap, BTreeSet};

/// Query-time classification of a frame's relationship targets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
    /// Targets present in the store at query time.
    pub resolved: BTreeSet<String>,
    /// Forward references: targets no frame currently answers to.
    pub unresolved: BTreeSet<String>,
}

/// The mapping of named relationship edges between frame identities.
///
/// Edges of the same relation from the same source preserve insertion order
/// and collapse exact target repeats.
#[derive(Debug, Clone, Default)]
pub struct RelationshipGraph {
    edges: BTreeMap<String, BTreeMap<String, Vec<String>>>,
}

impl RelationshipGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one edge.  Returns `false` when the exact edge already existed.
    pub fn add_edge(&mut self, from: &str, relation: &str, to: &str) -> bool {
        let targets = self
            .edges
            .entry(from.to_string())
            .or_default()
            .entry(relation.to_string())
            .or_default();
        if targets.iter().any(|t| t == to) {
            return false;
        }
        targets.push(to.to_string());
        true
    }

    /// Remove one edge.  Returns `false` when it was not present.
    pub fn remove_edge(&mut self, from: &str, relation: &str, to: &str) -> bool {
        let Some(relations) = self.edges.get_mut(from) else {
            return false;
        };
        let Some(targets) = relations.get_mut(relation) else {
            return false;
        };
        let Some(pos) = targets.iter().position(|t| t == to) else {
            return false;
        };
        targets.remove(pos);
        if targets.is_empty() {
            relations.remove(relation);
        }
        if relations.is_empty() {
            self.edges.remove(from);
        }
        true
    }

    /// Replace every outgoing edge of `from` with the given relation map.
    /// Used when a frame is (re)stored with its merged relationships.
    pub fn replace_node(&mut self, from: &str, relationships: &BTreeMap<String, Vec<String>>) {
        if relationships.is_empty() {
            self.edges.remove(from);
        } else {
            self.edges.insert(from.to_string(), relationships.clone());
        }
    }

    /// Drop every outgoing edge of `from` (its inbound edges, held by other
    /// sources, stay and simply resolve as unresolved from now on).
    pub fn remove_node(&mut self, from: &str) {
        self.edges.remove(from);
    }

    /// All outgoing edges of `identity`: relation → ordered target list.
    pub fn edges_from(&self, identity: &str) -> BTreeMap<String, Vec<String>> {
        self.edges.get(identity).cloned().unwrap_or_default()
    }

    /// Classify every target of `identity` by live presence.
    ///
    /// `is_present` is consulted per distinct target at query time; nothing
    /// is cached, so the answer always reflects the store's current state.
    pub fn resolve<F>(&self, identity: &str, is_present: F) -> Resolution
    where
        F: Fn(&str) -> bool,
    {
        let mut resolution = Resolution::default();
        let Some(relations) = self.edges.get(identity) else {
            return resolution;
        };
        for targets in relations.values() {
            for target in targets {
                if is_present(target) {
                    resolution.resolved.insert(target.clone());
                } else {
                    resolution.unresolved.insert(target.clone());
                }
            }
        }
        resolution
    }
}
