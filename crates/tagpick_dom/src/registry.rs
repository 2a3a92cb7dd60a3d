//! Element id index for O(1) `id` attribute lookups

use rustc_hash::FxHashMap;

use crate::tree::NodeId;

/// Index mapping `id` attribute values to nodes
///
/// Maintained by [`Document`](crate::Document) whenever an `id` attribute is
/// set, changed or its node removed. Lookups do not check attachment; the
/// document filters detached nodes itself.
#[derive(Debug, Default, Clone)]
pub struct IdIndex {
    /// String ID → NodeId mapping
    ids: FxHashMap<String, NodeId>,
    /// Reverse lookup (NodeId → String ID)
    reverse: FxHashMap<NodeId, String>,
}

impl IdIndex {
    /// Create a new empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an element ID
    ///
    /// If the ID already exists, the old mapping is replaced (last-wins).
    /// In debug builds, a warning is logged for duplicate IDs.
    pub fn register(&mut self, id: impl Into<String>, node: NodeId) {
        let id = id.into();

        #[cfg(debug_assertions)]
        {
            if let Some(existing) = self.ids.get(&id) {
                if *existing != node {
                    tracing::warn!("Duplicate element ID registered: {}", id);
                }
            }
        }

        if let Some(previous) = self.reverse.insert(node, id.clone()) {
            if previous != id {
                self.ids.remove(&previous);
            }
        }
        self.ids.insert(id, node);
    }

    /// Look up a node by string ID
    pub fn get(&self, id: &str) -> Option<NodeId> {
        self.ids.get(id).copied()
    }

    /// Look up the string ID of a node
    pub fn get_id(&self, node: NodeId) -> Option<&str> {
        self.reverse.get(&node).map(String::as_str)
    }

    /// Check if an ID is registered
    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains_key(id)
    }

    /// Number of registered IDs
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Check if the index is empty
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Unregister a specific node (on removal or when its `id` is cleared)
    pub fn unregister(&mut self, node: NodeId) {
        if let Some(id) = self.reverse.remove(&node) {
            // Only drop the forward mapping if it still points at this node
            if self.ids.get(&id) == Some(&node) {
                self.ids.remove(&id);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;

    fn nodes(n: usize) -> Vec<NodeId> {
        let mut map: SlotMap<NodeId, ()> = SlotMap::with_key();
        (0..n).map(|_| map.insert(())).collect()
    }

    #[test]
    fn test_register_and_lookup() {
        let ids = nodes(2);
        let mut index = IdIndex::new();
        index.register("colors", ids[0]);
        index.register("sizes", ids[1]);

        assert_eq!(index.get("colors"), Some(ids[0]));
        assert_eq!(index.get_id(ids[1]), Some("sizes"));
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn test_reregister_renames() {
        let ids = nodes(1);
        let mut index = IdIndex::new();
        index.register("old", ids[0]);
        index.register("new", ids[0]);

        assert!(!index.contains("old"));
        assert_eq!(index.get("new"), Some(ids[0]));
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn test_unregister_keeps_newer_owner() {
        let ids = nodes(2);
        let mut index = IdIndex::new();
        index.register("dup", ids[0]);
        index.register("dup", ids[1]);

        index.unregister(ids[0]);
        assert_eq!(index.get("dup"), Some(ids[1]));

        index.unregister(ids[1]);
        assert!(index.is_empty());
    }
}
