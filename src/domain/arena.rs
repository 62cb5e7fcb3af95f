use std::collections::HashMap;
use std::sync::Arc;

use generational_arena::{Arena, Index};
use tracing::instrument;

use crate::domain::entities::{path_key, BranchDescriptor};
use crate::domain::node::BranchNode;

/// Branch waiting to be linked into a tree.
#[derive(Debug)]
pub struct StagedBranch {
    pub descriptor: Arc<BranchDescriptor>,
    /// Indices of child branches in the arena, in link order
    pub children: Vec<Index>,
}

/// Arena-based staging area for linking branches by index.
///
/// Every descriptor gets one slot; a case-folded path index maps each path
/// to all slots carrying it, so parent lookups are O(1) and duplicates are
/// kept side by side instead of overwriting each other.
#[derive(Debug, Default)]
pub struct BranchArena {
    arena: Arena<StagedBranch>,
    /// Slots in insertion order
    order: Vec<Index>,
    by_path: HashMap<String, Vec<Index>>,
}

impl BranchArena {
    pub fn with_capacity(n: usize) -> Self {
        Self {
            arena: Arena::with_capacity(n),
            order: Vec::with_capacity(n),
            by_path: HashMap::with_capacity(n),
        }
    }

    #[instrument(level = "trace", skip(self))]
    pub fn insert(&mut self, descriptor: Arc<BranchDescriptor>) -> Index {
        let key = path_key(&descriptor.path);
        let idx = self.arena.insert(StagedBranch {
            descriptor,
            children: Vec::new(),
        });
        self.order.push(idx);
        self.by_path.entry(key).or_default().push(idx);
        idx
    }

    /// All slots whose path equals `path` (case-insensitive).
    pub fn candidates(&self, path: &str) -> &[Index] {
        self.by_path
            .get(&path_key(path))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn get(&self, idx: Index) -> Option<&StagedBranch> {
        self.arena.get(idx)
    }

    /// Slots in insertion order.
    pub fn indices(&self) -> &[Index] {
        &self.order
    }

    #[instrument(level = "trace", skip(self))]
    pub fn link(&mut self, parent: Index, child: Index) {
        if let Some(parent) = self.arena.get_mut(parent) {
            parent.children.push(child);
        }
    }

    /// Build the owned subtree rooted at `idx`.
    ///
    /// Every slot has at most one parent, so each slot is materialized at
    /// most once per root. Uses an explicit stack; depth is unbounded.
    pub fn materialize(&self, idx: Index) -> Option<BranchNode> {
        let staged = self.arena.get(idx)?;
        let mut below = Vec::new();
        let mut stack: Vec<(usize, Index)> =
            staged.children.iter().rev().map(|&child| (1, child)).collect();
        while let Some((depth, idx)) = stack.pop() {
            let Some(current) = self.arena.get(idx) else {
                continue;
            };
            below.push((depth, Arc::clone(&current.descriptor)));
            stack.extend(current.children.iter().rev().map(|&child| (depth + 1, child)));
        }
        Some(BranchNode::assemble(Arc::clone(&staged.descriptor), below))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidates_groups_paths_case_insensitively() {
        let mut arena = BranchArena::default();
        let first = arena.insert(Arc::new(BranchDescriptor::root("$/Main")));
        let second = arena.insert(Arc::new(BranchDescriptor::root("$/MAIN")));
        arena.insert(Arc::new(BranchDescriptor::root("$/Other")));

        assert_eq!(arena.candidates("$/main"), &[first, second]);
        assert!(arena.candidates("$/missing").is_empty());
        assert_eq!(arena.indices().len(), 3);
    }

    #[test]
    fn test_materialize_follows_links() {
        let mut arena = BranchArena::default();
        let root = arena.insert(Arc::new(BranchDescriptor::root("$/A")));
        let child = arena.insert(Arc::new(BranchDescriptor::child("$/A/B", "$/A")));
        arena.link(root, child);

        let node = arena.materialize(root).unwrap();
        assert_eq!(node.path(), "$/A");
        assert_eq!(node.children().len(), 1);
        assert_eq!(node.children()[0].path(), "$/A/B");
    }

    #[test]
    fn test_materialize_keeps_sibling_order_below_deep_branch() {
        let mut arena = BranchArena::default();
        let a = arena.insert(Arc::new(BranchDescriptor::root("$/A")));
        let b = arena.insert(Arc::new(BranchDescriptor::child("$/A/B", "$/A")));
        let c = arena.insert(Arc::new(BranchDescriptor::child("$/A/B/C", "$/A/B")));
        let d = arena.insert(Arc::new(BranchDescriptor::child("$/A/D", "$/A")));
        arena.link(a, b);
        arena.link(b, c);
        arena.link(a, d);

        let node = arena.materialize(a).unwrap();
        let order: Vec<_> = node.iter().map(|(depth, n)| (depth, n.path())).collect();
        assert_eq!(
            order,
            vec![(0, "$/A"), (1, "$/A/B"), (2, "$/A/B/C"), (1, "$/A/D")]
        );
    }
}
