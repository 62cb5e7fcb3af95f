//! Owned branch tree node

use std::fmt;
use std::sync::Arc;

use crate::domain::entities::BranchDescriptor;
use crate::domain::error::{DomainError, DomainResult};

/// A branch together with the branches created from it.
///
/// Children are owned exclusively by their parent; roots are owned by the
/// forest (`Vec<BranchNode>`) returned from the builder. Building, cloning,
/// comparing and dropping never recurse, so arbitrarily deep chains are fine.
#[derive(Debug)]
pub struct BranchNode {
    descriptor: Arc<BranchDescriptor>,
    children: Vec<BranchNode>,
}

impl BranchNode {
    pub fn new(descriptor: impl Into<Arc<BranchDescriptor>>) -> Self {
        Self {
            descriptor: descriptor.into(),
            children: Vec::new(),
        }
    }

    /// Create a node with an initial list of children.
    ///
    /// A missing list is a caller error and is not treated as empty.
    pub fn with_children(
        descriptor: impl Into<Arc<BranchDescriptor>>,
        children: Option<Vec<BranchNode>>,
    ) -> DomainResult<Self> {
        let children = children.ok_or(DomainError::InvalidArgument { name: "children" })?;
        Ok(Self {
            descriptor: descriptor.into(),
            children,
        })
    }

    pub fn add_child(&mut self, child: BranchNode) {
        self.children.push(child);
    }

    pub fn descriptor(&self) -> &BranchDescriptor {
        &self.descriptor
    }

    pub fn children(&self) -> &[BranchNode] {
        &self.children
    }

    pub fn path(&self) -> &str {
        &self.descriptor.path
    }

    pub fn parent_path(&self) -> Option<&str> {
        self.descriptor.parent_path.as_deref()
    }

    pub fn is_root(&self) -> bool {
        self.descriptor.is_root
    }

    /// Assemble a tree from `root` and its descendants in pre-order.
    ///
    /// `below` yields `(depth, descriptor)` with depth counted from `root`
    /// (children of `root` have depth 1).
    pub(crate) fn assemble<I>(root: Arc<BranchDescriptor>, below: I) -> Self
    where
        I: IntoIterator<Item = (usize, Arc<BranchDescriptor>)>,
    {
        let mut root = BranchNode::new(root);
        // open[i] is the unfinished node at depth i + 1
        let mut open: Vec<BranchNode> = Vec::new();
        for (depth, descriptor) in below {
            while !open.is_empty() && open.len() >= depth {
                close_last(&mut root, &mut open);
            }
            open.push(BranchNode::new(descriptor));
        }
        while !open.is_empty() {
            close_last(&mut root, &mut open);
        }
        root
    }

    /// Human readable one-liner: `<path> [<n> children]`.
    pub fn to_display_string(&self) -> String {
        self.to_string()
    }

    /// Number of levels in this subtree (a leaf has depth 1).
    pub fn depth(&self) -> usize {
        1 + self.iter().map(|(depth, _)| depth).max().unwrap_or(0)
    }

    /// Paths of all leaf branches in this subtree, left to right.
    pub fn leaf_paths(&self) -> Vec<String> {
        self.iter()
            .filter(|(_, node)| node.children.is_empty())
            .map(|(_, node)| node.path().to_string())
            .collect()
    }
}

/// Move the deepest open node into its parent.
fn close_last(root: &mut BranchNode, open: &mut Vec<BranchNode>) {
    if let Some(done) = open.pop() {
        match open.last_mut() {
            Some(parent) => parent.children.push(done),
            None => root.children.push(done),
        }
    }
}

impl Clone for BranchNode {
    fn clone(&self) -> Self {
        BranchNode::assemble(
            Arc::clone(&self.descriptor),
            self.iter()
                .skip(1)
                .map(|(depth, node)| (depth, Arc::clone(&node.descriptor))),
        )
    }
}

/// Same shape and same descriptors: equal pre-order `(depth, descriptor)` sequences.
impl PartialEq for BranchNode {
    fn eq(&self, other: &Self) -> bool {
        self.iter()
            .map(|(depth, node)| (depth, node.descriptor()))
            .eq(other.iter().map(|(depth, node)| (depth, node.descriptor())))
    }
}

impl Eq for BranchNode {}

impl Drop for BranchNode {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.children);
        }
    }
}

impl fmt::Display for BranchNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{} children]", self.path(), self.children.len())
    }
}
