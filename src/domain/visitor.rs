//! Depth-first traversal over branch trees.
//!
//! All traversals are pre-order: a node is visited before its children and
//! children are visited in list order. The starting node has depth 0.

use std::ops::ControlFlow;

use crate::domain::entities::{is_same_or_under, paths_equal};
use crate::domain::node::BranchNode;

/// Callback invoked for every node of a walk.
///
/// Returning `ControlFlow::Break(())` ends the whole walk. Closures of type
/// `FnMut(&BranchNode, usize) -> ControlFlow<()>` are visitors too.
pub trait BranchVisitor {
    fn visit(&mut self, node: &BranchNode, depth: usize) -> ControlFlow<()>;
}

impl<F> BranchVisitor for F
where
    F: FnMut(&BranchNode, usize) -> ControlFlow<()>,
{
    fn visit(&mut self, node: &BranchNode, depth: usize) -> ControlFlow<()> {
        self(node, depth)
    }
}

/// Walk the tree below and including `node`.
///
/// Driven by [`PreOrderIter`], so deep trees do not grow the call stack.
pub fn walk<V>(node: &BranchNode, visitor: &mut V) -> ControlFlow<()>
where
    V: BranchVisitor + ?Sized,
{
    for (depth, current) in node.iter() {
        visitor.visit(current, depth)?;
    }
    ControlFlow::Continue(())
}

/// Walk every node without early exit.
pub fn for_each_depth<F>(node: &BranchNode, mut f: F)
where
    F: FnMut(&BranchNode, usize),
{
    let _ = walk(node, &mut |n: &BranchNode, depth: usize| {
        f(n, depth);
        ControlFlow::Continue(())
    });
}

impl BranchNode {
    pub fn accept_visitor<V>(&self, visitor: &mut V) -> ControlFlow<()>
    where
        V: BranchVisitor + ?Sized,
    {
        walk(self, visitor)
    }

    /// Pre-order iterator yielding `(depth, node)`, starting with `self` at 0.
    pub fn iter(&self) -> PreOrderIter<'_> {
        PreOrderIter {
            stack: vec![(0, self)],
        }
    }
}

pub struct PreOrderIter<'a> {
    stack: Vec<(usize, &'a BranchNode)>,
}

impl<'a> Iterator for PreOrderIter<'a> {
    type Item = (usize, &'a BranchNode);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, node) = self.stack.pop()?;
        // Push children in reverse order for left-to-right traversal
        for child in node.children().iter().rev() {
            self.stack.push((depth + 1, child));
        }
        Some((depth, node))
    }
}

/// Every node strictly below `node`, in pre-order.
pub fn all_descendants(node: Option<&BranchNode>) -> Vec<&BranchNode> {
    match node {
        Some(node) => node.iter().skip(1).map(|(_, n)| n).collect(),
        None => Vec::new(),
    }
}

/// Descendants of the node named `target_path` at or below `node`.
///
/// `node` itself is checked first. A matching node's subtree is not searched
/// further; if the name occurs in several sibling subtrees the results are
/// concatenated in traversal order.
pub fn descendants_of_named<'a>(node: Option<&'a BranchNode>, target_path: &str) -> Vec<&'a BranchNode> {
    let mut found = Vec::new();
    let mut stack: Vec<&BranchNode> = node.into_iter().collect();
    while let Some(current) = stack.pop() {
        if paths_equal(current.path(), target_path) {
            found.extend(all_descendants(Some(current)));
            continue;
        }
        stack.extend(current.children().iter().rev());
    }
    found
}

/// Predicate deciding whether a branch path satisfies a search.
pub trait PathMatcher {
    fn matches(&self, branch_path: &str) -> bool;
}

impl<F> PathMatcher for F
where
    F: Fn(&str) -> bool,
{
    fn matches(&self, branch_path: &str) -> bool {
        self(branch_path)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// Branch path equals the target
    Exact,
    /// Branch path is the target or lies beneath it
    Contains,
}

impl MatchMode {
    pub fn from_exact(exact_match: bool) -> Self {
        if exact_match {
            MatchMode::Exact
        } else {
            MatchMode::Contains
        }
    }
}

/// Target path plus the way it is compared against branch paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathMatch {
    pub target: String,
    pub mode: MatchMode,
}

impl PathMatch {
    pub fn new(target: impl Into<String>, mode: MatchMode) -> Self {
        Self {
            target: target.into(),
            mode,
        }
    }
}

impl PathMatcher for PathMatch {
    fn matches(&self, branch_path: &str) -> bool {
        match self.mode {
            MatchMode::Exact => paths_equal(branch_path, &self.target),
            MatchMode::Contains => is_same_or_under(branch_path, &self.target),
        }
    }
}

/// Records whether any visited branch satisfies a matcher and stops the walk
/// on the first hit.
#[derive(Debug)]
pub struct ContainsPathVisitor<M> {
    matcher: M,
    found: bool,
}

impl ContainsPathVisitor<PathMatch> {
    pub fn for_path(target: impl Into<String>, exact_match: bool) -> Self {
        Self::new(PathMatch::new(target, MatchMode::from_exact(exact_match)))
    }
}

impl<M: PathMatcher> ContainsPathVisitor<M> {
    pub fn new(matcher: M) -> Self {
        Self {
            matcher,
            found: false,
        }
    }

    pub fn found(&self) -> bool {
        self.found
    }
}

impl<M: PathMatcher> BranchVisitor for ContainsPathVisitor<M> {
    fn visit(&mut self, node: &BranchNode, _depth: usize) -> ControlFlow<()> {
        if self.matcher.matches(node.path()) {
            self.found = true;
            return ControlFlow::Break(());
        }
        ControlFlow::Continue(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::BranchDescriptor;

    // $/A
    // ├── $/A/B
    // │   └── $/A/B/C
    // └── $/A/D
    fn sample_tree() -> BranchNode {
        let mut b = BranchNode::new(BranchDescriptor::child("$/A/B", "$/A"));
        b.add_child(BranchNode::new(BranchDescriptor::child("$/A/B/C", "$/A/B")));
        let mut a = BranchNode::new(BranchDescriptor::root("$/A"));
        a.add_child(b);
        a.add_child(BranchNode::new(BranchDescriptor::child("$/A/D", "$/A")));
        a
    }

    #[test]
    fn test_walk_is_pre_order_with_depth() {
        let tree = sample_tree();
        let mut seen = Vec::new();
        for_each_depth(&tree, |node, depth| seen.push((node.path().to_string(), depth)));

        assert_eq!(
            seen,
            vec![
                ("$/A".to_string(), 0),
                ("$/A/B".to_string(), 1),
                ("$/A/B/C".to_string(), 2),
                ("$/A/D".to_string(), 1),
            ]
        );
    }

    #[test]
    fn test_iter_matches_walk_order() {
        let tree = sample_tree();
        let mut walked = Vec::new();
        for_each_depth(&tree, |node, depth| walked.push((depth, node.path().to_string())));
        let iterated: Vec<_> = tree
            .iter()
            .map(|(depth, node)| (depth, node.path().to_string()))
            .collect();
        assert_eq!(walked, iterated);
    }

    #[test]
    fn test_break_stops_whole_walk() {
        let tree = sample_tree();
        let mut visited = 0;
        let flow = tree.accept_visitor(&mut |node: &BranchNode, _depth: usize| {
            visited += 1;
            if node.path() == "$/A/B" {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        });
        assert_eq!(flow, ControlFlow::Break(()));
        assert_eq!(visited, 2);
    }

    #[test]
    fn test_contains_path_visitor_stops_on_first_match() {
        let tree = sample_tree();
        let mut visitor = ContainsPathVisitor::new(|path: &str| path.ends_with("/B"));
        let _ = tree.accept_visitor(&mut visitor);
        assert!(visitor.found());
    }

    #[test]
    fn test_contains_mode_matches_branch_at_or_below_target() {
        let matcher = PathMatch::new("$/A/B", MatchMode::Contains);
        assert!(matcher.matches("$/A/B"));
        assert!(matcher.matches("$/a/b/C"));
        assert!(!matcher.matches("$/A"));
        assert!(!matcher.matches("$/A/BC"));

        let exact = PathMatch::new("$/A/B", MatchMode::Exact);
        assert!(!exact.matches("$/A/B/C"));
    }

    #[test]
    fn test_descendants_of_named_checks_start_node_first() {
        let tree = sample_tree();
        let paths: Vec<_> = descendants_of_named(Some(&tree), "$/a")
            .into_iter()
            .map(BranchNode::path)
            .collect();
        assert_eq!(paths, vec!["$/A/B", "$/A/B/C", "$/A/D"]);
    }
}
