use termtree::Tree;
use tracing::instrument;

use crate::domain::BranchNode;

pub trait TreeNodeConvert {
    fn to_tree_string(&self) -> Tree<String>;
}

impl TreeNodeConvert for BranchNode {
    #[instrument(level = "trace", skip(self), fields(path = self.path()))]
    fn to_tree_string(&self) -> Tree<String> {
        // Recursively construct the children
        let leaves: Vec<_> = self
            .children()
            .iter()
            .map(|c| c.to_tree_string())
            .collect();

        Tree::new(self.path().to_string()).with_leaves(leaves)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{build_forest, BranchDescriptor};

    #[test]
    fn test_to_tree_string_renders_hierarchy() {
        let roots = build_forest(vec![
            BranchDescriptor::root("$/A"),
            BranchDescriptor::child("$/A/B", "$/A"),
            BranchDescriptor::child("$/A/C", "$/A"),
        ])
        .unwrap();

        let rendered = roots[0].to_tree_string().to_string();
        let lines: Vec<_> = rendered.lines().collect();
        assert_eq!(lines[0], "$/A");
        assert!(lines[1].ends_with("$/A/B"));
        assert!(lines[2].ends_with("$/A/C"));
    }
}
