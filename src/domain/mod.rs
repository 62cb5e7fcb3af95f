//! Domain layer: branch entities, tree building and traversal
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod arena;
pub mod builder;
pub mod entities;
pub mod error;
pub mod node;
pub mod visitor;

pub use arena::{BranchArena, StagedBranch};
pub use builder::{build_forest, find_root_containing_path, ForestReport, OrphanPolicy, TreeBuilder};
pub use entities::*;
pub use error::{DomainError, DomainResult};
pub use node::BranchNode;
pub use visitor::{
    all_descendants, descendants_of_named, for_each_depth, walk, BranchVisitor,
    ContainsPathVisitor, MatchMode, PathMatch, PathMatcher, PreOrderIter,
};
