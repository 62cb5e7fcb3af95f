//! Rebuild branch hierarchies from flat, path-addressed branch listings.
//!
//! Layers, innermost first:
//! - [`domain`]: descriptors, tree building and traversal (no I/O)
//! - [`application`]: services on top of a branch source
//! - [`infrastructure`]: branch sources and service wiring
//! - [`cli`]: argument parsing and command dispatch

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod tree_traits;
pub mod util;

pub use domain::{
    all_descendants, build_forest, descendants_of_named, find_root_containing_path,
    BranchDescriptor, BranchNode, DomainError, TreeBuilder,
};
