//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueHint};

use crate::domain::{DomainError, OrphanPolicy};

/// Rebuild branch hierarchies from a flat branch listing and query them
#[derive(Parser, Debug)]
#[command(name = "branchtree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Debug output (repeat for more: -d info, -dd debug, -ddd trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub debug: u8,

    /// Branch listing file (TOML with [[branch]] tables)
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub file: Option<PathBuf>,

    /// Handling of branches whose parent is missing
    #[arg(long, global = true, value_parser = parse_orphan_policy)]
    pub orphans: Option<OrphanPolicy>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List root branches
    Roots,

    /// Show all branch trees
    Tree,

    /// Find the root branch whose tree has a branch at a path
    Find {
        /// Remote path, e.g. $/Project/Dev
        path: String,
        /// Match the branch path exactly
        #[arg(long, conflicts_with = "contains")]
        exact: bool,
        /// Also match branches below the path
        #[arg(long)]
        contains: bool,
    },

    /// List all branches below a branch
    Descendants {
        /// Branch path
        path: String,
        /// Only search the tree of this root
        #[arg(long)]
        root: Option<String>,
    },

    /// List non-root branches whose parent is missing
    Orphans,

    /// Show effective settings
    Config {
        /// Print a commented template instead
        #[arg(long)]
        template: bool,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

fn parse_orphan_policy(s: &str) -> Result<OrphanPolicy, DomainError> {
    s.parse()
}
