//! I/O boundary traits for testability
//!
//! These traits abstract external I/O operations, allowing services
//! to be tested with in-memory implementations.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Deserialize;
use tracing::debug;

use crate::domain::BranchDescriptor;

/// Filesystem abstraction for testability.
pub trait FileSystem: Send + Sync {
    /// Read file contents to string.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;
}

/// Supplier of the flat branch listing of a remote repository.
///
/// Each call returns a stable snapshot; callers build a fresh forest from it.
pub trait BranchSource: Send + Sync {
    fn branches(&self) -> io::Result<Vec<BranchDescriptor>>;

    /// Short description for diagnostics (e.g. the file it reads).
    fn describe(&self) -> String;
}

// ============================================================
// REAL IMPLEMENTATIONS
// ============================================================

/// Real filesystem implementation.
#[derive(Debug, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

/// On-disk layout of a branch listing file.
#[derive(Debug, Deserialize)]
struct BranchFile {
    #[serde(default)]
    branch: Vec<BranchDescriptor>,
}

/// Reads `[[branch]]` tables from a TOML file.
///
/// ```toml
/// [[branch]]
/// path = "$/Project/Main"
/// is_root = true
///
/// [[branch]]
/// path = "$/Project/Dev"
/// parent_path = "$/Project/Main"
/// ```
pub struct TomlFileSource {
    fs: Arc<dyn FileSystem>,
    path: PathBuf,
}

impl TomlFileSource {
    pub fn new(fs: Arc<dyn FileSystem>, path: impl Into<PathBuf>) -> Self {
        Self {
            fs,
            path: path.into(),
        }
    }

    /// Parse a branch listing from TOML content.
    pub fn parse(content: &str) -> io::Result<Vec<BranchDescriptor>> {
        let file: BranchFile = toml::from_str(content)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e.to_string()))?;
        Ok(file.branch)
    }
}

impl BranchSource for TomlFileSource {
    fn branches(&self) -> io::Result<Vec<BranchDescriptor>> {
        debug!("reading branches from {}", self.path.display());
        if !self.fs.exists(&self.path) {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("branch file does not exist: {}", self.path.display()),
            ));
        }
        let content = self.fs.read_to_string(&self.path)?;
        Self::parse(&content)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// In-memory branch listing.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    branches: Vec<BranchDescriptor>,
}

impl StaticSource {
    pub fn new(branches: Vec<BranchDescriptor>) -> Self {
        Self { branches }
    }
}

impl BranchSource for StaticSource {
    fn branches(&self) -> io::Result<Vec<BranchDescriptor>> {
        Ok(self.branches.clone())
    }

    fn describe(&self) -> String {
        format!("<{} in-memory branches>", self.branches.len())
    }
}
