//! Domain entities: branch descriptors and path comparison

use serde::{Deserialize, Serialize};

/// Branch as reported by the remote system.
///
/// Read-only input to the tree builder. Paths live in a case-insensitive
/// namespace, see [`paths_equal`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchDescriptor {
    /// Server path of the branch, e.g. `$/Project/Main`
    pub path: String,
    /// Path of the branch this one was created from (ignored for roots)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_path: Option<String>,
    /// Branch has no parent
    #[serde(default)]
    pub is_root: bool,
}

impl BranchDescriptor {
    /// Descriptor for a root branch.
    pub fn root(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            parent_path: None,
            is_root: true,
        }
    }

    /// Descriptor for a branch created from `parent_path`.
    pub fn child(path: impl Into<String>, parent_path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            parent_path: Some(parent_path.into()),
            is_root: false,
        }
    }
}

/// Case-insensitive, ordinal path equality.
///
/// Compares the lowercase mapping of each character; no locale collation.
pub fn paths_equal(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}

/// Key under which a path is indexed: its lowercase mapping.
pub fn path_key(path: &str) -> String {
    path.chars().flat_map(char::to_lowercase).collect()
}

/// True if `path` equals `ancestor` or lies beneath it.
///
/// `$/A/B` is under `$/A`, `$/AB` is not.
pub fn is_same_or_under(path: &str, ancestor: &str) -> bool {
    let path = path_key(path);
    let ancestor = path_key(ancestor.trim_end_matches('/'));
    match path.strip_prefix(&ancestor) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}
