//! Tree builder linking flat branch listings into a forest.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::domain::arena::BranchArena;
use crate::domain::entities::BranchDescriptor;
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::node::BranchNode;
use crate::domain::visitor::{ContainsPathVisitor, MatchMode, PathMatch, PathMatcher};

/// What happens to a non-root branch whose parent path matches no branch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrphanPolicy {
    /// Leave the orphan (and its subtree) out of the forest
    #[default]
    Drop,
    /// Return the orphan as an additional root after the declared roots
    Promote,
}

impl FromStr for OrphanPolicy {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "drop" => Ok(OrphanPolicy::Drop),
            "promote" => Ok(OrphanPolicy::Promote),
            _ => Err(DomainError::UnknownOrphanPolicy {
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for OrphanPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrphanPolicy::Drop => write!(f, "drop"),
            OrphanPolicy::Promote => write!(f, "promote"),
        }
    }
}

/// Forest plus the branches that could not be attached.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ForestReport {
    pub roots: Vec<BranchNode>,
    /// Paths of orphaned branches, in input order
    pub orphans: Vec<String>,
}

/// Constructs branch hierarchies from flat descriptor listings.
#[derive(Debug, Clone, Default)]
pub struct TreeBuilder {
    orphan_policy: OrphanPolicy,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_orphan_policy(mut self, orphan_policy: OrphanPolicy) -> Self {
        self.orphan_policy = orphan_policy;
        self
    }

    pub fn orphan_policy(&self) -> OrphanPolicy {
        self.orphan_policy
    }

    /// Link descriptors into trees and return the roots.
    ///
    /// Roots keep input order, children keep discovery order. Fails with
    /// [`DomainError::ParentAmbiguity`] if a parent path names more than one
    /// branch; no partial forest is returned in that case.
    pub fn build_forest<I>(&self, descriptors: I) -> DomainResult<Vec<BranchNode>>
    where
        I: IntoIterator,
        I::Item: Into<Arc<BranchDescriptor>>,
    {
        Ok(self.build_report(descriptors)?.roots)
    }

    #[instrument(level = "debug", skip_all, fields(policy = ?self.orphan_policy))]
    pub fn build_report<I>(&self, descriptors: I) -> DomainResult<ForestReport>
    where
        I: IntoIterator,
        I::Item: Into<Arc<BranchDescriptor>>,
    {
        let descriptors = descriptors.into_iter();
        let mut arena = BranchArena::with_capacity(descriptors.size_hint().0);
        for descriptor in descriptors {
            arena.insert(descriptor.into());
        }
        debug!("staged {} branches", arena.indices().len());

        let mut orphans = Vec::new();
        let indices = arena.indices().to_vec();
        for &idx in &indices {
            let Some(staged) = arena.get(idx) else {
                continue;
            };
            if staged.descriptor.is_root {
                continue;
            }

            let Some(parent_path) = staged.descriptor.parent_path.clone() else {
                warn!("branch {} is not a root but names no parent", staged.descriptor.path);
                orphans.push(idx);
                continue;
            };
            let parent = match arena.candidates(&parent_path) {
                [] => {
                    warn!(
                        "branch {} is not a root but its parent {} is missing",
                        staged.descriptor.path, parent_path
                    );
                    orphans.push(idx);
                    continue;
                }
                [parent] => *parent,
                _ => return Err(DomainError::ParentAmbiguity { parent_path }),
            };
            arena.link(parent, idx);
        }

        let mut roots: Vec<BranchNode> = indices
            .iter()
            .filter(|&&idx| arena.get(idx).is_some_and(|s| s.descriptor.is_root))
            .filter_map(|&idx| arena.materialize(idx))
            .collect();

        if self.orphan_policy == OrphanPolicy::Promote {
            roots.extend(orphans.iter().filter_map(|&idx| arena.materialize(idx)));
        }
        debug!("built {} roots, {} orphans", roots.len(), orphans.len());

        let orphans = orphans
            .iter()
            .filter_map(|&idx| arena.get(idx).map(|s| s.descriptor.path.clone()))
            .collect();
        Ok(ForestReport { roots, orphans })
    }

    /// First root whose tree contains `target_path`.
    ///
    /// With `exact_match` a branch must have exactly that path; otherwise a
    /// branch matches if its path is the target or lies beneath it.
    pub fn find_root_containing_path<I>(
        &self,
        descriptors: I,
        target_path: &str,
        exact_match: bool,
    ) -> DomainResult<Option<BranchNode>>
    where
        I: IntoIterator,
        I::Item: Into<Arc<BranchDescriptor>>,
    {
        let matcher = PathMatch::new(target_path, MatchMode::from_exact(exact_match));
        self.find_root_matching(descriptors, &matcher)
    }

    /// First root whose tree has a branch accepted by `matcher`.
    #[instrument(level = "debug", skip_all)]
    pub fn find_root_matching<I, M>(
        &self,
        descriptors: I,
        matcher: &M,
    ) -> DomainResult<Option<BranchNode>>
    where
        I: IntoIterator,
        I::Item: Into<Arc<BranchDescriptor>>,
        M: PathMatcher + ?Sized,
    {
        let roots = self.build_forest(descriptors)?;
        Ok(roots.into_iter().find(|root| {
            let mut visitor = ContainsPathVisitor::new(|path: &str| matcher.matches(path));
            let _ = root.accept_visitor(&mut visitor);
            visitor.found()
        }))
    }
}

/// [`TreeBuilder::build_forest`] with the default orphan policy.
pub fn build_forest<I>(descriptors: I) -> DomainResult<Vec<BranchNode>>
where
    I: IntoIterator,
    I::Item: Into<Arc<BranchDescriptor>>,
{
    TreeBuilder::new().build_forest(descriptors)
}

/// [`TreeBuilder::find_root_containing_path`] with the default orphan policy.
pub fn find_root_containing_path<I>(
    descriptors: I,
    target_path: &str,
    exact_match: bool,
) -> DomainResult<Option<BranchNode>>
where
    I: IntoIterator,
    I::Item: Into<Arc<BranchDescriptor>>,
{
    TreeBuilder::new().find_root_containing_path(descriptors, target_path, exact_match)
}
