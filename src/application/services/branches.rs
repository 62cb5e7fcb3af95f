//! Branch hierarchy service
//!
//! Reads the branch listing from a source and answers hierarchy queries on a
//! freshly built forest per call.

use std::sync::Arc;

use tracing::{debug, instrument};

use crate::application::error_ext::IoResultExt;
use crate::application::ApplicationResult;
use crate::domain::{
    descendants_of_named, paths_equal, BranchDescriptor, BranchNode, ForestReport, TreeBuilder,
};
use crate::infrastructure::traits::BranchSource;

/// Service answering branch hierarchy queries.
pub struct BranchService {
    source: Arc<dyn BranchSource>,
    builder: TreeBuilder,
}

impl BranchService {
    pub fn new(source: Arc<dyn BranchSource>, builder: TreeBuilder) -> Self {
        Self { source, builder }
    }

    fn load(&self) -> ApplicationResult<Vec<BranchDescriptor>> {
        let branches = self
            .source
            .branches()
            .with_source_context("read branches", &self.source.describe())?;
        debug!("loaded {} branches from {}", branches.len(), self.source.describe());
        Ok(branches)
    }

    /// Build the forest and report orphaned branches.
    #[instrument(level = "debug", skip(self))]
    pub fn forest(&self) -> ApplicationResult<ForestReport> {
        Ok(self.builder.build_report(self.load()?)?)
    }

    /// Root branches of the listing.
    pub fn roots(&self) -> ApplicationResult<Vec<BranchNode>> {
        Ok(self.forest()?.roots)
    }

    /// Paths of branches that could not be attached to a parent.
    pub fn orphans(&self) -> ApplicationResult<Vec<String>> {
        Ok(self.forest()?.orphans)
    }

    /// Root whose tree contains `target_path`.
    #[instrument(level = "debug", skip(self))]
    pub fn find_root(&self, target_path: &str, exact_match: bool) -> ApplicationResult<Option<BranchNode>> {
        Ok(self
            .builder
            .find_root_containing_path(self.load()?, target_path, exact_match)?)
    }

    /// Descendants of the branch at `target_path`.
    ///
    /// Searches below `root_path` if given (exact root path), otherwise below
    /// every root in order.
    #[instrument(level = "debug", skip(self))]
    pub fn descendants(
        &self,
        target_path: &str,
        root_path: Option<&str>,
    ) -> ApplicationResult<Vec<BranchNode>> {
        let roots = self.roots()?;
        let searched = roots.iter().filter(|root| match root_path {
            Some(path) => paths_equal(root.path(), path),
            None => true,
        });

        Ok(searched
            .flat_map(|root| descendants_of_named(Some(root), target_path))
            .cloned()
            .collect())
    }
}
