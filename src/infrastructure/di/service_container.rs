//! Service container for dependency injection
//!
//! Wires the branch service to its source according to the settings.

use std::sync::Arc;

use crate::application::services::BranchService;
use crate::application::{ApplicationError, ApplicationResult};
use crate::config::Settings;
use crate::domain::TreeBuilder;
use crate::infrastructure::traits::{
    BranchSource, FileSystem, RealFileSystem, TomlFileSource,
};

/// Container holding the application services.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Filesystem abstraction
    pub fs: Arc<dyn FileSystem>,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    pub fn new(settings: Settings) -> Self {
        Self::with_deps(settings, Arc::new(RealFileSystem))
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(settings: Settings, fs: Arc<dyn FileSystem>) -> Self {
        Self {
            settings: Arc::new(settings),
            fs,
        }
    }

    /// Branch source configured by `branches_file`.
    pub fn branch_source(&self) -> ApplicationResult<Arc<dyn BranchSource>> {
        let path = self
            .settings
            .branches_file
            .clone()
            .ok_or(ApplicationError::NoBranchSource)?;
        Ok(Arc::new(TomlFileSource::new(Arc::clone(&self.fs), path)))
    }

    /// Branch service reading from the configured source.
    pub fn branch_service(&self) -> ApplicationResult<BranchService> {
        let builder = TreeBuilder::new().with_orphan_policy(self.settings.orphan_policy);
        Ok(BranchService::new(self.branch_source()?, builder))
    }
}
