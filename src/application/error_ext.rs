//! Error conversion helpers for branch source reads

use std::io;

use crate::application::{ApplicationError, ApplicationResult};

/// Extension trait for converting `io::Result` to `ApplicationResult` with context.
pub trait IoResultExt<T> {
    /// Name the action and the source it was performed on.
    ///
    /// # Example
    /// ```ignore
    /// source.branches()
    ///     .with_source_context("read branches", &source.describe())?;
    /// ```
    fn with_source_context(self, action: &str, source: &str) -> ApplicationResult<T>;
}

impl<T> IoResultExt<T> for io::Result<T> {
    fn with_source_context(self, action: &str, source: &str) -> ApplicationResult<T> {
        self.map_err(|e| ApplicationError::OperationFailed {
            context: format!("{action}: {source}"),
            source: Box::new(e),
        })
    }
}

impl ApplicationError {
    /// True if the failure was caused by a missing input file.
    pub fn is_not_found(&self) -> bool {
        match self {
            ApplicationError::OperationFailed { source, .. } => source
                .downcast_ref::<io::Error>()
                .is_some_and(|e| e.kind() == io::ErrorKind::NotFound),
            _ => false,
        }
    }
}
