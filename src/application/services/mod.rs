//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services depend on I/O boundary traits (BranchSource, FileSystem)
//! but are themselves concrete structs, not traits.

mod branches;

pub use branches::BranchService;
