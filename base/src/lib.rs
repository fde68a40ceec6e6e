/* # Why have pathport_base as a core library?
pathport_base provides the error handling and tracing setup shared by all crates
in the workspace. This ensures consistency in error handling and prevents
circular dependencies between crates.
*/

pub mod error;
#[cfg(test)]
mod error_tests;
pub mod tracing;

// Re-export commonly used types for convenience
pub use error::{ErrorKind, PathportError, PathportResult, ResultExt};
