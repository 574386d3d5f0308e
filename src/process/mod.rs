//! Process introspection for Windows
//!
//! Provides the process and thread snapshot readers the orchestrator
//! composes, the descendant-closure walk over snapshot edges, and the RAII
//! process handle used for handle duplication.

#[cfg(windows)]
pub mod handle;
#[cfg(windows)]
pub mod snapshot;
pub mod tree;

#[cfg(windows)]
pub use handle::{ProcessAccess, ProcessHandle};
#[cfg(windows)]
pub use snapshot::{list_processes, list_threads, ProcessEnumerator};
pub use tree::descendants_of;
