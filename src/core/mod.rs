//! Core module containing fundamental types for handlescope
//!
//! Provides the building blocks used throughout the crate: handle records,
//! scan tokens, process snapshot rows, and error types.

pub mod types;

// Re-export commonly used types for convenience
pub use types::{HandleRecord, ProcessEntry, ScanError, ScanResult, ScanToken};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const AUTHORS: &str = env!("CARGO_PKG_AUTHORS");
