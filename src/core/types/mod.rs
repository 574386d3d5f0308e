//! Core type definitions for handlescope
//!
//! This module contains the fundamental types used throughout the crate:
//! scan tokens, handle records, process snapshot rows, and error types.

mod error;
mod process;
mod record;
mod token;

// Re-export all public types
pub use error::{ScanError, ScanResult};
pub use process::ProcessEntry;
pub use record::{HandleRecord, OBJECT_TYPE_FILE, OBJECT_TYPE_PROCESS, OBJECT_TYPE_THREAD};
pub use token::ScanToken;

// Common type aliases
pub type ProcessId = u32;
pub type ThreadId = u32;
