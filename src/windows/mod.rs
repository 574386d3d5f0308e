//! Windows-specific functionality
//!
//! Raw API bindings, RAII handle wrappers, and string conversion helpers.

pub mod bindings;
pub mod types;
pub mod utils;
