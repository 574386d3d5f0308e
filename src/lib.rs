//! Handlescope: kernel handle enumeration and process introspection for Windows
//!
//! Snapshots the system-wide open handle table, filters it to a target
//! process, duplicates each handle locally to query its object type and
//! name, rewrites file paths through the volume table, and delivers the
//! results asynchronously through a token-keyed store: `start_scan`
//! returns a token immediately, `drain_scan` retrieves the records later.

#![allow(dead_code)]

pub mod config;
pub mod core;
pub mod process;
pub mod scan;
pub mod volumes;

#[cfg(windows)]
pub mod windows;

// Re-export the main surface
pub use crate::core::types::{
    HandleRecord, ProcessEntry, ProcessId, ScanError, ScanResult, ScanToken, ThreadId,
};
pub use crate::scan::{drain_scan, pending_records, start_scan, start_scan_with, ScanOptions};
pub use crate::volumes::{VolumeMapping, VolumeTable};
