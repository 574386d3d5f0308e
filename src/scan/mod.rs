//! The handle enumeration and resolution engine
//!
//! `probe` holds the grow-and-retry buffer protocol shared by every
//! size-probed NT query; `table` snapshots and filters the system handle
//! table; `resolver` turns entries into records; `store` keeps results
//! keyed by token; `orchestrator` ties the pieces into the start/drain
//! surface.

pub mod orchestrator;
pub mod probe;
pub mod store;

#[cfg(windows)]
pub mod resolver;
#[cfg(windows)]
pub mod table;

pub use orchestrator::{drain_scan, pending_records, start_scan, start_scan_with, ScanOptions};
pub use probe::{probe_sized_query, Probe, INITIAL_PROBE_SIZE};

#[cfg(windows)]
pub use resolver::SKIP_NAME_QUERY_ACCESS;
#[cfg(windows)]
pub use table::SystemHandleEntry;
