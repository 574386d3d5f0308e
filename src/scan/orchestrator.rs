//! Scan orchestration: start a run, accumulate records, drain by token
//!
//! `start_scan` allocates a token, hands the actual work to a background
//! thread, and returns immediately; the caller polls or waits however it
//! likes and eventually calls `drain_scan` with the token. Record order
//! within a run is threads, then descendant processes, then real handles
//! in table order.

use crate::core::types::{HandleRecord, ScanToken};
use crate::scan::store;
use std::time::Duration;

#[cfg(windows)]
use crate::core::types::HandleRecord as Record;
#[cfg(windows)]
use crate::process::{snapshot, tree};
#[cfg(windows)]
use crate::scan::{resolver, table};
#[cfg(windows)]
use crate::volumes::{self, VolumeTable};
#[cfg(windows)]
use std::thread;
#[cfg(windows)]
use tracing::{debug, warn};

/// Tunables for one scan run
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Pause between successive handle resolutions, bounding system load
    pub pacing: Duration,
    /// Initial buffer guess for the handle table query
    pub initial_table_size: usize,
}

impl Default for ScanOptions {
    fn default() -> Self {
        ScanOptions {
            pacing: Duration::from_millis(5),
            initial_table_size: crate::scan::probe::INITIAL_PROBE_SIZE,
        }
    }
}

impl From<&crate::config::Config> for ScanOptions {
    fn from(config: &crate::config::Config) -> Self {
        ScanOptions {
            pacing: Duration::from_millis(config.scan.pacing_ms),
            initial_table_size: config.scan.initial_table_kib * 1024,
        }
    }
}

/// Starts an asynchronous handle scan of `target_pid` with default options
#[cfg(windows)]
pub fn start_scan(target_pid: u32) -> ScanToken {
    start_scan_with(target_pid, ScanOptions::default())
}

/// Starts an asynchronous handle scan with explicit options.
///
/// Returns the run's token immediately; the scan thread appends records as
/// they resolve. If the thread cannot be spawned the token still exists and
/// simply drains empty.
#[cfg(windows)]
pub fn start_scan_with(target_pid: u32, options: ScanOptions) -> ScanToken {
    let token = store::begin();
    let spawned = thread::Builder::new()
        .name("handle-scan".to_string())
        .spawn(move || run_scan(token, target_pid, options));
    if let Err(err) = spawned {
        warn!(target_pid, %err, "scan worker failed to start");
    }
    token
}

/// The platform snapshot facility is unavailable off Windows; callers get
/// the sentinel token, which drains to an empty list.
#[cfg(not(windows))]
pub fn start_scan(_target_pid: u32) -> ScanToken {
    ScanToken::INVALID
}

#[cfg(not(windows))]
pub fn start_scan_with(_target_pid: u32, _options: ScanOptions) -> ScanToken {
    ScanToken::INVALID
}

/// Removes and returns the records accumulated under `token`.
///
/// Draining an unknown or already-drained token returns an empty list.
pub fn drain_scan(token: ScanToken) -> Vec<HandleRecord> {
    store::drain(token)
}

/// Number of records accumulated so far, for callers that poll
pub fn pending_records(token: ScanToken) -> usize {
    store::pending_records(token)
}

#[cfg(windows)]
fn run_scan(token: ScanToken, target_pid: u32, options: ScanOptions) {
    // Synthetic thread records first
    match snapshot::list_threads(target_pid) {
        Ok(thread_ids) => store::append(
            token,
            thread_ids
                .into_iter()
                .map(|tid| Record::synthetic_thread(token, tid)),
        ),
        Err(err) => warn!(target_pid, %err, "thread snapshot unavailable"),
    }

    // Then synthetic records for transitive descendants
    match snapshot::list_processes() {
        Ok(processes) => {
            let descendants = tree::descendants_of(target_pid, &processes);
            store::append(
                token,
                descendants
                    .into_iter()
                    .map(|pid| Record::synthetic_process(token, pid)),
            );
        }
        Err(err) => warn!(target_pid, %err, "process snapshot unavailable"),
    }

    // Real handles last. Losing the table (or the volume list) degrades to
    // partial results; the synthetic records above are already stored.
    let volumes = volumes::list_volumes().unwrap_or_else(|err| {
        warn!(%err, "volume table unavailable, keeping raw device paths");
        VolumeTable::default()
    });

    match table::scan_with(target_pid, options.initial_table_size) {
        Ok(entries) => {
            debug!(target_pid, count = entries.len(), "resolving handle entries");
            for entry in &entries {
                let record = resolver::resolve(entry, &volumes, token);
                if !record.is_unresolved() {
                    store::append_one(token, record);
                }
                if !options.pacing.is_zero() {
                    thread::sleep(options.pacing);
                }
            }
        }
        Err(err) => {
            warn!(target_pid, %err, "handle table unavailable, synthetic records only")
        }
    }

    debug!(%token, target_pid, "scan complete");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_options_default() {
        let options = ScanOptions::default();
        assert_eq!(options.pacing, Duration::from_millis(5));
        assert_eq!(options.initial_table_size, 0x1000);
    }

    #[test]
    fn test_scan_options_from_config() {
        let mut config = crate::config::Config::default();
        config.scan.pacing_ms = 0;
        config.scan.initial_table_kib = 64;
        let options = ScanOptions::from(&config);
        assert!(options.pacing.is_zero());
        assert_eq!(options.initial_table_size, 64 * 1024);
    }

    #[test]
    fn test_drain_unknown_token() {
        assert!(drain_scan(ScanToken::INVALID).is_empty());
        assert_eq!(pending_records(ScanToken::INVALID), 0);
    }

    #[cfg(not(windows))]
    #[test]
    fn test_start_scan_off_platform_returns_sentinel() {
        let token = start_scan(1234);
        assert!(!token.is_valid());
        assert!(drain_scan(token).is_empty());
    }

    #[cfg(windows)]
    #[test]
    #[cfg_attr(miri, ignore = "FFI not supported in Miri")]
    fn test_scan_current_process_end_to_end() {
        let token = start_scan_with(
            std::process::id(),
            ScanOptions {
                pacing: Duration::ZERO,
                ..ScanOptions::default()
            },
        );
        assert!(token.is_valid());

        // The worker has no completion signal; poll until records stop
        // growing, then a final settle pause.
        let mut last = 0;
        for _ in 0..100 {
            std::thread::sleep(Duration::from_millis(50));
            let now = pending_records(token);
            if now > 0 && now == last {
                break;
            }
            last = now;
        }
        std::thread::sleep(Duration::from_millis(250));

        let records = drain_scan(token);
        assert!(!records.is_empty());
        assert!(records.iter().all(|r| r.token == token));
        assert!(records.iter().all(|r| !r.is_unresolved()));

        // At least the current thread must be represented
        assert!(records.iter().any(|r| r.object_type == "Thread"));

        // Order: synthetic thread records precede everything that is not
        // a synthetic thread record (real Thread-type handles resolve
        // later with raw_handle != 0 and are not order-constrained).
        let last_synthetic_thread = records
            .iter()
            .rposition(|r| r.raw_handle == 0 && r.object_type == "Thread");
        let first_real = records.iter().position(|r| r.raw_handle != 0);
        if let (Some(last_synthetic_thread), Some(first_real)) =
            (last_synthetic_thread, first_real)
        {
            assert!(last_synthetic_thread < first_real);
        }

        assert!(drain_scan(token).is_empty());
    }
}
