//! System-wide handle table scanner

use crate::core::types::{ScanError, ScanResult};
use crate::scan::probe::{probe_sized_query, Probe, INITIAL_PROBE_SIZE};
use crate::windows::bindings::ntdll::{
    self, nt_success, SystemInfoClass, STATUS_INFO_LENGTH_MISMATCH,
};
use tracing::debug;
use winapi::shared::minwindef::ULONG;

/// One candidate handle owned by the target process, lifted out of the raw
/// system table. Scan-local: consumed by the resolver, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SystemHandleEntry {
    pub owner_pid: u32,
    pub handle_value: u16,
    pub granted_access: u32,
}

/// Snapshots the system-wide handle table and filters it to `target_pid`.
///
/// The table size is unknowable up front and drifts between calls, so the
/// query goes through the grow-and-retry probe. A zero target is rejected:
/// "all processes" is not a valid filter at this layer.
pub fn scan(target_pid: u32) -> ScanResult<Vec<SystemHandleEntry>> {
    scan_with(target_pid, INITIAL_PROBE_SIZE)
}

/// Same as [`scan`] with an explicit initial buffer size
pub fn scan_with(target_pid: u32, initial_buffer: usize) -> ScanResult<Vec<SystemHandleEntry>> {
    if target_pid == 0 {
        return Err(ScanError::InvalidTarget(target_pid));
    }

    let buffer = probe_sized_query(initial_buffer, |buf| {
        let mut required: ULONG = 0;
        let status = unsafe {
            ntdll::query_system_information(
                SystemInfoClass::SystemHandleInformation,
                buf,
                &mut required,
            )
        };
        if status == STATUS_INFO_LENGTH_MISMATCH {
            Probe::TooSmall(required as usize)
        } else if nt_success(status) {
            Probe::Complete(buf.len())
        } else {
            Probe::Failed(ScanError::NtStatus(status as u32))
        }
    })?;

    let entries = unsafe { ntdll::parse_handle_table(&buffer) };
    let filtered: Vec<SystemHandleEntry> = entries
        .iter()
        .filter(|entry| entry.unique_process_id as u32 == target_pid)
        .map(|entry| SystemHandleEntry {
            owner_pid: entry.unique_process_id as u32,
            handle_value: entry.handle_value,
            granted_access: entry.granted_access,
        })
        .collect();

    debug!(
        target_pid,
        total = entries.len(),
        matched = filtered.len(),
        "system handle table scanned"
    );
    Ok(filtered)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_target_rejected() {
        let result = scan(0);
        assert!(matches!(result, Err(ScanError::InvalidTarget(0))));
    }

    // The classic table carries 16-bit owner pids; current-process
    // assertions only hold when the test pid fits.
    fn small_pid() -> Option<u32> {
        let pid = std::process::id();
        (pid <= u16::MAX as u32).then_some(pid)
    }

    #[test]
    #[cfg_attr(miri, ignore = "FFI not supported in Miri")]
    fn test_scan_current_process() {
        let Some(pid) = small_pid() else { return };
        // The current process always holds open handles.
        let entries = scan(pid).unwrap();
        assert!(!entries.is_empty());
        assert!(entries.iter().all(|entry| entry.owner_pid == pid));
    }

    #[test]
    #[cfg_attr(miri, ignore = "FFI not supported in Miri")]
    fn test_scan_survives_tiny_initial_buffer() {
        let Some(pid) = small_pid() else { return };
        // Forces several growth rounds against the live table.
        let entries = scan_with(pid, 16).unwrap();
        assert!(!entries.is_empty());
    }

    #[test]
    #[cfg_attr(miri, ignore = "FFI not supported in Miri")]
    fn test_scan_unknown_pid_is_empty() {
        let entries = scan(u32::MAX - 1).unwrap();
        assert!(entries.is_empty());
    }
}
