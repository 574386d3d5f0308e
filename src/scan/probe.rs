//! Grow-and-retry buffer protocol for size-probed system queries
//!
//! Several NT information classes cannot report their output size up front:
//! the call fails with a length mismatch and reports the size it needed at
//! that instant. The required size can change between calls as other
//! processes open and close handles, so the caller must loop, reallocating
//! to each reported size, until the call succeeds or allocation fails.
//! This module factors that control flow out of the three call sites.

use crate::core::types::{ScanError, ScanResult};

/// Initial guess for size-probed queries
pub const INITIAL_PROBE_SIZE: usize = 0x1000;

/// Outcome of one attempt of a size-probed query
#[derive(Debug)]
pub enum Probe {
    /// The call succeeded; the first `usize` bytes of the buffer are valid
    Complete(usize),
    /// The buffer was too small; the call reported this required size
    TooSmall(usize),
    /// The call failed terminally
    Failed(ScanError),
}

/// Runs `query` against a growing buffer until it completes.
///
/// On `TooSmall` the buffer is reallocated to the reported size; a report
/// that does not exceed the current capacity forces a doubling instead, so
/// a stale or zero report cannot stall the loop. Returns the buffer
/// truncated to the valid length, `AllocationFailure` if a reallocation
/// cannot be satisfied, or the query's own terminal error.
pub fn probe_sized_query<F>(initial: usize, mut query: F) -> ScanResult<Vec<u8>>
where
    F: FnMut(&mut [u8]) -> Probe,
{
    let mut buffer = alloc_buffer(initial.max(1))?;
    loop {
        match query(&mut buffer) {
            Probe::Complete(len) => {
                buffer.truncate(len.min(buffer.len()));
                return Ok(buffer);
            }
            Probe::TooSmall(required) => {
                let next = if required > buffer.len() {
                    required
                } else {
                    buffer.len().saturating_mul(2)
                };
                buffer = alloc_buffer(next)?;
            }
            Probe::Failed(err) => return Err(err),
        }
    }
}

fn alloc_buffer(size: usize) -> ScanResult<Vec<u8>> {
    let mut buffer = Vec::new();
    buffer
        .try_reserve_exact(size)
        .map_err(|_| ScanError::allocation_failure(size))?;
    buffer.resize(size, 0);
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_immediate_success() {
        let result = probe_sized_query(16, |buf| {
            buf[0] = 0xAB;
            Probe::Complete(4)
        })
        .unwrap();
        assert_eq!(result.len(), 4);
        assert_eq!(result[0], 0xAB);
    }

    #[test]
    fn test_two_growth_rounds_then_success() {
        // The required size changes between calls, as the live handle
        // table does.
        let mut sizes_seen = Vec::new();
        let result = probe_sized_query(8, |buf| {
            sizes_seen.push(buf.len());
            match buf.len() {
                8 => Probe::TooSmall(32),
                32 => Probe::TooSmall(64),
                _ => Probe::Complete(buf.len()),
            }
        })
        .unwrap();
        assert_eq!(sizes_seen, vec![8, 32, 64]);
        assert_eq!(result.len(), 64);
    }

    #[test]
    fn test_stale_required_size_forces_growth() {
        // A report at or below the current size must still make progress.
        let mut calls = 0;
        let result = probe_sized_query(16, |buf| {
            calls += 1;
            if calls == 1 {
                Probe::TooSmall(16)
            } else {
                Probe::Complete(buf.len())
            }
        })
        .unwrap();
        assert_eq!(result.len(), 32);
    }

    #[test]
    fn test_zero_required_size_does_not_stall() {
        let mut calls = 0;
        let result = probe_sized_query(4, |buf| {
            calls += 1;
            if calls < 3 {
                Probe::TooSmall(0)
            } else {
                Probe::Complete(buf.len())
            }
        });
        assert!(result.is_ok());
        assert_eq!(calls, 3);
    }

    #[test]
    fn test_zero_initial_size() {
        let result = probe_sized_query(0, |buf| Probe::Complete(buf.len())).unwrap();
        assert_eq!(result.len(), 1);
    }

    #[test]
    fn test_terminal_failure_propagates() {
        let result = probe_sized_query(16, |_| Probe::Failed(ScanError::NtStatus(0xC0000022)));
        match result {
            Err(ScanError::NtStatus(status)) => assert_eq!(status, 0xC0000022),
            other => panic!("Expected NtStatus error, got {:?}", other.map(|b| b.len())),
        }
    }

    #[test]
    fn test_failure_after_growth() {
        let mut calls = 0;
        let result = probe_sized_query(8, |_| {
            calls += 1;
            if calls == 1 {
                Probe::TooSmall(128)
            } else {
                Probe::Failed(ScanError::WindowsApi("query refused".to_string()))
            }
        });
        assert!(matches!(result, Err(ScanError::WindowsApi(_))));
        assert_eq!(calls, 2);
    }

    #[test]
    fn test_complete_length_clamped_to_buffer() {
        let result = probe_sized_query(8, |_| Probe::Complete(1024)).unwrap();
        assert_eq!(result.len(), 8);
    }

    #[test]
    fn test_allocation_failure_reported() {
        // An absurd required size must surface as AllocationFailure rather
        // than aborting the process.
        let result = probe_sized_query(8, |_| Probe::TooSmall(usize::MAX - 1));
        assert!(matches!(
            result,
            Err(ScanError::AllocationFailure { requested }) if requested == usize::MAX - 1
        ));
    }
}
