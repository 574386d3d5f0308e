//! Integration tests for the grow-and-retry buffer protocol

use handlescope::scan::{probe_sized_query, Probe, INITIAL_PROBE_SIZE};

#[test]
fn test_completes_on_first_try() {
    let result = probe_sized_query(16, |buf| {
        buf[..4].copy_from_slice(b"done");
        Probe::Complete(4)
    })
    .unwrap();
    assert_eq!(result, b"done");
}

#[test]
fn test_grows_to_reported_size() {
    let payload: Vec<u8> = (0..40_000u32).map(|i| (i % 251) as u8).collect();
    let payload_len = payload.len();

    let mut calls = 0;
    let result = probe_sized_query(INITIAL_PROBE_SIZE, |buf| {
        calls += 1;
        if buf.len() < payload_len {
            Probe::TooSmall(payload_len)
        } else {
            buf[..payload_len].copy_from_slice(&payload);
            Probe::Complete(payload_len)
        }
    })
    .unwrap();

    assert_eq!(calls, 2);
    assert_eq!(result, payload);
}

#[test]
fn test_doubles_on_stale_required_size() {
    // A query that keeps reporting a size no larger than the buffer it was
    // given must still make progress.
    let mut sizes = Vec::new();
    let result = probe_sized_query(64, |buf| {
        sizes.push(buf.len());
        if buf.len() < 512 {
            Probe::TooSmall(buf.len())
        } else {
            Probe::Complete(1)
        }
    })
    .unwrap();

    assert_eq!(sizes, vec![64, 128, 256, 512]);
    assert_eq!(result.len(), 1);
}

#[test]
fn test_racing_growth_between_calls() {
    // The data grows between probes for a while, as a live handle table
    // does, then stabilizes.
    let mut growth_rounds = 3;
    let mut calls = 0;
    let result = probe_sized_query(32, |buf| {
        calls += 1;
        if growth_rounds > 0 {
            growth_rounds -= 1;
            Probe::TooSmall(buf.len() + 100)
        } else {
            Probe::Complete(buf.len())
        }
    })
    .unwrap();
    assert_eq!(calls, 4);
    assert_eq!(result.len(), 332);
}

#[test]
fn test_terminal_failure_propagates() {
    let err = probe_sized_query(16, |_buf| {
        Probe::Failed(handlescope::ScanError::NtStatus(0xC000_0022))
    })
    .unwrap_err();
    assert!(err.to_string().contains("0xC0000022"));
}

#[test]
fn test_failure_after_growth_propagates() {
    let mut calls = 0;
    let result = probe_sized_query(16, |_buf| {
        calls += 1;
        if calls == 1 {
            Probe::TooSmall(1024)
        } else {
            Probe::Failed(handlescope::ScanError::access_denied(42, "duplicate"))
        }
    });
    assert!(result.is_err());
    assert_eq!(calls, 2);
}

#[test]
fn test_length_clamped_to_buffer() {
    // A query claiming more bytes than the buffer holds must not panic.
    let result = probe_sized_query(8, |_buf| Probe::Complete(9999)).unwrap();
    assert_eq!(result.len(), 8);
}

#[test]
fn test_zero_length_result() {
    let result = probe_sized_query(16, |_buf| Probe::Complete(0)).unwrap();
    assert!(result.is_empty());
}
