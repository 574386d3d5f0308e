//! Process-wide store of scan results keyed by correlation token
//!
//! Replaces the ad hoc global accumulator of older handle enumerators with
//! an explicit keyed store: a token is allocated when a scan begins, every
//! record the run produces is appended under it, and draining removes the
//! entry wholesale. Tokens are never reallocated, so concurrent scans write
//! to disjoint lists and can never interleave.

use crate::core::types::{HandleRecord, ScanToken};
use lazy_static::lazy_static;
use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Mutex;

lazy_static! {
    static ref RESULTS: Mutex<HashMap<i64, Vec<HandleRecord>>> = Mutex::new(HashMap::new());
}

static NEXT_TOKEN: AtomicI64 = AtomicI64::new(1);

/// Allocates a fresh token and an empty record list for a new run
pub fn begin() -> ScanToken {
    let token = ScanToken::from_raw(NEXT_TOKEN.fetch_add(1, Ordering::Relaxed));
    RESULTS
        .lock()
        .expect("scan store poisoned")
        .insert(token.value(), Vec::new());
    token
}

/// Appends one record under its token.
///
/// Appends to a token that was already drained are dropped: the caller
/// abandoned the run and its results are no longer retrievable.
pub fn append_one(token: ScanToken, record: HandleRecord) {
    let mut results = RESULTS.lock().expect("scan store poisoned");
    if let Some(records) = results.get_mut(&token.value()) {
        records.push(record);
    }
}

/// Appends a batch of records under one token, preserving order
pub fn append(token: ScanToken, records: impl IntoIterator<Item = HandleRecord>) {
    let mut results = RESULTS.lock().expect("scan store poisoned");
    if let Some(list) = results.get_mut(&token.value()) {
        list.extend(records);
    }
}

/// Removes and returns the records for a token.
///
/// Unknown and already-drained tokens yield an empty list, never an error.
pub fn drain(token: ScanToken) -> Vec<HandleRecord> {
    RESULTS
        .lock()
        .expect("scan store poisoned")
        .remove(&token.value())
        .unwrap_or_default()
}

/// Number of records currently accumulated under a token, for polling
pub fn pending_records(token: ScanToken) -> usize {
    RESULTS
        .lock()
        .expect("scan store poisoned")
        .get(&token.value())
        .map(Vec::len)
        .unwrap_or(0)
}
