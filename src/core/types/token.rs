//! Correlation tokens linking a scan's start call to its later drain

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier for one enumeration run.
///
/// Tokens are allocated monotonically by the result store starting at 1 and
/// are never reused; every record a run produces carries the run's token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScanToken(i64);

impl ScanToken {
    /// Sentinel returned when the platform snapshot facility is unavailable
    pub const INVALID: ScanToken = ScanToken(0);

    /// Wraps a raw token value
    pub(crate) fn from_raw(value: i64) -> Self {
        ScanToken(value)
    }

    /// Raw token value, for callers that marshal the token across a boundary
    pub fn value(&self) -> i64 {
        self.0
    }

    /// Whether this token identifies a real run
    pub fn is_valid(&self) -> bool {
        self.0 != 0
    }
}

impl fmt::Display for ScanToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
