//! Handle record types produced by a scan

use super::{ScanToken, ThreadId};
use serde::{Deserialize, Serialize};

/// Object type name reported for synthetic thread records
pub const OBJECT_TYPE_THREAD: &str = "Thread";
/// Object type name reported for synthetic descendant-process records
pub const OBJECT_TYPE_PROCESS: &str = "Process";
/// Object type name that triggers volume path rewriting
pub const OBJECT_TYPE_FILE: &str = "File";

/// One resolved (or synthesized) handle entry.
///
/// Records are immutable once appended to the store. Resolution is
/// best-effort: a failed sub-step leaves the corresponding field empty, and
/// a record with both fields empty is dropped before storage, so duplication
/// failures are observable only as absence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandleRecord {
    /// Token of the run that produced this record
    pub token: ScanToken,
    /// Raw handle value in the owning process, 0 for synthetic records
    pub raw_handle: u64,
    /// Resolved object name, empty when the name query failed or was skipped
    pub object_name: String,
    /// Resolved object type name ("File", "Event", "Mutant", ...), empty when
    /// the type query failed
    pub object_type: String,
    /// More records may follow this one in the same drained batch
    pub is_continuation: bool,
}

impl HandleRecord {
    /// Creates a record with no resolved fields for a real handle
    pub fn unresolved(token: ScanToken, raw_handle: u64) -> Self {
        HandleRecord {
            token,
            raw_handle,
            object_name: String::new(),
            object_type: String::new(),
            is_continuation: true,
        }
    }

    /// Synthesizes a record for one of the target's threads
    pub fn synthetic_thread(token: ScanToken, thread_id: ThreadId) -> Self {
        HandleRecord {
            token,
            raw_handle: 0,
            object_name: thread_id.to_string(),
            object_type: OBJECT_TYPE_THREAD.to_string(),
            is_continuation: true,
        }
    }

    /// Synthesizes a record for a descendant process of the target
    pub fn synthetic_process(token: ScanToken, pid: u32) -> Self {
        HandleRecord {
            token,
            raw_handle: 0,
            object_name: pid.to_string(),
            object_type: OBJECT_TYPE_PROCESS.to_string(),
            is_continuation: true,
        }
    }

    /// True when neither the name nor the type resolved; such records are
    /// filtered out before storage
    pub fn is_unresolved(&self) -> bool {
        self.object_name.is_empty() && self.object_type.is_empty()
    }

    /// True for File-type records, whose names go through the volume table
    pub fn is_file(&self) -> bool {
        self.object_type == OBJECT_TYPE_FILE
    }
}
