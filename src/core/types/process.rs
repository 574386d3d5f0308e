//! Process snapshot row types

use super::ProcessId;
use serde::{Deserialize, Serialize};

/// One row of a point-in-time process snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessEntry {
    pub pid: ProcessId,
    pub parent_pid: ProcessId,
    pub name: String,
    pub thread_count: u32,
}

impl ProcessEntry {
    /// Creates an entry with just the parent edge, for callers that only
    /// need the process tree
    pub fn new(pid: ProcessId, parent_pid: ProcessId) -> Self {
        ProcessEntry {
            pid,
            parent_pid,
            name: String::new(),
            thread_count: 0,
        }
    }

    /// Checks if this is a system process
    pub fn is_system_process(&self) -> bool {
        self.pid == 0 || self.pid == 4
    }
}
