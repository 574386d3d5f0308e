//! Process and thread enumeration using the Windows ToolHelp32 API

use crate::core::types::{ProcessEntry, ScanError, ScanResult, ThreadId};
use std::mem;
use winapi::shared::minwindef::FALSE;
use winapi::um::handleapi::{CloseHandle, INVALID_HANDLE_VALUE};
use winapi::um::tlhelp32::{
    CreateToolhelp32Snapshot, Process32FirstW, Process32NextW, Thread32First, Thread32Next,
    PROCESSENTRY32W, TH32CS_SNAPPROCESS, TH32CS_SNAPTHREAD, THREADENTRY32,
};
use winapi::um::winnt::HANDLE;

/// Process enumerator over a ToolHelp32 snapshot
pub struct ProcessEnumerator {
    snapshot: HANDLE,
    first_called: bool,
}

impl ProcessEnumerator {
    /// Create a new process enumerator
    pub fn new() -> ScanResult<Self> {
        unsafe {
            let snapshot = CreateToolhelp32Snapshot(TH32CS_SNAPPROCESS, 0);
            if snapshot.is_null() || snapshot == INVALID_HANDLE_VALUE {
                return Err(ScanError::SnapshotFailed(
                    "CreateToolhelp32Snapshot(TH32CS_SNAPPROCESS)".to_string(),
                ));
            }
            Ok(ProcessEnumerator {
                snapshot,
                first_called: false,
            })
        }
    }

    fn next_process(&mut self) -> Option<ProcessEntry> {
        unsafe {
            let mut entry: PROCESSENTRY32W = mem::zeroed();
            entry.dwSize = mem::size_of::<PROCESSENTRY32W>() as u32;

            let success = if !self.first_called {
                self.first_called = true;
                Process32FirstW(self.snapshot, &mut entry)
            } else {
                Process32NextW(self.snapshot, &mut entry)
            };

            if success == FALSE {
                return None;
            }

            let name = {
                let name_chars = &entry.szExeFile;
                let null_pos = name_chars
                    .iter()
                    .position(|&c| c == 0)
                    .unwrap_or(name_chars.len());
                String::from_utf16_lossy(&name_chars[..null_pos])
            };

            Some(ProcessEntry {
                pid: entry.th32ProcessID,
                parent_pid: entry.th32ParentProcessID,
                name,
                thread_count: entry.cntThreads,
            })
        }
    }
}

impl Drop for ProcessEnumerator {
    fn drop(&mut self) {
        if !self.snapshot.is_null() && self.snapshot != INVALID_HANDLE_VALUE {
            unsafe {
                let _ = CloseHandle(self.snapshot);
            }
        }
    }
}

impl Iterator for ProcessEnumerator {
    type Item = ProcessEntry;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_process()
    }
}

/// Point-in-time snapshot of all running processes
pub fn list_processes() -> ScanResult<Vec<ProcessEntry>> {
    let mut processes = Vec::new();
    let mut enumerator = ProcessEnumerator::new()?;

    while let Some(process) = enumerator.next_process() {
        processes.push(process);
    }

    Ok(processes)
}

/// Thread ids owned by one process, in snapshot order.
///
/// The thread snapshot is system-wide; filtering to the owner happens here.
pub fn list_threads(pid: u32) -> ScanResult<Vec<ThreadId>> {
    unsafe {
        let snapshot = CreateToolhelp32Snapshot(TH32CS_SNAPTHREAD, 0);
        if snapshot.is_null() || snapshot == INVALID_HANDLE_VALUE {
            return Err(ScanError::SnapshotFailed(
                "CreateToolhelp32Snapshot(TH32CS_SNAPTHREAD)".to_string(),
            ));
        }

        let mut threads = Vec::new();
        let mut entry: THREADENTRY32 = mem::zeroed();
        entry.dwSize = mem::size_of::<THREADENTRY32>() as u32;

        if Thread32First(snapshot, &mut entry) != FALSE {
            loop {
                if entry.th32OwnerProcessID == pid {
                    threads.push(entry.th32ThreadID);
                }
                if Thread32Next(snapshot, &mut entry) == FALSE {
                    break;
                }
            }
        }

        let _ = CloseHandle(snapshot);
        Ok(threads)
    }
}
