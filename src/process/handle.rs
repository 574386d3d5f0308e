//! Safe process handle wrapper with RAII semantics

use crate::core::types::{ScanError, ScanResult};
use crate::windows::bindings::kernel32;
use crate::windows::types::Handle;
use std::fmt;
use winapi::um::winnt::HANDLE;

/// Access rights for process handles
#[derive(Debug, Clone, Copy)]
pub struct ProcessAccess {
    value: u32,
}

impl ProcessAccess {
    /// Duplicate handles out of the process
    pub const DUP_HANDLE: Self = Self { value: 0x0040 };
    /// Query information access
    pub const QUERY_INFORMATION: Self = Self { value: 0x0400 };
    /// Query limited information access
    pub const QUERY_LIMITED_INFORMATION: Self = Self { value: 0x1000 };

    /// Combine access rights
    pub fn combine(rights: &[Self]) -> Self {
        let mut value = 0;
        for right in rights {
            value |= right.value;
        }
        Self { value }
    }

    /// Get raw value
    pub fn value(&self) -> u32 {
        self.value
    }
}

/// Safe wrapper around a Windows process handle
pub struct ProcessHandle {
    handle: Handle,
    pid: u32,
    access: ProcessAccess,
}

impl ProcessHandle {
    /// Open a process with specified access rights
    pub fn open(pid: u32, access: ProcessAccess) -> ScanResult<Self> {
        let raw_handle = kernel32::open_process(pid, access.value())?;
        Ok(ProcessHandle {
            handle: Handle::new(raw_handle),
            pid,
            access,
        })
    }

    /// Open a process with the duplicate-rights access the resolver needs
    pub fn open_for_duplicate(pid: u32) -> ScanResult<Self> {
        Self::open(pid, ProcessAccess::DUP_HANDLE)
    }

    /// Get the process ID
    pub fn pid(&self) -> u32 {
        self.pid
    }

    /// Get the raw handle
    ///
    /// # Safety
    /// The returned handle is only valid as long as this ProcessHandle exists
    pub unsafe fn raw(&self) -> HANDLE {
        self.handle.raw()
    }

    /// Get the access rights
    pub fn access(&self) -> ProcessAccess {
        self.access
    }

    /// Check if handle is valid
    pub fn is_valid(&self) -> bool {
        !self.handle.is_null()
    }
}

impl fmt::Debug for ProcessHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProcessHandle")
            .field("pid", &self.pid)
            .field("valid", &self.is_valid())
            .field("access", &format!("0x{:X}", self.access.value()))
            .finish()
    }
}
