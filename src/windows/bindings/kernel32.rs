//! Kernel32.dll bindings for process handle operations

use crate::core::types::{ScanError, ScanResult};
use winapi::shared::minwindef::FALSE;
use winapi::shared::winerror::ERROR_ACCESS_DENIED;
use winapi::um::errhandlingapi::GetLastError;
use winapi::um::handleapi::CloseHandle;
use winapi::um::processthreadsapi::{GetCurrentProcess, OpenProcess};
use winapi::um::winnt::HANDLE;

/// Safe wrapper for OpenProcess
pub fn open_process(pid: u32, desired_access: u32) -> ScanResult<HANDLE> {
    unsafe {
        let handle = OpenProcess(desired_access, FALSE, pid);
        if handle.is_null() {
            Err(open_error(pid, GetLastError()))
        } else {
            Ok(handle)
        }
    }
}

/// Maps an OpenProcess failure code to the error taxonomy. Protected and
/// system processes refuse the open with access denied; everything else is
/// treated as the process not being there.
fn open_error(pid: u32, code: u32) -> ScanError {
    if code == ERROR_ACCESS_DENIED {
        ScanError::access_denied(pid, "OpenProcess refused the requested access")
    } else {
        ScanError::ProcessNotFound(format!("PID: {} (code {})", pid, code))
    }
}

/// Pseudo-handle for the current process; never needs closing
pub fn current_process() -> HANDLE {
    unsafe { GetCurrentProcess() }
}

/// Safe wrapper for CloseHandle
///
/// # Safety
/// The handle must be a valid Windows handle
pub unsafe fn close_handle(handle: HANDLE) -> ScanResult<()> {
    if handle.is_null() {
        return Ok(());
    }

    if CloseHandle(handle) == FALSE {
        Err(ScanError::WindowsApi("Failed to close handle".to_string()))
    } else {
        Ok(())
    }
}
