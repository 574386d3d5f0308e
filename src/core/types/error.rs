//! Error types for handle scanning

use thiserror::Error;

/// Main error type for scan operations
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Platform facility unavailable: {0}")]
    PlatformUnsupported(String),

    #[error("Buffer allocation of {requested} bytes failed")]
    AllocationFailure { requested: usize },

    #[error("Access denied to process {pid}: {reason}")]
    AccessDenied { pid: u32, reason: String },

    #[error("Process not found: {0}")]
    ProcessNotFound(String),

    #[error("Target pid {0} is not a valid handle table filter")]
    InvalidTarget(u32),

    #[error("Snapshot failed: {0}")]
    SnapshotFailed(String),

    #[error("NT call failed with status 0x{0:08X}")]
    NtStatus(u32),

    #[error("Invalid handle: {0}")]
    InvalidHandle(String),

    #[cfg(windows)]
    #[error("Windows API error: {0}")]
    WindowsApiError(#[from] windows::core::Error),

    #[error("Windows API: {0}")]
    WindowsApi(String),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type alias for scan operations
pub type ScanResult<T> = Result<T, ScanError>;

impl ScanError {
    /// Creates a new Windows API error with the last error code
    #[cfg(windows)]
    pub fn last_os_error() -> Self {
        ScanError::WindowsApiError(windows::core::Error::from_win32())
    }

    /// Creates an access denied error for a process
    pub fn access_denied(pid: u32, reason: impl Into<String>) -> Self {
        ScanError::AccessDenied {
            pid,
            reason: reason.into(),
        }
    }

    /// Creates an allocation failure for the given request size
    pub fn allocation_failure(requested: usize) -> Self {
        ScanError::AllocationFailure { requested }
    }
}
