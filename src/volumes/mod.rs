//! Volume table mapping NT device names to drive letters
//!
//! File-object names come back from the kernel in device form
//! (`\Device\HarddiskVolume3\...`); the table rewrites them to the
//! drive-letter paths users recognize. Mappings are loaded once per scan
//! and read-only during it.

use crate::core::types::ScanResult;
use serde::{Deserialize, Serialize};

/// One device-to-mount mapping
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolumeMapping {
    /// NT device name, e.g. `\Device\HarddiskVolume3`
    pub device: String,
    /// Mount path, e.g. `C:\`
    pub mount: String,
}

impl VolumeMapping {
    pub fn new(device: impl Into<String>, mount: impl Into<String>) -> Self {
        VolumeMapping {
            device: device.into(),
            mount: mount.into(),
        }
    }
}

/// Read-only set of volume mappings with deterministic match order
#[derive(Debug, Clone, Default)]
pub struct VolumeTable {
    mappings: Vec<VolumeMapping>,
}

impl VolumeTable {
    /// Builds a table; mappings are ordered longest device name first so
    /// the first prefix match is also the longest one
    /// (`\Device\HarddiskVolume10` must win over `\Device\HarddiskVolume1`).
    pub fn new(mut mappings: Vec<VolumeMapping>) -> Self {
        mappings.sort_by(|a, b| {
            b.device
                .len()
                .cmp(&a.device.len())
                .then_with(|| a.device.cmp(&b.device))
        });
        VolumeTable { mappings }
    }

    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }

    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    pub fn mappings(&self) -> &[VolumeMapping] {
        &self.mappings
    }

    /// Rewrites a device-form object name to its mounted path.
    ///
    /// The matched device prefix must end at a path boundary; the mount is
    /// spliced in its place. Returns None when no mapping applies, leaving
    /// the raw name to the caller.
    pub fn rewrite(&self, object_name: &str) -> Option<String> {
        for mapping in &self.mappings {
            if let Some(rest) = object_name.strip_prefix(mapping.device.as_str()) {
                if !rest.is_empty() && !rest.starts_with('\\') {
                    continue;
                }
                let mount = mapping.mount.trim_end_matches('\\');
                return Some(format!("{}{}", mount, rest));
            }
        }
        None
    }
}

/// Enumerates mounted drive letters and their NT device names
#[cfg(windows)]
pub fn list_volumes() -> ScanResult<VolumeTable> {
    use crate::core::types::ScanError;
    use crate::windows::utils::string_conv::{string_to_wide, wide_to_string};
    use winapi::um::fileapi::{GetLogicalDriveStringsW, QueryDosDeviceW};

    // "C:\\\0D:\\\0...\0\0" fits comfortably in a fixed buffer
    let mut roots = [0u16; 512];
    let len = unsafe { GetLogicalDriveStringsW(roots.len() as u32, roots.as_mut_ptr()) };
    if len == 0 || len as usize > roots.len() {
        return Err(ScanError::WindowsApi(
            "GetLogicalDriveStringsW failed".to_string(),
        ));
    }

    let mut mappings = Vec::new();
    for root in roots[..len as usize].split(|&c| c == 0) {
        if root.is_empty() {
            continue;
        }
        let mount = wide_to_string(root);
        // QueryDosDevice wants "C:", not "C:\"
        let drive = mount.trim_end_matches('\\');
        let wide_drive = string_to_wide(drive);
        let mut device = [0u16; 1024];
        let written = unsafe {
            QueryDosDeviceW(wide_drive.as_ptr(), device.as_mut_ptr(), device.len() as u32)
        };
        if written == 0 {
            continue;
        }
        mappings.push(VolumeMapping::new(wide_to_string(&device), mount));
    }

    Ok(VolumeTable::new(mappings))
}

/// Stub for non-Windows hosts; the orchestrator never reaches it
#[cfg(not(windows))]
pub fn list_volumes() -> ScanResult<VolumeTable> {
    use crate::core::types::ScanError;
    Err(ScanError::PlatformUnsupported(
        "volume enumeration requires Windows".to_string(),
    ))
}
