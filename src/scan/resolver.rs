//! Per-handle resolution: duplicate, query type and name, rewrite paths
//!
//! Resolution is best-effort by contract. Every sub-step can fail (opening
//! the owner, duplicating the handle, either query) and each failure just
//! leaves its field empty. Duplication failure in particular is routine for
//! protected system handles and is not an error at the batch level.

use crate::core::types::{HandleRecord, ScanError, ScanToken};
use crate::process::ProcessHandle;
use crate::scan::probe::{probe_sized_query, Probe};
use crate::scan::table::SystemHandleEntry;
use crate::volumes::VolumeTable;
use crate::windows::bindings::{kernel32, ntdll};
use crate::windows::bindings::ntdll::{
    nt_success, ObjectInfoClass, STATUS_BUFFER_OVERFLOW, STATUS_INFO_LENGTH_MISMATCH,
};
use crate::windows::types::Handle;
use crate::windows::utils::string_conv::unicode_string_to_string;
use tracing::trace;
use winapi::shared::minwindef::ULONG;
use winapi::um::winnt::HANDLE;

/// Granted-access mask whose name query is known to hang (certain
/// synchronization objects). The name query is skipped for these and only
/// the type is kept. This single sentinel is carried over from field
/// experience and is not an exhaustive list of dangerous handle classes.
pub const SKIP_NAME_QUERY_ACCESS: u32 = 0x0012_019F;

const OBJECT_QUERY_INITIAL_SIZE: usize = 0x200;

/// Resolves one handle table entry into a record. Never fails; unresolved
/// fields stay empty and the duplicated handle is closed on every path.
pub fn resolve(entry: &SystemHandleEntry, volumes: &VolumeTable, token: ScanToken) -> HandleRecord {
    let mut record = HandleRecord::unresolved(token, entry.handle_value as u64);

    let owner = match ProcessHandle::open_for_duplicate(entry.owner_pid) {
        Ok(handle) => handle,
        Err(err) => {
            trace!(pid = entry.owner_pid, %err, "owner process not openable");
            return record;
        }
    };

    let duplicated = match unsafe {
        ntdll::duplicate_object(owner.raw(), entry.handle_value, kernel32::current_process())
    } {
        // Closed by Drop on every return below
        Ok(raw) => Handle::new(raw),
        Err(status) => {
            trace!(
                pid = entry.owner_pid,
                handle = entry.handle_value,
                status = format_args!("0x{:08X}", status as u32),
                "duplication refused"
            );
            return record;
        }
    };

    if let Some(type_name) = query_type_name(duplicated.raw()) {
        record.object_type = type_name;
    }

    if entry.granted_access == SKIP_NAME_QUERY_ACCESS {
        return record;
    }

    if let Some(name) = query_object_name(duplicated.raw()) {
        record.object_name = if record.is_file() {
            volumes.rewrite(&name).unwrap_or(name)
        } else {
            name
        };
    }

    record
}

fn query_type_name(handle: HANDLE) -> Option<String> {
    query_object_string(handle, ObjectInfoClass::ObjectTypeInformation)
}

fn query_object_name(handle: HANDLE) -> Option<String> {
    query_object_string(handle, ObjectInfoClass::ObjectNameInformation)
}

fn query_object_string(handle: HANDLE, info_class: ObjectInfoClass) -> Option<String> {
    let name_query = info_class == ObjectInfoClass::ObjectNameInformation;

    let buffer = probe_sized_query(OBJECT_QUERY_INITIAL_SIZE, |buf| {
        let mut required: ULONG = 0;
        let status = unsafe { ntdll::query_object(handle, info_class, buf, &mut required) };
        // Name queries report a short buffer as an overflow warning rather
        // than a length mismatch.
        if status == STATUS_INFO_LENGTH_MISMATCH
            || (name_query && status == STATUS_BUFFER_OVERFLOW)
        {
            Probe::TooSmall(required as usize)
        } else if nt_success(status) {
            Probe::Complete(buf.len())
        } else {
            Probe::Failed(ScanError::NtStatus(status as u32))
        }
    })
    .ok()?;

    // The descriptor is copied out of the unaligned buffer; its Buffer
    // pointer still targets `buffer`, which stays alive for the read.
    let unicode = unsafe {
        if name_query {
            ntdll::parse_object_name(&buffer)?
        } else {
            ntdll::parse_type_name(&buffer)?
        }
    };
    let text = unsafe { unicode_string_to_string(&unicode) };
    (!text.is_empty()).then_some(text)
}
