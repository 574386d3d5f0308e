//! NTDLL.dll bindings for the undocumented handle table and object queries

use winapi::shared::minwindef::ULONG;
use winapi::shared::ntdef::{NTSTATUS, PVOID, UNICODE_STRING};
use winapi::um::winnt::HANDLE;

// NT Status codes
pub const STATUS_SUCCESS: NTSTATUS = 0x00000000;
pub const STATUS_INFO_LENGTH_MISMATCH: NTSTATUS = 0xC0000004_u32 as i32;
pub const STATUS_BUFFER_OVERFLOW: NTSTATUS = 0x80000005_u32 as i32;
pub const STATUS_ACCESS_DENIED: NTSTATUS = 0xC0000022_u32 as i32;

/// System information class for NtQuerySystemInformation
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub enum SystemInfoClass {
    SystemBasicInformation = 0,
    SystemProcessInformation = 5,
    SystemHandleInformation = 16,
    SystemExtendedHandleInformation = 64,
}

/// Object information class for NtQueryObject
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectInfoClass {
    ObjectBasicInformation = 0,
    ObjectNameInformation = 1,
    ObjectTypeInformation = 2,
}

/// One raw entry of the system-wide handle table
/// (SYSTEM_HANDLE_TABLE_ENTRY_INFO)
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct SystemHandleTableEntryInfo {
    pub unique_process_id: u16,
    pub creator_back_trace_index: u16,
    pub object_type_index: u8,
    pub handle_attributes: u8,
    pub handle_value: u16,
    pub object: PVOID,
    pub granted_access: ULONG,
}

/// Header of the SystemHandleInformation payload; `handles` extends past the
/// declared length for `number_of_handles` entries
#[repr(C)]
pub struct SystemHandleInformation {
    pub number_of_handles: ULONG,
    pub handles: [SystemHandleTableEntryInfo; 1],
}

/// Header of the ObjectTypeInformation payload; the type name's buffer
/// points back into the queried block
#[repr(C)]
pub struct ObjectTypeInformation {
    pub type_name: UNICODE_STRING,
    pub reserved: [ULONG; 22],
}

/// ObjectNameInformation payload
#[repr(C)]
pub struct ObjectNameInformation {
    pub name: UNICODE_STRING,
}

// External function declarations (link to ntdll.dll)
#[link(name = "ntdll")]
extern "system" {
    fn NtQuerySystemInformation(
        system_info_class: ULONG,
        system_info: PVOID,
        system_info_length: ULONG,
        return_length: *mut ULONG,
    ) -> NTSTATUS;

    fn NtQueryObject(
        handle: HANDLE,
        object_info_class: ULONG,
        object_info: PVOID,
        object_info_length: ULONG,
        return_length: *mut ULONG,
    ) -> NTSTATUS;

    fn NtDuplicateObject(
        source_process_handle: HANDLE,
        source_handle: HANDLE,
        target_process_handle: HANDLE,
        target_handle: *mut HANDLE,
        desired_access: ULONG,
        handle_attributes: ULONG,
        options: ULONG,
    ) -> NTSTATUS;
}

/// Check if NTSTATUS indicates success
pub fn nt_success(status: NTSTATUS) -> bool {
    status >= 0
}

/// Thin wrapper over NtQuerySystemInformation writing into `buffer`
///
/// # Safety
/// `buffer` must stay valid for the duration of the call
pub unsafe fn query_system_information(
    info_class: SystemInfoClass,
    buffer: &mut [u8],
    return_length: &mut ULONG,
) -> NTSTATUS {
    NtQuerySystemInformation(
        info_class as ULONG,
        buffer.as_mut_ptr() as PVOID,
        buffer.len() as ULONG,
        return_length,
    )
}

/// Thin wrapper over NtQueryObject writing into `buffer`
///
/// # Safety
/// The handle must be a valid handle owned by the current process
pub unsafe fn query_object(
    handle: HANDLE,
    info_class: ObjectInfoClass,
    buffer: &mut [u8],
    return_length: &mut ULONG,
) -> NTSTATUS {
    NtQueryObject(
        handle,
        info_class as ULONG,
        buffer.as_mut_ptr() as PVOID,
        buffer.len() as ULONG,
        return_length,
    )
}

/// Duplicates a handle from another process into the current process.
///
/// Returns the duplicated raw handle on success. Failure is routine for
/// protected system handles and must be absorbed by the caller.
///
/// # Safety
/// `source_process` must be a valid handle opened with PROCESS_DUP_HANDLE
pub unsafe fn duplicate_object(
    source_process: HANDLE,
    source_handle_value: u16,
    target_process: HANDLE,
) -> Result<HANDLE, NTSTATUS> {
    let mut duplicated: HANDLE = std::ptr::null_mut();
    let status = NtDuplicateObject(
        source_process,
        source_handle_value as usize as HANDLE,
        target_process,
        &mut duplicated,
        0,
        0,
        0,
    );
    if nt_success(status) && !duplicated.is_null() {
        Ok(duplicated)
    } else {
        Err(status)
    }
}

/// Copies the entries out of a probed SystemHandleInformation buffer.
///
/// The buffer is a plain byte vector with no alignment guarantee, so the
/// header and every entry are read with `read_unaligned` rather than
/// referenced in place.
///
/// # Safety
/// `buffer` must hold a successful SystemHandleInformation query result.
pub unsafe fn parse_handle_table(buffer: &[u8]) -> Vec<SystemHandleTableEntryInfo> {
    if buffer.len() < std::mem::size_of::<SystemHandleInformation>() {
        return Vec::new();
    }
    let base = buffer.as_ptr();
    let count = std::ptr::read_unaligned(base as *const ULONG) as usize;

    let entries_offset = std::mem::offset_of!(SystemHandleInformation, handles);
    let entry_size = std::mem::size_of::<SystemHandleTableEntryInfo>();
    // Clamp to what the buffer can actually hold
    let available = (buffer.len() - entries_offset) / entry_size;
    let count = count.min(available);

    let mut entries = Vec::with_capacity(count);
    for index in 0..count {
        let entry_ptr =
            base.add(entries_offset + index * entry_size) as *const SystemHandleTableEntryInfo;
        entries.push(std::ptr::read_unaligned(entry_ptr));
    }
    entries
}

/// Reads the type name descriptor out of an ObjectTypeInformation buffer.
///
/// # Safety
/// `buffer` must hold a successful ObjectTypeInformation query result; the
/// returned descriptor's `Buffer` points back into `buffer`, which must
/// outlive any read through it.
pub unsafe fn parse_type_name(buffer: &[u8]) -> Option<UNICODE_STRING> {
    if buffer.len() < std::mem::size_of::<ObjectTypeInformation>() {
        return None;
    }
    let info = std::ptr::read_unaligned(buffer.as_ptr() as *const ObjectTypeInformation);
    Some(info.type_name)
}

/// Reads the object name descriptor out of an ObjectNameInformation buffer.
///
/// # Safety
/// `buffer` must hold a successful ObjectNameInformation query result; the
/// returned descriptor's `Buffer` points back into `buffer`, which must
/// outlive any read through it.
pub unsafe fn parse_object_name(buffer: &[u8]) -> Option<UNICODE_STRING> {
    if buffer.len() < std::mem::size_of::<ObjectNameInformation>() {
        return None;
    }
    let info = std::ptr::read_unaligned(buffer.as_ptr() as *const ObjectNameInformation);
    Some(info.name)
}
