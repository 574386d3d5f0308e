//! String conversion utilities for Windows API

use std::ffi::{OsStr, OsString};
use std::os::windows::ffi::{OsStrExt, OsStringExt};
use winapi::shared::ntdef::UNICODE_STRING;

/// Convert a Rust string to Windows wide string (UTF-16)
pub fn string_to_wide(s: &str) -> Vec<u16> {
    OsStr::new(s)
        .encode_wide()
        .chain(std::iter::once(0))
        .collect()
}

/// Convert Windows wide string (UTF-16) to Rust string
pub fn wide_to_string(wide: &[u16]) -> String {
    let len = wide.iter().position(|&c| c == 0).unwrap_or(wide.len());
    let os_string = OsString::from_wide(&wide[..len]);
    os_string.to_string_lossy().into_owned()
}

/// Convert a UNICODE_STRING payload to a Rust string.
///
/// # Safety
/// The string's `Buffer` must point at `Length` valid bytes, which holds
/// for strings embedded in a successful NtQueryObject result as long as
/// the queried buffer is still alive.
pub unsafe fn unicode_string_to_string(us: &UNICODE_STRING) -> String {
    if us.Buffer.is_null() || us.Length == 0 {
        return String::new();
    }

    let chars = std::slice::from_raw_parts(us.Buffer, (us.Length / 2) as usize);
    String::from_utf16_lossy(chars)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_to_wide() {
        let wide = string_to_wide("Hello");
        assert_eq!(wide, vec![72, 101, 108, 108, 111, 0]);

        let empty = string_to_wide("");
        assert_eq!(empty, vec![0]);
    }

    #[test]
    fn test_wide_to_string() {
        let wide = vec![72, 101, 108, 108, 111, 0];
        assert_eq!(wide_to_string(&wide), "Hello");

        let no_null = vec![72, 101, 108, 108, 111];
        assert_eq!(wide_to_string(&no_null), "Hello");
    }

    #[test]
    fn test_unicode_roundtrip() {
        let unicode_str = "\\Device\\HarddiskVolume3\\数据";
        let wide = string_to_wide(unicode_str);
        let back = wide_to_string(&wide);
        assert_eq!(back, unicode_str);
    }

    #[test]
    #[cfg_attr(miri, ignore = "Unsafe pointer operations")]
    fn test_unicode_string_to_string() {
        let mut payload: Vec<u16> = "\\Device\\Mup".encode_utf16().collect();
        let us = UNICODE_STRING {
            Length: (payload.len() * 2) as u16,
            MaximumLength: (payload.len() * 2) as u16,
            Buffer: payload.as_mut_ptr(),
        };
        unsafe {
            assert_eq!(unicode_string_to_string(&us), "\\Device\\Mup");
        }
    }

    #[test]
    fn test_unicode_string_empty() {
        let us = UNICODE_STRING {
            Length: 0,
            MaximumLength: 0,
            Buffer: std::ptr::null_mut(),
        };
        unsafe {
            assert_eq!(unicode_string_to_string(&us), "");
        }
    }
}
