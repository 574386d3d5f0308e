//! Raw Windows API bindings

pub mod kernel32;
pub mod ntdll;
