use crate::model::win32::Win32Code;
use std::ffi::OsStr;
use std::os::windows::ffi::OsStrExt;
use windows::core::PWSTR;
use windows::Win32::Foundation::WIN32_ERROR;

/// NUL-terminated UTF-16 copy of `value`.
pub fn to_wide(value: &str) -> Vec<u16> {
    OsStr::new(value).encode_wide().chain(Some(0)).collect()
}

/// Output pointer for a wide buffer; an empty buffer is passed as NULL so the
/// call only reports the size it needs.
pub fn wide_out(buffer: &mut [u16]) -> Option<PWSTR> {
    (!buffer.is_empty()).then(|| PWSTR(buffer.as_mut_ptr()))
}

pub fn win32_code(error: &windows::core::Error) -> Win32Code {
    WIN32_ERROR::from_error(error).map_or(error.code().0 as u32, |code| code.0)
}
