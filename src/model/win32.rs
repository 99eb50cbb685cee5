//! Win32 error codes the resolver reasons about.
//!
//! Kept as plain numbers so the resolution logic and its tests do not depend on
//! the `windows` crate being available.

pub type Win32Code = u32;

pub const ERROR_NOT_ENOUGH_MEMORY: Win32Code = 8;
pub const ERROR_INVALID_DATA: Win32Code = 13;
pub const ERROR_ACCESS_DENIED: Win32Code = 5;
pub const ERROR_NOT_SUPPORTED: Win32Code = 50;
pub const ERROR_INVALID_PARAMETER: Win32Code = 87;
pub const ERROR_INSUFFICIENT_BUFFER: Win32Code = 122;
pub const ERROR_NONE_MAPPED: Win32Code = 1332;
pub const ERROR_INVALID_SECURITY_DESCR: Win32Code = 1338;
pub const ERROR_NOT_CONNECTED: Win32Code = 2250;
