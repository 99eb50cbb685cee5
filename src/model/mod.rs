pub mod account_identity;
pub mod config;
pub mod error;
pub mod log;
pub mod sid;
pub mod win32;
