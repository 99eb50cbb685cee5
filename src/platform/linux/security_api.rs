use crate::interface::security_api::SecurityApiTrait;
use crate::model::sid::SidRef;
use crate::model::win32::{Win32Code, ERROR_NOT_SUPPORTED};
use std::path::Path;

/// Security descriptors and SIDs do not exist here; every security call
/// reports `ERROR_NOT_SUPPORTED`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SecurityApi;

impl SecurityApiTrait for SecurityApi {
    fn path_exists(&self, path: &str) -> bool {
        Path::new(path).try_exists().unwrap_or(false)
    }

    fn universal_name(&self, _path: &str) -> Result<String, Win32Code> {
        Err(ERROR_NOT_SUPPORTED)
    }

    fn file_security(
        &self,
        _path: &str,
        _descriptor: &mut [u8],
        _needed: &mut u32,
    ) -> Result<(), Win32Code> {
        Err(ERROR_NOT_SUPPORTED)
    }

    fn descriptor_owner<'d>(&self, _descriptor: &'d [u8]) -> Result<SidRef<'d>, Win32Code> {
        Err(ERROR_NOT_SUPPORTED)
    }

    fn lookup_account_sid(
        &self,
        _authority: Option<&str>,
        _sid: SidRef<'_>,
        _name: &mut [u16],
        _name_len: &mut u32,
        _domain: &mut [u16],
        _domain_len: &mut u32,
    ) -> Result<(), Win32Code> {
        Err(ERROR_NOT_SUPPORTED)
    }
}
