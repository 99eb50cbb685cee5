use crate::interface::security_api::SecurityApiTrait;
use crate::model::sid::SidRef;
use crate::model::win32::{Win32Code, ERROR_INVALID_DATA, ERROR_INVALID_SECURITY_DESCR};
use super::helper::{to_wide, wide_out, win32_code};
use std::ffi::c_void;
use std::mem::size_of;
use std::path::Path;
use windows::core::{BOOL, PCWSTR};
use windows::Win32::Foundation::NO_ERROR;
use windows::Win32::NetworkManagement::WNet::{
    WNetGetUniversalNameW, UNIVERSAL_NAME_INFOW, UNIVERSAL_NAME_INFO_LEVEL,
};
use windows::Win32::Security::{
    GetFileSecurityW, GetLengthSid, GetSecurityDescriptorOwner, IsValidSid, LookupAccountSidW,
    OWNER_SECURITY_INFORMATION, PSECURITY_DESCRIPTOR, PSID, SID_NAME_USE,
};

// Longest extended-length path, in UTF-16 units.
const MAX_UNIVERSAL_NAME: usize = 32767;

#[derive(Debug, Default, Clone, Copy)]
pub struct SecurityApi;

impl SecurityApiTrait for SecurityApi {
    fn path_exists(&self, path: &str) -> bool {
        Path::new(path).try_exists().unwrap_or(false)
    }

    fn universal_name(&self, path: &str) -> Result<String, Win32Code> {
        let local_path = to_wide(path);

        // UNIVERSAL_NAME_INFOW points into the same buffer, so keep it pointer aligned.
        let bytes = size_of::<UNIVERSAL_NAME_INFOW>() + MAX_UNIVERSAL_NAME * size_of::<u16>();
        let mut buffer = vec![0u64; bytes.div_ceil(size_of::<u64>())];
        let mut size = (buffer.len() * size_of::<u64>()) as u32;

        let status = unsafe {
            WNetGetUniversalNameW(
                PCWSTR(local_path.as_ptr()),
                UNIVERSAL_NAME_INFO_LEVEL,
                buffer.as_mut_ptr() as *mut c_void,
                &mut size,
            )
        };
        if status != NO_ERROR {
            return Err(status.0);
        }

        let info = unsafe { &*(buffer.as_ptr() as *const UNIVERSAL_NAME_INFOW) };
        if info.lpUniversalName.is_null() {
            return Err(ERROR_INVALID_DATA);
        }
        unsafe { info.lpUniversalName.to_string() }.map_err(|_| ERROR_INVALID_DATA)
    }

    fn file_security(
        &self,
        path: &str,
        descriptor: &mut [u8],
        needed: &mut u32,
    ) -> Result<(), Win32Code> {
        let file_name = to_wide(path);
        let target = (!descriptor.is_empty())
            .then(|| PSECURITY_DESCRIPTOR(descriptor.as_mut_ptr() as *mut c_void));
        let length = u32::try_from(descriptor.len()).unwrap_or(u32::MAX);

        unsafe {
            GetFileSecurityW(
                PCWSTR(file_name.as_ptr()),
                OWNER_SECURITY_INFORMATION.0,
                target,
                length,
                needed,
            )
        }
        .ok()
        .map_err(|err| win32_code(&err))
    }

    fn descriptor_owner<'d>(&self, descriptor: &'d [u8]) -> Result<SidRef<'d>, Win32Code> {
        let mut owner = PSID::default();
        let mut defaulted = BOOL::default();

        unsafe {
            GetSecurityDescriptorOwner(
                PSECURITY_DESCRIPTOR(descriptor.as_ptr() as *mut c_void),
                &mut owner,
                &mut defaulted,
            )
        }
        .map_err(|err| win32_code(&err))?;

        if owner.0.is_null() || !unsafe { IsValidSid(owner) }.as_bool() {
            return Err(ERROR_INVALID_SECURITY_DESCR);
        }

        // A self-relative descriptor stores the owner inside its own buffer.
        let offset = (owner.0 as usize)
            .checked_sub(descriptor.as_ptr() as usize)
            .ok_or(ERROR_INVALID_SECURITY_DESCR)?;
        let length = unsafe { GetLengthSid(owner) } as usize;
        let end = offset
            .checked_add(length)
            .ok_or(ERROR_INVALID_SECURITY_DESCR)?;

        descriptor
            .get(offset..end)
            .map(SidRef::new)
            .ok_or(ERROR_INVALID_SECURITY_DESCR)
    }

    fn lookup_account_sid(
        &self,
        authority: Option<&str>,
        sid: SidRef<'_>,
        name: &mut [u16],
        name_len: &mut u32,
        domain: &mut [u16],
        domain_len: &mut u32,
    ) -> Result<(), Win32Code> {
        let system_name = authority.map(to_wide);
        let system_name = system_name
            .as_ref()
            .map_or(PCWSTR::null(), |wide| PCWSTR(wide.as_ptr()));
        let mut usage = SID_NAME_USE::default();

        unsafe {
            LookupAccountSidW(
                system_name,
                PSID(sid.as_bytes().as_ptr() as *mut c_void),
                wide_out(name),
                name_len,
                wide_out(domain),
                domain_len,
                &mut usage,
            )
        }
        .map_err(|err| win32_code(&err))
    }
}
