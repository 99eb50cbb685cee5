use crate::interface::security_api::SecurityApiTrait;
use crate::model::sid::SidRef;
use crate::model::win32::{
    Win32Code, ERROR_INSUFFICIENT_BUFFER, ERROR_NONE_MAPPED, ERROR_NOT_CONNECTED,
};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::thread;
use std::time::Duration;

const ERROR_FILE_NOT_FOUND: Win32Code = 2;

// Stand-in for the fixed part of a self-relative descriptor.
const DESCRIPTOR_HEADER: [u8; 4] = [1, 0, 0x01, 0x80];

// S-1-5-21-1-2-3-1001
pub const USER_SID: [u8; 28] = [
    1, 5, 0, 0, 0, 0, 0, 5, 21, 0, 0, 0, 1, 0, 0, 0, 2, 0, 0, 0, 3, 0, 0, 0, 0xE9, 0x03, 0, 0,
];

// S-1-5-32-544
pub const ADMINISTRATORS_SID: [u8; 16] = [1, 2, 0, 0, 0, 0, 0, 5, 32, 0, 0, 0, 0x20, 0x02, 0, 0];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    PathExists,
    UniversalName,
    FileSecurity { path: String, capacity: usize },
    DescriptorOwner { length: usize },
    LookupAccountSid { authority: Option<String> },
}

impl Call {
    fn is_security_call(&self) -> bool {
        !matches!(self, Self::PathExists | Self::UniversalName)
    }
}

/// Scripted [`SecurityApiTrait`] that records every call it receives.
#[derive(Default)]
pub struct MockSecurityApi {
    existing: HashSet<String>,
    universal: HashMap<String, String>,
    descriptors: HashMap<String, Vec<u8>>,
    accounts: HashMap<(Option<String>, Vec<u8>), (Vec<u16>, Vec<u16>)>,
    fail_file_security: Option<Win32Code>,
    fail_owner: Option<Win32Code>,
    zero_size_on_fetch: bool,
    delay: Option<Duration>,
    calls: Mutex<Vec<Call>>,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
}

impl MockSecurityApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, path: &str, owner: &[u8]) -> Self {
        let mut descriptor = DESCRIPTOR_HEADER.to_vec();
        descriptor.extend_from_slice(owner);
        self.existing.insert(path.to_string());
        self.descriptors.insert(path.to_string(), descriptor);
        self
    }

    /// Makes `local` exist and translate to `universal`.
    pub fn with_mapping(mut self, local: &str, universal: &str) -> Self {
        self.existing.insert(local.to_string());
        self.universal.insert(local.to_string(), universal.to_string());
        self
    }

    pub fn with_account(
        mut self,
        authority: Option<&str>,
        sid: &[u8],
        domain: &str,
        account: &str,
    ) -> Self {
        let domain: Vec<u16> = domain.encode_utf16().collect();
        let account: Vec<u16> = account.encode_utf16().collect();
        self.with_wide_account(authority, sid, &domain, &account)
    }

    /// Like [`Self::with_account`], for names that are not valid UTF-16.
    pub fn with_wide_account(
        mut self,
        authority: Option<&str>,
        sid: &[u8],
        domain: &[u16],
        account: &[u16],
    ) -> Self {
        self.accounts.insert(
            (authority.map(str::to_string), sid.to_vec()),
            (domain.to_vec(), account.to_vec()),
        );
        self
    }

    /// A successful descriptor fetch writes 0 back as the needed size.
    pub fn reporting_zero_size_on_fetch(mut self) -> Self {
        self.zero_size_on_fetch = true;
        self
    }

    pub fn failing_file_security(mut self, code: Win32Code) -> Self {
        self.fail_file_security = Some(code);
        self
    }

    pub fn failing_owner(mut self, code: Win32Code) -> Self {
        self.fail_owner = Some(code);
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn security_calls(&self) -> usize {
        self.calls().iter().filter(|call| call.is_security_call()).count()
    }

    /// Highest number of `file_security` calls that were running at once.
    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }

    pub fn lookup_authorities(&self) -> Vec<Option<String>> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::LookupAccountSid { authority } => Some(authority),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

fn write_wide(value: &[u16], buffer: &mut [u16]) {
    buffer[..value.len()].copy_from_slice(value);
    buffer[value.len()] = 0;
}

impl SecurityApiTrait for MockSecurityApi {
    fn path_exists(&self, path: &str) -> bool {
        self.record(Call::PathExists);
        self.existing.contains(path)
    }

    fn universal_name(&self, path: &str) -> Result<String, Win32Code> {
        self.record(Call::UniversalName);
        self.universal.get(path).cloned().ok_or(ERROR_NOT_CONNECTED)
    }

    fn file_security(
        &self,
        path: &str,
        descriptor: &mut [u8],
        needed: &mut u32,
    ) -> Result<(), Win32Code> {
        self.record(Call::FileSecurity {
            path: path.to_string(),
            capacity: descriptor.len(),
        });

        let running = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(running, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            thread::sleep(delay);
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if let Some(code) = self.fail_file_security {
            return Err(code);
        }

        let stored = self.descriptors.get(path).ok_or(ERROR_FILE_NOT_FOUND)?;
        *needed = stored.len() as u32;
        if descriptor.len() < stored.len() {
            return Err(ERROR_INSUFFICIENT_BUFFER);
        }
        descriptor[..stored.len()].copy_from_slice(stored);
        if self.zero_size_on_fetch {
            *needed = 0;
        }
        Ok(())
    }

    fn descriptor_owner<'d>(&self, descriptor: &'d [u8]) -> Result<SidRef<'d>, Win32Code> {
        self.record(Call::DescriptorOwner {
            length: descriptor.len(),
        });
        if let Some(code) = self.fail_owner {
            return Err(code);
        }
        Ok(SidRef::new(&descriptor[DESCRIPTOR_HEADER.len()..]))
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
        self.record(Call::LookupAccountSid {
            authority: authority.map(str::to_string),
        });

        let key = (authority.map(str::to_string), sid.as_bytes().to_vec());
        let (found_domain, found_name) = self.accounts.get(&key).ok_or(ERROR_NONE_MAPPED)?;

        let name_units = found_name.len();
        let domain_units = found_domain.len();
        if name.len() <= name_units || domain.len() <= domain_units {
            *name_len = name_units as u32 + 1;
            *domain_len = domain_units as u32 + 1;
            return Err(ERROR_INSUFFICIENT_BUFFER);
        }

        write_wide(found_name, name);
        write_wide(found_domain, domain);
        *name_len = name_units as u32;
        *domain_len = domain_units as u32;
        Ok(())
    }
}
