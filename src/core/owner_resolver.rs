use crate::core::path;
use crate::interface::security_api::SecurityApiTrait;
use crate::model::account_identity::AccountIdentity;
use crate::model::error::owner::OwnerError;
use crate::model::log::resolver::ResolverLog;
use crate::model::sid::SidRef;
use crate::model::win32::ERROR_INVALID_DATA;
use crate::platform::SecurityApi;
use crate::utils::scoped_buffer::ScopedBuffer;
use crate::utils::sized_query::query_sized;
use macros::log;
use std::borrow::Cow;
use std::path::Path;

/// Capacity used for [`OwnerResolver::owner_for_display`], in UTF-16 units.
pub const DISPLAY_CAPACITY: usize = 65536;

const GET_FILE_SECURITY: &str = "GetFileSecurityW";
const GET_SECURITY_DESCRIPTOR_OWNER: &str = "GetSecurityDescriptorOwner";
const LOOKUP_ACCOUNT_SID: &str = "LookupAccountSidW";

/// Resolves the owning account of a file or folder as `DOMAIN\account`.
///
/// Every call is independent: buffers are allocated per call and released
/// before it returns, and nothing is cached between calls.
pub struct OwnerResolver<A = SecurityApi> {
    api: A,
}

impl OwnerResolver {
    pub fn new() -> Self {
        Self::with_api(SecurityApi)
    }
}

impl Default for OwnerResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: SecurityApiTrait> OwnerResolver<A> {
    pub fn with_api(api: A) -> Self {
        Self { api }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Owner of `path`, provided `DOMAIN\account` plus a terminator fits in
    /// `capacity` UTF-16 units.
    pub fn resolve_owner(&self, path: &str, capacity: usize) -> Result<String, OwnerError> {
        log!(ResolverLog::Resolving {
            path: path.to_string()
        });

        self.validate(path, capacity)?;

        let normalized = self.normalize(path);
        let authority = path::extract_authority(&normalized);

        let descriptor = self.security_descriptor(&normalized)?;
        let owner_sid = self
            .api
            .descriptor_owner(&descriptor)
            .map_err(|code| OwnerError::Underlying(GET_SECURITY_DESCRIPTOR_OWNER, code))?;
        let identity = self.account_identity(authority, owner_sid)?;

        let owner = identity.qualified_name();
        let required = owner.encode_utf16().count() + 1;
        if required > capacity {
            return Err(OwnerError::InsufficientCapacity(required, capacity));
        }

        log!(ResolverLog::Resolved {
            path: path.to_string(),
            owner: owner.clone()
        });
        Ok(owner)
    }

    /// Writes the owner and a NUL terminator into `destination` and returns
    /// the owner's length. `destination` is left untouched on failure.
    pub fn resolve_owner_into(
        &self,
        path: &str,
        destination: &mut [u16],
    ) -> Result<usize, OwnerError> {
        let owner = self.resolve_owner(path, destination.len())?;
        let wide: Vec<u16> = owner.encode_utf16().chain(Some(0)).collect();
        destination[..wide.len()].copy_from_slice(&wide);
        Ok(wide.len() - 1)
    }

    pub fn resolve_owner_path(&self, path: &Path, capacity: usize) -> Result<String, OwnerError> {
        let path = path
            .to_str()
            .ok_or_else(|| OwnerError::InvalidArgument("path is not valid Unicode"))?;
        self.resolve_owner(path, capacity)
    }

    /// Owner for a file-browser column: `None` whenever resolution fails.
    pub fn owner_for_display(&self, path: &str) -> Option<String> {
        match self.resolve_owner(path, DISPLAY_CAPACITY) {
            Ok(owner) => Some(owner),
            Err(error) => {
                log!(
                    ResolverLog::Unknown {
                        path: path.to_string()
                    },
                    error
                );
                None
            }
        }
    }

    fn validate(&self, path: &str, capacity: usize) -> Result<(), OwnerError> {
        if path.is_empty() {
            return Err(OwnerError::InvalidArgument("path is empty"));
        }
        if !self.api.path_exists(path) {
            return Err(OwnerError::InvalidArgument(format!("{path} does not exist")));
        }
        if capacity == 0 {
            return Err(OwnerError::InvalidArgument("destination capacity is zero"));
        }
        Ok(())
    }

    // A path on a redirected drive is swapped for its UNC form so the account
    // is looked up on the server that holds the file.
    fn normalize<'p>(&self, path: &'p str) -> Cow<'p, str> {
        if path::is_remote_addressable(path) {
            return Cow::Borrowed(path);
        }

        match self.api.universal_name(path) {
            Ok(universal) => {
                log!(ResolverLog::Translated {
                    path: path.to_string(),
                    universal: universal.clone()
                });
                Cow::Owned(universal)
            }
            Err(code) => {
                log!(ResolverLog::TranslationUnavailable {
                    path: path.to_string(),
                    code
                });
                Cow::Borrowed(path)
            }
        }
    }

    fn security_descriptor(&self, path: &str) -> Result<ScopedBuffer<u8>, OwnerError> {
        // The descriptor keeps its allocated length; owner offsets point into it.
        let ([descriptor], _) =
            query_sized::<u8, 1, _>(GET_FILE_SECURITY, |[descriptor], [needed]| {
                self.api.file_security(path, descriptor, needed)
            })?;
        Ok(descriptor)
    }

    fn account_identity(
        &self,
        authority: Option<&str>,
        sid: SidRef<'_>,
    ) -> Result<AccountIdentity, OwnerError> {
        log!(ResolverLog::LookingUp {
            sid: sid.to_string(),
            authority: authority.unwrap_or("local machine").to_string()
        });

        let ([mut name, mut domain], [name_written, domain_written]) = query_sized::<u16, 2, _>(
            LOOKUP_ACCOUNT_SID,
            |[name, domain], [name_len, domain_len]| {
                self.api
                    .lookup_account_sid(authority, sid, name, name_len, domain, domain_len)
            },
        )?;
        name.truncate(name_written as usize);
        domain.truncate(domain_written as usize);

        AccountIdentity::from_wide(&domain, &name)
            .map_err(|_| OwnerError::Underlying(LOOKUP_ACCOUNT_SID, ERROR_INVALID_DATA))
    }
}
