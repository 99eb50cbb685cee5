use crate::model::sid::SidRef;
use crate::model::win32::Win32Code;

/// The operating-system calls owner resolution is built from.
///
/// Sized calls follow the Win32 convention: when a buffer is too small they
/// fail with `ERROR_INSUFFICIENT_BUFFER` and write the required length
/// (bytes for descriptors, UTF-16 units including the terminator for names)
/// into the matching out-parameter. An empty slice is a pure size probe.
pub trait SecurityApiTrait {
    fn path_exists(&self, path: &str) -> bool;

    /// Universal (UNC) form of a path on a redirected drive.
    fn universal_name(&self, path: &str) -> Result<String, Win32Code>;

    /// Self-relative security descriptor holding only the owner.
    fn file_security(
        &self,
        path: &str,
        descriptor: &mut [u8],
        needed: &mut u32,
    ) -> Result<(), Win32Code>;

    /// Owner SID of a descriptor previously filled by [`Self::file_security`].
    fn descriptor_owner<'d>(&self, descriptor: &'d [u8]) -> Result<SidRef<'d>, Win32Code>;

    /// Resolves `sid` on `authority`, or on the local machine when `None`.
    ///
    /// On success `name_len` and `domain_len` hold the lengths written,
    /// without the terminator.
    fn lookup_account_sid(
        &self,
        authority: Option<&str>,
        sid: SidRef<'_>,
        name: &mut [u16],
        name_len: &mut u32,
        domain: &mut [u16],
        domain_len: &mut u32,
    ) -> Result<(), Win32Code>;
}
