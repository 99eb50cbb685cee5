use std::fmt;
use std::string::FromUtf16Error;

/// Domain (or machine) and account name a SID resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountIdentity {
    pub domain: String,
    pub account: String,
}

impl AccountIdentity {
    /// Builds an identity from the wide buffers filled by `LookupAccountSidW`.
    /// Anything from the first NUL on is ignored. Names that are not valid
    /// UTF-16 are rejected rather than repaired.
    pub fn from_wide(domain: &[u16], account: &[u16]) -> Result<Self, FromUtf16Error> {
        Ok(Self {
            domain: String::from_utf16(until_nul(domain))?,
            account: String::from_utf16(until_nul(account))?,
        })
    }

    /// Owner string in `DOMAIN\account` form.
    pub fn qualified_name(&self) -> String {
        self.to_string()
    }
}

fn until_nul(wide: &[u16]) -> &[u16] {
    let end = wide.iter().position(|&unit| unit == 0).unwrap_or(wide.len());
    &wide[..end]
}

impl fmt::Display for AccountIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\\{}", self.domain, self.account)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wide(s: &str) -> Vec<u16> {
        s.encode_utf16().collect()
    }

    #[test]
    fn joins_domain_and_account_with_backslash() {
        let identity =
            AccountIdentity::from_wide(&wide("BUILTIN"), &wide("Administrators")).unwrap();
        assert_eq!(identity.qualified_name(), "BUILTIN\\Administrators");
    }

    #[test]
    fn stops_at_terminator() {
        let mut domain = wide("CORP");
        domain.extend([0, 'X' as u16]);
        let identity = AccountIdentity::from_wide(&domain, &wide("alice")).unwrap();
        assert_eq!(identity.domain, "CORP");
    }

    #[test]
    fn unpaired_surrogate_is_rejected() {
        let mut account = wide("bob");
        account.push(0xD800);
        assert!(AccountIdentity::from_wide(&wide("CORP"), &account).is_err());
    }
}
