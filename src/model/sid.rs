use std::fmt;

/// Borrowed view of a binary security identifier.
///
/// The bytes live inside the security descriptor buffer the SID was read from,
/// so a `SidRef` can never outlive that buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SidRef<'d> {
    bytes: &'d [u8],
}

impl<'d> SidRef<'d> {
    // Revision, sub-authority count and the 48-bit identifier authority.
    const HEADER_LENGTH: usize = 8;

    pub fn new(bytes: &'d [u8]) -> Self {
        Self { bytes }
    }

    pub fn as_bytes(&self) -> &'d [u8] {
        self.bytes
    }

    fn sub_authorities(&self) -> Option<impl Iterator<Item = u32> + 'd> {
        let count = *self.bytes.get(1)? as usize;
        let body = self
            .bytes
            .get(Self::HEADER_LENGTH..Self::HEADER_LENGTH + count * 4)?;
        Some(
            body.chunks_exact(4)
                .map(|chunk| u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]])),
        )
    }
}

/// Renders the `S-R-I-S-S...` string form, or `<malformed SID>` when the bytes
/// do not hold a complete SID.
impl fmt::Display for SidRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (Some(header), Some(sub_authorities)) = (
            self.bytes.get(..Self::HEADER_LENGTH),
            self.sub_authorities(),
        ) else {
            return f.write_str("<malformed SID>");
        };

        let authority = header[2..8]
            .iter()
            .fold(0u64, |acc, byte| (acc << 8) | u64::from(*byte));

        write!(f, "S-{}-{}", header[0], authority)?;
        for sub_authority in sub_authorities {
            write!(f, "-{sub_authority}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // S-1-5-32-544 (BUILTIN\Administrators)
    const ADMINISTRATORS: [u8; 16] = [1, 2, 0, 0, 0, 0, 0, 5, 32, 0, 0, 0, 0x20, 0x02, 0, 0];

    #[test]
    fn formats_well_known_sid() {
        assert_eq!(SidRef::new(&ADMINISTRATORS).to_string(), "S-1-5-32-544");
    }

    #[test]
    fn formats_domain_sid() {
        let bytes = [
            1, 5, 0, 0, 0, 0, 0, 5, 21, 0, 0, 0, 0x01, 0, 0, 0, 0x02, 0, 0, 0, 0x03, 0, 0, 0, 0xE9,
            0x03, 0, 0,
        ];
        assert_eq!(SidRef::new(&bytes).to_string(), "S-1-5-21-1-2-3-1001");
    }

    #[test]
    fn truncated_sid_is_reported_as_malformed() {
        assert_eq!(SidRef::new(&ADMINISTRATORS[..12]).to_string(), "<malformed SID>");
        assert_eq!(SidRef::new(&[]).to_string(), "<malformed SID>");
    }
}
