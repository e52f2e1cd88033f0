use crate::Compression;
use std::fmt::{Display, Formatter, Result as FmtResult};

impl Display for Compression {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

impl Compression {
    /// Suffix appended to `Packages`, dot included; empty when uncompressed.
    #[must_use]
    pub fn extension(&self) -> &'static str {
        match self {
            Self::None => "",
            Self::Gzip => ".gz",
            #[cfg(feature = "xz")]
            Self::Xz => ".xz",
        }
    }

    /// Canonical name, as accepted by `FromStr` and written to config files.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Gzip => "gzip",
            #[cfg(feature = "xz")]
            Self::Xz => "xz",
        }
    }

    /// Whether `bytes` look like this format. Mirrors occasionally answer
    /// `200` with an HTML error page.
    #[must_use]
    pub fn check_magic_bytes(&self, bytes: &[u8]) -> bool {
        Self::from_magic_bytes(bytes) == *self
    }
}

#[cfg(test)]
mod tests {
    use crate::Compression;
    use rstest::rstest;

    #[test]
    fn test_snapshot_names() {
        assert_eq!(format!("Packages{}", Compression::default().extension()), "Packages.gz");
        assert_eq!(format!("Packages{}", Compression::None.extension()), "Packages");
    }

    #[rstest]
    #[case(Compression::Gzip, &[0x1F, 0x8B, 0x08], true)]
    #[case(Compression::Gzip, b"<!DOCTYPE html>", false)]
    #[case(Compression::None, b"Package: ghc", true)]
    #[case(Compression::None, &[0x1F, 0x8B, 0x08], false)]
    fn test_check_magic_bytes(#[case] format: Compression, #[case] bytes: &[u8], #[case] expected: bool) {
        assert_eq!(format.check_magic_bytes(bytes), expected);
    }

    #[rstest]
    #[case(Compression::None)]
    #[case(Compression::Gzip)]
    #[cfg_attr(feature = "xz", case(Compression::Xz))]
    fn test_name_parses_back(#[case] format: Compression) {
        assert_eq!(format.to_string().parse::<Compression>().unwrap(), format);
    }
}
