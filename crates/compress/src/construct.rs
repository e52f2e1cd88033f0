//! Recognising a format by name or by content.

use crate::Compression;
use crate::error::{Error, ErrorKind};
use std::str::FromStr;

impl FromStr for Compression {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" => Ok(Self::None),
            "gz" | "gzip" => Ok(Self::Gzip),
            #[cfg(feature = "xz")]
            "xz" | "lzma" => Ok(Self::Xz),
            #[cfg(not(feature = "xz"))]
            "xz" | "lzma" => exn::bail!(ErrorKind::DisabledFormat(s.to_string())),
            _ => exn::bail!(ErrorKind::UnsupportedFormat(s.to_string())),
        }
    }
}

impl Compression {
    /// Sniff the format from the leading bytes of a payload. Anything not
    /// recognised, including input too short to tell, is [`None`](Self::None).
    #[must_use]
    pub fn from_magic_bytes(bytes: &[u8]) -> Self {
        match bytes {
            [0x1F, 0x8B, ..] => Self::Gzip,
            #[cfg(feature = "xz")]
            [0xFD, b'7', b'z', b'X', b'Z', 0x00, ..] => Self::Xz,
            _ => Self::None,
        }
    }
}
