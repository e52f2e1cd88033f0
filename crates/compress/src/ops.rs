//! In-memory compression and decompression.

use crate::Compression;
use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use flate2::{Compression as GzCompression, read::GzDecoder, write::GzEncoder};
use std::io::{Read, Write};
use tracing::instrument;
#[cfg(feature = "xz")]
use xz2::{read::XzDecoder, write::XzEncoder};

// Same levels as dpkg-scanpackages output.
const GZIP_LEVEL: GzCompression = GzCompression::best();
#[cfg(feature = "xz")]
const XZ_LEVEL: u32 = 6;

impl Compression {
    /// Compress a byte slice in memory.
    ///
    /// Only used to build fixtures and to re-pack snapshots; mirrors do the
    /// compressing for everything that's downloaded.
    ///
    /// ```
    /// use dhf_compress::Compression;
    ///
    /// let data = b"Package: libghc-text-dev\n";
    /// let compressed = Compression::Gzip.compress(data).unwrap();
    /// assert_eq!(Compression::from_magic_bytes(&compressed), Compression::Gzip);
    /// ```
    #[instrument(skip(input), fields(format = %self, input_size = input.len(), output_size))]
    pub fn compress(&self, input: &[u8]) -> Result<Vec<u8>> {
        let output = match self {
            Compression::None => input.to_vec(),
            Compression::Gzip => {
                let mut encoder = GzEncoder::new(Vec::new(), GZIP_LEVEL);
                encoder.write_all(input).or_raise(|| ErrorKind::Io)?;
                encoder.finish().or_raise(|| ErrorKind::Io)?
            },
            #[cfg(feature = "xz")]
            Compression::Xz => {
                let mut encoder = XzEncoder::new(Vec::new(), XZ_LEVEL);
                encoder.write_all(input).or_raise(|| ErrorKind::Io)?;
                encoder.finish().or_raise(|| ErrorKind::Io)?
            },
        };
        tracing::Span::current().record("output_size", output.len());
        Ok(output)
    }

    /// Decompress a whole snapshot in memory.
    ///
    /// A truncated stream, or a body that was never compressed in this format
    /// to begin with, is [`ErrorKind::InvalidData`].
    ///
    /// ```rust
    /// use dhf_compress::Compression;
    ///
    /// let original = b"Package: libghc-text-dev\n";
    /// let compressed = Compression::Gzip.compress(original).unwrap();
    /// let decompressed = Compression::Gzip.decompress(&compressed).unwrap();
    /// assert_eq!(decompressed, original);
    /// ```
    #[instrument(skip(input), fields(format = %self, input_size = input.len(), output_size))]
    pub fn decompress(&self, input: &[u8]) -> Result<Vec<u8>> {
        let output = match self {
            Compression::None => input.to_vec(),
            Compression::Gzip => read_all(GzDecoder::new(input))?,
            #[cfg(feature = "xz")]
            Compression::Xz => read_all(XzDecoder::new(input))?,
        };
        tracing::Span::current().record("output_size", output.len());
        Ok(output)
    }
}

fn read_all(mut decoder: impl Read) -> Result<Vec<u8>> {
    let mut output = Vec::new();
    decoder.read_to_end(&mut output).or_raise(|| ErrorKind::InvalidData)?;
    Ok(output)
}
