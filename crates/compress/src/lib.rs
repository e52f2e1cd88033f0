//! Compressed forms of a Debian `Packages` index.
//!
//! Mirrors publish every index as `Packages.gz`, and usually `Packages.xz`
//! too. [`Compression`] names the format a snapshot is stored in, recognises
//! it from a name or the payload itself, and decodes it whole in memory. XZ support is behind the `xz` feature.

mod construct;
pub mod error;
mod ops;
#[cfg(feature = "serde")]
mod serde;
mod util;

/// Format of a downloaded snapshot. Gzip unless configured otherwise.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Compression {
    None,
    #[default]
    Gzip,
    #[cfg(feature = "xz")]
    Xz,
}
