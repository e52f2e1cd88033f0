use dhf_compress::Compression;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Filename component used in place of a mirror identifier when the primary
/// mirror is selected.
pub const DEFAULT_MIRROR_SENTINEL: &str = "default";

/// Identifies one cached index snapshot: the `(mirror, dist, arch)` triple.
///
/// Displays as the deterministic filename stem shared by both cached forms,
/// e.g. `default-stable-amd64.Packages` or `ustc-sid-arm64.Packages`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    mirror: Option<String>,
    dist: String,
    arch: String,
}
impl CacheKey {
    pub fn new(mirror: Option<impl Into<String>>, dist: impl Into<String>, arch: impl Into<String>) -> Self {
        Self { mirror: mirror.map(Into::into), dist: dist.into(), arch: arch.into() }
    }

    pub fn mirror(&self) -> Option<&str> {
        self.mirror.as_deref()
    }

    pub fn dist(&self) -> &str {
        &self.dist
    }

    pub fn arch(&self) -> &str {
        &self.arch
    }

    /// Filename of the decompressed snapshot.
    pub fn decompressed_name(&self) -> String {
        self.to_string()
    }

    /// Filename of the snapshot exactly as downloaded.
    pub fn compressed_name(&self, compression: Compression) -> String {
        format!("{self}{}", compression.extension())
    }

    /// Where the mirror publishes this index.
    ///
    /// ```
    /// use dhf_cache::CacheKey;
    /// use dhf_compress::Compression;
    ///
    /// let key = CacheKey::new(None::<String>, "stable", "amd64");
    /// assert_eq!(
    ///     key.url("http://deb.debian.org/debian/", Compression::Gzip),
    ///     "http://deb.debian.org/debian/dists/stable/main/binary-amd64/Packages.gz",
    /// );
    /// ```
    pub fn url(&self, base: &str, compression: Compression) -> String {
        format!(
            "{}/dists/{}/main/binary-{}/Packages{}",
            base.trim_end_matches('/'),
            self.dist,
            self.arch,
            compression.extension()
        )
    }
}
impl Display for CacheKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let mirror = self.mirror.as_deref().unwrap_or(DEFAULT_MIRROR_SENTINEL);
        write!(f, "{mirror}-{}-{}.Packages", self.dist, self.arch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(None, "stable", "amd64", "default-stable-amd64.Packages")]
    #[case(Some("ustc"), "sid", "arm64", "ustc-sid-arm64.Packages")]
    #[case(Some("tuna"), "bookworm-backports", "i386", "tuna-bookworm-backports-i386.Packages")]
    fn test_names(#[case] mirror: Option<&str>, #[case] dist: &str, #[case] arch: &str, #[case] expected: &str) {
        let key = CacheKey::new(mirror, dist, arch);
        assert_eq!(key.decompressed_name(), expected);
        assert_eq!(key.compressed_name(Compression::Gzip), format!("{expected}.gz"));
    }

    #[rstest]
    #[case("http://deb.debian.org/debian/")]
    #[case("http://deb.debian.org/debian")]
    #[case("http://deb.debian.org/debian//")]
    fn test_url_joins_single_slash(#[case] base: &str) {
        let key = CacheKey::new(Some("any"), "testing", "riscv64");
        assert_eq!(
            key.url(base, Compression::Gzip),
            "http://deb.debian.org/debian/dists/testing/main/binary-riscv64/Packages.gz"
        );
    }

    #[test]
    fn test_url_uncompressed() {
        let key = CacheKey::new(None::<&str>, "stable", "amd64");
        assert_eq!(
            key.url("http://localhost/", Compression::None),
            "http://localhost/dists/stable/main/binary-amd64/Packages"
        );
    }
}
