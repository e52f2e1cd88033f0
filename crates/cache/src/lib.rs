//! On-disk cache of Debian package index snapshots.
//!
//! Every `(mirror, dist, arch)` triple ([`CacheKey`]) maps to two files in a
//! single cache directory:
//!
//! - `<key>.Packages.gz`: the snapshot exactly as the mirror served it, and
//! - `<key>.Packages`: its decompressed counterpart, which is what gets parsed.
//!
//! In [`Mode::Reuse`] an existing snapshot is returned without touching the
//! network; in [`Mode::Force`] the mirror is always asked again and both files
//! are overwritten. Writes are plain whole-file overwrites: a crash halfway
//! through can leave a corrupt snapshot behind, which `--update` or
//! [`clean`] recovers from.

pub mod error;
mod fetch;
mod key;

use crate::error::{ErrorKind, Result};
pub use crate::fetch::{Fetcher, HttpFetcher};
pub use crate::key::{CacheKey, DEFAULT_MIRROR_SENTINEL};
use dhf_compress::Compression;
use dhf_config::Mirrors;
use exn::ResultExt;
use std::fs;
use std::io::ErrorKind as IoErrorKind;
use std::path::{Path, PathBuf};
use tracing::instrument;

/// Whether an existing snapshot may satisfy a lookup.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    /// Use whatever is already cached; only download on a miss.
    #[default]
    Reuse,
    /// Always download, overwriting anything already cached.
    Force,
}
impl From<bool> for Mode {
    /// Maps the `--update` flag.
    fn from(update: bool) -> Self {
        if update { Mode::Force } else { Mode::Reuse }
    }
}

/// Both on-disk forms of one cached snapshot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CachePaths {
    pub compressed: PathBuf,
    pub decompressed: PathBuf,
}

pub struct Cache<F = HttpFetcher> {
    root: PathBuf,
    mirrors: Mirrors,
    mode: Mode,
    compression: Compression,
    fetcher: F,
}
impl Cache<HttpFetcher> {
    /// Create a cache rooted at `root`, fetching over HTTP.
    ///
    /// The directory (and its parents) is created if missing.
    pub fn new(root: impl Into<PathBuf>, mirrors: Mirrors, mode: Mode) -> Result<Self> {
        Self::with_fetcher(root, mirrors, mode, HttpFetcher::new()?)
    }
}
impl<F: Fetcher> Cache<F> {
    pub fn with_fetcher(root: impl Into<PathBuf>, mirrors: Mirrors, mode: Mode, fetcher: F) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root).or_raise(|| ErrorKind::Io(root.clone()))?;
        Ok(Self { root, mirrors, mode, compression: Compression::default(), fetcher })
    }

    /// Download (and store) a differently-compressed variant of the index.
    pub fn with_compression(mut self, compression: Compression) -> Self {
        self.compression = compression;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    pub fn paths(&self, key: &CacheKey) -> CachePaths {
        CachePaths {
            compressed: self.root.join(key.compressed_name(self.compression)),
            decompressed: self.root.join(key.decompressed_name()),
        }
    }

    /// Return the path of the decompressed index for `key`, downloading it
    /// first if the cache can't satisfy the request.
    ///
    /// The mirror is resolved before anything else, so an unknown mirror
    /// fails without any I/O.
    #[instrument(skip_all, fields(key = %key, mode = ?self.mode))]
    pub fn get(&self, key: &CacheKey) -> Result<PathBuf> {
        let base = self.mirrors.resolve(key.mirror()).or_raise(|| ErrorKind::Mirror)?;
        let paths = self.paths(key);
        if self.mode == Mode::Reuse {
            if !paths.decompressed.exists() && paths.compressed.exists() {
                tracing::debug!(path = %paths.compressed.display(), "Decompressing cached snapshot");
                let compressed = read(&paths.compressed)?;
                self.persist_decompressed(&compressed, &paths)?;
            }
            if paths.decompressed.exists() {
                tracing::debug!(path = %paths.decompressed.display(), "Cache hit");
                return Ok(paths.decompressed);
            }
            tracing::debug!("Cache miss");
        }

        let url = key.url(base, self.compression);
        tracing::info!(%url, "Downloading package index");
        let compressed = self.fetcher.fetch(&url)?;
        if !self.compression.check_magic_bytes(&compressed) {
            tracing::warn!(%url, format = %self.compression, "Downloaded index does not look like the expected format");
        }
        write(&paths.compressed, &compressed)?;
        self.persist_decompressed(&compressed, &paths)?;
        Ok(paths.decompressed)
    }

    fn persist_decompressed(&self, compressed: &[u8], paths: &CachePaths) -> Result<()> {
        let decompressed = self
            .compression
            .decompress(compressed)
            .or_raise(|| ErrorKind::Decompress(paths.compressed.clone()))?;
        write(&paths.decompressed, &decompressed)
    }
}

/// Remove the whole cache directory, every snapshot of every key.
///
/// # Errors
///
/// [`ErrorKind::NotFound`] if the directory doesn't exist; there's nothing
/// to clean, but the caller asked for something specific that isn't there.
#[instrument(skip(root), fields(root = %root.as_ref().display()))]
pub fn clean(root: impl AsRef<Path>) -> Result<()> {
    let root = root.as_ref();
    match fs::remove_dir_all(root) {
        Err(err) if err.kind() == IoErrorKind::NotFound => {
            Err(err).or_raise(|| ErrorKind::NotFound(root.to_path_buf()))
        },
        result => result.or_raise(|| ErrorKind::Io(root.to_path_buf())),
    }
}

fn read(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).or_raise(|| ErrorKind::Io(path.to_path_buf()))
}

fn write(path: &Path, data: &[u8]) -> Result<()> {
    tracing::trace!(path = %path.display(), size = data.len(), "Writing cache file");
    fs::write(path, data).or_raise(|| ErrorKind::Io(path.to_path_buf()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};
    use tempfile::TempDir;

    const INDEX: &[u8] = b"Package: libghc-text-dev\nVersion: 2.0.2-1\nProvides: libghc-text-dev-2.0.2-ab12c\n\n";

    /// Serves a fixed body and remembers every URL asked for.
    struct RecordingFetcher {
        body: Vec<u8>,
        calls: Cell<usize>,
        urls: RefCell<Vec<String>>,
    }
    impl RecordingFetcher {
        fn serving(raw: &[u8]) -> Self {
            Self { body: Compression::Gzip.compress(raw).unwrap(), calls: Cell::new(0), urls: RefCell::new(vec![]) }
        }
    }
    impl Fetcher for RecordingFetcher {
        fn fetch(&self, url: &str) -> Result<Vec<u8>> {
            self.calls.set(self.calls.get() + 1);
            self.urls.borrow_mut().push(url.to_string());
            Ok(self.body.clone())
        }
    }

    struct FailingFetcher;
    impl Fetcher for FailingFetcher {
        fn fetch(&self, url: &str) -> Result<Vec<u8>> {
            exn::bail!(ErrorKind::HttpStatus { url: url.to_string(), status: 404 })
        }
    }

    fn cache(dir: &TempDir, mode: Mode) -> Cache<RecordingFetcher> {
        Cache::with_fetcher(dir.path(), Mirrors::default(), mode, RecordingFetcher::serving(INDEX)).unwrap()
    }

    fn stable() -> CacheKey {
        CacheKey::new(None::<&str>, "stable", "amd64")
    }

    #[test]
    fn test_creates_nested_root() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("a").join("b");
        let cache = Cache::with_fetcher(&root, Mirrors::default(), Mode::Reuse, FailingFetcher).unwrap();
        assert!(root.is_dir());
        // Idempotent.
        Cache::with_fetcher(cache.root(), Mirrors::default(), Mode::Reuse, FailingFetcher).unwrap();
    }

    #[test]
    fn test_miss_downloads_and_stores_both_forms() {
        let dir = TempDir::new().unwrap();
        let cache = cache(&dir, Mode::Reuse);
        let path = cache.get(&stable()).unwrap();

        assert_eq!(path, dir.path().join("default-stable-amd64.Packages"));
        assert_eq!(fs::read(&path).unwrap(), INDEX);
        let compressed = fs::read(dir.path().join("default-stable-amd64.Packages.gz")).unwrap();
        assert_eq!(compressed, cache.fetcher().body);
        assert_eq!(
            cache.fetcher().urls.borrow().as_slice(),
            ["http://deb.debian.org/debian/dists/stable/main/binary-amd64/Packages.gz"]
        );
    }

    #[test]
    fn test_reuse_fetches_at_most_once() {
        let dir = TempDir::new().unwrap();
        let cache = cache(&dir, Mode::Reuse);
        let first = cache.get(&stable()).unwrap();
        let second = cache.get(&stable()).unwrap();
        assert_eq!(first, second);
        assert_eq!(cache.fetcher().calls.get(), 1);
    }

    #[test]
    fn test_reuse_decompresses_orphaned_snapshot() {
        let dir = TempDir::new().unwrap();
        let cache = cache(&dir, Mode::Reuse);
        let paths = cache.paths(&stable());
        fs::write(&paths.compressed, Compression::Gzip.compress(b"Package: cached\n").unwrap()).unwrap();

        let path = cache.get(&stable()).unwrap();
        assert_eq!(fs::read(path).unwrap(), b"Package: cached\n");
        assert_eq!(cache.fetcher().calls.get(), 0);
    }

    #[test]
    fn test_force_always_fetches_and_overwrites() {
        let dir = TempDir::new().unwrap();
        let cache = cache(&dir, Mode::Force);
        let paths = cache.paths(&stable());
        fs::write(&paths.compressed, b"stale").unwrap();
        fs::write(&paths.decompressed, b"stale").unwrap();

        cache.get(&stable()).unwrap();
        assert_eq!(fs::read(&paths.compressed).unwrap(), cache.fetcher().body);
        assert_eq!(fs::read(&paths.decompressed).unwrap(), INDEX);

        cache.get(&stable()).unwrap();
        assert_eq!(cache.fetcher().calls.get(), 2);
    }

    #[test]
    fn test_keys_do_not_collide() {
        let dir = TempDir::new().unwrap();
        let cache = cache(&dir, Mode::Reuse);
        cache.get(&stable()).unwrap();
        cache.get(&CacheKey::new(Some("ustc"), "stable", "amd64")).unwrap();
        cache.get(&CacheKey::new(None::<&str>, "stable", "arm64")).unwrap();
        assert_eq!(cache.fetcher().calls.get(), 3);
        assert_eq!(
            cache.fetcher().urls.borrow()[1],
            "http://mirrors.ustc.edu.cn/debian/dists/stable/main/binary-amd64/Packages.gz"
        );
    }

    #[test]
    fn test_unknown_mirror_fails_before_fetch() {
        let dir = TempDir::new().unwrap();
        let cache = cache(&dir, Mode::Force);
        let err = cache.get(&CacheKey::new(Some("nowhere"), "stable", "amd64")).unwrap_err();
        assert_eq!(*err, ErrorKind::Mirror);
        assert_eq!(cache.fetcher().calls.get(), 0);
    }

    #[test]
    fn test_fetch_failure_propagates() {
        let dir = TempDir::new().unwrap();
        let cache = Cache::with_fetcher(dir.path(), Mirrors::default(), Mode::Reuse, FailingFetcher).unwrap();
        let err = cache.get(&stable()).unwrap_err();
        assert!(matches!(&*err, ErrorKind::HttpStatus { status: 404, .. }));
        assert!(!cache.paths(&stable()).compressed.exists());
    }

    #[test]
    fn test_corrupt_download_keeps_raw_bytes() {
        struct HtmlFetcher;
        impl Fetcher for HtmlFetcher {
            fn fetch(&self, _url: &str) -> Result<Vec<u8>> {
                Ok(b"<html>captive portal</html>".to_vec())
            }
        }
        let dir = TempDir::new().unwrap();
        let cache = Cache::with_fetcher(dir.path(), Mirrors::default(), Mode::Reuse, HtmlFetcher).unwrap();
        let err = cache.get(&stable()).unwrap_err();
        assert!(matches!(&*err, ErrorKind::Decompress(_)));
        assert_eq!(fs::read(cache.paths(&stable()).compressed).unwrap(), b"<html>captive portal</html>");
    }

    #[test]
    fn test_clean_removes_everything() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("dhf");
        let cache = Cache::with_fetcher(&root, Mirrors::default(), Mode::Reuse, RecordingFetcher::serving(INDEX))
            .unwrap();
        cache.get(&stable()).unwrap();
        clean(&root).unwrap();
        assert!(!root.exists());
    }

    #[test]
    fn test_clean_missing_directory_fails() {
        let dir = TempDir::new().unwrap();
        let err = clean(dir.path().join("never-created")).unwrap_err();
        assert!(matches!(&*err, ErrorKind::NotFound(_)));
    }

    #[test]
    fn test_mode_from_update_flag() {
        assert_eq!(Mode::from(true), Mode::Force);
        assert_eq!(Mode::from(false), Mode::Reuse);
    }
}
