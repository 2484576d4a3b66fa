use std::path::{Path, PathBuf};

use async_trait::async_trait;

use super::classify::SourceClassifier;
use super::error::FileError;

/// The capability surface the analysis engine reads project files through.
///
/// Two backends conform: [`LocalFileReader`](super::local::LocalFileReader)
/// against the OS filesystem and
/// [`MemoryFileReader`](super::memory::MemoryFileReader) for hermetic tests.
/// Callers depend on this trait, never on a concrete backend.
#[async_trait]
pub trait FileReader: Send + Sync {
    /// Read the decoded text content of `path`, serving from the backend's
    /// content cache while the file is unchanged on disk.
    ///
    /// Fails with [`FileError::Ignored`] before any cache or filesystem
    /// access when the path matches a configured ignore pattern. Concurrent
    /// reads of the same uncached path are not deduplicated: each performs
    /// its own I/O and the last writer wins the cache entry.
    async fn read(&self, path: &Path) -> Result<String, FileError>;

    /// Whether `path` is readable. Never fails: missing and inaccessible
    /// paths are indistinguishable, both answer `false`.
    async fn exists(&self, path: &Path) -> bool;

    /// Blocking, uncached read of decoded text content with no ignore check.
    /// A lower-level escape hatch for callers that cannot suspend.
    fn read_sync(&self, path: &Path) -> Result<String, FileError>;

    /// Lazily enumerate qualifying files under `root`.
    ///
    /// A file qualifies when its containing directory and the file itself are
    /// supported by the classifier and its extension is in `extensions`, or
    /// when the classifier recognizes it as a manifest; qualifying paths that
    /// match an ignore pattern are dropped. Extensions may be written with or
    /// without the leading dot. Yield order follows the underlying lister and
    /// should be treated as unordered. Each call re-walks from scratch;
    /// dropping the iterator abandons the remaining entries with no cleanup
    /// required.
    fn read_dir(
        &self,
        root: &Path,
        extensions: &[&str],
    ) -> Box<dyn Iterator<Item = PathBuf> + Send>;

    /// Total byte size of `path`, or 0 when it cannot be determined. Callers
    /// must treat 0 as "unknown or empty", not as a reliable zero.
    async fn stats(&self, path: &Path) -> u64;

    /// The configured root directory. May legitimately differ from the
    /// process working directory.
    fn current_working_dir(&self) -> &Path;
}

/// The traversal qualification test shared by both backends: manifests pass
/// unconditionally, everything else needs a supported containing directory, a
/// supported file, and a matching extension.
pub(crate) fn qualifies(
    classifier: &dyn SourceClassifier,
    path: &Path,
    extensions: &[String],
) -> bool {
    if classifier.is_manifest(path) {
        return true;
    }
    let dir_supported = path
        .parent()
        .map_or(true, |dir| classifier.is_dir_supported(dir));
    dir_supported
        && classifier.is_file_supported(path)
        && has_matching_extension(path, extensions)
}

/// Extensions are compared without their leading dot, so callers may supply
/// `".ts"` or `"ts"` interchangeably.
pub(crate) fn normalize_extensions(extensions: &[&str]) -> Vec<String> {
    extensions
        .iter()
        .map(|ext| ext.trim_start_matches('.').to_string())
        .collect()
}

fn has_matching_extension(path: &Path, extensions: &[String]) -> bool {
    let Some(ext) = path.extension().and_then(|ext| ext.to_str()) else {
        return false;
    };
    extensions.iter().any(|candidate| candidate == ext)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixture;

    impl SourceClassifier for Fixture {
        fn is_dir_supported(&self, dir: &Path) -> bool {
            !dir.components().any(|c| c.as_os_str() == "node_modules")
        }

        fn is_file_supported(&self, file: &Path) -> bool {
            file.extension().is_some()
        }

        fn is_manifest(&self, file: &Path) -> bool {
            file.file_name().is_some_and(|name| name == "package.json")
        }
    }

    #[test]
    fn test_supported_file_with_matching_extension_qualifies() {
        let extensions = normalize_extensions(&[".ts"]);
        assert!(qualifies(&Fixture, Path::new("/p/src/a.ts"), &extensions));
    }

    #[test]
    fn test_wrong_extension_does_not_qualify() {
        let extensions = normalize_extensions(&[".ts"]);
        assert!(!qualifies(&Fixture, Path::new("/p/src/a.js"), &extensions));
    }

    #[test]
    fn test_unsupported_directory_does_not_qualify() {
        let extensions = normalize_extensions(&[".ts"]);
        assert!(!qualifies(
            &Fixture,
            Path::new("/p/node_modules/b.ts"),
            &extensions
        ));
    }

    #[test]
    fn test_manifest_bypasses_extension_filter() {
        let extensions = normalize_extensions(&[".ts"]);
        assert!(qualifies(
            &Fixture,
            Path::new("/p/package.json"),
            &extensions
        ));
    }

    #[test]
    fn test_extensions_accept_both_dot_forms() {
        for ext in [".ts", "ts"] {
            let extensions = normalize_extensions(&[ext]);
            assert!(qualifies(&Fixture, Path::new("/p/src/a.ts"), &extensions));
        }
    }
}
