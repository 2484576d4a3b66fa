//! Real-filesystem backend.
//!
//! Content reads flow through the per-backend [`ContentCache`] keyed on
//! modification time; traversal delegates candidate discovery to the
//! `ignore` crate's gitignore-aware walker and filters lazily as the caller
//! pulls paths from the iterator.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use async_trait::async_trait;
use ignore::WalkBuilder;
use tracing::{debug, warn};

use super::cache::{CacheEntry, ContentCache};
use super::classify::SourceClassifier;
use super::config::FileSystemConfig;
use super::error::FileError;
use super::ignore::IgnoreMatcher;
use super::reader::{normalize_extensions, qualifies, FileReader};

/// [`FileReader`] backed by the OS filesystem.
pub struct LocalFileReader {
    config: FileSystemConfig,
    matcher: Arc<IgnoreMatcher>,
    classifier: Arc<dyn SourceClassifier>,
    cache: ContentCache,
}

impl LocalFileReader {
    pub fn new(
        config: FileSystemConfig,
        classifier: Arc<dyn SourceClassifier>,
    ) -> anyhow::Result<Self> {
        let matcher = Arc::new(IgnoreMatcher::new(&config.ignore_patterns, &config.cwd)?);
        Ok(Self {
            config,
            matcher,
            classifier,
            cache: ContentCache::new(),
        })
    }

    fn check_ignored(&self, path: &Path) -> Result<(), FileError> {
        if self.matcher.is_ignored(path) {
            return Err(FileError::Ignored {
                path: path.to_path_buf(),
                patterns: self.matcher.patterns().to_vec(),
            });
        }
        Ok(())
    }

    async fn modified_at(path: &Path) -> std::io::Result<SystemTime> {
        tokio::fs::metadata(path).await?.modified()
    }

    /// Gather every file the gitignore-aware lister yields under `root`.
    /// Unreadable entries are skipped, not fatal: a project scan prefers
    /// partial results over aborting on one bad directory.
    fn collect_candidates(&self, root: &Path) -> Vec<PathBuf> {
        let mut files = Vec::new();

        let walk = WalkBuilder::new(root)
            .hidden(false)
            .require_git(false)
            .filter_entry(|entry| entry.file_name().to_string_lossy() != ".git")
            .build();

        for result in walk {
            let entry = match result {
                Ok(entry) => entry,
                Err(e) => {
                    warn!(?e, "skipping unreadable entry during traversal");
                    continue;
                }
            };
            if entry.file_type().map_or(false, |ft| ft.is_file()) {
                files.push(entry.into_path());
            }
        }

        files
    }
}

#[async_trait]
impl FileReader for LocalFileReader {
    async fn read(&self, path: &Path) -> Result<String, FileError> {
        self.check_ignored(path)?;

        if let Some(entry) = self.cache.get(path) {
            match Self::modified_at(path).await {
                Ok(modified) if modified == entry.modified => return Ok(entry.content),
                Ok(_) => self.cache.evict(path),
                Err(e) => {
                    // Transient stat failure: favor possibly-stale content
                    // over failing the caller's request.
                    warn!(
                        ?e,
                        path = %path.display(),
                        "stat failed during cache validation, serving cached content"
                    );
                    return Ok(entry.content);
                }
            }
        }

        let content = tokio::fs::read_to_string(path).await?;
        let modified = match Self::modified_at(path).await {
            Ok(modified) => modified,
            Err(e) => {
                warn!(
                    ?e,
                    path = %path.display(),
                    "stat failed after read, storing stale sentinel"
                );
                CacheEntry::STALE_SENTINEL
            }
        };
        self.cache
            .insert(path.to_path_buf(), modified, content.clone());
        Ok(content)
    }

    async fn exists(&self, path: &Path) -> bool {
        match tokio::fs::metadata(path).await {
            Ok(_) => true,
            Err(e) => {
                debug!(?e, path = %path.display(), "existence probe failed");
                false
            }
        }
    }

    fn read_sync(&self, path: &Path) -> Result<String, FileError> {
        Ok(std::fs::read_to_string(path)?)
    }

    fn read_dir(
        &self,
        root: &Path,
        extensions: &[&str],
    ) -> Box<dyn Iterator<Item = PathBuf> + Send> {
        // The candidate list is fetched eagerly; qualification and ignore
        // filtering happen lazily per pulled item.
        let candidates = self.collect_candidates(root);
        let extensions = normalize_extensions(extensions);
        let classifier = Arc::clone(&self.classifier);
        let matcher = Arc::clone(&self.matcher);

        Box::new(candidates.into_iter().filter(move |path| {
            qualifies(classifier.as_ref(), path, &extensions) && !matcher.is_ignored(path)
        }))
    }

    async fn stats(&self, path: &Path) -> u64 {
        match tokio::fs::metadata(path).await {
            Ok(meta) => meta.len(),
            Err(e) => {
                debug!(?e, path = %path.display(), "size probe failed");
                0
            }
        }
    }

    fn current_working_dir(&self) -> &Path {
        &self.config.cwd
    }
}
