//! In-memory backend for hermetic tests.
//!
//! Holds a flat path -> content map; directories exist implicitly as path
//! prefixes. `exists` and `stats` are stubbed (constant `true` / `0`): this
//! backend covers deterministic traversal and read-content testing, not size
//! or existence semantics.

use std::collections::BTreeSet;
use std::collections::HashMap;
use std::io;
use std::path::{Component, Path, PathBuf};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use super::classify::SourceClassifier;
use super::config::FileSystemConfig;
use super::error::FileError;
use super::ignore::IgnoreMatcher;
use super::reader::{normalize_extensions, qualifies, FileReader};

/// [`FileReader`] over an in-memory filesystem.
pub struct MemoryFileReader {
    config: FileSystemConfig,
    matcher: Arc<IgnoreMatcher>,
    classifier: Arc<dyn SourceClassifier>,
    files: RwLock<HashMap<PathBuf, String>>,
}

impl MemoryFileReader {
    pub fn new(
        config: FileSystemConfig,
        classifier: Arc<dyn SourceClassifier>,
    ) -> anyhow::Result<Self> {
        let matcher = Arc::new(IgnoreMatcher::new(&config.ignore_patterns, &config.cwd)?);
        Ok(Self {
            config,
            matcher,
            classifier,
            files: RwLock::new(HashMap::new()),
        })
    }

    /// Seed a file. Parent directories exist implicitly; an existing entry at
    /// the same path is replaced.
    pub fn add_file(&self, path: impl Into<PathBuf>, content: impl Into<String>) {
        self.files
            .write()
            .expect("lock poisoned")
            .insert(normalize(&path.into()), content.into());
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

    fn lookup(&self, path: &Path) -> Result<String, FileError> {
        let files = self.files.read().expect("lock poisoned");
        match files.get(&normalize(path)) {
            Some(content) => Ok(content.clone()),
            None => Err(FileError::Io(io::Error::new(
                io::ErrorKind::NotFound,
                format!("not found: {}", path.display()),
            ))),
        }
    }
}

/// Resolve `.` and `..` components so seeded and requested paths agree on a
/// single key form. Absolute paths stay absolute.
fn normalize(path: &Path) -> PathBuf {
    let mut result = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                result.pop();
            }
            other => result.push(other),
        }
    }
    result
}

#[async_trait]
impl FileReader for MemoryFileReader {
    async fn read(&self, path: &Path) -> Result<String, FileError> {
        self.check_ignored(path)?;
        self.lookup(path)
    }

    async fn exists(&self, _path: &Path) -> bool {
        true
    }

    fn read_sync(&self, path: &Path) -> Result<String, FileError> {
        self.lookup(path)
    }

    fn read_dir(
        &self,
        root: &Path,
        extensions: &[&str],
    ) -> Box<dyn Iterator<Item = PathBuf> + Send> {
        // Snapshot the tree, then walk it as the caller pulls. Sorting keeps
        // the descent deterministic across calls.
        let mut files: Vec<PathBuf> = self
            .files
            .read()
            .expect("lock poisoned")
            .keys()
            .cloned()
            .collect();
        files.sort();

        Box::new(MemoryWalk {
            files,
            classifier: Arc::clone(&self.classifier),
            matcher: Arc::clone(&self.matcher),
            extensions: normalize_extensions(extensions),
            pending_dirs: vec![normalize(root)],
            pending_files: Vec::new(),
        })
    }

    async fn stats(&self, _path: &Path) -> u64 {
        0
    }

    fn current_working_dir(&self) -> &Path {
        &self.config.cwd
    }
}

/// Manual recursive descent over the snapshot: directories are pushed onto a
/// work stack only when the classifier supports them, files are qualified and
/// ignore-checked as they are pulled.
struct MemoryWalk {
    files: Vec<PathBuf>,
    classifier: Arc<dyn SourceClassifier>,
    matcher: Arc<IgnoreMatcher>,
    extensions: Vec<String>,
    pending_dirs: Vec<PathBuf>,
    pending_files: Vec<PathBuf>,
}

impl MemoryWalk {
    /// Split the direct children of `dir` into subdirectories and files.
    fn children_of(&self, dir: &Path) -> (Vec<PathBuf>, Vec<PathBuf>) {
        let mut subdirs = BTreeSet::new();
        let mut files = Vec::new();

        for file in &self.files {
            let Ok(rest) = file.strip_prefix(dir) else {
                continue;
            };
            let mut components = rest.components();
            let Some(first) = components.next() else {
                continue;
            };
            if components.next().is_some() {
                subdirs.insert(dir.join(first));
            } else {
                files.push(file.clone());
            }
        }

        (subdirs.into_iter().collect(), files)
    }
}

impl Iterator for MemoryWalk {
    type Item = PathBuf;

    fn next(&mut self) -> Option<PathBuf> {
        loop {
            if let Some(file) = self.pending_files.pop() {
                if qualifies(self.classifier.as_ref(), &file, &self.extensions)
                    && !self.matcher.is_ignored(&file)
                {
                    return Some(file);
                }
                continue;
            }

            let dir = self.pending_dirs.pop()?;
            let (subdirs, files) = self.children_of(&dir);
            for subdir in subdirs {
                if self.classifier.is_dir_supported(&subdir) {
                    self.pending_dirs.push(subdir);
                }
            }
            self.pending_files = files;
        }
    }
}
