use std::path::PathBuf;

use serde::{Deserialize, Serialize};

fn default_cwd() -> PathBuf {
    PathBuf::from(".")
}

/// Settings for a file provider backend. Supplied once at construction and
/// immutable afterwards; each backend owns its copy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileSystemConfig {
    /// Root directory that traversal and root-relative ignore patterns
    /// resolve against. This may legitimately differ from the process working
    /// directory (e.g. analyzing a project the tool was not launched from).
    #[serde(default = "default_cwd")]
    pub cwd: PathBuf,

    /// Glob patterns excluding paths from `read` and `read_dir`. Each pattern
    /// is matched both as written and joined under `cwd`, so root-relative
    /// and raw authoring styles both work.
    #[serde(default)]
    pub ignore_patterns: Vec<String>,
}

impl FileSystemConfig {
    pub fn new(cwd: impl Into<PathBuf>) -> Self {
        Self {
            cwd: cwd.into(),
            ignore_patterns: Vec::new(),
        }
    }

    pub fn with_ignore_patterns(
        cwd: impl Into<PathBuf>,
        ignore_patterns: Vec<String>,
    ) -> Self {
        Self {
            cwd: cwd.into(),
            ignore_patterns,
        }
    }
}

impl Default for FileSystemConfig {
    fn default() -> Self {
        Self {
            cwd: default_cwd(),
            ignore_patterns: Vec::new(),
        }
    }
}
