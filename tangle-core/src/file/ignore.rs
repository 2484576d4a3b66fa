use std::path::Path;

use anyhow::Context;
use globset::{Glob, GlobSet, GlobSetBuilder};

use super::path::{normalize_separators, to_slash};

/// Decides whether a path is excluded by the configured ignore globs.
///
/// Every pattern is compiled in two forms: joined under the project root (for
/// patterns authored relative to it) and exactly as written (for raw globs).
/// Each form also gets a `/**` companion so a bare directory pattern like
/// `dist` excludes the whole subtree beneath it. A path is ignored when any
/// compiled form matches; dotfiles are eligible to match like any other name.
#[derive(Debug, Clone)]
pub struct IgnoreMatcher {
    set: GlobSet,
    patterns: Vec<String>,
}

impl IgnoreMatcher {
    pub fn new(patterns: &[String], cwd: &Path) -> anyhow::Result<Self> {
        let mut builder = GlobSetBuilder::new();
        let root = to_slash(cwd);
        let root = root.trim_end_matches('/');

        for pattern in patterns {
            let raw = normalize_separators(pattern);
            let joined = format!("{root}/{raw}");
            for form in [&raw, &joined] {
                for glob in [form.clone(), format!("{form}/**")] {
                    builder.add(
                        Glob::new(&glob)
                            .with_context(|| format!("invalid ignore pattern: {pattern}"))?,
                    );
                }
            }
        }

        Ok(Self {
            set: builder.build()?,
            patterns: patterns.to_vec(),
        })
    }

    /// True when the path matches any configured pattern in either form.
    /// An empty pattern list short-circuits before any path normalization.
    pub fn is_ignored(&self, path: &Path) -> bool {
        if self.patterns.is_empty() {
            return false;
        }
        self.set.is_match(to_slash(path))
    }

    /// The configured patterns as written, for error diagnostics.
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn matcher(patterns: &[&str], cwd: &str) -> IgnoreMatcher {
        let patterns: Vec<String> = patterns.iter().map(|p| p.to_string()).collect();
        IgnoreMatcher::new(&patterns, Path::new(cwd)).unwrap()
    }

    #[test]
    fn test_empty_patterns_never_ignore() {
        let matcher = matcher(&[], "/project");
        assert!(!matcher.is_ignored(Path::new("/project/src/a.ts")));
        assert!(!matcher.is_ignored(Path::new("anything")));
    }

    #[rstest]
    #[case("/project/dist/index.js")]
    #[case("dist/index.js")]
    #[case("/project/dist")]
    fn test_bare_directory_pattern_covers_subtree(#[case] path: &str) {
        let matcher = matcher(&["dist"], "/project");
        assert!(matcher.is_ignored(Path::new(path)));
    }

    #[rstest]
    #[case("src/foo.test.ts")]
    #[case("/project/src/foo.test.ts")]
    fn test_raw_glob_matches_nested_paths(#[case] path: &str) {
        let matcher = matcher(&["*.test.ts"], "/project");
        assert!(matcher.is_ignored(Path::new(path)));
    }

    #[test]
    fn test_non_matching_paths_pass() {
        let matcher = matcher(&["dist", "*.test.ts"], "/project");
        assert!(!matcher.is_ignored(Path::new("/project/src/a.ts")));
        assert!(!matcher.is_ignored(Path::new("/project/distance/a.ts")));
    }

    #[test]
    fn test_dotfiles_are_eligible() {
        let matcher = matcher(&[".cache"], "/project");
        assert!(matcher.is_ignored(Path::new("/project/.cache/data.json")));
        assert!(matcher.is_ignored(Path::new(".cache/data.json")));
    }

    #[test]
    fn test_backslash_paths_match() {
        let matcher = matcher(&["*.test.ts"], "/project");
        assert!(matcher.is_ignored(Path::new("src\\foo.test.ts")));
    }

    #[test]
    fn test_invalid_pattern_fails_construction() {
        let patterns = vec!["[".to_string()];
        let result = IgnoreMatcher::new(&patterns, Path::new("/project"));
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("invalid ignore pattern"));
    }

    #[test]
    fn test_patterns_preserved_for_diagnostics() {
        let matcher = matcher(&["dist", "*.log"], "/project");
        assert_eq!(matcher.patterns(), &["dist", "*.log"]);
    }
}
