//! Configuration for a documentation validation run.

use std::path::{Path, PathBuf};

/// Default documentation directory, relative to the root.
pub const DEFAULT_DOCS_DIR: &str = "docs";

/// Default discovery pattern. `*` does not cross directory separators, so
/// discovery only looks at files directly inside the docs directory.
pub const DEFAULT_PATTERN: &str = "*.md";

/// Default element schema location, relative to the root.
pub const DEFAULT_SCHEMA_PATH: &str = "element-schema.json";

/// Migration guide; its "before" examples are intentionally invalid elements.
pub const DEFAULT_EXCLUDED: &[&str] = &["docs/migration.md"];

/// Where to find documentation and schema, and which files to leave alone.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct HarnessConfig {
    /// Base directory for every relative path below (default: `.`).
    pub root: PathBuf,
    /// Directory scanned for documentation files (default: `docs`).
    pub docs_dir: PathBuf,
    /// Glob pattern matched inside `docs_dir` (default: `*.md`).
    pub pattern: String,
    /// Element schema file (default: `element-schema.json`).
    pub schema_path: PathBuf,
    /// Files that are skipped without being read.
    /// Matched by filesystem identity, so `docs/./migration.md` and an
    /// absolute path to the same file are both excluded.
    pub excluded: Vec<PathBuf>,
    /// Maximum documentation file size in bytes (default: 10 MB).
    pub max_file_size: u64,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            docs_dir: PathBuf::from(DEFAULT_DOCS_DIR),
            pattern: DEFAULT_PATTERN.to_owned(),
            schema_path: PathBuf::from(DEFAULT_SCHEMA_PATH),
            excluded: DEFAULT_EXCLUDED.iter().map(PathBuf::from).collect(),
            max_file_size: 10_485_760,
        }
    }
}

impl HarnessConfig {
    /// Use `root` as the base for relative paths.
    #[must_use]
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = root.into();
        self
    }

    /// Resolve `path` against the root. Absolute paths are returned unchanged.
    #[must_use]
    pub fn resolve(&self, path: &Path) -> PathBuf {
        self.root.join(path)
    }

    #[must_use]
    pub fn docs_dir_path(&self) -> PathBuf {
        self.resolve(&self.docs_dir)
    }

    #[must_use]
    pub fn schema_file_path(&self) -> PathBuf {
        self.resolve(&self.schema_path)
    }

    #[must_use]
    pub fn excluded_paths(&self) -> Vec<PathBuf> {
        self.excluded.iter().map(|p| self.resolve(p)).collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = HarnessConfig::default();
        assert_eq!(cfg.docs_dir_path(), Path::new("./docs"));
        assert_eq!(cfg.schema_file_path(), Path::new("./element-schema.json"));
        assert_eq!(cfg.excluded_paths(), vec![PathBuf::from("./docs/migration.md")]);
        assert_eq!(cfg.pattern, "*.md");
    }

    #[test]
    fn test_with_root_resolves_relative_paths() {
        let cfg = HarnessConfig::default().with_root("/srv/api-elements");
        assert_eq!(cfg.docs_dir_path(), Path::new("/srv/api-elements/docs"));
        assert_eq!(
            cfg.schema_file_path(),
            Path::new("/srv/api-elements/element-schema.json")
        );
    }

    #[test]
    fn test_absolute_paths_ignore_root() {
        let mut cfg = HarnessConfig::default().with_root("/srv/api-elements");
        cfg.schema_path = PathBuf::from("/etc/element-schema.json");
        assert_eq!(cfg.schema_file_path(), Path::new("/etc/element-schema.json"));
    }
}
