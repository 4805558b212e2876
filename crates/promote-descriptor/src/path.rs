//! Base directory for portable artifact paths.
//!
//! Stored file paths are made relative to a base directory so the persisted
//! descriptors survive relocating the build tree. The rules follow URI
//! relativization: a file under the base becomes the remaining segments
//! joined with `/`; a file outside it keeps its absolute path.

use std::fmt;
use std::path::{Component, Path, PathBuf};

/// A directory against which artifact paths are relativized and resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasePath {
    root: PathBuf,
}

impl BasePath {
    /// Create a base path. Relative directories are taken from the
    /// current working directory; `.` and `..` segments are removed.
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            root: normalize(&absolute(dir.as_ref())),
        }
    }

    /// The normalized, absolute base directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Express `file` relative to the base.
    ///
    /// Falls back to the absolute path when `file` is not under the base.
    pub fn relativize(&self, file: &Path) -> String {
        let file = normalize(&absolute(file));
        match file.strip_prefix(&self.root) {
            Ok(rest) => rest
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/"),
            Err(_) => file.to_string_lossy().into_owned(),
        }
    }

    /// Resolve a stored path against the base.
    ///
    /// Absolute stored paths are returned as they are (normalized).
    pub fn resolve(&self, stored: &str) -> PathBuf {
        let stored = Path::new(stored);
        if stored.is_absolute() {
            normalize(stored)
        } else {
            normalize(&self.root.join(stored))
        }
    }
}

impl fmt::Display for BasePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let root = self.root.to_string_lossy();
        if root.ends_with(['/', '\\']) {
            write!(f, "{root}")
        } else {
            write!(f, "{root}/")
        }
    }
}

fn absolute(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    match std::env::current_dir() {
        Ok(cwd) => cwd.join(path),
        Err(_) => path.to_path_buf(),
    }
}

/// Lexically remove `.` and `..` segments. `..` never climbs above the root.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if matches!(out.components().next_back(), Some(Component::Normal(_))) {
                    out.pop();
                } else if !out.has_root() {
                    out.push(component);
                }
            }
            other => out.push(other),
        }
    }
    out
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn test_relativize_under_base() {
        let base = BasePath::new("/build/target/");
        assert_eq!(
            base.relativize(Path::new("/build/target/lib/foo-1.0.jar")),
            "lib/foo-1.0.jar"
        );
    }

    #[test]
    fn test_relativize_without_trailing_slash() {
        let base = BasePath::new("/build/target");
        assert_eq!(base.relativize(Path::new("/build/target/foo.jar")), "foo.jar");
    }

    #[test]
    fn test_relativize_outside_base_is_absolute() {
        let base = BasePath::new("/build/target");
        assert_eq!(
            base.relativize(Path::new("/elsewhere/foo.jar")),
            "/elsewhere/foo.jar"
        );
        // Sibling with a shared name prefix is not "under" the base
        assert_eq!(
            base.relativize(Path::new("/build/target-old/foo.jar")),
            "/build/target-old/foo.jar"
        );
    }

    #[test]
    fn test_relativize_normalizes_dot_segments() {
        let base = BasePath::new("/build/./target");
        assert_eq!(
            base.relativize(Path::new("/build/target/x/../lib/foo.jar")),
            "lib/foo.jar"
        );
    }

    #[test]
    fn test_resolve_relative() {
        let base = BasePath::new("/build/target/");
        assert_eq!(
            base.resolve("lib/foo-1.0.jar"),
            PathBuf::from("/build/target/lib/foo-1.0.jar")
        );
        assert_eq!(base.resolve("../other.jar"), PathBuf::from("/build/other.jar"));
    }

    #[test]
    fn test_resolve_absolute_passes_through() {
        let base = BasePath::new("/build/target/");
        assert_eq!(base.resolve("/opt/x.jar"), PathBuf::from("/opt/x.jar"));
    }

    #[test]
    fn test_relative_base_uses_current_dir() {
        let base = BasePath::new("target");
        let cwd = std::env::current_dir().unwrap();
        assert_eq!(base.root(), cwd.join("target"));
    }

    #[test]
    fn test_display_has_trailing_separator() {
        assert_eq!(BasePath::new("/build/target").to_string(), "/build/target/");
        assert_eq!(BasePath::new("/").to_string(), "/");
    }

    #[test]
    fn test_parent_dir_does_not_escape_root() {
        assert_eq!(normalize(Path::new("/../a")), PathBuf::from("/a"));
    }
}
