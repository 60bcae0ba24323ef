use super::DomainError;
use std::borrow::Borrow;
use std::fmt;
use std::path::{Component, Path, PathBuf};

/// A filesystem path guaranteed to be relative.
///
/// Invariant: Never absolute and never escapes its root via `..`.
/// Enforced at construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RelativePath(PathBuf);

impl RelativePath {
    /// Create a new relative path.
    ///
    /// # Panics
    /// Panics if path is absolute (use `try_new` for fallible).
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        assert!(
            !path.is_absolute(),
            "RelativePath cannot be absolute: {:?}",
            path
        );
        Self(path)
    }

    /// Fallible constructor.
    pub fn try_new(path: impl Into<PathBuf>) -> Result<Self, DomainError> {
        let path = path.into();
        let escapes = path
            .components()
            .any(|c| matches!(c, Component::ParentDir | Component::Prefix(_)));
        if path.is_absolute() || path.has_root() || escapes {
            Err(DomainError::AbsolutePathNotAllowed {
                path: path.display().to_string(),
            })
        } else {
            Ok(Self(path))
        }
    }

    /// Join a segment, maintaining relative invariant.
    pub fn join(&self, segment: impl AsRef<Path>) -> Result<Self, DomainError> {
        Self::try_new(self.0.join(segment.as_ref()))
    }

    pub fn as_path(&self) -> &Path {
        &self.0
    }

    pub fn as_str(&self) -> &str {
        self.0.to_str().unwrap_or("")
    }

    pub fn into_path_buf(self) -> PathBuf {
        self.0
    }
}

impl AsRef<Path> for RelativePath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

// Ord and Hash delegate to the inner PathBuf, so lookups by `&Path` agree.
impl Borrow<Path> for RelativePath {
    fn borrow(&self) -> &Path {
        &self.0
    }
}

impl From<&str> for RelativePath {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl fmt::Display for RelativePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_absolute_path() {
        assert!(matches!(
            RelativePath::try_new("/etc/passwd"),
            Err(DomainError::AbsolutePathNotAllowed { .. })
        ));
    }

    #[test]
    fn rejects_parent_escape() {
        assert!(RelativePath::try_new("../outside.py").is_err());
        assert!(RelativePath::try_new("app/../../outside.py").is_err());
    }

    #[test]
    fn join_keeps_invariant() {
        let base = RelativePath::new("app/api");
        assert_eq!(base.join("v1").unwrap().as_str(), "app/api/v1");
        assert!(base.join("/abs").is_err());
    }

    #[test]
    fn ordering_is_lexicographic() {
        let mut paths = vec![
            RelativePath::new("app/api/v1/endpoints.py"),
            RelativePath::new("app/api/v1/__init__.py"),
            RelativePath::new("app/api/v1/auth.py"),
        ];
        paths.sort();
        assert_eq!(paths[0].as_str(), "app/api/v1/__init__.py");
        assert_eq!(paths[2].as_str(), "app/api/v1/endpoints.py");
    }
}
