use relative_path::{Component, RelativePath, RelativePathBuf};
use std::path::{Path, PathBuf};

/* 📖 # Why use RelativePathBuf for FilePath?

FilePath wraps RelativePathBuf so every path handed to the PAL is relative to the PAL's
base directory (the working directory in production). Static asset lookups are built
from request URLs, so the type also offers `escapes_base()` to detect `..` segments
before a client-controlled path ever reaches the filesystem.
*/

/// Type-safe wrapper for file paths relative to PAL base directory.
///
/// # Examples
///
/// ```
/// use flowboard_base::FilePath;
///
/// let index = FilePath::from("public").join("index.html");
/// assert_eq!(index.to_string(), "public/index.html");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FilePath(RelativePathBuf);

impl FilePath {
    /// Returns the underlying RelativePathBuf as a reference.
    pub fn as_relative(&self) -> &RelativePath {
        &self.0
    }

    /// Converts to a regular Path for use with std::fs operations.
    /// This returns the relative path portion without a base directory.
    pub fn as_path(&self) -> &Path {
        Path::new(self.as_relative().as_str())
    }

    /// Consumes the FilePath and returns a PathBuf.
    pub fn into_path_buf(self) -> PathBuf {
        PathBuf::from(self.0.as_str())
    }

    /// Appends a path segment (or several, separated by `/`).
    pub fn join(&self, other: impl AsRef<str>) -> Self {
        Self(self.0.join(other.as_ref()))
    }

    /// Returns true if the path contains `..` segments and could leave the base directory.
    pub fn escapes_base(&self) -> bool {
        self.0
            .components()
            .any(|component| matches!(component, Component::ParentDir))
    }

    /// File extension without the leading dot, if any.
    pub fn extension(&self) -> Option<&str> {
        self.0.extension()
    }
}

impl From<&str> for FilePath {
    fn from(s: &str) -> Self {
        Self(RelativePathBuf::from(s))
    }
}

impl From<String> for FilePath {
    fn from(s: String) -> Self {
        Self(RelativePathBuf::from(s))
    }
}

impl From<&Path> for FilePath {
    fn from(p: &Path) -> Self {
        Self(RelativePathBuf::from(p.to_string_lossy().into_owned()))
    }
}

impl std::fmt::Display for FilePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<RelativePath> for FilePath {
    fn as_ref(&self) -> &RelativePath {
        &self.0
    }
}
