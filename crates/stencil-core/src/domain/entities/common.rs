use super::DomainError;
use std::fmt;
use std::path::{Component, Path, PathBuf};

/// A filesystem path guaranteed to be relative and normalized.
///
/// Invariants: never absolute, never contains `..` or `.` segments,
/// never empty. Enforced at construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RelativePath(PathBuf);

impl RelativePath {
    /// Fallible constructor; the only way to build a `RelativePath`.
    pub fn try_new(path: impl Into<PathBuf>) -> Result<Self, DomainError> {
        let path = path.into();

        if path.as_os_str().is_empty() {
            return Err(DomainError::InvalidRenderedPath {
                path: String::new(),
                reason: "path is empty".into(),
            });
        }

        if path.is_absolute() {
            return Err(DomainError::AbsolutePathNotAllowed {
                path: path.display().to_string(),
            });
        }

        for component in path.components() {
            match component {
                Component::Normal(_) => {}
                Component::ParentDir => {
                    return Err(DomainError::InvalidRenderedPath {
                        path: path.display().to_string(),
                        reason: "path contains a '..' segment".into(),
                    });
                }
                // RootDir / Prefix are caught by is_absolute above on Unix,
                // but a bare `C:` prefix on Windows is not.
                Component::Prefix(_) | Component::RootDir => {
                    return Err(DomainError::AbsolutePathNotAllowed {
                        path: path.display().to_string(),
                    });
                }
                Component::CurDir => {
                    return Err(DomainError::InvalidRenderedPath {
                        path: path.display().to_string(),
                        reason: "path contains a '.' segment".into(),
                    });
                }
            }
        }

        Ok(Self(path))
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

impl fmt::Display for RelativePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

/// File-mode bits the engine preserves from a template tree.
///
/// Only the executable bit carries meaning across platforms; everything else
/// is left to the destination filesystem's defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Permissions {
    executable: bool,
}

impl Permissions {
    pub const fn file() -> Self {
        Self { executable: false }
    }

    pub const fn executable() -> Self {
        Self { executable: true }
    }

    pub const fn is_executable(&self) -> bool {
        self.executable
    }
}
