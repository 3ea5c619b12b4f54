//! Template tree domain model.
//!
//! A [`TemplateTree`] is the parsed, in-memory form of a template root
//! directory: an ordered sequence of entries whose paths and file contents
//! may contain `{{ token }}` markers. The tree is declarative data — the
//! engine never interprets the target-language content it carries, only the
//! token markers inside it.
//!
//! ```text
//! TemplateTree
//! └── Vec<TemplateEntry>
//!      ├── FileSpec      (tokenized path, raw bytes, permissions)
//!      └── DirectorySpec (tokenized path, permissions)
//! ```
//!
//! Paths are stored as `String` rather than [`RelativePath`] because a
//! tokenized path like `{{name}}/App.java` only satisfies the relative-and-
//! normalized invariant *after* rendering. Raw paths are still checked for
//! the violations that no substitution can repair (absolute prefixes, `..`
//! segments, backslashes).

use crate::domain::{entities::common::Permissions, error::DomainError};

/// One entry of a template tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateEntry {
    Directory(DirectorySpec),
    File(FileSpec),
}

impl TemplateEntry {
    /// The raw (possibly tokenized) relative path of this entry.
    pub fn raw_path(&self) -> &str {
        match self {
            Self::Directory(d) => &d.path,
            Self::File(f) => &f.path,
        }
    }
}

/// A directory to materialize in the destination tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectorySpec {
    pub path: String,
    pub permissions: Permissions,
}

impl DirectorySpec {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            permissions: Permissions::default(),
        }
    }
}

/// A file to render and write into the destination tree.
///
/// Content is opaque bytes. Whether substitution applies is decided at
/// render time from the path's extension; content is never parsed as
/// target-language syntax.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSpec {
    pub path: String,
    pub content: Vec<u8>,
    pub permissions: Permissions,
}

impl FileSpec {
    pub fn new(path: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
            permissions: Permissions::default(),
        }
    }

    pub fn with_permissions(mut self, permissions: Permissions) -> Self {
        self.permissions = permissions;
        self
    }
}

/// Ordered sequence of template entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateTree {
    entries: Vec<TemplateEntry>,
}

impl TemplateTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: TemplateEntry) {
        self.entries.push(entry);
    }

    pub fn with_entry(mut self, entry: TemplateEntry) -> Self {
        self.push(entry);
        self
    }

    pub fn entries(&self) -> &[TemplateEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check invariants that hold regardless of parameter values.
    ///
    /// Token substitution can never remove a `..` segment or an absolute
    /// prefix, so those are rejected here, before any rendering.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.entries.is_empty() {
            return Err(DomainError::EmptyTemplate);
        }

        for entry in &self.entries {
            let raw = entry.raw_path();

            if raw.is_empty() {
                return Err(DomainError::InvalidRenderedPath {
                    path: raw.into(),
                    reason: "entry path is empty".into(),
                });
            }
            if raw.starts_with('/') {
                return Err(DomainError::AbsolutePathNotAllowed { path: raw.into() });
            }
            if raw.contains('\\') {
                return Err(DomainError::InvalidRenderedPath {
                    path: raw.into(),
                    reason: "backslashes are not allowed in template paths".into(),
                });
            }
            if raw.split('/').any(|seg| seg == "..") {
                return Err(DomainError::InvalidRenderedPath {
                    path: raw.into(),
                    reason: "path contains a '..' segment".into(),
                });
            }
        }

        Ok(())
    }
}
