//! Filesystem-based template source.
//!
//! Walks a template root directory and converts it into a domain
//! [`TemplateTree`] ready for rendering. The walk is deterministic
//! (entries sorted by file name at every level), the root's `template.toml`
//! manifest is excluded from the tree, and executable bits are captured so
//! the emitter can preserve them.

use std::{fs, path::PathBuf};

use tracing::{debug, instrument};
use walkdir::WalkDir;

use stencil_core::{
    application::{ApplicationError, ports::TemplateSource},
    domain::{DirectorySpec, FileSpec, Permissions, TemplateEntry, TemplateTree},
    error::EngineResult,
};

use crate::manifest::TemplateManifest;

/// Production template source reading from a local directory.
pub struct FilesystemTemplateSource {
    root: PathBuf,
}

impl FilesystemTemplateSource {
    /// Create a source pointed at `root`.
    ///
    /// The directory does not need to exist yet; [`TemplateSource::load`]
    /// will return an error if it is missing when called.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &PathBuf {
        &self.root
    }
}

impl TemplateSource for FilesystemTemplateSource {
    #[instrument(skip(self), fields(root = %self.root.display()))]
    fn load(&self) -> EngineResult<TemplateTree> {
        if !self.root.is_dir() {
            return Err(ApplicationError::SourceUnavailable {
                reason: format!("template root not found: {}", self.root.display()),
            }
            .into());
        }

        let mut tree = TemplateTree::new();

        // sort_by_file_name makes the walk order stable across platforms and
        // filesystems; parents are always yielded before their contents.
        for entry in WalkDir::new(&self.root).min_depth(1).sort_by_file_name() {
            let entry = entry.map_err(|e| ApplicationError::SourceUnavailable {
                reason: format!("failed to walk template root: {e}"),
            })?;

            let relative = relative_path(&self.root, entry.path())?;

            // The manifest configures the engine; it is not template content.
            if entry.depth() == 1 && relative == TemplateManifest::FILE_NAME {
                continue;
            }

            if entry.file_type().is_dir() {
                tree.push(TemplateEntry::Directory(DirectorySpec::new(relative)));
            } else {
                let content = fs::read(entry.path()).map_err(|e| ApplicationError::Io {
                    path: entry.path().to_path_buf(),
                    reason: format!("Failed to read template file: {e}"),
                })?;

                let permissions = entry_permissions(entry.path())?;
                debug!(path = %relative, bytes = content.len(), "Template file loaded");

                tree.push(TemplateEntry::File(
                    FileSpec::new(relative, content).with_permissions(permissions),
                ));
            }
        }

        Ok(tree)
    }
}

/// Relative path with `/` separators, independent of the host platform.
fn relative_path(root: &std::path::Path, path: &std::path::Path) -> EngineResult<String> {
    let relative = path.strip_prefix(root).map_err(|_| {
        ApplicationError::SourceUnavailable {
            reason: format!("entry {} escapes template root", path.display()),
        }
    })?;

    let mut segments = Vec::new();
    for component in relative.components() {
        match component.as_os_str().to_str() {
            Some(s) => segments.push(s),
            None => {
                return Err(ApplicationError::SourceUnavailable {
                    reason: format!("non-UTF-8 path in template: {}", path.display()),
                }
                .into());
            }
        }
    }

    Ok(segments.join("/"))
}

#[cfg(unix)]
fn entry_permissions(path: &std::path::Path) -> EngineResult<Permissions> {
    use std::os::unix::fs::PermissionsExt;

    let metadata = fs::metadata(path).map_err(|e| ApplicationError::Io {
        path: path.to_path_buf(),
        reason: format!("Failed to read metadata: {e}"),
    })?;

    if metadata.permissions().mode() & 0o111 != 0 {
        Ok(Permissions::executable())
    } else {
        Ok(Permissions::file())
    }
}

#[cfg(not(unix))]
fn entry_permissions(_path: &std::path::Path) -> EngineResult<Permissions> {
    // Windows has no executable bit to preserve.
    Ok(Permissions::file())
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    fn write_file(path: &std::path::Path, content: &[u8]) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        let mut f = fs::File::create(path).unwrap();
        f.write_all(content).unwrap();
    }

    #[test]
    fn loads_tree_in_sorted_order() {
        let dir = tempfile::tempdir().unwrap();
        write_file(&dir.path().join("b.txt"), b"b");
        write_file(&dir.path().join("a/inner.txt"), b"inner");

        let tree = FilesystemTemplateSource::new(dir.path()).load().unwrap();
        let paths: Vec<_> = tree.entries().iter().map(|e| e.raw_path()).collect();
        assert_eq!(paths, vec!["a", "a/inner.txt", "b.txt"]);
    }

    #[test]
    fn manifest_is_excluded_from_tree() {
        let dir = tempfile::tempdir().unwrap();
        write_file(&dir.path().join("template.toml"), b"[template]\nid = \"t\"\nversion = \"1\"");
        write_file(&dir.path().join("keep.txt"), b"x");

        let tree = FilesystemTemplateSource::new(dir.path()).load().unwrap();
        let paths: Vec<_> = tree.entries().iter().map(|e| e.raw_path()).collect();
        assert_eq!(paths, vec!["keep.txt"]);
    }

    #[test]
    fn nested_manifest_name_is_kept() {
        // only the root-level template.toml is engine configuration
        let dir = tempfile::tempdir().unwrap();
        write_file(&dir.path().join("sub/template.toml"), b"payload");

        let tree = FilesystemTemplateSource::new(dir.path()).load().unwrap();
        let paths: Vec<_> = tree.entries().iter().map(|e| e.raw_path()).collect();
        assert_eq!(paths, vec!["sub", "sub/template.toml"]);
    }

    #[test]
    fn missing_root_is_source_unavailable() {
        let source = FilesystemTemplateSource::new("/nonexistent/template");
        assert!(source.load().is_err());
    }

    #[cfg(unix)]
    #[test]
    fn executable_bit_is_captured() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("run.sh");
        write_file(&script, b"#!/bin/sh\n");
        fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();

        let tree = FilesystemTemplateSource::new(dir.path()).load().unwrap();
        match &tree.entries()[0] {
            TemplateEntry::File(f) => assert!(f.permissions.is_executable()),
            other => panic!("unexpected entry: {other:?}"),
        }
    }
}
