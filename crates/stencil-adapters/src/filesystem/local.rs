//! Local filesystem adapter using std::fs.

use std::io::{self, Write as _};
use std::path::Path;

use stencil_core::{application::ports::Filesystem, error::EngineResult};

/// Production filesystem implementation using `std::fs`.
///
/// Files are written to a temporary file in the target directory and renamed
/// into place, so a failed write never leaves a truncated destination file.
#[derive(Debug, Clone, Copy)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    /// Create a new local filesystem adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for LocalFilesystem {
    fn create_dir_all(&self, path: &Path) -> EngineResult<()> {
        std::fs::create_dir_all(path).map_err(|e| map_io_error(path, e, "create directory"))
    }

    fn write_file(&self, path: &Path, content: &[u8]) -> EngineResult<()> {
        let dir = path.parent().unwrap_or_else(|| Path::new("."));

        // Temp file in the same directory: the final rename is then atomic
        // on POSIX filesystems and never crosses a device boundary.
        let mut tmp = tempfile::NamedTempFile::new_in(dir)
            .map_err(|e| map_io_error(path, e, "create temporary file"))?;

        tmp.write_all(content)
            .map_err(|e| map_io_error(path, e, "write file"))?;

        tmp.persist(path)
            .map_err(|e| map_io_error(path, e.error, "finalize file"))?;

        Ok(())
    }

    fn set_executable(&self, path: &Path) -> EngineResult<()> {
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;

            let metadata =
                std::fs::metadata(path).map_err(|e| map_io_error(path, e, "get metadata"))?;
            let mut perms = metadata.permissions();
            let mode = perms.mode();
            perms.set_mode(mode | 0o111);
            std::fs::set_permissions(path, perms)
                .map_err(|e| map_io_error(path, e, "set permissions"))?;
        }
        #[cfg(not(unix))]
        {
            // Windows doesn't have an executable bit.
            let _ = path;
        }
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> stencil_core::error::EngineError {
    use stencil_core::application::ApplicationError;

    ApplicationError::Io {
        path: path.to_path_buf(),
        reason: format!("Failed to {}: {}", operation, e),
    }
    .into()
}

// ── tests ─────────────────────────────────────────────────────────────────────
