//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `stencil-adapters` implement
//! these.
//!
//! - **Driven (Output) Ports**: Called by application, implemented by
//!   infrastructure
//!   - `TemplateSource`: template tree loading
//!   - `Filesystem`: destination writes
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by
//!   application (defined in the CLI layer, implemented by services)

use std::path::Path;

use crate::domain::TemplateTree;
use crate::error::EngineResult;

/// Port for loading a template tree.
///
/// Implemented by:
/// - `stencil_adapters::template_source::FilesystemTemplateSource` (production)
/// - `stencil_adapters::template_source::InMemoryTemplateSource` (testing)
///
/// The source is a read-only collaborator: loading must not mutate the
/// template root.
pub trait TemplateSource: Send + Sync {
    /// Load the full template tree.
    fn load(&self) -> EngineResult<TemplateTree>;
}

/// Port for destination filesystem operations.
///
/// Implemented by:
/// - `stencil_adapters::filesystem::LocalFilesystem` (production)
/// - `stencil_adapters::filesystem::MemoryFilesystem` (testing)
///
/// ## Design Notes
///
/// - `write_file` must be all-or-nothing: no truncated file may remain on
///   failure (the local adapter writes to a temp file and renames).
/// - There is deliberately no `remove_dir_all`: the engine never rolls back,
///   it reports the first failure and leaves prior entries in place.
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories. Idempotent.
    fn create_dir_all(&self, path: &Path) -> EngineResult<()>;

    /// Write content to a file, replacing any existing file at the path.
    fn write_file(&self, path: &Path, content: &[u8]) -> EngineResult<()>;

    /// Mark a file as executable. No-op on platforms without the concept.
    fn set_executable(&self, path: &Path) -> EngineResult<()>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;
}
