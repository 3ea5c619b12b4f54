//! Render Service - main application orchestrator.
//!
//! This service coordinates the entire scaffolding workflow:
//! 1. Resolve parameters (user + derived rules)
//! 2. Render every entry (paths, then content)
//! 3. Write the rendered tree to the destination root
//!
//! Each invocation moves through Resolving → Rendering → Writing; a failure
//! at any stage halts the remaining stages. Writing is best-effort, not
//! transactional: the first failure is reported and previously-written
//! entries stay in place. Callers needing atomicity render into a temporary
//! root and move it into place as a single step.

use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::{
    application::{
        ApplicationError,
        ports::{Filesystem, TemplateSource},
    },
    domain::{
        DerivedRule, ParameterSet, RenderedDirectory, RenderedEntry, RenderedFile, RenderedTree,
        TemplateEntry,
        render::{render_content, render_path},
    },
    error::EngineResult,
};

/// Cooperative cancellation flag, checked between entries.
///
/// Cloning shares the flag; cancelling from another thread stops the render
/// before the next entry. A file mid-write is still written fully (the
/// filesystem port guarantees all-or-nothing writes).
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Options controlling a single render invocation.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// Replace existing destination files instead of failing.
    pub overwrite: bool,
    /// Cooperative cancellation handle.
    pub cancel: CancelFlag,
}

/// Summary of a completed render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderReport {
    /// Correlation id, also attached to every log event of the invocation.
    pub render_id: Uuid,
    pub files_written: usize,
    pub directories_created: usize,
}

/// Main scaffolding service.
///
/// Owns no state across invocations: each render call builds its own
/// `ParameterSet` and `RenderedTree` and discards them when done.
pub struct RenderService {
    source: Box<dyn TemplateSource>,
    filesystem: Box<dyn Filesystem>,
}

impl RenderService {
    /// Create a new render service with the given adapters.
    pub fn new(source: Box<dyn TemplateSource>, filesystem: Box<dyn Filesystem>) -> Self {
        Self { source, filesystem }
    }

    /// Resolve parameters and render the tree without writing anything.
    ///
    /// Used for dry runs and previews; also the first two stages of
    /// [`render`](Self::render).
    #[instrument(skip_all)]
    pub fn preview(
        &self,
        user_params: Vec<(String, String)>,
        rules: &[DerivedRule],
    ) -> EngineResult<RenderedTree> {
        // ── Resolving ─────────────────────────────────────────────────────
        let params = ParameterSet::resolve(user_params, rules)?;
        debug!(parameters = params.len(), "Parameters resolved");

        // ── Rendering ─────────────────────────────────────────────────────
        let tree = self.source.load()?;
        tree.validate()?;

        let mut entries = Vec::with_capacity(tree.len());
        for entry in tree.entries() {
            entries.push(match entry {
                TemplateEntry::Directory(dir) => RenderedEntry::Directory(RenderedDirectory {
                    path: render_path(&dir.path, &params)?,
                    permissions: dir.permissions,
                }),
                TemplateEntry::File(file) => RenderedEntry::File(RenderedFile {
                    path: render_path(&file.path, &params)?,
                    content: render_content(&file.content, &file.path, &params)?,
                    permissions: file.permissions,
                }),
            });
        }

        Ok(RenderedTree::from_entries(entries)?)
    }

    /// Scaffold: resolve, render, and write to `dest_root`.
    ///
    /// This is the main use case. Directory creation is idempotent; an
    /// existing destination *file* fails with
    /// [`ApplicationError::DestinationConflict`] unless `opts.overwrite`.
    #[instrument(
        skip_all,
        fields(dest = %dest_root.display(), render_id = tracing::field::Empty)
    )]
    pub fn render(
        &self,
        user_params: Vec<(String, String)>,
        rules: &[DerivedRule],
        dest_root: &Path,
        opts: &RenderOptions,
    ) -> EngineResult<RenderReport> {
        let render_id = Uuid::new_v4();
        tracing::Span::current().record("render_id", tracing::field::display(render_id));

        let tree = self.preview(user_params, rules)?;
        info!(entries = tree.entry_count(), "Tree rendered");

        // ── Writing ───────────────────────────────────────────────────────
        let report = self.write(&tree, dest_root, opts, render_id)?;
        info!(
            files = report.files_written,
            directories = report.directories_created,
            "Render completed"
        );

        Ok(report)
    }

    /// Write a rendered tree below `dest_root`.
    ///
    /// Entries arrive in lexicographic path order, so a parent directory is
    /// always created before anything inside it; file parents are created
    /// explicitly as well because a template need not list every directory.
    fn write(
        &self,
        tree: &RenderedTree,
        dest_root: &Path,
        opts: &RenderOptions,
        render_id: Uuid,
    ) -> EngineResult<RenderReport> {
        self.filesystem.create_dir_all(dest_root)?;

        let mut files_written = 0;
        let mut directories_created = 0;

        for entry in tree.entries() {
            if opts.cancel.is_cancelled() {
                return Err(ApplicationError::Cancelled.into());
            }

            match entry {
                RenderedEntry::Directory(dir) => {
                    let target = dest_root.join(dir.path.as_path());
                    self.filesystem.create_dir_all(&target)?;
                    directories_created += 1;
                }
                RenderedEntry::File(file) => {
                    let target = dest_root.join(file.path.as_path());

                    if !opts.overwrite && self.filesystem.exists(&target) {
                        return Err(ApplicationError::DestinationConflict { path: target }.into());
                    }

                    if let Some(parent) = target.parent() {
                        self.filesystem.create_dir_all(parent)?;
                    }

                    self.filesystem.write_file(&target, &file.content)?;

                    if file.permissions.is_executable() {
                        self.filesystem.set_executable(&target)?;
                    }

                    debug!(path = %file.path, bytes = file.content.len(), "File written");
                    files_written += 1;
                }
            }
        }

        Ok(RenderReport {
            render_id,
            files_written,
            directories_created,
        })
    }
}
