//! In-memory template source for testing.

use stencil_core::{
    application::ports::TemplateSource,
    domain::{DirectorySpec, FileSpec, Permissions, TemplateEntry, TemplateTree},
    error::EngineResult,
};

/// Template source backed by a pre-built tree. Used in tests and anywhere a
/// template is assembled programmatically.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTemplateSource {
    tree: TemplateTree,
}

impl InMemoryTemplateSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_directory(mut self, path: impl Into<String>) -> Self {
        self.tree
            .push(TemplateEntry::Directory(DirectorySpec::new(path)));
        self
    }

    pub fn with_file(mut self, path: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        self.tree.push(TemplateEntry::File(FileSpec::new(path, content)));
        self
    }

    pub fn with_executable_file(
        mut self,
        path: impl Into<String>,
        content: impl Into<Vec<u8>>,
    ) -> Self {
        self.tree.push(TemplateEntry::File(
            FileSpec::new(path, content).with_permissions(Permissions::executable()),
        ));
        self
    }
}

impl TemplateSource for InMemoryTemplateSource {
    fn load(&self) -> EngineResult<TemplateTree> {
        Ok(self.tree.clone())
    }
}
