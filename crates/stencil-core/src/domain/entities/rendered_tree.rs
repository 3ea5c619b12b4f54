use std::collections::HashSet;

use crate::domain::{
    entities::common::{Permissions, RelativePath},
    error::DomainError,
};

/// Fully rendered tree, ready for materialization.
///
/// Isomorphic to the template tree it was rendered from, with every token in
/// paths and content resolved. Immutable once produced: the emitter writes it
/// to a destination root exactly once, then it is discarded.
#[derive(Debug, Clone)]
pub struct RenderedTree {
    entries: Vec<RenderedEntry>,
}

impl RenderedTree {
    /// Build a tree from rendered entries, sorting them into the stable
    /// emission order (lexicographic by path — a parent directory is a strict
    /// prefix of its children, so parents always sort first).
    pub fn from_entries(mut entries: Vec<RenderedEntry>) -> Result<Self, DomainError> {
        entries.sort_by(|a, b| a.path().cmp(b.path()));

        let tree = Self { entries };
        tree.validate()?;
        Ok(tree)
    }

    pub fn entries(&self) -> &[RenderedEntry] {
        &self.entries
    }

    pub fn files(&self) -> impl Iterator<Item = &RenderedFile> {
        self.entries.iter().filter_map(|e| match e {
            RenderedEntry::File(f) => Some(f),
            _ => None,
        })
    }

    pub fn directories(&self) -> impl Iterator<Item = &RenderedDirectory> {
        self.entries.iter().filter_map(|e| match e {
            RenderedEntry::Directory(d) => Some(d),
            _ => None,
        })
    }

    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    fn validate(&self) -> Result<(), DomainError> {
        if self.entries.is_empty() {
            return Err(DomainError::EmptyTemplate);
        }

        // Paths must be unique after rendering; two tokenized template paths
        // may collapse to one concrete path.
        let mut seen = HashSet::new();
        for entry in &self.entries {
            if !seen.insert(entry.path()) {
                return Err(DomainError::DuplicatePath {
                    path: entry.path().to_string(),
                });
            }
        }

        Ok(())
    }
}

#[derive(Debug, Clone)]
pub enum RenderedEntry {
    Directory(RenderedDirectory),
    File(RenderedFile),
}

impl RenderedEntry {
    pub fn path(&self) -> &RelativePath {
        match self {
            Self::Directory(d) => &d.path,
            Self::File(f) => &f.path,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RenderedFile {
    pub path: RelativePath,
    pub content: Vec<u8>,
    pub permissions: Permissions,
}

#[derive(Debug, Clone)]
pub struct RenderedDirectory {
    pub path: RelativePath,
    pub permissions: Permissions,
}
