// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for Stencil.
//!
//! This module contains pure business logic with ZERO external dependencies.
//! All I/O concerns — reading template roots, writing destination trees —
//! are handled via ports (traits) defined in the application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: No filesystem, network, or external calls
//! - **No external crates**: Only std library + thiserror + serde derives
//! - **Immutable entities**: All domain objects are Clone + PartialEq
//!
// Public API - what the world sees
pub mod entities;
pub mod error;
pub mod params;
pub mod render;

// Re-exports for convenience
pub use entities::{
    common::{Permissions, RelativePath},
    rendered_tree::{RenderedDirectory, RenderedEntry, RenderedFile, RenderedTree},
    template::{DirectorySpec, FileSpec, TemplateEntry, TemplateTree},
};

pub use error::{DomainError, ErrorCategory};

pub use params::{DerivedRule, ParameterSet, Transform};
