//! Stencil Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the Stencil
//! project scaffolding engine, following hexagonal (ports and adapters)
//! architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │          stencil-cli (CLI)              │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │            (RenderService)              │
//! │   Resolving → Rendering → Writing       │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │   (Driven: TemplateSource, Filesystem)  │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    stencil-adapters (Infrastructure)    │
//! │ (FilesystemTemplateSource, LocalFs, …)  │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        Domain Layer (Pure Logic)        │
//! │  (ParameterSet, TemplateTree, render)   │
//! │        No External Dependencies         │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use stencil_core::application::{RenderOptions, RenderService};
//!
//! // Adapters are injected; see stencil-adapters for implementations.
//! let service = RenderService::new(source, filesystem);
//! let report = service.render(
//!     vec![("project_name".into(), "myapp".into())],
//!     &[],
//!     "./out".as_ref(),
//!     &RenderOptions::default(),
//! )?;
//! ```

// Re-export domain layer (stable, well-defined API)
pub mod domain;

// Re-export application layer (orchestration logic)
pub mod application;

// Re-export error types
pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        CancelFlag, RenderOptions, RenderReport, RenderService,
        ports::{Filesystem, TemplateSource},
    };
    pub use crate::domain::{
        DerivedRule, DirectorySpec, FileSpec, ParameterSet, Permissions, RelativePath,
        RenderedTree, TemplateEntry, TemplateTree, Transform,
    };
    pub use crate::error::{EngineError, EngineResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
