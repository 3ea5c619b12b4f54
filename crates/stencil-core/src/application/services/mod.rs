//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish the
//! high-level use case: "render a template into a destination tree".

pub mod render_service;

pub use render_service::{CancelFlag, RenderOptions, RenderReport, RenderService};
