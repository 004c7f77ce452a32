//! graph-rs: 2D chart scaling and layout engine.
//!
//! The crate keeps a strict split between pure scaling/projection math
//! (`core`), backend-agnostic draw primitives (`render`) and the engine facade
//! that ties a live data model to a renderer (`api`).

pub mod api;
pub mod core;
pub mod error;
pub mod render;
pub mod telemetry;

pub use api::{ChartEngine, ChartEngineConfig, RedrawKind};
pub use error::{ChartError, ChartResult};
