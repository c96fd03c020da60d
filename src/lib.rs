//! timegraph: zoomable, scrollable time-series chart core.
//!
//! This crate owns the viewport/window/label pipeline of a chart and leaves
//! pixel drawing to a host-provided [`render::Renderer`]. The render loop is
//! synchronous: gesture input mutates the viewport, which invalidates cached
//! label sets, and the next frame re-derives the visible slice and labels.

pub mod api;
pub mod axis;
pub mod core;
pub mod error;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{GraphConfig, GraphEngine};
pub use error::{GraphError, GraphResult};
