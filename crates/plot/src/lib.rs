//! egui rendering of a Lagrange multiplier [`Scene`].
//!
//! `egui_plot` only draws in two dimensions, so the scene is flattened with an
//! orthographic [`Projection`] before it is handed to the plot. The window can
//! also show the residual history of the solves next to the scene.
//!
//! [`Scene`]: lagrange_multipliers::scene::Scene

mod app;
mod projection;

pub use app::{SceneApp, ShowConfig};
pub use projection::{Projected, Projection, ProjectionError};
