//! Entity core: the simulation-and-rendering-resource lifecycle.
//!
//! An entity owns its CPU-side physical state and its GPU-side vertex
//! buffer, and keeps the two consistent across frames: physical state
//! (mass, density, position, velocity) flows one way into derived geometry
//! (radius, vertex list) and then into the GPU buffer. The render loop
//! calls `update(dt)` then `draw` once per frame, in that order, for every
//! entity.

mod body;
mod error;
mod grid;
mod mesh;
mod satellite;

pub use body::{Body, DEFAULT_DENSITY, RADIUS_SCALE};
pub use error::EntityError;
pub use grid::{grid_vertices, Grid};
pub use mesh::MeshBuffer;
pub use satellite::{sphere_vertices, Satellite, SatelliteInit};

use crate::render::{DrawCtx, RenderCtx};

/// Per-frame contract implemented by every simulated, renderable object.
///
/// The caller guarantees the fixed `update` → `draw` order within a frame
/// and a non-negative `dt`. Both calls run on the thread owning the
/// graphics context; nothing here blocks or suspends.
pub trait Entity {
    /// Advances physical state by `dt` seconds and re-uploads geometry if
    /// it changed. After this returns, derived geometry and the GPU-resident
    /// mesh are mutually consistent.
    fn update(&mut self, ctx: &RenderCtx<'_>, dt: f32) -> Result<(), EntityError>;

    /// Issues exactly the GPU commands needed to render the current mesh
    /// with the current transform and color. Read-only with respect to
    /// physical state; fails with [`EntityError::NotInitialized`] if no
    /// vertex data has been uploaded.
    fn draw(&self, ctx: &mut DrawCtx<'_, '_>) -> Result<(), EntityError>;
}
