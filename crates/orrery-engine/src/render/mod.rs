//! GPU rendering subsystem.
//!
//! The pipeline here draws position-only meshes: a line list for the grid
//! and a triangle list for satellite bodies, both through one WGSL shader.
//! Entities own their vertex buffers and model bindings; this module owns
//! the pipelines and the camera binding.
//!
//! Convention:
//! - CPU geometry is in world units, right-handed, +Y up.
//! - The vertex shader applies `view_proj * model` per entity.

mod camera;
mod ctx;
mod pipeline;

pub use camera::Camera;
pub use ctx::{DrawCtx, RenderCtx};
pub use pipeline::{EntityPipeline, ModelBinding};
