//! Orrery engine crate.
//!
//! This crate owns the GPU runtime pieces and the entity core used by the
//! viewer: device/surface management, the entity update/draw lifecycle, and
//! the render pipeline that draws grids and satellite bodies.

pub mod device;
pub mod entity;
pub mod logging;
pub mod render;
pub mod time;
