use glam::{Mat4, Vec3};
use std::f32::consts::{PI, TAU};

use crate::render::{DrawCtx, EntityPipeline, ModelBinding, RenderCtx};

use super::{Body, Entity, EntityError, MeshBuffer, DEFAULT_DENSITY};

/// Construction parameters for a [`Satellite`].
///
/// Only mass has no universally sensible default; everything else defaults
/// to a rocky body: `DEFAULT_DENSITY`, opaque red, 10 × 10 sphere
/// tessellation.
#[derive(Debug, Clone, PartialEq)]
pub struct SatelliteInit {
    pub position: Vec3,
    pub velocity: Vec3,
    /// Mass in kg. Must be positive.
    pub mass: f32,
    /// Density in kg/m³. Must be positive.
    pub density: f32,
    /// Straight RGBA color.
    pub color: [f32; 4],
    /// Latitude subdivisions of the sphere mesh. Must be ≥ 1.
    pub stacks: u32,
    /// Longitude subdivisions of the sphere mesh. Must be ≥ 1.
    pub sectors: u32,
}

impl Default for SatelliteInit {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            velocity: Vec3::ZERO,
            mass: 1.0,
            density: DEFAULT_DENSITY,
            color: [1.0, 0.0, 0.0, 1.0],
            stacks: 10,
            sectors: 10,
        }
    }
}

/// A dynamic body rendered as a triangulated sphere.
///
/// The sphere radius is derived from mass and density (see [`Body`]); the
/// mesh is generated in local radius-only space and placed in the world at
/// draw time via a translation, so it is regenerated and re-uploaded only
/// when the radius actually changes.
pub struct Satellite {
    body: Body,
    color: [f32; 4],
    stacks: u32,
    sectors: u32,

    mesh: MeshBuffer,
    binding: ModelBinding,
    /// Radius the GPU-resident mesh was generated at.
    uploaded_radius: f32,

    /// External signal: the body is being placed by the user. Not consumed
    /// by this core; reserved for the enclosing simulation's state machine.
    pub initializing: bool,
    /// External signal: the body has been released into free flight. Not
    /// consumed by this core.
    pub launch: bool,
}

impl Satellite {
    /// Creates a satellite, generating and uploading its sphere mesh before
    /// returning. Fails fast on non-positive mass/density or zero
    /// stacks/sectors.
    pub fn new(
        ctx: &RenderCtx<'_>,
        pipeline: &EntityPipeline,
        init: SatelliteInit,
    ) -> Result<Self, EntityError> {
        if init.stacks < 1 || init.sectors < 1 {
            return Err(EntityError::InvalidArgument(format!(
                "sphere tessellation requires stacks >= 1 and sectors >= 1, got {} x {}",
                init.stacks, init.sectors
            )));
        }

        let body = Body::new(init.position, init.velocity, init.mass, init.density)?;
        let radius = body.radius();

        let mut mesh = MeshBuffer::new();
        mesh.upload(ctx, &sphere_vertices(radius, init.stacks, init.sectors))?;

        log::debug!(
            "satellite created: mass {:.3e} kg, radius {:.3} units, {} vertices",
            body.mass,
            radius,
            mesh.vertex_count()
        );

        Ok(Self {
            body,
            color: init.color,
            stacks: init.stacks,
            sectors: init.sectors,
            mesh,
            binding: pipeline.create_model_binding(ctx.device),
            uploaded_radius: radius,
            initializing: false,
            launch: false,
        })
    }

    pub fn body(&self) -> &Body {
        &self.body
    }

    /// Mutable access to the physical state, for the enclosing simulation
    /// (e.g. a force model adjusting mass or velocity between frames).
    pub fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    pub fn color(&self) -> [f32; 4] {
        self.color
    }

    pub fn set_color(&mut self, color: [f32; 4]) {
        self.color = color;
    }

    /// Number of vertices in the GPU-resident mesh.
    pub fn vertex_count(&self) -> u32 {
        self.mesh.vertex_count()
    }
}

impl Entity for Satellite {
    /// Euler-steps the position, then regenerates and re-uploads the sphere
    /// mesh only if the derived radius changed since the last upload.
    fn update(&mut self, ctx: &RenderCtx<'_>, dt: f32) -> Result<(), EntityError> {
        self.body.step(dt);

        if self.body.radius() != self.uploaded_radius {
            let vertices = sphere_vertices(self.body.radius(), self.stacks, self.sectors);
            self.mesh.upload(ctx, &vertices)?;
            self.uploaded_radius = self.body.radius();
        }

        Ok(())
    }

    fn draw(&self, ctx: &mut DrawCtx<'_, '_>) -> Result<(), EntityError> {
        let vbo = self.mesh.slice().ok_or(EntityError::NotInitialized)?;

        self.binding.write(
            ctx.queue,
            Mat4::from_translation(self.body.position),
            self.color,
        );

        ctx.pass.set_pipeline(ctx.pipeline.triangles());
        ctx.pass.set_bind_group(1, self.binding.bind_group(), &[]);
        ctx.pass.set_vertex_buffer(0, vbo);
        ctx.pass.draw(0..self.mesh.vertex_count(), 0..1);

        Ok(())
    }
}

/// Generates a latitude/longitude tessellated sphere as a flat triangle
/// list of (x, y, z) floats.
///
/// Pure and deterministic: identical inputs yield identical output. Each
/// (stack, sector) quad contributes two triangles wound (v1, v2, v3) and
/// (v2, v4, v3), so the output holds `stacks * sectors * 6 * 3` floats.
pub fn sphere_vertices(radius: f32, stacks: u32, sectors: u32) -> Vec<f32> {
    let mut out = Vec::with_capacity((stacks * sectors * 18) as usize);
    let stack_step = PI / stacks as f32;
    let sector_step = TAU / sectors as f32;

    for i in 0..stacks {
        let theta0 = i as f32 * stack_step;
        let theta1 = (i + 1) as f32 * stack_step;

        for j in 0..sectors {
            let phi0 = j as f32 * sector_step;
            let phi1 = (j + 1) as f32 * sector_step;

            let v1 = spherical_point(radius, theta0, phi0);
            let v2 = spherical_point(radius, theta1, phi0);
            let v3 = spherical_point(radius, theta0, phi1);
            let v4 = spherical_point(radius, theta1, phi1);

            for v in [v1, v2, v3, v2, v4, v3] {
                out.extend_from_slice(&[v.x, v.y, v.z]);
            }
        }
    }

    out
}

/// Spherical-to-Cartesian conversion, θ from the +Y pole, φ around Y.
fn spherical_point(radius: f32, theta: f32, phi: f32) -> Vec3 {
    Vec3::new(
        radius * theta.sin() * phi.cos(),
        radius * theta.cos(),
        radius * theta.sin() * phi.sin(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── sphere tessellation ───────────────────────────────────────────────

    #[test]
    fn vertex_count_is_stacks_sectors_quads() {
        for (stacks, sectors) in [(1, 1), (3, 5), (10, 10)] {
            let verts = sphere_vertices(2.0, stacks, sectors);
            assert_eq!(verts.len() as u32, stacks * sectors * 6 * 3);
        }
    }

    #[test]
    fn every_vertex_lies_on_the_sphere() {
        let radius = 7.5;
        let verts = sphere_vertices(radius, 10, 10);
        for chunk in verts.chunks_exact(3) {
            let d = (chunk[0] * chunk[0] + chunk[1] * chunk[1] + chunk[2] * chunk[2]).sqrt();
            assert!((d - radius).abs() < 1e-3, "vertex at distance {d}");
        }
    }

    #[test]
    fn generation_is_deterministic() {
        assert_eq!(sphere_vertices(1.25, 10, 10), sphere_vertices(1.25, 10, 10));
    }

    #[test]
    fn first_stack_starts_at_the_pole() {
        let verts = sphere_vertices(1.0, 10, 10);
        // v1 of the first quad sits at θ = 0, φ = 0: the +Y pole.
        assert!(verts[0].abs() < 1e-6);
        assert!((verts[1] - 1.0).abs() < 1e-6);
        assert!(verts[2].abs() < 1e-6);
    }

    #[test]
    fn earth_like_body_keeps_mesh_size_across_steps() {
        let mut body = Body::new(Vec3::ZERO, Vec3::ZERO, 5.97e24, 5514.0).unwrap();
        let before = sphere_vertices(body.radius(), 10, 10).len();

        assert!(!body.step(1.0));
        assert_eq!(body.position, Vec3::ZERO);
        assert_eq!(sphere_vertices(body.radius(), 10, 10).len(), before);
    }

    #[test]
    fn winding_order_is_preserved() {
        // Second triangle of a quad must be (v2, v4, v3): its first vertex
        // equals the first triangle's second vertex, its last equals the
        // first triangle's third.
        let verts = sphere_vertices(1.0, 4, 4);
        let tri1 = &verts[0..9];
        let tri2 = &verts[9..18];
        assert_eq!(&tri2[0..3], &tri1[3..6]); // v2
        assert_eq!(&tri2[6..9], &tri1[6..9]); // v3
    }
}
