use glam::Mat4;

use crate::render::{DrawCtx, EntityPipeline, ModelBinding, RenderCtx};

use super::{Entity, EntityError, MeshBuffer};

/// Decorative reference grid: a crosshatch of line segments in the XZ
/// plane, centered at the origin.
///
/// The mesh is generated once at construction and never changes; `update`
/// is a no-op.
pub struct Grid {
    mesh: MeshBuffer,
    binding: ModelBinding,
    color: [f32; 4],
}

impl Grid {
    /// Creates a grid covering a square of side `size` split into
    /// `divisions` cells per axis.
    ///
    /// Policy for degenerate parameters: `size <= 0` or `divisions < 1`
    /// fails with [`EntityError::InvalidArgument`] rather than clamping to
    /// empty geometry.
    pub fn new(
        ctx: &RenderCtx<'_>,
        pipeline: &EntityPipeline,
        size: f32,
        divisions: u32,
    ) -> Result<Self, EntityError> {
        if !(size > 0.0) {
            return Err(EntityError::InvalidArgument(format!(
                "grid size must be positive, got {size}"
            )));
        }
        if divisions < 1 {
            return Err(EntityError::InvalidArgument(format!(
                "grid divisions must be >= 1, got {divisions}"
            )));
        }

        let mut mesh = MeshBuffer::new();
        mesh.upload(ctx, &grid_vertices(size, divisions))?;

        Ok(Self {
            mesh,
            binding: pipeline.create_model_binding(ctx.device),
            color: [0.35, 0.35, 0.4, 1.0],
        })
    }

    pub fn vertex_count(&self) -> u32 {
        self.mesh.vertex_count()
    }
}

impl Entity for Grid {
    fn update(&mut self, _ctx: &RenderCtx<'_>, _dt: f32) -> Result<(), EntityError> {
        // Static geometry; nothing to advance.
        Ok(())
    }

    fn draw(&self, ctx: &mut DrawCtx<'_, '_>) -> Result<(), EntityError> {
        let vbo = self.mesh.slice().ok_or(EntityError::NotInitialized)?;

        self.binding.write(ctx.queue, Mat4::IDENTITY, self.color);

        ctx.pass.set_pipeline(ctx.pipeline.lines());
        ctx.pass.set_bind_group(1, self.binding.bind_group(), &[]);
        ctx.pass.set_vertex_buffer(0, vbo);
        ctx.pass.draw(0..self.mesh.vertex_count(), 0..1);

        Ok(())
    }
}

/// Generates the grid's line-segment endpoints as flat (x, y, z) floats.
///
/// For each step i in `0..=divisions` at `pos = -size/2 + i * size/divisions`,
/// emits one segment parallel to Z at X = pos and one parallel to X at
/// Z = pos, both spanning the full square at Y = 0. Total vertices:
/// `4 * (divisions + 1)`.
pub fn grid_vertices(size: f32, divisions: u32) -> Vec<f32> {
    let half = size / 2.0;
    let step = size / divisions as f32;

    let mut out = Vec::with_capacity(((divisions + 1) * 4 * 3) as usize);
    for i in 0..=divisions {
        let pos = -half + i as f32 * step;

        out.extend_from_slice(&[pos, 0.0, -half, pos, 0.0, half]);
        out.extend_from_slice(&[-half, 0.0, pos, half, 0.0, pos]);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_count_is_four_per_step() {
        for divisions in [1, 2, 10] {
            let verts = grid_vertices(10.0, divisions);
            assert_eq!(verts.len() as u32, 4 * (divisions + 1) * 3);
        }
    }

    #[test]
    fn ten_by_two_grid_lines_land_on_expected_positions() {
        // size = 10, divisions = 2: lines at -5, 0, 5 spanning -5..5.
        let verts = grid_vertices(10.0, 2);
        let xs: Vec<f32> = verts.chunks_exact(6).step_by(2).map(|seg| seg[0]).collect();
        assert_eq!(xs, vec![-5.0, 0.0, 5.0]);

        // First segment runs parallel to Z at X = -5, from -5 to 5.
        assert_eq!(&verts[0..6], &[-5.0, 0.0, -5.0, -5.0, 0.0, 5.0]);
    }

    #[test]
    fn grid_stays_in_the_xz_plane() {
        let verts = grid_vertices(20.0, 5);
        for chunk in verts.chunks_exact(3) {
            assert_eq!(chunk[1], 0.0);
        }
    }

    #[test]
    fn generation_is_deterministic() {
        assert_eq!(grid_vertices(10.0, 3), grid_vertices(10.0, 3));
    }
}
