use crate::render::RenderCtx;

use super::EntityError;

/// Size of one vertex: 3 tightly packed f32 coordinates.
const VERTEX_STRIDE: u64 = 3 * std::mem::size_of::<f32>() as u64;

/// Owning wrapper around an entity's GPU vertex buffer.
///
/// Exactly one `MeshBuffer` exists per entity; the wgpu buffer handle is
/// never shared or duplicated across the hierarchy, and it is released when
/// the owning entity is dropped.
///
/// Invariant: after a successful [`upload`](Self::upload), `vertex_count`
/// equals the length of the uploaded vertex list divided by 3, and the GPU
/// buffer contents match that list in full. Uploads always replace prior
/// contents, never append.
#[derive(Debug, Default)]
pub struct MeshBuffer {
    buffer: Option<wgpu::Buffer>,
    capacity: u64,
    vertex_count: u32,
}

impl MeshBuffer {
    /// Creates an empty mesh buffer with no GPU allocation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of vertices currently uploaded.
    pub fn vertex_count(&self) -> u32 {
        self.vertex_count
    }

    /// Slice covering exactly the uploaded vertex data, or `None` before
    /// the first upload.
    pub fn slice(&self) -> Option<wgpu::BufferSlice<'_>> {
        let buffer = self.buffer.as_ref()?;
        if self.vertex_count == 0 {
            return None;
        }
        Some(buffer.slice(..u64::from(self.vertex_count) * VERTEX_STRIDE))
    }

    /// Uploads `vertices` (x, y, z triples), fully replacing any prior
    /// contents.
    ///
    /// The underlying buffer is reallocated only when the data outgrows the
    /// current capacity; otherwise it is overwritten in place. Safe to call
    /// repeatedly with identical data.
    pub fn upload(&mut self, ctx: &RenderCtx<'_>, vertices: &[f32]) -> Result<(), EntityError> {
        let vertex_count = validate_vertices(vertices)?;
        let byte_len = vertices.len() as u64 * std::mem::size_of::<f32>() as u64;

        let max = ctx.device.limits().max_buffer_size;
        if byte_len > max {
            return Err(EntityError::ResourceCreationFailed(format!(
                "mesh of {byte_len} bytes exceeds device max_buffer_size ({max})"
            )));
        }

        if self.buffer.is_none() || byte_len > self.capacity {
            let capacity = byte_len.next_power_of_two().min(max);
            self.buffer = Some(ctx.device.create_buffer(&wgpu::BufferDescriptor {
                label: Some("orrery entity mesh vbo"),
                size: capacity,
                usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            }));
            self.capacity = capacity;
        }

        // Safety: the branch above allocates when `buffer` is None.
        let buffer = self.buffer.as_ref().expect("buffer allocated above");
        ctx.queue.write_buffer(buffer, 0, bytemuck::cast_slice(vertices));
        self.vertex_count = vertex_count;

        Ok(())
    }
}

/// Checks that `vertices` holds at least one complete (x, y, z) triple and
/// returns the vertex count.
fn validate_vertices(vertices: &[f32]) -> Result<u32, EntityError> {
    if vertices.is_empty() {
        return Err(EntityError::InvalidArgument(
            "vertex upload requires at least one vertex".into(),
        ));
    }
    if vertices.len() % 3 != 0 {
        return Err(EntityError::InvalidArgument(format!(
            "vertex data length {} is not a multiple of 3",
            vertices.len()
        )));
    }
    u32::try_from(vertices.len() / 3).map_err(|_| {
        EntityError::InvalidArgument(format!(
            "vertex count {} exceeds u32 range",
            vertices.len() / 3
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_vertex_data_is_rejected() {
        assert!(matches!(
            validate_vertices(&[]),
            Err(EntityError::InvalidArgument(_))
        ));
    }

    #[test]
    fn ragged_vertex_data_is_rejected() {
        assert!(matches!(
            validate_vertices(&[1.0, 2.0]),
            Err(EntityError::InvalidArgument(_))
        ));
    }

    #[test]
    fn vertex_count_is_floats_over_three() {
        assert_eq!(validate_vertices(&[0.0; 18]).unwrap(), 6);
    }

    #[test]
    fn fresh_buffer_reports_zero_vertices() {
        let mesh = MeshBuffer::new();
        assert_eq!(mesh.vertex_count(), 0);
        assert!(mesh.slice().is_none());
    }
}
