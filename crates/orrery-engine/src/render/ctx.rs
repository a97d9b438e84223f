use super::pipeline::EntityPipeline;

/// Upload-facing context (device + queue).
///
/// This is intentionally small and stable: entity constructors and
/// `update` take it to allocate and overwrite vertex buffers.
pub struct RenderCtx<'a> {
    pub device: &'a wgpu::Device,
    pub queue: &'a wgpu::Queue,
}

impl<'a> RenderCtx<'a> {
    #[inline]
    pub fn new(device: &'a wgpu::Device, queue: &'a wgpu::Queue) -> Self {
        Self { device, queue }
    }
}

/// Draw-facing context: the active render pass plus what entities need to
/// record into it.
pub struct DrawCtx<'a, 'e> {
    pub queue: &'a wgpu::Queue,
    pub pipeline: &'a EntityPipeline,
    pub pass: &'a mut wgpu::RenderPass<'e>,
}

impl<'a, 'e> DrawCtx<'a, 'e> {
    #[inline]
    pub fn new(
        queue: &'a wgpu::Queue,
        pipeline: &'a EntityPipeline,
        pass: &'a mut wgpu::RenderPass<'e>,
    ) -> Self {
        Self {
            queue,
            pipeline,
            pass,
        }
    }
}
