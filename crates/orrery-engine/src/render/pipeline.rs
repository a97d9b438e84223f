use bytemuck::{Pod, Zeroable};
use glam::Mat4;

use crate::device::DEPTH_FORMAT;

use super::camera::Camera;

/// Pipelines and bindings for drawing entities.
///
/// Owns one WGSL shader module instantiated as two render pipelines — a
/// triangle list for satellite bodies and a line list for the grid — plus
/// the camera uniform (bind group 0). Per-entity model uniforms (bind
/// group 1) are owned by the entities themselves as [`ModelBinding`]s.
pub struct EntityPipeline {
    triangles: wgpu::RenderPipeline,
    lines: wgpu::RenderPipeline,

    model_layout: wgpu::BindGroupLayout,

    camera_ubo: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,
}

impl EntityPipeline {
    /// Creates the pipelines for the given surface format.
    pub fn new(device: &wgpu::Device, surface_format: wgpu::TextureFormat) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("orrery entity shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/entity.wgsl").into()),
        });

        let camera_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("orrery camera bgl"),
            entries: &[uniform_entry::<CameraUniform>(0)],
        });
        let model_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("orrery model bgl"),
            entries: &[uniform_entry::<ModelUniform>(0)],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("orrery entity pipeline layout"),
            bind_group_layouts: &[&camera_layout, &model_layout],
            immediate_size: 0,
        });

        let triangles = create_pipeline(
            device,
            &shader,
            &pipeline_layout,
            surface_format,
            wgpu::PrimitiveTopology::TriangleList,
            "orrery triangle pipeline",
        );
        let lines = create_pipeline(
            device,
            &shader,
            &pipeline_layout,
            surface_format,
            wgpu::PrimitiveTopology::LineList,
            "orrery line pipeline",
        );

        let camera_ubo = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("orrery camera ubo"),
            size: std::mem::size_of::<CameraUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let camera_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("orrery camera bind group"),
            layout: &camera_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_ubo.as_entire_binding(),
            }],
        });

        Self {
            triangles,
            lines,
            model_layout,
            camera_ubo,
            camera_bind_group,
        }
    }

    /// Triangle-list pipeline used by satellite bodies.
    pub fn triangles(&self) -> &wgpu::RenderPipeline {
        &self.triangles
    }

    /// Line-list pipeline used by the grid.
    pub fn lines(&self) -> &wgpu::RenderPipeline {
        &self.lines
    }

    /// Writes the camera's view-projection matrix to the camera uniform.
    pub fn write_camera(&self, queue: &wgpu::Queue, camera: &Camera) {
        let uniform = CameraUniform {
            view_proj: camera.view_proj().to_cols_array_2d(),
        };
        queue.write_buffer(&self.camera_ubo, 0, bytemuck::bytes_of(&uniform));
    }

    /// Binds the camera uniform (group 0) for a render pass.
    pub fn bind_camera(&self, pass: &mut wgpu::RenderPass<'_>) {
        pass.set_bind_group(0, &self.camera_bind_group, &[]);
    }

    /// Creates a per-entity model binding against this pipeline's layout.
    pub fn create_model_binding(&self, device: &wgpu::Device) -> ModelBinding {
        let ubo = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("orrery model ubo"),
            size: std::mem::size_of::<ModelUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("orrery model bind group"),
            layout: &self.model_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: ubo.as_entire_binding(),
            }],
        });
        ModelBinding { ubo, bind_group }
    }
}

/// Per-entity uniform binding: model matrix + color.
///
/// Owned by the entity alongside its vertex buffer; written during draw
/// (a `queue.write_buffer` is a GPU-side copy and leaves CPU state alone).
pub struct ModelBinding {
    ubo: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

impl ModelBinding {
    /// Writes the model matrix (column-major) and straight RGBA color.
    pub fn write(&self, queue: &wgpu::Queue, model: Mat4, color: [f32; 4]) {
        let uniform = ModelUniform {
            model: model.to_cols_array_2d(),
            color,
        };
        queue.write_buffer(&self.ubo, 0, bytemuck::bytes_of(&uniform));
    }

    pub fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }
}

// ── GPU types ─────────────────────────────────────────────────────────────

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct CameraUniform {
    view_proj: [[f32; 4]; 4],
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct ModelUniform {
    model: [[f32; 4]; 4],
    color: [f32; 4],
}

/// Vertex layout: 3 tightly packed f32 at attribute location 0.
const VERTEX_ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x3];

fn vertex_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: (3 * std::mem::size_of::<f32>()) as u64,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &VERTEX_ATTRS,
    }
}

fn uniform_entry<T>(binding: u32) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: false,
            min_binding_size: wgpu::BufferSize::new(std::mem::size_of::<T>() as u64),
        },
        count: None,
    }
}

fn create_pipeline(
    device: &wgpu::Device,
    shader: &wgpu::ShaderModule,
    layout: &wgpu::PipelineLayout,
    surface_format: wgpu::TextureFormat,
    topology: wgpu::PrimitiveTopology,
    label: &str,
) -> wgpu::RenderPipeline {
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(label),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some("vs_main"),
            compilation_options: Default::default(),
            buffers: &[vertex_layout()],
        },
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some("fs_main"),
            compilation_options: Default::default(),
            targets: &[Some(wgpu::ColorTargetState {
                format: surface_format,
                blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                write_mask: wgpu::ColorWrites::ALL,
            })],
        }),
        primitive: wgpu::PrimitiveState {
            topology,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: None,
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },
        depth_stencil: Some(wgpu::DepthStencilState {
            format: DEPTH_FORMAT,
            depth_write_enabled: true,
            depth_compare: wgpu::CompareFunction::Less,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState::default(),
        multiview_mask: None,
        cache: None,
    })
}
