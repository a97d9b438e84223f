//! Thin driver: window creation, the frame loop, and scene setup.
//!
//! Per frame, every entity gets `update(dt)` then `draw`, in that fixed
//! order across the whole collection. Everything else — physical state,
//! geometry derivation, GPU buffer lifecycle — lives in `orrery-engine`.

use anyhow::{Context, Result};
use glam::Vec3;
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use orrery_engine::device::{Gpu, SurfaceErrorAction};
use orrery_engine::entity::{Entity, Grid, Satellite, SatelliteInit, DEFAULT_DENSITY};
use orrery_engine::logging::{init_logging, LoggingConfig};
use orrery_engine::render::{Camera, DrawCtx, EntityPipeline, RenderCtx};
use orrery_engine::time::FrameClock;

const WINDOW_TITLE: &str = "orrery";
const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.008,
    g: 0.008,
    b: 0.016,
    a: 1.0,
};

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut viewer = Viewer::default();
    event_loop
        .run_app(&mut viewer)
        .context("winit event loop terminated with error")?;

    Ok(())
}

/// The surface borrows the window, so the two live in one self-referencing
/// entry, mirroring their shared lifetime.
#[self_referencing]
struct WindowEntry {
    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

#[derive(Default)]
struct Viewer {
    entry: Option<WindowEntry>,
    pipeline: Option<EntityPipeline>,
    camera: Option<Camera>,
    entities: Vec<Box<dyn Entity>>,
    clock: FrameClock,
}

impl Viewer {
    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = Window::default_attributes()
            .with_title(WINDOW_TITLE)
            .with_inner_size(LogicalSize::new(1280.0, 720.0));
        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        let entry = WindowEntryTryBuilder {
            window,
            gpu_builder: |w| pollster::block_on(Gpu::new(w)),
        }
        .try_build()?;

        let gpu = entry.borrow_gpu();
        let pipeline = EntityPipeline::new(gpu.device(), gpu.surface_format());

        let size = gpu.size();
        let mut camera = Camera::looking_at(Vec3::new(0.0, 150.0, 320.0), Vec3::ZERO, 1.0);
        camera.set_aspect(size.width, size.height);

        self.entities = build_scene(&RenderCtx::new(gpu.device(), gpu.queue()), &pipeline)?;
        log::info!("scene ready: {} entities", self.entities.len());

        self.pipeline = Some(pipeline);
        self.camera = Some(camera);
        self.entry = Some(entry);
        self.clock.reset();
        Ok(())
    }

    fn frame(&mut self, event_loop: &ActiveEventLoop) {
        let (Some(entry), Some(pipeline), Some(camera)) =
            (self.entry.as_mut(), self.pipeline.as_ref(), self.camera.as_ref())
        else {
            return;
        };

        let dt = self.clock.tick().dt;

        entry.with_gpu_mut(|gpu| {
            let ctx = RenderCtx::new(gpu.device(), gpu.queue());
            for entity in &mut self.entities {
                if let Err(e) = entity.update(&ctx, dt) {
                    log::error!("entity update failed: {e}");
                    event_loop.exit();
                    return;
                }
            }

            pipeline.write_camera(gpu.queue(), camera);

            let mut frame = match gpu.begin_frame() {
                Ok(frame) => frame,
                Err(err) => match gpu.handle_surface_error(err) {
                    SurfaceErrorAction::Reconfigured | SurfaceErrorAction::SkipFrame => return,
                    SurfaceErrorAction::Fatal => {
                        log::error!("fatal surface error; exiting");
                        event_loop.exit();
                        return;
                    }
                },
            };

            {
                let mut pass = frame.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("orrery entity pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: &frame.view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                            store: wgpu::StoreOp::Store,
                        },
                        depth_slice: None,
                    })],
                    depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                        view: gpu.depth_view(),
                        depth_ops: Some(wgpu::Operations {
                            load: wgpu::LoadOp::Clear(1.0),
                            store: wgpu::StoreOp::Store,
                        }),
                        stencil_ops: None,
                    }),
                    timestamp_writes: None,
                    occlusion_query_set: None,
                    multiview_mask: None,
                });

                pipeline.bind_camera(&mut pass);
                let mut draw_ctx = DrawCtx::new(gpu.queue(), pipeline, &mut pass);
                for entity in &self.entities {
                    if let Err(e) = entity.draw(&mut draw_ctx) {
                        log::error!("entity draw failed: {e}");
                    }
                }
            }

            gpu.submit(frame);
        });

        if let Some(entry) = self.entry.as_ref() {
            entry.borrow_window().request_redraw();
        }
    }
}

impl ApplicationHandler for Viewer {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.entry.is_some() {
            return;
        }
        if let Err(e) = self.init(event_loop) {
            log::error!("initialization failed: {e:#}");
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state.is_pressed()
                    && event.physical_key == PhysicalKey::Code(KeyCode::Escape)
                {
                    event_loop.exit();
                }
            }
            WindowEvent::Resized(new_size) => {
                if let Some(entry) = self.entry.as_mut() {
                    entry.with_gpu_mut(|gpu| gpu.resize(new_size));
                }
                if let Some(camera) = self.camera.as_mut() {
                    camera.set_aspect(new_size.width, new_size.height);
                }
            }
            WindowEvent::RedrawRequested => self.frame(event_loop),
            _ => {}
        }
    }
}

/// One reference grid plus a handful of rocky bodies drifting across it.
fn build_scene(ctx: &RenderCtx<'_>, pipeline: &EntityPipeline) -> Result<Vec<Box<dyn Entity>>> {
    let mut entities: Vec<Box<dyn Entity>> = Vec::new();

    entities.push(Box::new(Grid::new(ctx, pipeline, 400.0, 20)?));

    // Moon-sized rock, default red, drifting along +X.
    entities.push(Box::new(Satellite::new(
        ctx,
        pipeline,
        SatelliteInit {
            position: Vec3::new(-120.0, 25.0, 0.0),
            velocity: Vec3::new(6.0, 0.0, 0.0),
            mass: 7.35e22,
            ..SatelliteInit::default()
        },
    )?));

    // Denser, smaller body crossing on Z.
    entities.push(Box::new(Satellite::new(
        ctx,
        pipeline,
        SatelliteInit {
            position: Vec3::new(60.0, 40.0, -90.0),
            velocity: Vec3::new(0.0, 0.0, 9.0),
            mass: 1.2e22,
            density: 5514.0,
            color: [0.3, 0.6, 1.0, 1.0],
            ..SatelliteInit::default()
        },
    )?));

    // Light icy body, slow climb.
    entities.push(Box::new(Satellite::new(
        ctx,
        pipeline,
        SatelliteInit {
            position: Vec3::new(20.0, 10.0, 70.0),
            velocity: Vec3::new(-2.0, 1.5, -2.0),
            mass: 3.0e21,
            density: DEFAULT_DENSITY * 0.4,
            color: [0.8, 0.9, 1.0, 1.0],
            ..SatelliteInit::default()
        },
    )?));

    Ok(entities)
}
