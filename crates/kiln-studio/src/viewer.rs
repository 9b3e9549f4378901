use anyhow::{Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use kiln_engine::device::{Gpu, GpuInit, SurfaceErrorAction};
use kiln_engine::mesh::{allocate_mesh_buffers, MeshBuffers};
use kiln_engine::pipeline::{
    build_pipeline, CameraBinding, CameraUniform, MainPipeline, VertexVariant, CAMERA_GROUP,
};

use crate::geometry;

/// Window and scene configuration.
#[derive(Debug, Clone)]
pub struct ViewerConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
    pub variant: VertexVariant,
    pub clear: wgpu::Color,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            title: "kiln studio".to_string(),
            initial_size: LogicalSize::new(800.0, 600.0),
            variant: VertexVariant::Full,
            clear: wgpu::Color {
                r: 0.05,
                g: 0.05,
                b: 0.08,
                a: 1.0,
            },
        }
    }
}

/// Opens one window, sets up the GPU once and redraws on request.
pub struct Viewer;

impl Viewer {
    pub fn run(config: ViewerConfig, gpu_init: GpuInit) -> Result<()> {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = ViewerState::new(config, gpu_init);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        state.error.map_or(Ok(()), Err)
    }
}

#[self_referencing]
struct WindowEntry {
    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

/// GPU objects created once the presentation context exists.
struct Scene {
    pipeline: MainPipeline,
    camera: CameraBinding,
    mesh: MeshBuffers,
    index_count: u32,
}

impl Scene {
    fn new(gpu: &Gpu<'_>, variant: VertexVariant) -> Result<Self> {
        let pipeline = build_pipeline(gpu.device(), gpu.surface_format(), variant)?;

        let camera = CameraBinding::new(gpu.device(), &pipeline);
        camera.write(gpu.queue(), &CameraUniform::IDENTITY);

        let vertices = geometry::vertex_bytes(variant);
        let indices = geometry::index_bytes();
        let mesh = allocate_mesh_buffers(gpu.device(), vertices.len() as u64, indices.len() as u64);
        gpu.queue().write_buffer(&mesh.vertex, 0, vertices);
        gpu.queue().write_buffer(&mesh.index, 0, indices);

        Ok(Self {
            pipeline,
            camera,
            mesh,
            index_count: geometry::QUAD_INDICES.len() as u32,
        })
    }

    /// Clears, draws the mesh and presents.
    ///
    /// On a surface error the returned action says how to proceed.
    fn draw(
        &self,
        window: &Window,
        gpu: &mut Gpu<'_>,
        clear: wgpu::Color,
    ) -> std::result::Result<(), SurfaceErrorAction> {
        let mut frame = match gpu.begin_frame() {
            Ok(f) => f,
            Err(err) => return Err(gpu.handle_surface_error(err)),
        };

        {
            let mut rpass = frame.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("kiln mesh pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &frame.view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(clear),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            rpass.set_pipeline(self.pipeline.pipeline());
            rpass.set_bind_group(CAMERA_GROUP, self.camera.bind_group(), &[]);
            rpass.set_vertex_buffer(0, self.mesh.vertex.slice(..));
            rpass.set_index_buffer(self.mesh.index.slice(..), wgpu::IndexFormat::Uint16);
            rpass.draw_indexed(0..self.index_count, 0, 0..1);
        }

        window.pre_present_notify();
        gpu.submit(frame);
        Ok(())
    }
}

struct ViewerState {
    config: ViewerConfig,
    gpu_init: GpuInit,

    // Declared before `window` so GPU objects drop first.
    scene: Option<Scene>,
    window: Option<WindowEntry>,

    error: Option<anyhow::Error>,
}

impl ViewerState {
    fn new(config: ViewerConfig, gpu_init: GpuInit) -> Self {
        Self {
            config,
            gpu_init,
            scene: None,
            window: None,
            error: None,
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        log::error!("{err:#}");
        self.error = Some(err);
        event_loop.exit();
    }

    fn create_window(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        let gpu_init = self.gpu_init.clone();
        let entry = WindowEntryTryBuilder {
            window,
            gpu_builder: |w| Gpu::new_blocking(w, gpu_init),
        }
        .try_build()
        .context("GPU initialization failed")?;

        let variant = self.config.variant;
        let scene = entry
            .with_gpu(|gpu| Scene::new(gpu, variant))
            .context("failed to set up the scene")?;

        entry.with_window(|w| w.request_redraw());
        self.scene = Some(scene);
        self.window = Some(entry);
        Ok(())
    }

    fn close(&mut self, event_loop: &ActiveEventLoop) {
        self.scene = None;
        self.window = None;
        event_loop.exit();
    }
}

impl ApplicationHandler for ViewerState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        event_loop.set_control_flow(ControlFlow::Wait);

        if self.window.is_some() {
            return;
        }

        if let Err(err) = self.create_window(event_loop) {
            self.fail(event_loop, err);
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(entry) = self.window.as_mut() else {
            return;
        };

        match event {
            WindowEvent::CloseRequested => self.close(event_loop),

            WindowEvent::Resized(new_size) => {
                entry.with_gpu_mut(|gpu| gpu.resize(new_size));
                entry.with_window(|w| w.request_redraw());
            }

            WindowEvent::ScaleFactorChanged { .. } => {
                let new_size = entry.with_window(|w| w.inner_size());
                entry.with_gpu_mut(|gpu| gpu.resize(new_size));
                entry.with_window(|w| w.request_redraw());
            }

            WindowEvent::RedrawRequested => {
                let Some(scene) = self.scene.as_ref() else {
                    return;
                };
                let clear = self.config.clear;

                let result = entry.with_mut(|fields| scene.draw(fields.window, fields.gpu, clear));

                match result {
                    Ok(()) | Err(SurfaceErrorAction::SkipFrame) => {}
                    Err(SurfaceErrorAction::Reconfigured) => {
                        entry.with_window(|w| w.request_redraw());
                    }
                    Err(SurfaceErrorAction::Fatal) => {
                        self.fail(event_loop, anyhow::anyhow!("surface out of memory"));
                    }
                }
            }

            _ => {}
        }
    }
}
