use backdrop_core::{Camera, Frame, Rgb, SceneHost, EDGE_OPACITY, NODE_OPACITY};
use glam::{Mat4, Vec2, Vec3};
use wgpu::util::DeviceExt;

use crate::pipelines::{
    create_scene_pipelines, create_uniform_resources, GrowableBuffer, NodeInstance,
    SceneUniforms, ScenePipelines, UniformResources, QUAD_CORNERS,
};

pub struct GpuState<'w> {
    surface: wgpu::Surface<'w>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    pipelines: ScenePipelines,
    uniforms: UniformResources,
    quad_vb: wgpu::Buffer,
    instance_vb: GrowableBuffer,
    edge_vb: GrowableBuffer,
    instances: Vec<NodeInstance>,
    camera: Camera,
    width: u32,
    height: u32,
}

impl<'w> GpuState<'w> {
    /// Pick an adapter for `surface`, open a device and configure the surface
    /// at `width` x `height`.
    pub async fn new(
        instance: &wgpu::Instance,
        surface: wgpu::Surface<'w>,
        width: u32,
        height: u32,
        mut camera: Camera,
    ) -> anyhow::Result<Self> {
        let width = width.max(1);
        let height = height.max(1);
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No GPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    // default limits keep older WebGPU implementations happy
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;

        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        // the page must show through, so prefer a compositing alpha mode
        let alpha_mode = [
            wgpu::CompositeAlphaMode::PreMultiplied,
            wgpu::CompositeAlphaMode::PostMultiplied,
        ]
        .into_iter()
        .find(|m| caps.alpha_modes.contains(m))
        .or_else(|| caps.alpha_modes.first().copied())
        .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        log::info!(
            "[render] surface {}x{} format={:?} alpha={:?}",
            width,
            height,
            format,
            alpha_mode
        );

        let uniforms = create_uniform_resources(&device);
        let pipelines = create_scene_pipelines(&device, &uniforms.layout, format);
        let quad_vb = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("quad_vb"),
            contents: bytemuck::cast_slice(&QUAD_CORNERS),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let instance_vb = GrowableBuffer::new(
            &device,
            "instance_vb",
            (std::mem::size_of::<NodeInstance>() * backdrop_core::NODE_COUNT) as u64,
        );
        let edge_vb = GrowableBuffer::new(
            &device,
            "edge_vb",
            (std::mem::size_of::<[f32; 3]>() * backdrop_core::NODE_COUNT * 8) as u64,
        );
        camera.set_viewport(width, height);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            pipelines,
            uniforms,
            quad_vb,
            instance_vb,
            edge_vb,
            instances: Vec::with_capacity(backdrop_core::NODE_COUNT),
            camera,
            width,
            height,
        })
    }

    fn reconfigure(&mut self) {
        self.config.width = self.width;
        self.config.height = self.height;
        self.surface.configure(&self.device, &self.config);
    }

    fn scene_uniforms(&self, frame: &Frame<'_>) -> SceneUniforms {
        let model = Mat4::from_rotation_y(frame.rotation_y);
        let color = shader_color(frame.color, self.config.format);
        SceneUniforms {
            model: model.to_cols_array_2d(),
            view: self.camera.view_matrix().to_cols_array_2d(),
            proj: self.camera.projection_matrix().to_cols_array_2d(),
            node_color: color.with_alpha(NODE_OPACITY),
            edge_color: color.with_alpha(EDGE_OPACITY),
        }
    }
}

/// Palette values are sRGB; an `*Srgb` target re-encodes on write, so the
/// shader must see linear values there.
fn shader_color(color: Rgb, format: wgpu::TextureFormat) -> Rgb {
    if format.is_srgb() {
        color.to_linear()
    } else {
        color
    }
}

impl SceneHost for GpuState<'_> {
    type Error = wgpu::SurfaceError;

    fn draw(&mut self, frame: &Frame<'_>) -> Result<(), Self::Error> {
        let surface_tex = match self.surface.get_current_texture() {
            Ok(t) => t,
            Err(e @ (wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated)) => {
                // next frame draws against the fresh configuration
                self.reconfigure();
                return Err(e);
            }
            Err(e) => return Err(e),
        };
        let view = surface_tex
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let uniforms = self.scene_uniforms(frame);
        self.queue
            .write_buffer(&self.uniforms.buffer, 0, bytemuck::bytes_of(&uniforms));

        self.instances.clear();
        self.instances
            .extend(frame.nodes.iter().map(|n| NodeInstance {
                center: n.position.to_array(),
                radius: n.radius,
            }));
        self.instance_vb.write(
            &self.device,
            &self.queue,
            bytemuck::cast_slice(&self.instances),
        );
        let segments = frame.edges.segments();
        self.edge_vb
            .write(&self.device, &self.queue, bytemuck::cast_slice(segments));

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::TRANSPARENT),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_bind_group(0, &self.uniforms.bind_group, &[]);

            if !segments.is_empty() {
                rpass.set_pipeline(&self.pipelines.edges);
                rpass.set_vertex_buffer(0, self.edge_vb.buffer.slice(..));
                rpass.draw(0..segments.len() as u32, 0..1);
            }
            if !self.instances.is_empty() {
                rpass.set_pipeline(&self.pipelines.nodes);
                rpass.set_vertex_buffer(0, self.quad_vb.slice(..));
                rpass.set_vertex_buffer(1, self.instance_vb.buffer.slice(..));
                rpass.draw(0..6, 0..self.instances.len() as u32);
            }
        }
        self.queue.submit(Some(encoder.finish()));
        surface_tex.present();
        Ok(())
    }

    fn on_resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.reconfigure();
            self.camera.set_viewport(width, height);
            log::debug!("[render] resized to {}x{}", width, height);
        }
    }

    fn world_point_from_ndc(&self, ndc: Vec2, depth: f32) -> Vec3 {
        self.camera.unproject_to_plane(ndc, depth)
    }
}
