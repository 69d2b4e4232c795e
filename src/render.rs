use crate::constants::{
    AMBIENT_INTENSITY, CLEAR_COLOR, FILL_LIGHT_DIR, FILL_LIGHT_INTENSITY, KEY_LIGHT_DIR,
    KEY_LIGHT_INTENSITY,
};
use crate::mesh::MeshData;
use glam::{Mat4, Vec3};
use viewer_core::camera::Camera;
use viewer_core::viewer::FrameOutput;
use web_sys as web;

mod helpers;
mod markers;
mod model;

use markers::MarkerResources;
use model::ModelBuffers;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct SceneUniforms {
    view_proj: [[f32; 4]; 4],
    model: [[f32; 4]; 4],
    normal_mat: [[f32; 4]; 4],
    key_light: [f32; 4],
    fill_light: [f32; 4],
    ambient: [f32; 4],
    cam_right: [f32; 4],
    cam_up: [f32; 4],
}

impl SceneUniforms {
    fn new(camera: &Camera, model: Mat4) -> Self {
        let forward = (camera.target - camera.eye).normalize_or_zero();
        let mut right = forward.cross(camera.up).normalize_or_zero();
        if right == Vec3::ZERO {
            right = Vec3::X;
        }
        let up = right.cross(forward).normalize_or_zero();
        let k = Vec3::from_array(KEY_LIGHT_DIR);
        let f = Vec3::from_array(FILL_LIGHT_DIR);
        Self {
            view_proj: camera.view_proj().to_cols_array_2d(),
            model: model.to_cols_array_2d(),
            normal_mat: model.inverse().transpose().to_cols_array_2d(),
            key_light: [k.x, k.y, k.z, KEY_LIGHT_INTENSITY],
            fill_light: [f.x, f.y, f.z, FILL_LIGHT_INTENSITY],
            ambient: [AMBIENT_INTENSITY, 0.0, 0.0, 0.0],
            cam_right: right.extend(0.0).to_array(),
            cam_up: up.extend(0.0).to_array(),
        }
    }
}

pub struct GpuState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    depth: (wgpu::Texture, wgpu::TextureView),
    scene_buffer: wgpu::Buffer,
    scene_bind_group: wgpu::BindGroup,
    model_pipeline: wgpu::RenderPipeline,
    model: Option<ModelBuffers>,
    markers: MarkerResources,
    width: u32,
    height: u32,
    clear_color: wgpu::Color,
}

impl GpuState {
    pub async fn new(canvas: &web::HtmlCanvasElement) -> anyhow::Result<Self> {
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
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
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
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

        let depth = helpers::create_depth_texture(&device, width, height);
        let bgl = helpers::uniform_layout(&device, "scene_bgl");
        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("scene_pl"),
            bind_group_layouts: &[&bgl],
            push_constant_ranges: &[],
        });
        let scene_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("scene_uniforms"),
            size: std::mem::size_of::<SceneUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let scene_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("scene_bg"),
            layout: &bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: scene_buffer.as_entire_binding(),
            }],
        });
        let model_pipeline = model::create_model_pipeline(&device, &layout, format);
        let markers = MarkerResources::new(&device, &layout, format);
        log::info!("[gpu] surface {}x{} {:?}", width, height, format);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            depth,
            scene_buffer,
            scene_bind_group,
            model_pipeline,
            model: None,
            markers,
            width,
            height,
            clear_color: wgpu::Color {
                r: CLEAR_COLOR[0],
                g: CLEAR_COLOR[1],
                b: CLEAR_COLOR[2],
                a: 1.0,
            },
        })
    }

    pub fn upload_model(&mut self, mesh: &MeshData) {
        if let Some(old) = self.model.take() {
            old.destroy();
        }
        self.model = Some(ModelBuffers::upload(&self.device, mesh));
        log::info!(
            "[gpu] model uploaded: {} vertices, {} triangles",
            mesh.vertices.len(),
            mesh.triangle_count()
        );
    }

    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
            self.depth.0.destroy();
            self.depth = helpers::create_depth_texture(&self.device, width, height);
        }
    }

    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }

    /// Draws one frame. `None` clears to the background only.
    pub fn render(&mut self, frame_out: Option<&FrameOutput>) -> Result<(), wgpu::SurfaceError> {
        if let Some(out) = frame_out {
            let camera = Camera::from_pose(&out.camera, self.aspect());
            let uniforms = SceneUniforms::new(&camera, out.model_matrix);
            self.queue
                .write_buffer(&self.scene_buffer, 0, bytemuck::bytes_of(&uniforms));
            self.markers.write(&self.queue, &out.markers);
        } else {
            self.markers.write(&self.queue, &[]);
        }

        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
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
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth.1,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            if let (Some(model), Some(_)) = (&self.model, frame_out) {
                rpass.set_bind_group(0, &self.scene_bind_group, &[]);
                rpass.set_pipeline(&self.model_pipeline);
                model.draw(&mut rpass);
                self.markers.draw(&mut rpass);
            }
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }

    pub fn destroy(self) {
        if let Some(model) = &self.model {
            model.destroy();
        }
        self.markers.destroy();
        self.depth.0.destroy();
        self.scene_buffer.destroy();
        self.device.destroy();
        log::info!("[gpu] released");
    }
}
