use crate::constants::MARKER_CAPACITY;
use viewer_core::markers::MarkerInstance;

pub(crate) const MARKERS_WGSL: &str = concat!(
    include_str!("../../shaders/scene.wgsl"),
    include_str!("../../shaders/markers.wgsl")
);

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct MarkerPacked {
    pub(crate) center_radius: [f32; 4],
    pub(crate) color: [f32; 4],
}

impl From<&MarkerInstance> for MarkerPacked {
    fn from(m: &MarkerInstance) -> Self {
        Self {
            center_radius: [m.position.x, m.position.y, m.position.z, m.radius],
            color: m.color,
        }
    }
}

const INSTANCE_ATTRS: [wgpu::VertexAttribute; 2] =
    wgpu::vertex_attr_array![0 => Float32x4, 1 => Float32x4];

pub(crate) struct MarkerResources {
    pipeline: wgpu::RenderPipeline,
    instance_buffer: wgpu::Buffer,
    count: u32,
}

impl MarkerResources {
    pub(crate) fn new(
        device: &wgpu::Device,
        layout: &wgpu::PipelineLayout,
        format: wgpu::TextureFormat,
    ) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("markers_shader"),
            source: wgpu::ShaderSource::Wgsl(MARKERS_WGSL.into()),
        });
        let instance_layout = wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<MarkerPacked>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &INSTANCE_ATTRS,
        };
        let pipeline = super::helpers::make_scene_pipeline(
            device,
            "markers_pipeline",
            layout,
            &shader,
            &[instance_layout],
            format,
            Some(wgpu::BlendState::ALPHA_BLENDING),
            false,
            None,
        );
        let instance_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("marker_instances"),
            size: (std::mem::size_of::<MarkerPacked>() * MARKER_CAPACITY) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        Self {
            pipeline,
            instance_buffer,
            count: 0,
        }
    }

    /// Uploads this frame's markers; extra markers past capacity are dropped.
    pub(crate) fn write(&mut self, queue: &wgpu::Queue, markers: &[MarkerInstance]) {
        if markers.len() > MARKER_CAPACITY {
            log::warn!(
                "[gpu] {} markers exceed capacity {}",
                markers.len(),
                MARKER_CAPACITY
            );
        }
        let packed: Vec<MarkerPacked> = markers
            .iter()
            .take(MARKER_CAPACITY)
            .map(MarkerPacked::from)
            .collect();
        self.count = packed.len() as u32;
        if !packed.is_empty() {
            queue.write_buffer(&self.instance_buffer, 0, bytemuck::cast_slice(&packed));
        }
    }

    pub(crate) fn draw(&self, rpass: &mut wgpu::RenderPass<'_>) {
        if self.count == 0 {
            return;
        }
        rpass.set_pipeline(&self.pipeline);
        rpass.set_vertex_buffer(0, self.instance_buffer.slice(..));
        rpass.draw(0..6, 0..self.count);
    }

    pub(crate) fn destroy(&self) {
        self.instance_buffer.destroy();
    }
}
