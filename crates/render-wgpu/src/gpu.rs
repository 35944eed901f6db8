use glam::Mat4;
use spincube_render::{
    BufferHandle, DeviceError, GpuDevice, ProgramDesc, ProgramHandle, ShaderStage,
    ShaderStageHandle, StageSource, VertexFormat, VertexLayout, VertexLayoutHandle, Viewport,
};
use std::collections::BTreeMap;
use std::ops::Range;
use thiserror::Error;
use wgpu::util::DeviceExt;

const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;
const MAT4_SIZE: u64 = std::mem::size_of::<[f32; 16]>() as u64;

/// Initial surface configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceSettings {
    pub width: u32,
    pub height: u32,
    pub vsync: bool,
}

/// Failure to bring up the GPU.
#[derive(Debug, Error)]
pub enum InitError {
    #[error("failed to create surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),
    #[error("no compatible GPU adapter found")]
    NoAdapter,
    #[error("surface reports no supported formats")]
    UnsupportedSurface,
    #[error("failed to create device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),
}

struct Layout {
    buffer: BufferHandle,
    stride: u64,
    attributes: Vec<wgpu::VertexAttribute>,
}

struct Stage {
    stage: ShaderStage,
    module: wgpu::ShaderModule,
    entry_point: String,
}

struct Program {
    pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    uniforms: Vec<String>,
}

struct DrawCall {
    program: ProgramHandle,
    layout: VertexLayoutHandle,
    vertices: Range<u32>,
}

/// Commands recorded since the last present.
#[derive(Default)]
struct PendingFrame {
    clear_color: bool,
    clear_depth: bool,
    draws: Vec<DrawCall>,
}

/// Handle counter and current bindings.
#[derive(Debug, Default)]
struct Bindings {
    next_id: u32,
    buffer: Option<BufferHandle>,
    layout: Option<VertexLayoutHandle>,
    program: Option<ProgramHandle>,
}

impl Bindings {
    fn alloc_id(&mut self) -> u32 {
        self.next_id += 1;
        self.next_id
    }

    fn forget_buffer(&mut self, buffer: BufferHandle) {
        if self.buffer == Some(buffer) {
            tracing::warn!("deleting bound vertex buffer {}", buffer.0);
            self.buffer = None;
        }
    }

    fn forget_layout(&mut self, layout: VertexLayoutHandle) {
        if self.layout == Some(layout) {
            tracing::warn!("deleting bound vertex layout {}", layout.0);
            self.layout = None;
        }
    }

    fn forget_program(&mut self, program: ProgramHandle) {
        if self.program == Some(program) {
            tracing::warn!("deleting active shader program {}", program.0);
            self.program = None;
        }
    }

    /// Program and layout a draw recorded now would use.
    fn draw_target(&self) -> Option<(ProgramHandle, VertexLayoutHandle)> {
        Some((self.program?, self.layout?))
    }
}

/// [`GpuDevice`] backed by a wgpu surface, device and queue.
///
/// Handles index into per-kind tables and are never reused. Pipelines are
/// built at link time from the program's vertex layout and the current
/// depth-test setting. Clears and draws are recorded and encoded into a
/// single render pass on [`GpuDevice::present`]; uniform writes go straight
/// to the queue, so every draw in a frame sees the last value written.
pub struct WgpuDevice {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    depth_view: wgpu::TextureView,

    buffers: BTreeMap<u32, wgpu::Buffer>,
    layouts: BTreeMap<u32, Layout>,
    stages: BTreeMap<u32, Stage>,
    programs: BTreeMap<u32, Program>,

    bindings: Bindings,

    clear_color: wgpu::Color,
    depth_test: bool,
    viewport: Viewport,
    frame: PendingFrame,
}

impl WgpuDevice {
    /// Create a device presenting to `target`.
    pub fn new(
        target: impl Into<wgpu::SurfaceTarget<'static>>,
        settings: SurfaceSettings,
    ) -> Result<Self, InitError> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let surface = instance.create_surface(target)?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .ok_or(InitError::NoAdapter)?;

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("spincube_device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
            },
            None,
        ))?;

        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or_else(|| caps.formats.first())
            .copied()
            .ok_or(InitError::UnsupportedSurface)?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: settings.width.max(1),
            height: settings.height.max(1),
            present_mode: present_mode(settings.vsync),
            alpha_mode: alpha_mode(&caps.alpha_modes),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        let depth_view = create_depth_view(&device, config.width, config.height);

        let info = adapter.get_info();
        tracing::info!(
            backend = info.backend.to_str(),
            adapter = %info.name,
            ?format,
            "GPU initialized"
        );

        Ok(Self {
            surface,
            device,
            queue,
            viewport: Viewport::full(config.width, config.height),
            config,
            depth_view,
            buffers: BTreeMap::new(),
            layouts: BTreeMap::new(),
            stages: BTreeMap::new(),
            programs: BTreeMap::new(),
            bindings: Bindings::default(),
            clear_color: wgpu::Color::TRANSPARENT,
            depth_test: false,
            frame: PendingFrame::default(),
        })
    }

    /// Reconfigure the swap chain and depth buffer for a new window size.
    ///
    /// The viewport is left alone; that is the renderer's call.
    pub fn resize_surface(&mut self, width: u32, height: u32) {
        self.config.width = width.max(1);
        self.config.height = height.max(1);
        self.surface.configure(&self.device, &self.config);
        self.depth_view = create_depth_view(&self.device, self.config.width, self.config.height);
    }

    /// Current surface size in pixels.
    pub fn surface_size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    fn build_program(&self, desc: &ProgramDesc<'_>) -> Result<Program, DeviceError> {
        let vertex = self
            .stages
            .get(&desc.vertex.0)
            .ok_or_else(|| unknown("shader stage", desc.vertex.0))?;
        let fragment = self
            .stages
            .get(&desc.fragment.0)
            .ok_or_else(|| unknown("shader stage", desc.fragment.0))?;
        if vertex.stage != ShaderStage::Vertex || fragment.stage != ShaderStage::Fragment {
            return Err(DeviceError::Link {
                diagnostic: format!(
                    "expected vertex + fragment stages, got {} + {}",
                    vertex.stage, fragment.stage
                ),
            });
        }
        let layout = self
            .layouts
            .get(&desc.layout.0)
            .ok_or_else(|| unknown("vertex layout", desc.layout.0))?;

        let uniform_buffer = self.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("program_uniforms"),
            size: desc.uniforms.len().max(1) as u64 * MAT4_SIZE,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group_layout =
            self.device
                .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                    label: Some("program_bind_group_layout"),
                    entries: &[wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::VERTEX,
                        ty: wgpu::BindingType::Buffer {
                            ty: wgpu::BufferBindingType::Uniform,
                            has_dynamic_offset: false,
                            min_binding_size: None,
                        },
                        count: None,
                    }],
                });

        let bind_group = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("program_bind_group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let pipeline_layout = self
            .device
            .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("program_pipeline_layout"),
                bind_group_layouts: &[&bind_group_layout],
                push_constant_ranges: &[],
            });

        self.device.push_error_scope(wgpu::ErrorFilter::Validation);
        let pipeline = self
            .device
            .create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some("program_pipeline"),
                layout: Some(&pipeline_layout),
                vertex: wgpu::VertexState {
                    module: &vertex.module,
                    entry_point: Some(vertex.entry_point.as_str()),
                    compilation_options: Default::default(),
                    buffers: &[wgpu::VertexBufferLayout {
                        array_stride: layout.stride,
                        step_mode: wgpu::VertexStepMode::Vertex,
                        attributes: &layout.attributes,
                    }],
                },
                fragment: Some(wgpu::FragmentState {
                    module: &fragment.module,
                    entry_point: Some(fragment.entry_point.as_str()),
                    compilation_options: Default::default(),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: self.config.format,
                        blend: Some(wgpu::BlendState::REPLACE),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                }),
                primitive: wgpu::PrimitiveState {
                    topology: wgpu::PrimitiveTopology::TriangleList,
                    // Cube triangles do not share a winding order.
                    cull_mode: None,
                    ..Default::default()
                },
                depth_stencil: Some(wgpu::DepthStencilState {
                    format: DEPTH_FORMAT,
                    depth_write_enabled: self.depth_test,
                    depth_compare: if self.depth_test {
                        wgpu::CompareFunction::Less
                    } else {
                        wgpu::CompareFunction::Always
                    },
                    stencil: Default::default(),
                    bias: Default::default(),
                }),
                multisample: Default::default(),
                multiview: None,
                cache: None,
            });
        if let Some(err) = pollster::block_on(self.device.pop_error_scope()) {
            uniform_buffer.destroy();
            return Err(DeviceError::Link {
                diagnostic: err.to_string(),
            });
        }

        Ok(Program {
            pipeline,
            uniform_buffer,
            bind_group,
            uniforms: desc.uniforms.iter().map(|u| u.to_string()).collect(),
        })
    }

    fn encode_frame(
        &self,
        frame: &PendingFrame,
        target: &wgpu::TextureView,
    ) -> wgpu::CommandBuffer {
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("frame_encoder"),
            });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("frame_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: target,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: if frame.clear_color {
                            wgpu::LoadOp::Clear(self.clear_color)
                        } else {
                            wgpu::LoadOp::Load
                        },
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: if frame.clear_depth {
                            wgpu::LoadOp::Clear(1.0)
                        } else {
                            wgpu::LoadOp::Load
                        },
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                ..Default::default()
            });

            let [x, y, w, h] = clamp_viewport(self.viewport, self.config.width, self.config.height);
            pass.set_viewport(x, y, w, h, 0.0, 1.0);

            for draw in &frame.draws {
                let (Some(program), Some(layout)) = (
                    self.programs.get(&draw.program.0),
                    self.layouts.get(&draw.layout.0),
                ) else {
                    tracing::warn!("skipping draw with a deleted program or layout");
                    continue;
                };
                let Some(buffer) = self.buffers.get(&layout.buffer.0) else {
                    tracing::warn!(
                        "skipping draw from deleted vertex buffer {}",
                        layout.buffer.0
                    );
                    continue;
                };
                pass.set_pipeline(&program.pipeline);
                pass.set_bind_group(0, &program.bind_group, &[]);
                pass.set_vertex_buffer(0, buffer.slice(..));
                pass.draw(draw.vertices.clone(), 0..1);
            }
        }

        encoder.finish()
    }
}

impl GpuDevice for WgpuDevice {
    fn create_vertex_buffer(
        &mut self,
        label: &str,
        contents: &[u8],
    ) -> Result<BufferHandle, DeviceError> {
        let buffer = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(label),
                contents,
                usage: wgpu::BufferUsages::VERTEX,
            });
        let id = self.bindings.alloc_id();
        self.buffers.insert(id, buffer);
        tracing::debug!(id, bytes = contents.len(), "created vertex buffer {label}");
        Ok(BufferHandle(id))
    }

    fn delete_buffer(&mut self, buffer: BufferHandle) -> Result<(), DeviceError> {
        self.bindings.forget_buffer(buffer);
        let removed = self
            .buffers
            .remove(&buffer.0)
            .ok_or_else(|| unknown("buffer", buffer.0))?;
        removed.destroy();
        tracing::debug!(id = buffer.0, "deleted vertex buffer");
        Ok(())
    }

    fn bind_buffer(&mut self, buffer: Option<BufferHandle>) {
        self.bindings.buffer = buffer;
    }

    fn create_vertex_layout(
        &mut self,
        layout: &VertexLayout,
    ) -> Result<VertexLayoutHandle, DeviceError> {
        if !self.buffers.contains_key(&layout.buffer.0) {
            return Err(unknown("buffer", layout.buffer.0));
        }
        let attributes = layout
            .attributes
            .iter()
            .map(|a| wgpu::VertexAttribute {
                format: vertex_format(a.format),
                offset: a.offset,
                shader_location: a.location,
            })
            .collect();
        let id = self.bindings.alloc_id();
        self.layouts.insert(
            id,
            Layout {
                buffer: layout.buffer,
                stride: layout.stride,
                attributes,
            },
        );
        tracing::debug!(id, stride = layout.stride, "recorded vertex layout");
        Ok(VertexLayoutHandle(id))
    }

    fn delete_vertex_layout(&mut self, layout: VertexLayoutHandle) -> Result<(), DeviceError> {
        self.bindings.forget_layout(layout);
        self.layouts
            .remove(&layout.0)
            .ok_or_else(|| unknown("vertex layout", layout.0))?;
        Ok(())
    }

    fn bind_vertex_layout(&mut self, layout: Option<VertexLayoutHandle>) {
        self.bindings.layout = layout;
    }

    fn compile_stage(
        &mut self,
        source: &StageSource<'_>,
    ) -> Result<ShaderStageHandle, DeviceError> {
        self.device.push_error_scope(wgpu::ErrorFilter::Validation);
        let module = self
            .device
            .create_shader_module(wgpu::ShaderModuleDescriptor {
                label: Some(source.label),
                source: wgpu::ShaderSource::Wgsl(source.source.into()),
            });
        if let Some(err) = pollster::block_on(self.device.pop_error_scope()) {
            return Err(DeviceError::Compile {
                diagnostic: err.to_string(),
            });
        }

        let id = self.bindings.alloc_id();
        self.stages.insert(
            id,
            Stage {
                stage: source.stage,
                module,
                entry_point: source.entry_point.to_string(),
            },
        );
        tracing::debug!(id, "compiled {}", source.stage);
        Ok(ShaderStageHandle(id))
    }

    fn delete_stage(&mut self, stage: ShaderStageHandle) -> Result<(), DeviceError> {
        self.stages
            .remove(&stage.0)
            .ok_or_else(|| unknown("shader stage", stage.0))?;
        Ok(())
    }

    fn link_program(&mut self, desc: &ProgramDesc<'_>) -> Result<ProgramHandle, DeviceError> {
        let program = self.build_program(desc)?;
        let id = self.bindings.alloc_id();
        self.programs.insert(id, program);
        tracing::debug!(id, "linked shader program");
        Ok(ProgramHandle(id))
    }

    fn delete_program(&mut self, program: ProgramHandle) -> Result<(), DeviceError> {
        self.bindings.forget_program(program);
        let removed = self
            .programs
            .remove(&program.0)
            .ok_or_else(|| unknown("program", program.0))?;
        removed.uniform_buffer.destroy();
        Ok(())
    }

    fn use_program(&mut self, program: Option<ProgramHandle>) {
        self.bindings.program = program;
    }

    fn set_uniform_mat4(
        &mut self,
        program: ProgramHandle,
        name: &str,
        value: &Mat4,
    ) -> Result<(), DeviceError> {
        let target = self
            .programs
            .get(&program.0)
            .ok_or_else(|| unknown("program", program.0))?;
        let slot = target
            .uniforms
            .iter()
            .position(|u| u == name)
            .ok_or_else(|| DeviceError::UnknownUniform(name.to_string()))?;
        self.queue.write_buffer(
            &target.uniform_buffer,
            slot as u64 * MAT4_SIZE,
            bytemuck::bytes_of(&value.to_cols_array()),
        );
        Ok(())
    }

    fn set_clear_color(&mut self, [r, g, b, a]: [f32; 4]) {
        self.clear_color = wgpu::Color {
            r: r as f64,
            g: g as f64,
            b: b as f64,
            a: a as f64,
        };
    }

    fn set_depth_test(&mut self, enabled: bool) {
        self.depth_test = enabled;
    }

    fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    fn clear(&mut self, color: bool, depth: bool) {
        self.frame.clear_color |= color;
        self.frame.clear_depth |= depth;
    }

    fn draw_triangles(&mut self, first: u32, count: u32) -> Result<(), DeviceError> {
        let (program, layout) = self
            .bindings
            .draw_target()
            .ok_or(DeviceError::NothingBound)?;
        self.frame.draws.push(DrawCall {
            program,
            layout,
            vertices: first..first + count,
        });
        Ok(())
    }

    fn present(&mut self) -> Result<(), DeviceError> {
        let frame = std::mem::take(&mut self.frame);

        let output = match self.surface.get_current_texture() {
            Ok(t) => t,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.surface.configure(&self.device, &self.config);
                return Err(DeviceError::SurfaceLost);
            }
            Err(e) => return Err(DeviceError::Backend(e.to_string())),
        };
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let commands = self.encode_frame(&frame, &view);
        self.queue.submit(std::iter::once(commands));
        output.present();
        Ok(())
    }

    fn discard_frame(&mut self) {
        self.frame = PendingFrame::default();
    }
}

fn unknown(kind: &'static str, id: u32) -> DeviceError {
    DeviceError::UnknownHandle { kind, id }
}

fn vertex_format(format: VertexFormat) -> wgpu::VertexFormat {
    match format {
        VertexFormat::Float32x2 => wgpu::VertexFormat::Float32x2,
        VertexFormat::Float32x3 => wgpu::VertexFormat::Float32x3,
        VertexFormat::Float32x4 => wgpu::VertexFormat::Float32x4,
    }
}

/// Prefer opaque compositing; the renderer clears with zero alpha.
fn alpha_mode(modes: &[wgpu::CompositeAlphaMode]) -> wgpu::CompositeAlphaMode {
    if modes.contains(&wgpu::CompositeAlphaMode::Opaque) {
        wgpu::CompositeAlphaMode::Opaque
    } else {
        modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto)
    }
}

fn present_mode(vsync: bool) -> wgpu::PresentMode {
    if vsync {
        wgpu::PresentMode::AutoVsync
    } else {
        wgpu::PresentMode::AutoNoVsync
    }
}

/// Fit a viewport inside a `width` x `height` target as `[x, y, w, h]`.
///
/// wgpu rejects viewports that leave the render target, so the region is
/// clipped and kept at least one pixel in each direction.
fn clamp_viewport(viewport: Viewport, width: u32, height: u32) -> [f32; 4] {
    let width = width.max(1);
    let height = height.max(1);
    let x = (viewport.x.max(0) as u32).min(width - 1);
    let y = (viewport.y.max(0) as u32).min(height - 1);
    let w = viewport.width.clamp(1, width - x);
    let h = viewport.height.clamp(1, height - y);
    [x as f32, y as f32, w as f32, h as f32]
}

fn create_depth_view(device: &wgpu::Device, width: u32, height: u32) -> wgpu::TextureView {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("depth_texture"),
        size: wgpu::Extent3d {
            width: width.max(1),
            height: height.max(1),
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: DEPTH_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    texture.create_view(&Default::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viewport_inside_target_is_unchanged() {
        assert_eq!(
            clamp_viewport(Viewport::full(1280, 768), 1280, 768),
            [0.0, 0.0, 1280.0, 768.0]
        );
        assert_eq!(
            clamp_viewport(Viewport::full(1, 1), 1280, 768),
            [0.0, 0.0, 1.0, 1.0]
        );
    }

    #[test]
    fn viewport_larger_than_target_is_clipped() {
        assert_eq!(
            clamp_viewport(Viewport::full(4096, 2160), 1920, 1080),
            [0.0, 0.0, 1920.0, 1080.0]
        );
        let offset = Viewport {
            x: 100,
            y: -20,
            width: 400,
            height: 400,
        };
        assert_eq!(
            clamp_viewport(offset, 300, 200),
            [100.0, 0.0, 200.0, 200.0]
        );
    }

    #[test]
    fn zero_sized_viewport_keeps_one_pixel() {
        assert_eq!(
            clamp_viewport(Viewport::full(0, 0), 0, 0),
            [0.0, 0.0, 1.0, 1.0]
        );
    }

    #[test]
    fn handle_ids_are_never_reused() {
        let mut bindings = Bindings::default();
        let first = bindings.alloc_id();
        let second = bindings.alloc_id();
        assert_eq!((first, second), (1, 2));
        bindings.forget_buffer(BufferHandle(first));
        assert_eq!(bindings.alloc_id(), 3);
    }

    #[test]
    fn deleting_bound_resources_clears_bindings() {
        let mut bindings = Bindings {
            buffer: Some(BufferHandle(1)),
            layout: Some(VertexLayoutHandle(2)),
            program: Some(ProgramHandle(5)),
            ..Default::default()
        };
        assert_eq!(
            bindings.draw_target(),
            Some((ProgramHandle(5), VertexLayoutHandle(2)))
        );

        // Unrelated handles leave bindings alone.
        bindings.forget_buffer(BufferHandle(7));
        bindings.forget_program(ProgramHandle(8));
        assert_eq!(bindings.buffer, Some(BufferHandle(1)));
        assert_eq!(bindings.program, Some(ProgramHandle(5)));

        bindings.forget_buffer(BufferHandle(1));
        bindings.forget_layout(VertexLayoutHandle(2));
        assert_eq!(bindings.buffer, None);
        assert_eq!(bindings.draw_target(), None);

        bindings.layout = Some(VertexLayoutHandle(3));
        bindings.forget_program(ProgramHandle(5));
        assert_eq!(bindings.draw_target(), None);
    }

    #[test]
    fn opaque_alpha_preferred_when_offered() {
        use wgpu::CompositeAlphaMode::{Auto, Inherit, Opaque, PreMultiplied};

        assert_eq!(alpha_mode(&[PreMultiplied, Opaque]), Opaque);
        assert_eq!(alpha_mode(&[Inherit, PreMultiplied]), Inherit);
        assert_eq!(alpha_mode(&[]), Auto);
    }

    #[test]
    fn vsync_selects_present_mode() {
        assert_eq!(present_mode(true), wgpu::PresentMode::AutoVsync);
        assert_eq!(present_mode(false), wgpu::PresentMode::AutoNoVsync);
    }

    #[test]
    fn vertex_formats_map_one_to_one() {
        assert_eq!(
            vertex_format(VertexFormat::Float32x3),
            wgpu::VertexFormat::Float32x3
        );
        assert_eq!(
            vertex_format(VertexFormat::Float32x3).size(),
            VertexFormat::Float32x3.size()
        );
    }
}
