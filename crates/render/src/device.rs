use glam::Mat4;
use std::fmt;
use thiserror::Error;

/// Handle to a GPU vertex buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BufferHandle(pub u32);

/// Handle to a recorded vertex layout (buffer + attribute description).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexLayoutHandle(pub u32);

/// Handle to a compiled, not yet linked, shader stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShaderStageHandle(pub u32);

/// Handle to a linked shader program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProgramHandle(pub u32);

/// Programmable pipeline stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => f.write_str("vertex shader"),
            ShaderStage::Fragment => f.write_str("fragment shader"),
        }
    }
}

/// Source for a single shader stage.
#[derive(Debug, Clone, Copy)]
pub struct StageSource<'a> {
    pub stage: ShaderStage,
    pub label: &'a str,
    pub source: &'a str,
    pub entry_point: &'a str,
}

/// Component format of a vertex attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VertexFormat {
    Float32x2,
    Float32x3,
    Float32x4,
}

impl VertexFormat {
    /// Size of one attribute value in bytes.
    pub fn size(self) -> u64 {
        match self {
            VertexFormat::Float32x2 => 8,
            VertexFormat::Float32x3 => 12,
            VertexFormat::Float32x4 => 16,
        }
    }
}

/// One shader input read from a vertex buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexAttribute {
    pub location: u32,
    pub format: VertexFormat,
    pub offset: u64,
}

/// How the bytes of a vertex buffer map onto shader inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VertexLayout {
    pub buffer: BufferHandle,
    pub stride: u64,
    pub attributes: Vec<VertexAttribute>,
}

/// Everything needed to link two stages into a program.
///
/// `uniforms` names the `mat4x4<f32>` members of the program's uniform block
/// in declaration order.
#[derive(Debug, Clone, Copy)]
pub struct ProgramDesc<'a> {
    pub vertex: ShaderStageHandle,
    pub fragment: ShaderStageHandle,
    pub layout: VertexLayoutHandle,
    pub uniforms: &'a [&'a str],
}

/// Drawable region in pixels, origin at the top-left of the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    /// Viewport covering a whole `width` x `height` surface.
    pub fn full(width: u32, height: u32) -> Self {
        Self {
            x: 0,
            y: 0,
            width,
            height,
        }
    }
}

/// Failure reported by a [`GpuDevice`] call.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DeviceError {
    #[error("shader compilation failed: {diagnostic}")]
    Compile { diagnostic: String },
    #[error("program link failed: {diagnostic}")]
    Link { diagnostic: String },
    #[error("unknown uniform `{0}`")]
    UnknownUniform(String),
    #[error("unknown {kind} handle {id}")]
    UnknownHandle { kind: &'static str, id: u32 },
    #[error("draw issued without a bound vertex layout and active program")]
    NothingBound,
    #[error("surface lost or outdated")]
    SurfaceLost,
    #[error("gpu backend error: {0}")]
    Backend(String),
}

/// The graphics calls the renderer issues, expressed in handle terms.
///
/// Bindings follow the classic bind-to-edit model: `None` clears a binding.
/// Draw and clear calls are recorded into the current frame and only reach
/// the display on [`GpuDevice::present`].
pub trait GpuDevice {
    fn create_vertex_buffer(
        &mut self,
        label: &str,
        contents: &[u8],
    ) -> Result<BufferHandle, DeviceError>;
    fn delete_buffer(&mut self, buffer: BufferHandle) -> Result<(), DeviceError>;
    fn bind_buffer(&mut self, buffer: Option<BufferHandle>);

    fn create_vertex_layout(
        &mut self,
        layout: &VertexLayout,
    ) -> Result<VertexLayoutHandle, DeviceError>;
    fn delete_vertex_layout(&mut self, layout: VertexLayoutHandle) -> Result<(), DeviceError>;
    fn bind_vertex_layout(&mut self, layout: Option<VertexLayoutHandle>);

    /// Compile one stage. Driver diagnostics come back as [`DeviceError::Compile`].
    fn compile_stage(&mut self, source: &StageSource<'_>)
    -> Result<ShaderStageHandle, DeviceError>;
    fn delete_stage(&mut self, stage: ShaderStageHandle) -> Result<(), DeviceError>;

    /// Link two compiled stages. The program keeps its own copy of the
    /// linked result, so the stages may be deleted afterwards.
    fn link_program(&mut self, desc: &ProgramDesc<'_>) -> Result<ProgramHandle, DeviceError>;
    fn delete_program(&mut self, program: ProgramHandle) -> Result<(), DeviceError>;
    fn use_program(&mut self, program: Option<ProgramHandle>);
    fn set_uniform_mat4(
        &mut self,
        program: ProgramHandle,
        name: &str,
        value: &Mat4,
    ) -> Result<(), DeviceError>;

    fn set_clear_color(&mut self, rgba: [f32; 4]);
    fn set_depth_test(&mut self, enabled: bool);
    fn set_viewport(&mut self, viewport: Viewport);

    fn clear(&mut self, color: bool, depth: bool);
    /// Draw `count` vertices starting at `first` as independent triangles
    /// with the bound vertex layout and active program.
    fn draw_triangles(&mut self, first: u32, count: u32) -> Result<(), DeviceError>;
    /// Submit the recorded frame and show it.
    fn present(&mut self) -> Result<(), DeviceError>;
    /// Drop the clears and draws recorded since the last present.
    fn discard_frame(&mut self);
}
