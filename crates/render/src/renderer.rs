use crate::device::{
    BufferHandle, DeviceError, GpuDevice, ProgramDesc, ProgramHandle, ShaderStageHandle,
    StageSource, VertexLayoutHandle, Viewport,
};
use crate::error::RenderError;
use crate::lifecycle::FrameHandler;
use crate::mesh::{self, CUBE_VERTEX_COUNT};
use crate::shaders::{CUBE_FRAGMENT_STAGE, CUBE_VERTEX_STAGE, TRANSFORM_UNIFORMS};
use crate::transforms::{self, FrameTransforms, ROTATION_RATE};

/// Transparent black.
pub const CLEAR_COLOR: [f32; 4] = [0.0, 0.0, 0.0, 0.0];

/// GPU handles owned by a loaded renderer.
#[derive(Debug, Clone, Copy)]
struct CubeResources {
    buffer: BufferHandle,
    layout: VertexLayoutHandle,
    program: ProgramHandle,
}

/// Resources created so far during `load`, released if a later step fails.
#[derive(Debug, Default)]
struct PartialLoad {
    buffer: Option<BufferHandle>,
    layout: Option<VertexLayoutHandle>,
    vertex: Option<ShaderStageHandle>,
    fragment: Option<ShaderStageHandle>,
}

impl PartialLoad {
    fn release_stages<D: GpuDevice>(&mut self, gpu: &mut D) {
        for stage in [self.vertex.take(), self.fragment.take()]
            .into_iter()
            .flatten()
        {
            if let Err(e) = gpu.delete_stage(stage) {
                tracing::warn!("failed to delete shader stage {}: {e}", stage.0);
            }
        }
    }

    fn rollback<D: GpuDevice>(mut self, gpu: &mut D) {
        self.release_stages(gpu);
        if let Some(layout) = self.layout.take() {
            gpu.bind_vertex_layout(None);
            if let Err(e) = gpu.delete_vertex_layout(layout) {
                tracing::warn!("failed to delete vertex layout {}: {e}", layout.0);
            }
        }
        if let Some(buffer) = self.buffer.take() {
            gpu.bind_buffer(None);
            if let Err(e) = gpu.delete_buffer(buffer) {
                tracing::warn!("failed to delete vertex buffer {}: {e}", buffer.0);
            }
        }
    }
}

/// Draws one red cube spinning about Y at [`ROTATION_RATE`] and about X at
/// half that rate.
#[derive(Debug)]
pub struct CubeRenderer {
    resources: Option<CubeResources>,
    angle: f32,
    width: u32,
    height: u32,
}

impl CubeRenderer {
    /// Unloaded renderer for a `width` x `height` drawable.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            resources: None,
            angle: 0.0,
            width,
            height,
        }
    }

    /// Current rotation in radians.
    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn is_loaded(&self) -> bool {
        self.resources.is_some()
    }

    /// Last drawable size seen by `resize` (or given to `new`).
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Advance the rotation by `dt` seconds. Touches no GPU state.
    pub fn update(&mut self, dt: f32) {
        self.angle += dt * ROTATION_RATE;
    }

    /// Matrices for the current angle and drawable size.
    pub fn transforms(&self) -> FrameTransforms {
        FrameTransforms::at(
            self.angle,
            transforms::aspect_ratio(self.width, self.height),
        )
    }

    fn create_resources<D: GpuDevice>(
        gpu: &mut D,
        partial: &mut PartialLoad,
    ) -> Result<CubeResources, RenderError> {
        let buffer = gpu.create_vertex_buffer("cube_vertex_buffer", mesh::cube_vertex_bytes())?;
        partial.buffer = Some(buffer);
        gpu.bind_buffer(Some(buffer));
        gpu.bind_buffer(None);

        let layout = gpu.create_vertex_layout(&mesh::cube_vertex_layout(buffer))?;
        partial.layout = Some(layout);

        let vertex = compile(gpu, &CUBE_VERTEX_STAGE)?;
        partial.vertex = Some(vertex);
        let fragment = compile(gpu, &CUBE_FRAGMENT_STAGE)?;
        partial.fragment = Some(fragment);

        let linked = gpu.link_program(&ProgramDesc {
            vertex,
            fragment,
            layout,
            uniforms: TRANSFORM_UNIFORMS,
        });
        partial.release_stages(gpu);
        let program = linked.map_err(|err| match err {
            DeviceError::Link { diagnostic } => {
                tracing::error!("error linking shader program: {diagnostic}");
                RenderError::ShaderLink { diagnostic }
            }
            other => other.into(),
        })?;

        Ok(CubeResources {
            buffer,
            layout,
            program,
        })
    }
}

/// Upload the frame's matrices, bind the cube layout and draw it.
fn draw_cube<D: GpuDevice>(
    gpu: &mut D,
    res: CubeResources,
    frame: &FrameTransforms,
) -> Result<(), DeviceError> {
    for (name, matrix) in frame.named() {
        gpu.set_uniform_mat4(res.program, name, matrix)?;
    }
    gpu.bind_vertex_layout(Some(res.layout));
    gpu.draw_triangles(0, CUBE_VERTEX_COUNT)
}

fn compile<D: GpuDevice>(
    gpu: &mut D,
    source: &StageSource<'_>,
) -> Result<ShaderStageHandle, RenderError> {
    gpu.compile_stage(source).map_err(|err| match err {
        DeviceError::Compile { diagnostic } => {
            tracing::error!("error compiling {}: {diagnostic}", source.stage);
            RenderError::ShaderCompile {
                stage: source.stage,
                diagnostic,
            }
        }
        other => other.into(),
    })
}

impl<D: GpuDevice> FrameHandler<D> for CubeRenderer {
    fn load(&mut self, gpu: &mut D) -> Result<(), RenderError> {
        if self.is_loaded() {
            return Err(RenderError::AlreadyLoaded);
        }

        gpu.set_clear_color(CLEAR_COLOR);
        gpu.set_depth_test(true);

        let mut partial = PartialLoad::default();
        match Self::create_resources(gpu, &mut partial) {
            Ok(resources) => {
                tracing::info!(
                    buffer = resources.buffer.0,
                    layout = resources.layout.0,
                    program = resources.program.0,
                    "cube renderer loaded"
                );
                self.resources = Some(resources);
                Ok(())
            }
            Err(e) => {
                // Shader diagnostics are already logged where they are mapped.
                if let RenderError::Device(err) = &e {
                    tracing::error!("failed to load cube renderer: {err}");
                }
                partial.rollback(gpu);
                Err(e)
            }
        }
    }

    fn resize(&mut self, gpu: &mut D, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        gpu.set_viewport(Viewport::full(width, height));
        tracing::debug!(width, height, "viewport resized");
    }

    fn update(&mut self, dt: f32) {
        CubeRenderer::update(self, dt);
    }

    fn render(&mut self, gpu: &mut D) -> Result<(), RenderError> {
        let Some(res) = self.resources else {
            return Err(RenderError::NotLoaded);
        };

        gpu.clear(true, true);
        gpu.use_program(Some(res.program));
        let drawn = draw_cube(gpu, res, &self.transforms());
        gpu.bind_vertex_layout(None);

        if let Err(e) = drawn {
            gpu.use_program(None);
            gpu.discard_frame();
            return Err(e.into());
        }

        gpu.present()?;
        Ok(())
    }

    fn unload(&mut self, gpu: &mut D) {
        let Some(res) = self.resources.take() else {
            tracing::warn!("unload called on a renderer that is not loaded");
            return;
        };

        gpu.bind_buffer(None);
        if let Err(e) = gpu.delete_buffer(res.buffer) {
            tracing::error!("failed to delete vertex buffer: {e}");
        }

        gpu.bind_vertex_layout(None);
        if let Err(e) = gpu.delete_vertex_layout(res.layout) {
            tracing::error!("failed to delete vertex layout: {e}");
        }

        gpu.use_program(None);
        if let Err(e) = gpu.delete_program(res.program) {
            tracing::error!("failed to delete shader program: {e}");
        }

        tracing::info!("cube renderer unloaded");
    }
}
