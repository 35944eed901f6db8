//! Spinning cube renderer, independent of any particular graphics API.
//!
//! A [`CubeRenderer`] uploads a fixed cube mesh, compiles a fixed shader pair
//! and rotates the cube every tick. All GPU work goes through the
//! [`GpuDevice`] trait; the host drives it through [`FrameHandler`].
//!
//! # Invariants
//! - The renderer's buffer, vertex layout and program are all live or all released.
//! - A failed load leaves no GPU resource behind.
//! - The rotation angle only ever grows by `dt * ROTATION_RATE`; it is never wrapped.

mod device;
mod error;
mod lifecycle;
pub mod mesh;
mod renderer;
pub mod shaders;
pub mod transforms;

pub use device::{
    BufferHandle, DeviceError, GpuDevice, ProgramDesc, ProgramHandle, ShaderStage,
    ShaderStageHandle, StageSource, VertexAttribute, VertexFormat, VertexLayout,
    VertexLayoutHandle, Viewport,
};
pub use error::RenderError;
pub use lifecycle::FrameHandler;
pub use renderer::{CLEAR_COLOR, CubeRenderer};
pub use transforms::FrameTransforms;
