use crate::device::{DeviceError, ShaderStage};
use thiserror::Error;

/// Failure of a renderer lifecycle transition.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("renderer is already loaded")]
    AlreadyLoaded,
    #[error("renderer is not loaded")]
    NotLoaded,
    #[error("error compiling {stage}: {diagnostic}")]
    ShaderCompile {
        stage: ShaderStage,
        diagnostic: String,
    },
    #[error("error linking shader program: {diagnostic}")]
    ShaderLink { diagnostic: String },
    #[error(transparent)]
    Device(#[from] DeviceError),
}
