use crate::device::GpuDevice;
use crate::error::RenderError;

/// Callbacks a windowing host drives, in order:
/// `load`, then any mix of `resize` and `update` + `render` pairs, then `unload`.
///
/// The host owns the window and the device; implementors own only their own
/// GPU handles and simulation state.
pub trait FrameHandler<D: GpuDevice> {
    /// Create GPU resources. On error nothing stays allocated.
    fn load(&mut self, gpu: &mut D) -> Result<(), RenderError>;

    /// The drawable surface changed size.
    fn resize(&mut self, gpu: &mut D, width: u32, height: u32);

    /// Advance simulation state by `dt` seconds.
    fn update(&mut self, dt: f32);

    /// Draw and present one frame.
    fn render(&mut self, gpu: &mut D) -> Result<(), RenderError>;

    /// Release every GPU resource created by `load`.
    fn unload(&mut self, gpu: &mut D);
}
