//! wgpu backend for the spinning cube renderer.
//!
//! [`WgpuDevice`] implements `spincube_render::GpuDevice` on top of a wgpu
//! surface. The host owns the device and calls [`WgpuDevice::resize_surface`]
//! itself when the window changes size.
//!
//! # Invariants
//!
//! - Handle ids come from one counter and are never reused, so a stale
//!   handle fails with `DeviceError::UnknownHandle` instead of aliasing a
//!   newer resource.
//! - Deleting a bound buffer, vertex layout or active program clears that
//!   binding.
//! - Draws capture the program and layout bound when they are recorded;
//!   later binds do not affect them before `present`.
//! - `discard_frame`, or a failed `present`, drops every recorded clear and
//!   draw.

mod gpu;

pub use gpu::{InitError, SurfaceSettings, WgpuDevice};
