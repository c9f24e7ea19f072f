//! Per-frame render configuration and the GPU device abstraction
//!
//! The scene core never calls a graphics API directly; every piece of GPU
//! state it touches (shadow framebuffers, depth textures, viewports, masks)
//! goes through the [`RenderDevice`] trait. [`MockDevice`] records calls for
//! tests.

mod config;
mod device;
mod mock;

pub use config::{RenderConfig, RenderStats, WireframeMode};
pub use device::{FramebufferId, FramebufferStatus, RenderDevice, TextureId, TextureUnit};
pub use mock::{DeviceCall, MockDevice};
