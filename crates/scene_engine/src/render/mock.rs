//! Mock render device for tests
//!
//! Records every call so tests can assert on the exact GPU-state sequence a
//! pass produced, and lets tests inject capability and framebuffer failures.

use super::device::{FramebufferId, FramebufferStatus, RenderDevice, TextureId, TextureUnit};

/// A recorded device call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceCall {
    /// `create_depth_texture` with size and unit
    CreateDepthTexture {
        /// Texture width in pixels
        width: u32,
        /// Texture height in pixels
        height: u32,
        /// Bound texture unit
        unit: TextureUnit,
    },
    /// `create_framebuffer` with the attached depth texture
    CreateFramebuffer(TextureId),
    /// `bind_framebuffer`; `None` is the default target
    BindFramebuffer(Option<FramebufferId>),
    /// `set_viewport`
    SetViewport(u32, u32),
    /// `set_color_writes`
    SetColorWrites(bool),
    /// `clear_depth`
    ClearDepth,
    /// `delete_texture`
    DeleteTexture(TextureId),
    /// `delete_framebuffer`
    DeleteFramebuffer(FramebufferId),
}

/// Call-recording implementation of [`RenderDevice`]
#[derive(Debug)]
pub struct MockDevice {
    /// Every call made, in order
    pub calls: Vec<DeviceCall>,
    /// Version reported by [`RenderDevice::version`]
    pub version: (u32, u32),
    /// Status reported by [`RenderDevice::framebuffer_status`]
    pub framebuffer_status: FramebufferStatus,
    next_id: u32,
}

impl Default for MockDevice {
    fn default() -> Self {
        Self::new()
    }
}

impl MockDevice {
    /// Create a mock reporting a capable (3.3) device with complete
    /// framebuffers
    pub fn new() -> Self {
        Self {
            calls: Vec::new(),
            version: (3, 3),
            framebuffer_status: FramebufferStatus::Complete,
            next_id: 1,
        }
    }

    /// Forget recorded calls (keeps ids, version, and status)
    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }

    fn next_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

impl RenderDevice for MockDevice {
    fn version(&self) -> (u32, u32) {
        self.version
    }

    fn create_depth_texture(&mut self, width: u32, height: u32, unit: TextureUnit) -> TextureId {
        self.calls.push(DeviceCall::CreateDepthTexture { width, height, unit });
        self.next_id()
    }

    fn create_framebuffer(&mut self, depth_texture: TextureId) -> FramebufferId {
        self.calls.push(DeviceCall::CreateFramebuffer(depth_texture));
        self.next_id()
    }

    fn bind_framebuffer(&mut self, framebuffer: Option<FramebufferId>) {
        self.calls.push(DeviceCall::BindFramebuffer(framebuffer));
    }

    fn set_viewport(&mut self, width: u32, height: u32) {
        self.calls.push(DeviceCall::SetViewport(width, height));
    }

    fn set_color_writes(&mut self, enabled: bool) {
        self.calls.push(DeviceCall::SetColorWrites(enabled));
    }

    fn clear_depth(&mut self) {
        self.calls.push(DeviceCall::ClearDepth);
    }

    fn framebuffer_status(&self) -> FramebufferStatus {
        self.framebuffer_status
    }

    fn delete_texture(&mut self, texture: TextureId) {
        self.calls.push(DeviceCall::DeleteTexture(texture));
    }

    fn delete_framebuffer(&mut self, framebuffer: FramebufferId) {
        self.calls.push(DeviceCall::DeleteFramebuffer(framebuffer));
    }
}
