//! GPU device abstraction for the shadow pipeline
//!
//! Covers exactly the global GPU state this core touches. Callers must not
//! assume any binding survives a call into a component that takes the
//! device; the shadow pass rebinds the default framebuffer when it finishes.

/// Opaque GPU texture handle
pub type TextureId = u32;

/// Opaque GPU framebuffer handle
pub type FramebufferId = u32;

/// A texture unit binding slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureUnit(pub u32);

/// Completeness state of the currently bound framebuffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FramebufferStatus {
    /// The framebuffer is complete and renderable
    Complete,
    /// An attachment is in an invalid state
    IncompleteAttachment,
    /// No attachments are present
    MissingAttachment,
    /// The attachment combination is unsupported by the driver
    Unsupported,
}

/// Rendering device trait for the depth-only shadow pipeline.
///
/// Backends (GL, Vulkan, mock) implement this to let the shadow map manager
/// own its GPU resource lifecycle without knowing the graphics API.
pub trait RenderDevice {
    /// Device capability version as (major, minor), GL-style
    fn version(&self) -> (u32, u32);

    /// Create a depth-only texture of the given size, bound to `unit`,
    /// with nearest filtering, edge clamping, and depth-compare sampling
    fn create_depth_texture(&mut self, width: u32, height: u32, unit: TextureUnit) -> TextureId;

    /// Create a framebuffer with `depth_texture` as its only (depth)
    /// attachment and color draw/read buffers disabled. Leaves the new
    /// framebuffer bound.
    fn create_framebuffer(&mut self, depth_texture: TextureId) -> FramebufferId;

    /// Bind a framebuffer as the render target; `None` restores the
    /// default target
    fn bind_framebuffer(&mut self, framebuffer: Option<FramebufferId>);

    /// Set the viewport to cover `width` x `height` pixels
    fn set_viewport(&mut self, width: u32, height: u32);

    /// Enable or disable color writes (depth-only passes disable them)
    fn set_color_writes(&mut self, enabled: bool);

    /// Clear only the depth buffer of the bound framebuffer
    fn clear_depth(&mut self);

    /// Query completeness of the currently bound framebuffer
    fn framebuffer_status(&self) -> FramebufferStatus;

    /// Release a texture
    fn delete_texture(&mut self, texture: TextureId);

    /// Release a framebuffer
    fn delete_framebuffer(&mut self, framebuffer: FramebufferId);
}
