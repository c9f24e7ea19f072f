//! Depth-only shadow map render targets
//!
//! Each shadow-casting light owns one [`ShadowMap`]: a fixed-size GPU depth
//! texture and framebuffer, plus light-space matrices recomputed every frame
//! it is used. Live shadow maps are capped by [`ShadowMapPool`]; teardown is
//! explicit via [`ShadowMap::delete_data`].

use log::warn;
use thiserror::Error;

use super::projection::simple_shadowmap_projection;
use crate::culling::FrustumCuller;
use crate::foundation::math::{Mat4, Point3, Vec3};
use crate::render::{
    FramebufferId, FramebufferStatus, RenderConfig, RenderDevice, TextureId, TextureUnit,
};
use crate::scene::{Camera, SceneObject};

/// Hard ceiling on concurrently live shadow maps
pub const MAX_SHADOW_MAPS: usize = 4;

/// Shadow maps are square depth textures of this edge length
pub const SHADOW_MAP_SIZE: u32 = 1024;

/// First texture unit reserved for shadow maps; each pool slot binds the
/// next unit up
const FIRST_SHADOW_TEXTURE_UNIT: u32 = 4;

/// Minimum device version with framebuffer support
const REQUIRED_VERSION: (u32, u32) = (2, 2);

/// Maps clip-space [-1, 1] onto [0, 1] for shadow texture lookups
#[rustfmt::skip]
fn bias_matrix() -> Mat4 {
    Mat4::new(
        0.5, 0.0, 0.0, 0.5,
        0.0, 0.5, 0.0, 0.5,
        0.0, 0.0, 0.5, 0.5,
        0.0, 0.0, 0.0, 1.0,
    )
}

/// Shadow map construction and pass failures.
///
/// The variants are distinguishable so the owner can decide to disable
/// shadows for one light instead of aborting the whole scene.
#[derive(Debug, Error)]
pub enum ShadowMapError {
    /// The process-wide ceiling on live shadow maps was reached
    #[error("shadow map capacity exceeded: at most {limit} shadow maps may be live")]
    CapacityExceeded {
        /// The fixed ceiling that was hit
        limit: usize,
    },

    /// The framebuffer was left incomplete after setup; not recoverable by
    /// retrying
    #[error("shadow map framebuffer incomplete: {0:?}")]
    FramebufferIncomplete(FramebufferStatus),

    /// The render device is too old for depth framebuffers
    #[error("render device version {major}.{minor} lacks framebuffer support (need {}.{})",
            REQUIRED_VERSION.0, REQUIRED_VERSION.1)]
    UnsupportedVersion {
        /// Reported major version
        major: u32,
        /// Reported minor version
        minor: u32,
    },
}

/// An allocated shadow-map slot with its reserved texture unit.
///
/// Slots are handed out by [`ShadowMapPool::allocate`] and must be given
/// back through [`ShadowMapPool::release`]; they are deliberately not
/// cloneable so a slot cannot be double-released.
#[derive(Debug)]
pub struct ShadowMapSlot {
    index: usize,
}

impl ShadowMapSlot {
    /// The texture unit reserved for this slot
    pub fn texture_unit(&self) -> TextureUnit {
        TextureUnit(FIRST_SHADOW_TEXTURE_UNIT + self.index as u32)
    }
}

/// Explicit resource pool bounding the number of live shadow maps.
///
/// Owned by whichever component manages the lights; constructing a
/// [`ShadowMap`] allocates a slot and tearing one down releases it.
/// All allocation happens on the render thread.
#[derive(Debug, Default)]
pub struct ShadowMapPool {
    in_use: [bool; MAX_SHADOW_MAPS],
}

impl ShadowMapPool {
    /// Create a pool with all slots free
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of currently allocated slots
    pub fn live_count(&self) -> usize {
        self.in_use.iter().filter(|used| **used).count()
    }

    /// Allocate a slot, failing once the ceiling is reached
    pub fn allocate(&mut self) -> Result<ShadowMapSlot, ShadowMapError> {
        let index = self
            .in_use
            .iter()
            .position(|used| !used)
            .ok_or(ShadowMapError::CapacityExceeded {
                limit: MAX_SHADOW_MAPS,
            })?;
        self.in_use[index] = true;
        Ok(ShadowMapSlot { index })
    }

    /// Return a slot to the pool
    pub fn release(&mut self, slot: ShadowMapSlot) {
        self.in_use[slot.index] = false;
    }
}

struct GpuResources {
    slot: ShadowMapSlot,
    texture: TextureId,
    framebuffer: FramebufferId,
}

/// A depth-only render target owned by one shadow-casting light.
///
/// Construction is all-or-nothing: on any failure the pool slot and any GPU
/// resources already created are rolled back, and no partial shadow map is
/// left usable. GPU resources are released exactly once by
/// [`ShadowMap::delete_data`]; dropping without it leaks them (with a log
/// warning), it never crashes.
pub struct ShadowMap {
    resources: Option<GpuResources>,
    proj_matrix: Mat4,
    view_matrix: Mat4,
}

impl ShadowMap {
    /// Create the GPU depth texture and framebuffer for one shadow map.
    ///
    /// Fails fatally on a device below the required version, on an
    /// exhausted pool, and on an incomplete framebuffer; the error variants
    /// keep the three causes distinguishable.
    pub fn new(
        device: &mut dyn RenderDevice,
        pool: &mut ShadowMapPool,
    ) -> Result<Self, ShadowMapError> {
        let (major, minor) = device.version();
        if (major, minor) < REQUIRED_VERSION {
            return Err(ShadowMapError::UnsupportedVersion { major, minor });
        }

        let slot = pool.allocate()?;
        let texture = device.create_depth_texture(
            SHADOW_MAP_SIZE,
            SHADOW_MAP_SIZE,
            slot.texture_unit(),
        );
        let framebuffer = device.create_framebuffer(texture);

        let status = device.framebuffer_status();
        device.bind_framebuffer(None);
        if status != FramebufferStatus::Complete {
            device.delete_framebuffer(framebuffer);
            device.delete_texture(texture);
            pool.release(slot);
            return Err(ShadowMapError::FramebufferIncomplete(status));
        }

        Ok(Self {
            resources: Some(GpuResources {
                slot,
                texture,
                framebuffer,
            }),
            proj_matrix: Mat4::identity(),
            view_matrix: Mat4::identity(),
        })
    }

    /// The texture unit this shadow map is bound to, while its resources
    /// are live
    pub fn texture_unit(&self) -> Option<TextureUnit> {
        self.resources.as_ref().map(|r| r.slot.texture_unit())
    }

    /// The depth texture id, while the resources are live
    pub fn texture_id(&self) -> Option<TextureId> {
        self.resources.as_ref().map(|r| r.texture)
    }

    /// Light-space projection matrix from the most recent pass
    pub fn projection_matrix(&self) -> Mat4 {
        self.proj_matrix
    }

    /// Light-space view matrix from the most recent pass
    pub fn view_matrix(&self) -> Mat4 {
        self.view_matrix
    }

    /// Combined bias * projection * view matrix for shadow lookups during
    /// main shading
    pub fn depth_bias_vp(&self) -> Mat4 {
        bias_matrix() * self.proj_matrix * self.view_matrix
    }

    /// Begin the depth-only pass for this shadow map.
    ///
    /// Binds the shadow framebuffer, sets the fixed-size viewport, fits the
    /// light-space matrices to the casters currently visible to `camera`,
    /// publishes them through `config`, raises `drawing_shadow_map`,
    /// disables color writes, and clears only the depth buffer. Global GPU
    /// state does not survive this call.
    pub fn prepare_for_render(
        &mut self,
        device: &mut dyn RenderDevice,
        config: &mut RenderConfig,
        objects: &[Box<dyn SceneObject>],
        frustum: &FrustumCuller,
        camera: &Camera,
        light_direction: Vec3,
    ) -> Result<(), ShadowMapError> {
        let Some(resources) = self.resources.as_ref() else {
            warn!("prepare_for_render on a deleted shadow map");
            return Ok(());
        };
        device.bind_framebuffer(Some(resources.framebuffer));
        device.set_viewport(SHADOW_MAP_SIZE, SHADOW_MAP_SIZE);

        let fit = simple_shadowmap_projection(objects, light_direction, frustum, camera);
        self.proj_matrix = Mat4::new_orthographic(
            -fit.width * 0.5,
            fit.width * 0.5,
            -fit.height * 0.5,
            fit.height * 0.5,
            fit.near_z,
            fit.far_z,
        );
        self.view_matrix =
            Mat4::look_at_rh(&Point3::from(fit.eye), &Point3::from(fit.target), &fit.up);

        config.projection_matrix = self.proj_matrix;
        config.inv_camera_view_mat = self.view_matrix;
        config.drawing_shadow_map = true;

        device.set_color_writes(false);
        device.clear_depth();

        let status = device.framebuffer_status();
        if status == FramebufferStatus::Complete {
            Ok(())
        } else {
            Err(ShadowMapError::FramebufferIncomplete(status))
        }
    }

    /// End the depth-only pass: restore the default render target and color
    /// writes, and lower the shadow flag
    pub fn finish_render(&mut self, device: &mut dyn RenderDevice, config: &mut RenderConfig) {
        device.bind_framebuffer(None);
        device.set_color_writes(true);
        config.drawing_shadow_map = false;
    }

    /// Release the GPU texture and framebuffer and return the pool slot.
    ///
    /// Must be called before the owning light is discarded; calling it
    /// again is a logged no-op.
    pub fn delete_data(&mut self, device: &mut dyn RenderDevice, pool: &mut ShadowMapPool) {
        if let Some(resources) = self.resources.take() {
            device.delete_texture(resources.texture);
            device.delete_framebuffer(resources.framebuffer);
            pool.release(resources.slot);
        } else {
            warn!("delete_data called twice on a shadow map");
        }
    }
}

impl Drop for ShadowMap {
    fn drop(&mut self) {
        if self.resources.is_some() {
            warn!("shadow map dropped without delete_data; GPU depth texture and framebuffer leaked");
        }
    }
}
