//! The object contract consumed by the scene, plus a mesh-backed
//! implementation

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

use bitflags::bitflags;

use super::mesh::TriangleMesh;
use crate::foundation::math::{Transform, Vec3};
use crate::geometry::{BoundingSphere, Ray};
use crate::render::RenderConfig;

bitflags! {
    /// Render-state flag set for a scene object
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct RenderStateFlags: u8 {
        /// The object is drawn during render passes
        const VISIBLE = 1;
        /// The object is removed at the end of the next render pass that
        /// observes the flag
        const TO_BE_DELETED = 1 << 1;
    }
}

/// Shared, atomically flagged render state.
///
/// An `Arc<RenderState>` clone is the only channel through which threads
/// other than the render thread may affect the scene: they may hide an
/// object or mark it for deletion, and the render thread applies the
/// deletion as a batched sweep at the end of a render pass.
#[derive(Debug)]
pub struct RenderState {
    // The two flags are independent; no ordering is required between them.
    flags: AtomicU8,
}

impl Default for RenderState {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderState {
    /// New state: visible, not marked for deletion
    pub fn new() -> Self {
        Self {
            flags: AtomicU8::new(RenderStateFlags::VISIBLE.bits()),
        }
    }

    fn load(&self) -> RenderStateFlags {
        RenderStateFlags::from_bits_truncate(self.flags.load(Ordering::Relaxed))
    }

    /// Whether render passes should draw the object
    pub fn is_visible(&self) -> bool {
        self.load().contains(RenderStateFlags::VISIBLE)
    }

    /// Show or hide the object
    pub fn set_visible(&self, visible: bool) {
        if visible {
            self.flags.fetch_or(RenderStateFlags::VISIBLE.bits(), Ordering::Relaxed);
        } else {
            self.flags.fetch_and(!RenderStateFlags::VISIBLE.bits(), Ordering::Relaxed);
        }
    }

    /// Whether the object has been flagged for deferred removal
    pub fn is_to_be_deleted(&self) -> bool {
        self.load().contains(RenderStateFlags::TO_BE_DELETED)
    }

    /// Flag the object for removal at the end of the next render pass that
    /// observes the flag. May be called from any thread; never unset.
    pub fn mark_for_deletion(&self) {
        self.flags.fetch_or(RenderStateFlags::TO_BE_DELETED.bits(), Ordering::Relaxed);
    }
}

/// Contract every renderable scene entity fulfills.
///
/// Objects advance their own opaque state in `update`, draw themselves
/// against the shared [`RenderConfig`] in `render`, and answer picking
/// queries in `intersect`. The default implementations are inert so
/// minimal objects only implement what they need.
pub trait SceneObject {
    /// Shared render-state flag handle; clones may cross threads
    fn render_state(&self) -> &Arc<RenderState>;

    /// World-space position
    fn position(&self) -> Vec3;

    /// Per-axis scale factors
    fn scale(&self) -> Vec3;

    /// Radius of the local-space bounding sphere, if the object has one.
    /// Objects without a bounding sphere are never frustum-culled.
    fn bounding_sphere_radius(&self) -> Option<f32> {
        None
    }

    /// Advance internal state by `elapsed_micros` microseconds. Objects
    /// must not depend on each other's update order within one frame.
    fn update(&mut self, elapsed_micros: f32) {
        let _ = elapsed_micros;
    }

    /// Issue draw calls for the current frame
    fn render(&mut self, config: &RenderConfig) {
        let _ = config;
    }

    /// Test a world-space ray against this object.
    ///
    /// Returns the signed distance along the ray under the engine's
    /// picking convention: contacts in front of the camera are negative,
    /// and the numerically largest valid distance is the nearest hit.
    fn intersect(&self, ray: &Ray) -> Option<f32> {
        let _ = ray;
        None
    }
}

/// A mesh-backed scene object with position, orientation, and scale.
///
/// Picking transforms the world-space ray into local space by the inverse
/// world matrix and runs the back-face-culling triangle test over the mesh,
/// gated by a world-space bounding-sphere reject.
pub struct MeshObject {
    state: Arc<RenderState>,
    /// World transform (position, rotation, scale)
    pub transform: Transform,
    mesh: Option<TriangleMesh>,
    age_micros: f32,
}

impl MeshObject {
    /// Create an empty object with no mesh; it is never culled and never
    /// picked
    pub fn new() -> Self {
        Self {
            state: Arc::new(RenderState::new()),
            transform: Transform::identity(),
            mesh: None,
            age_micros: 0.0,
        }
    }

    /// Create an object around a mesh
    pub fn with_mesh(mesh: TriangleMesh) -> Self {
        Self {
            mesh: Some(mesh),
            ..Self::new()
        }
    }

    /// Move the object to `position`
    pub fn set_position(&mut self, position: Vec3) {
        self.transform.position = position;
    }

    /// Set per-axis scale factors
    pub fn set_scale(&mut self, scale: Vec3) {
        self.transform.scale = scale;
    }

    /// Accumulated update time in microseconds
    pub fn age_micros(&self) -> f32 {
        self.age_micros
    }
}

impl Default for MeshObject {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneObject for MeshObject {
    fn render_state(&self) -> &Arc<RenderState> {
        &self.state
    }

    fn position(&self) -> Vec3 {
        self.transform.position
    }

    fn scale(&self) -> Vec3 {
        self.transform.scale
    }

    fn bounding_sphere_radius(&self) -> Option<f32> {
        self.mesh.as_ref().map(TriangleMesh::bounding_radius)
    }

    fn update(&mut self, elapsed_micros: f32) {
        self.age_micros += elapsed_micros;
    }

    fn intersect(&self, ray: &Ray) -> Option<f32> {
        let mesh = self.mesh.as_ref()?;

        // Coarse world-space reject before touching triangles
        let world_radius = mesh.bounding_radius() * self.transform.uniform_scale();
        let sphere = BoundingSphere::new(self.transform.position, world_radius);
        sphere.intersect_ray(ray)?;

        let inverse_world = self.transform.to_matrix().try_inverse()?;
        let local_ray = ray.transformed(&inverse_world);

        let mut nearest_contact = f32::MAX;
        let mut hit = false;
        for triangle in mesh.triangles() {
            if let Some(contact) = triangle.intersect_ray_culling(&local_ray) {
                nearest_contact = nearest_contact.min(contact);
                hit = true;
            }
        }

        if hit {
            // Camera-facing contacts are negative under the picking
            // convention; scale the local distance back to world units.
            Some(-nearest_contact * self.transform.uniform_scale())
        } else {
            None
        }
    }
}
