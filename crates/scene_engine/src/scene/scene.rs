//! The scene: object/light ownership and the per-frame loop

use std::sync::{Arc, RwLock, Weak};

use log::debug;
use slotmap::{new_key_type, SlotMap};

use super::camera::Camera;
use super::object::{RenderState, SceneObject};
use crate::culling::FrustumCuller;
use crate::foundation::math::Mat4;
use crate::foundation::time::Stopwatch;
use crate::geometry::Ray;
use crate::lights::Light;
use crate::render::{RenderConfig, RenderStats};

new_key_type! {
    /// Handle for a registered before-render callback
    pub struct BeforeRenderKey;
}

/// Callback fired per object just before its draw call
pub type BeforeRenderCallback = Box<dyn FnMut(&mut dyn SceneObject, &mut RenderConfig)>;

/// Owns the renderable objects and lights, drives the per-frame update and
/// render passes, and answers picking queries.
///
/// A single render thread drives `update`/`render` and is the only thread
/// allowed to mutate the object and light lists. Other threads interact
/// solely through cloned [`RenderState`] handles (see [`SceneObject`]);
/// deletion requests they make are applied as a batched sweep at the end of
/// the render pass that observes them, which keeps iteration safe.
pub struct Scene {
    objects: Vec<Box<dyn SceneObject>>,
    lights: Vec<Light>,
    active_camera: Weak<RwLock<Camera>>,
    /// Per-frame configuration read by every object and the shadow pass
    pub render_config: RenderConfig,
    before_render: SlotMap<BeforeRenderKey, BeforeRenderCallback>,
    before_render_order: Vec<BeforeRenderKey>,
    frame_timer: Stopwatch,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    /// Create an empty scene
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
            lights: Vec::new(),
            active_camera: Weak::new(),
            render_config: RenderConfig::default(),
            before_render: SlotMap::with_key(),
            before_render_order: Vec::new(),
            frame_timer: Stopwatch::start_new(),
        }
    }

    /// Append an object; insertion order is draw order
    pub fn add_object(&mut self, object: Box<dyn SceneObject>) {
        self.objects.push(object);
    }

    /// Immediately remove the object owning `state`. Render-thread only;
    /// other threads must use [`RenderState::mark_for_deletion`] instead.
    pub fn remove_object(&mut self, state: &Arc<RenderState>) {
        self.objects
            .retain(|object| !Arc::ptr_eq(object.render_state(), state));
    }

    /// The objects currently in the scene, in draw order
    pub fn objects(&self) -> &[Box<dyn SceneObject>] {
        &self.objects
    }

    /// Append a light
    pub fn add_light(&mut self, light: Light) {
        self.lights.push(light);
    }

    /// The scene's lights
    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    /// Mutable access to the lights, e.g. to drive their shadow passes
    pub fn lights_mut(&mut self) -> &mut [Light] {
        &mut self.lights
    }

    /// Set the active camera as a non-owning handle; the scene never
    /// extends the camera's lifetime and tolerates replacement between
    /// frames
    pub fn set_active_camera(&mut self, camera: &Arc<RwLock<Camera>>) {
        self.active_camera = Arc::downgrade(camera);
    }

    /// The active camera, if it is still alive
    pub fn active_camera(&self) -> Option<Arc<RwLock<Camera>>> {
        self.active_camera.upgrade()
    }

    /// Set the projection matrix used by the next render pass
    pub fn set_projection_matrix(&mut self, projection_matrix: Mat4) {
        self.render_config.projection_matrix = projection_matrix;
    }

    /// Set the inverse camera (view) matrix used by the next render pass
    pub fn set_inv_camera_view_matrix(&mut self, inv_camera_view_mat: Mat4) {
        self.render_config.inv_camera_view_mat = inv_camera_view_mat;
    }

    /// Register a callback fired before each object's draw call, after
    /// visibility and culling have passed. Callbacks run synchronously in
    /// registration order and may mutate per-object draw state.
    pub fn register_before_render(&mut self, callback: BeforeRenderCallback) -> BeforeRenderKey {
        let key = self.before_render.insert(callback);
        self.before_render_order.push(key);
        key
    }

    /// Remove a registered callback; returns false if the handle was
    /// already gone
    pub fn unregister_before_render(&mut self, key: BeforeRenderKey) -> bool {
        if self.before_render.remove(key).is_some() {
            self.before_render_order.retain(|k| *k != key);
            true
        } else {
            false
        }
    }

    /// Advance every object by the wall-clock time elapsed since the
    /// previous `update` call, measured on an internal monotonic timer.
    /// All objects receive the same elapsed value.
    pub fn update(&mut self) {
        let elapsed_micros = self.frame_timer.elapsed_micros();
        self.frame_timer.restart();
        for object in &mut self.objects {
            object.update(elapsed_micros);
        }
    }

    /// Render one frame.
    ///
    /// Resets the frame stats, builds a fresh frustum culler from the
    /// current matrices, visits objects in draw order (skipping deleted and
    /// invisible ones, culling against the frustum when enabled), fires the
    /// before-render callbacks, invokes each surviving object's draw
    /// contract, and finally sweeps out objects flagged for deletion.
    pub fn render(&mut self) {
        self.render_config.stats = RenderStats::default();

        // World-space frustum matrix so we can test world-space positions
        let frustum_matrix =
            self.render_config.projection_matrix * self.render_config.inv_camera_view_mat;
        let culler = FrustumCuller::new(&frustum_matrix);

        let mut need_object_delete = false;

        for object in &mut self.objects {
            let state = object.render_state();
            if state.is_to_be_deleted() {
                // removal happens after the loop so iteration stays safe
                need_object_delete = true;
                continue;
            }
            if !state.is_visible() {
                continue;
            }

            if self.render_config.frustum_culling {
                if let Some(radius) = object.bounding_sphere_radius() {
                    let world_radius = radius * object.scale().norm();
                    if !culler.is_sphere_inside_frustum(object.position(), world_radius) {
                        self.render_config.stats.objects_culled += 1;
                        continue;
                    }
                }
            }

            for key in &self.before_render_order {
                if let Some(callback) = self.before_render.get_mut(*key) {
                    callback(object.as_mut(), &mut self.render_config);
                }
            }
            self.render_config.stats.objects_drawn += 1;
            object.render(&self.render_config);
        }

        if need_object_delete {
            self.objects
                .retain(|object| !object.render_state().is_to_be_deleted());
        }
    }

    /// Find the object nearest the camera that the world-space ray hits.
    ///
    /// Each object resolves the test against its own geometry and reports a
    /// signed distance; only distances below zero are valid hits under the
    /// engine's convention, and among those the numerically largest wins.
    /// Ties keep the first object encountered. Returns the winning object's
    /// index in [`Scene::objects`].
    pub fn intersect(&self, world_space_ray: &Ray) -> Option<usize> {
        let mut nearest: Option<(usize, f32)> = None;
        for (index, object) in self.objects.iter().enumerate() {
            if let Some(distance_along_ray) = object.intersect(world_space_ray) {
                // intersection must be in front of the camera ( < 0.0 )
                if distance_along_ray < 0.0 {
                    debug!("intersect: [{index}] @distance: {distance_along_ray}");
                    if nearest.map_or(true, |(_, best)| distance_along_ray > best) {
                        nearest = Some((index, distance_along_ray));
                    }
                }
            }
        }
        nearest.map(|(index, _)| index)
    }
}
