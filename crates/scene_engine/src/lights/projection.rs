//! Geometric fitting of a light-space orthographic projection to the
//! currently visible shadow casters

use crate::culling::FrustumCuller;
use crate::foundation::math::Vec3;
use crate::geometry::util::{project_coord, two_perp_axes};
use crate::geometry::Aabb;
use crate::scene::{Camera, SceneObject};

/// Near-plane margin between the virtual light eye and the closest caster
const NEAR_MARGIN: f32 = 1.0;

/// Side length of the fallback volume framed around the camera when no
/// casters are visible
const FALLBACK_EXTENT: f32 = 100.0;

/// An orthographic view volume framing the shadow casters along a light
/// direction
#[derive(Debug, Clone, Copy)]
pub struct ShadowmapFit {
    /// Virtual eye position behind the casters
    pub eye: Vec3,
    /// Point the light view looks at
    pub target: Vec3,
    /// Up vector of the light view
    pub up: Vec3,
    /// Orthographic volume width
    pub width: f32,
    /// Orthographic volume height
    pub height: f32,
    /// Near plane distance
    pub near_z: f32,
    /// Far plane distance
    pub far_z: f32,
}

/// Fit an orthographic shadow volume to the casters visible in the camera
/// frustum.
///
/// Visible objects with bounding spheres are projected onto a basis aligned
/// with the light direction and accumulated into a light-space AABB; the
/// returned volume frames that box with a near margin. When nothing passes
/// the visibility test the fit falls back to a fixed volume around the
/// camera so the pass stays valid.
pub fn simple_shadowmap_projection(
    objects: &[Box<dyn SceneObject>],
    light_direction: Vec3,
    frustum: &FrustumCuller,
    camera: &Camera,
) -> ShadowmapFit {
    let dir = light_direction.normalize();
    let (x_axis, y_axis) = two_perp_axes(dir);

    let mut bounds: Option<Aabb> = None;
    for object in objects {
        let state = object.render_state();
        if state.is_to_be_deleted() || !state.is_visible() {
            continue;
        }
        let Some(radius) = object.bounding_sphere_radius() else {
            continue;
        };
        let world_radius = radius * object.scale().norm();
        if !frustum.is_sphere_inside_frustum(object.position(), world_radius) {
            continue;
        }

        let center = project_coord(object.position(), x_axis, y_axis, dir);
        let extents = Vec3::new(world_radius, world_radius, world_radius);
        match &mut bounds {
            Some(aabb) => {
                aabb.expand_to_fit(center - extents);
                aabb.expand_to_fit(center + extents);
            }
            None => bounds = Some(Aabb::from_center_extents(center, extents)),
        }
    }

    bounds.map_or_else(
        || ShadowmapFit {
            eye: camera.position - dir * (FALLBACK_EXTENT * 0.5),
            target: camera.position,
            up: y_axis,
            width: FALLBACK_EXTENT,
            height: FALLBACK_EXTENT,
            near_z: NEAR_MARGIN,
            far_z: NEAR_MARGIN + FALLBACK_EXTENT,
        },
        |aabb| {
            let center_light = aabb.center();
            let extents = aabb.extents();
            let target =
                x_axis * center_light.x + y_axis * center_light.y + dir * center_light.z;
            ShadowmapFit {
                eye: target - dir * (extents.z + NEAR_MARGIN),
                target,
                up: y_axis,
                width: (2.0 * extents.x).max(1.0),
                height: (2.0 * extents.y).max(1.0),
                near_z: NEAR_MARGIN,
                far_z: NEAR_MARGIN + 2.0 * extents.z,
            }
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Mat4;
    use crate::scene::{MeshObject, TriangleMesh};
    use approx::assert_relative_eq;

    fn caster_at(position: Vec3) -> Box<dyn SceneObject> {
        let mesh = TriangleMesh::from_vertices(
            &[
                Vec3::new(-1.0, -1.0, 0.0),
                Vec3::new(1.0, -1.0, 0.0),
                Vec3::new(0.0, 1.0, 0.0),
            ],
            &[0, 1, 2],
        );
        let mut object = MeshObject::with_mesh(mesh);
        object.set_position(position);
        Box::new(object)
    }

    #[test]
    fn test_fit_frames_a_single_caster() {
        let objects = vec![caster_at(Vec3::zeros())];
        let frustum = FrustumCuller::new(&Mat4::identity());
        let camera = Camera::new(Vec3::new(0.0, 0.0, 5.0));

        let fit = simple_shadowmap_projection(
            &objects,
            Vec3::new(0.0, 0.0, -1.0),
            &frustum,
            &camera,
        );

        // eye sits on the +Z side, looking down the light direction
        assert!(fit.eye.z > 0.0);
        assert_relative_eq!(fit.target, Vec3::zeros(), epsilon = 1e-5);
        let world_radius = 2.0f32.sqrt() * 3.0f32.sqrt();
        assert_relative_eq!(fit.width, 2.0 * world_radius, epsilon = 1e-4);
        assert_relative_eq!(fit.height, 2.0 * world_radius, epsilon = 1e-4);
        assert!(fit.near_z > 0.0);
        assert!(fit.far_z > fit.near_z);
    }

    #[test]
    fn test_invisible_and_culled_casters_are_ignored() {
        let visible = caster_at(Vec3::zeros());
        let hidden = caster_at(Vec3::new(0.5, 0.0, 0.0));
        hidden.render_state().set_visible(false);
        // far outside the identity clip cube
        let culled = caster_at(Vec3::new(500.0, 0.0, 0.0));
        let objects = vec![visible, hidden, culled];

        let frustum = FrustumCuller::new(&Mat4::identity());
        let camera = Camera::new(Vec3::zeros());
        let fit = simple_shadowmap_projection(
            &objects,
            Vec3::new(0.0, 0.0, -1.0),
            &frustum,
            &camera,
        );

        // only the visible caster at the origin contributes
        assert_relative_eq!(fit.target, Vec3::zeros(), epsilon = 1e-5);
        assert!(fit.width < 10.0);
    }

    #[test]
    fn test_fallback_frames_the_camera_when_no_casters() {
        let objects: Vec<Box<dyn SceneObject>> = Vec::new();
        let frustum = FrustumCuller::new(&Mat4::identity());
        let camera = Camera::new(Vec3::new(3.0, 0.0, 0.0));

        let fit = simple_shadowmap_projection(
            &objects,
            Vec3::new(0.0, -1.0, 0.0),
            &frustum,
            &camera,
        );

        assert_relative_eq!(fit.target, camera.position);
        assert_relative_eq!(fit.width, FALLBACK_EXTENT);
        assert!(fit.far_z > fit.near_z);
    }

    #[test]
    fn test_two_casters_widen_the_volume() {
        let objects = vec![caster_at(Vec3::new(-5.0, 0.0, 0.0)), caster_at(Vec3::new(5.0, 0.0, 0.0))];
        // a wide orthographic frustum so both casters count
        let frustum = FrustumCuller::new(&Mat4::new_orthographic(
            -100.0, 100.0, -100.0, 100.0, -100.0, 100.0,
        ));
        let camera = Camera::new(Vec3::zeros());

        let fit = simple_shadowmap_projection(
            &objects,
            Vec3::new(0.0, 0.0, -1.0),
            &frustum,
            &camera,
        );

        assert!(fit.width >= 10.0);
        assert_relative_eq!(fit.target.x, 0.0, epsilon = 1e-5);
    }
}
