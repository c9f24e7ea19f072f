//! Cameras
//!
//! The scene holds only a non-owning handle to its active camera; camera
//! lifetime and matrix upkeep belong to the application layer, which feeds
//! the resulting matrices into the render configuration each frame.

use crate::foundation::math::{Mat4, Point3, Quat, Vec3};

/// A positionable camera
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// World-space position
    pub position: Vec3,
    /// World-space orientation
    pub orientation: Quat,
}

impl Camera {
    /// Create a camera at `position` with identity orientation (looking
    /// down -Z in the engine's right-handed system)
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            orientation: Quat::identity(),
        }
    }

    /// Orient the camera to look at `target`
    pub fn look_at(&mut self, target: Vec3, up: Vec3) {
        let view = Mat4::look_at_rh(
            &Point3::from(self.position),
            &Point3::from(target),
            &up,
        );
        // The camera's world rotation is the inverse of the view rotation
        if let Some(world) = view.try_inverse() {
            let rotation = world.fixed_view::<3, 3>(0, 0).into_owned();
            self.orientation = Quat::from_matrix(&rotation);
        }
    }

    /// The view matrix (inverse of the camera's world transform)
    pub fn view_matrix(&self) -> Mat4 {
        self.orientation.inverse().to_homogeneous()
            * Mat4::new_translation(&-self.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_view_matrix_moves_world_into_camera_space() {
        let camera = Camera::new(Vec3::new(0.0, 0.0, 10.0));
        let view = camera.view_matrix();
        let p = view.transform_point(&Point3::new(0.0, 0.0, 0.0));
        assert_relative_eq!(p.coords, Vec3::new(0.0, 0.0, -10.0), epsilon = 1e-5);
    }

    #[test]
    fn test_look_at_faces_target() {
        let mut camera = Camera::new(Vec3::new(0.0, 0.0, 10.0));
        camera.look_at(Vec3::new(10.0, 0.0, 10.0), Vec3::y());
        let view = camera.view_matrix();
        // The target direction maps onto the camera's -Z axis
        let p = view.transform_point(&Point3::new(10.0, 0.0, 10.0));
        assert_relative_eq!(p.coords, Vec3::new(0.0, 0.0, -10.0), epsilon = 1e-4);
    }
}
