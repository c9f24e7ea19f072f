//! Rays for picking and intersection queries

use crate::foundation::math::{Mat4, Point3, Vec3};

/// A ray for ray casting and picking
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    /// The origin point of the ray in world space
    pub origin: Vec3,
    /// The direction of the ray (unit length when built through [`Ray::new`])
    pub direction: Vec3,
}

impl Ray {
    /// Creates a new ray with the given origin and direction
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    /// Creates a ray passing through two points, pointing from `a` to `b`
    pub fn from_two_points(a: Vec3, b: Vec3) -> Self {
        Self::new(a, b - a)
    }

    /// Get a point along the ray at distance t
    pub fn point_at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Transform this ray by a matrix (origin as a point, direction as a
    /// vector, renormalized). Used to move a world-space ray into an
    /// object's local space before precise triangle tests.
    pub fn transformed(&self, matrix: &Mat4) -> Self {
        let origin = matrix.transform_point(&Point3::from(self.origin));
        let direction = matrix.transform_vector(&self.direction);
        Self {
            origin: origin.coords,
            direction: direction.normalize(),
        }
    }

    /// Distance from this (infinite) ray to a point at the closest spot.
    ///
    /// Returns `(perpendicular_distance, distance_along_ray)`; the second
    /// value is the signed projection of `origin - point` onto the ray
    /// direction, which is what the picking code compares.
    pub fn distance_to_point(&self, point: Vec3) -> (f32, f32) {
        let offset = self.origin - point;
        let distance_along_ray = offset.dot(&self.direction);
        let perpendicular = (offset - self.direction * distance_along_ray).norm();
        (perpendicular, distance_along_ray)
    }
}
