//! Triangles and ray/triangle intersection

use super::Ray;
use crate::foundation::math::Vec3;

const EPSILON: f32 = 1e-6;

/// A triangle, wound counter-clockwise for a front face in the engine's
/// right-handed coordinate system
#[derive(Debug, Clone, Copy)]
pub struct Triangle {
    /// First vertex
    pub v0: Vec3,
    /// Second vertex
    pub v1: Vec3,
    /// Third vertex
    pub v2: Vec3,
}

impl Triangle {
    /// Creates a new triangle
    pub fn new(v0: Vec3, v1: Vec3, v2: Vec3) -> Self {
        Self { v0, v1, v2 }
    }

    /// Calculates the normal of the triangle (right-hand rule)
    pub fn normal(&self) -> Vec3 {
        let edge1 = self.v1 - self.v0;
        let edge2 = self.v2 - self.v0;
        edge1.cross(&edge2).normalize()
    }

    /// Calculates the centroid (center point) of the triangle
    pub fn centroid(&self) -> Vec3 {
        (self.v0 + self.v1 + self.v2) / 3.0
    }

    /// Möller-Trumbore ray-triangle intersection with back-face rejection.
    ///
    /// Returns the distance along the ray to the contact point, or `None`.
    /// A negative facing determinant means the ray approaches the triangle
    /// from behind and is rejected; a near-zero determinant means the ray is
    /// parallel to the triangle plane. The picking sign convention in
    /// `Scene::intersect` relies on this one-sided test.
    ///
    /// See: "Fast, Minimum Storage Ray/Triangle Intersection" by Möller & Trumbore
    pub fn intersect_ray_culling(&self, ray: &Ray) -> Option<f32> {
        let edge1 = self.v1 - self.v0;
        let edge2 = self.v2 - self.v0;

        let p = ray.direction.cross(&edge2);
        let det = edge1.dot(&p);

        // Back-facing triangle
        if det < 0.0 {
            return None;
        }
        // Ray parallel to the triangle plane
        if det < EPSILON {
            return None;
        }
        let inv_det = 1.0 / det;

        let s = ray.origin - self.v0;
        let u = s.dot(&p) * inv_det;
        if !(0.0..=1.0).contains(&u) {
            return None;
        }

        let q = s.cross(&edge1);
        let v = ray.direction.dot(&q) * inv_det;
        if v < 0.0 || u + v > 1.0 {
            return None;
        }

        let t = edge2.dot(&q) * inv_det;
        if t > EPSILON {
            Some(t)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn front_facing_triangle() -> Triangle {
        Triangle::new(
            Vec3::new(-1.0, -1.0, 0.0),
            Vec3::new(1.0, -1.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
        )
    }

    #[test]
    fn test_ray_hits_triangle_at_distance_five() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0));
        let t = front_facing_triangle().intersect_ray_culling(&ray).unwrap();
        assert_relative_eq!(t, 5.0);
    }

    #[test]
    fn test_offset_ray_misses_triangle() {
        let ray = Ray::new(Vec3::new(10.0, 10.0, 5.0), Vec3::new(0.0, 0.0, -1.0));
        assert!(front_facing_triangle().intersect_ray_culling(&ray).is_none());
    }

    #[test]
    fn test_back_facing_triangle_is_rejected() {
        // Reverse the winding so the determinant flips sign
        let tri = Triangle::new(
            Vec3::new(1.0, -1.0, 0.0),
            Vec3::new(-1.0, -1.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
        );
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0));
        assert!(tri.intersect_ray_culling(&ray).is_none());
    }

    #[test]
    fn test_parallel_ray_is_rejected() {
        let ray = Ray::new(Vec3::new(0.0, 5.0, 0.0), Vec3::new(1.0, 0.0, 0.0));
        assert!(front_facing_triangle().intersect_ray_culling(&ray).is_none());
    }

    #[test]
    fn test_contact_behind_origin_is_rejected() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::new(0.0, 0.0, -1.0));
        assert!(front_facing_triangle().intersect_ray_culling(&ray).is_none());
    }

    #[test]
    fn test_normal_faces_positive_z() {
        assert_relative_eq!(front_facing_triangle().normal(), Vec3::new(0.0, 0.0, 1.0));
    }
}
