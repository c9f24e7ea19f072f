//! Bounding spheres

use super::Ray;
use crate::foundation::math::Vec3;

/// A bounding sphere used for fast culling and picking rejection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingSphere {
    /// The center position of the sphere in world space
    pub center: Vec3,
    /// The radius of the sphere
    pub radius: f32,
}

impl BoundingSphere {
    /// Creates a new bounding sphere with the given center and radius
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Check if this sphere intersects with another
    pub fn intersects(&self, other: &Self) -> bool {
        let distance_squared = (self.center - other.center).magnitude_squared();
        let radius_sum = self.radius + other.radius;
        distance_squared <= radius_sum * radius_sum
    }

    /// Test ray intersection with this sphere.
    ///
    /// Returns the distance along the ray to the nearest intersection in
    /// front of the origin, or `None`. Assumes a unit-length ray direction.
    pub fn intersect_ray(&self, ray: &Ray) -> Option<f32> {
        let oc = ray.origin - self.center;

        // Quadratic coefficients for |origin + t*direction - center|^2 = r^2
        let a = ray.direction.dot(&ray.direction);
        let b = 2.0 * oc.dot(&ray.direction);
        let c = oc.dot(&oc) - self.radius * self.radius;

        let discriminant = b * b - 4.0 * a * c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrt_discriminant = discriminant.sqrt();
        let t1 = (-b - sqrt_discriminant) / (2.0 * a);
        let t2 = (-b + sqrt_discriminant) / (2.0 * a);

        if t1 > 0.0 {
            Some(t1)
        } else if t2 > 0.0 {
            Some(t2)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_ray_hits_sphere_at_near_surface() {
        let sphere = BoundingSphere::new(Vec3::zeros(), 1.0);
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0));
        let t = sphere.intersect_ray(&ray).unwrap();
        assert_relative_eq!(t, 4.0);
    }

    #[test]
    fn test_ray_misses_sphere() {
        let sphere = BoundingSphere::new(Vec3::zeros(), 1.0);
        let ray = Ray::new(Vec3::new(5.0, 5.0, 5.0), Vec3::new(0.0, 0.0, -1.0));
        assert!(sphere.intersect_ray(&ray).is_none());
    }

    #[test]
    fn test_ray_pointing_away_misses() {
        let sphere = BoundingSphere::new(Vec3::zeros(), 1.0);
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, 1.0));
        assert!(sphere.intersect_ray(&ray).is_none());
    }

    #[test]
    fn test_ray_from_inside_hits_far_surface() {
        let sphere = BoundingSphere::new(Vec3::zeros(), 2.0);
        let ray = Ray::new(Vec3::zeros(), Vec3::new(1.0, 0.0, 0.0));
        let t = sphere.intersect_ray(&ray).unwrap();
        assert_relative_eq!(t, 2.0);
    }

    #[test]
    fn test_sphere_sphere_overlap() {
        let a = BoundingSphere::new(Vec3::zeros(), 1.0);
        let b = BoundingSphere::new(Vec3::new(1.5, 0.0, 0.0), 1.0);
        let c = BoundingSphere::new(Vec3::new(5.0, 0.0, 0.0), 1.0);
        assert!(a.intersects(&b));
        assert!(!a.intersects(&c));
    }
}
