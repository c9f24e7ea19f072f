//! Frustum plane extraction and sphere culling tests

use crate::foundation::math::{Mat4, Vec3, Vec4};

/// Plane defined by a normal and a distance offset; a point `p` is on the
/// positive (inside) side when `normal . p + distance >= 0`
#[derive(Debug, Clone, Copy)]
pub struct Plane {
    /// Plane normal (unit length for non-degenerate input)
    pub normal: Vec3,
    /// Distance offset along the normal
    pub distance: f32,
}

impl Plane {
    fn from_coefficients(coefficients: Vec4) -> Self {
        let normal = coefficients.xyz();
        let length = normal.norm();
        // A degenerate matrix can produce a zero-length plane; leave it
        // unnormalized and let the culler degenerate with it.
        if length > f32::EPSILON {
            Self {
                normal: normal / length,
                distance: coefficients.w / length,
            }
        } else {
            Self {
                normal,
                distance: coefficients.w,
            }
        }
    }

    /// Signed distance from the plane to a point
    pub fn distance_to_point(&self, point: Vec3) -> f32 {
        self.normal.dot(&point) + self.distance
    }
}

/// Per-frame frustum culler built from a combined view-projection matrix.
///
/// The test is conservative: a sphere straddling a plane counts as inside,
/// so there are no false negatives. Malformed matrices are not validated
/// and simply yield a degenerate culler.
#[derive(Debug, Clone)]
pub struct FrustumCuller {
    /// Six planes: left, right, bottom, top, near, far
    planes: [Plane; 6],
}

impl FrustumCuller {
    /// Extract the six frustum planes from a combined view-projection
    /// matrix using the Gribb-Hartmann method.
    ///
    /// Column-vector convention: for a matrix that takes world-space points
    /// to clip space (`projection * view`), plane `i` is `row3 +/- rowi`.
    pub fn new(view_projection: &Mat4) -> Self {
        let row = |i: usize| {
            Vec4::new(
                view_projection[(i, 0)],
                view_projection[(i, 1)],
                view_projection[(i, 2)],
                view_projection[(i, 3)],
            )
        };
        let r0 = row(0);
        let r1 = row(1);
        let r2 = row(2);
        let r3 = row(3);

        Self {
            planes: [
                Plane::from_coefficients(r3 + r0), // left
                Plane::from_coefficients(r3 - r0), // right
                Plane::from_coefficients(r3 + r1), // bottom
                Plane::from_coefficients(r3 - r1), // top
                Plane::from_coefficients(r3 + r2), // near
                Plane::from_coefficients(r3 - r2), // far
            ],
        }
    }

    /// Test a world-space bounding sphere against the frustum.
    ///
    /// Returns false only when the sphere's center lies more than `radius`
    /// behind at least one plane.
    pub fn is_sphere_inside_frustum(&self, center: Vec3, radius: f32) -> bool {
        self.planes
            .iter()
            .all(|plane| plane.distance_to_point(center) >= -radius)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::util::degrees_to_radians;

    fn perspective_culler() -> FrustumCuller {
        // Camera at the origin looking down -Z, 90 degree vertical FOV
        let projection = Mat4::new_perspective(1.0, degrees_to_radians(90.0), 0.1, 100.0);
        FrustumCuller::new(&projection)
    }

    #[test]
    fn test_sphere_in_front_of_camera_is_inside() {
        let fc = perspective_culler();
        assert!(fc.is_sphere_inside_frustum(Vec3::new(0.0, 0.0, -10.0), 1.0));
    }

    #[test]
    fn test_sphere_behind_camera_is_outside() {
        let fc = perspective_culler();
        assert!(!fc.is_sphere_inside_frustum(Vec3::new(0.0, 0.0, 10.0), 1.0));
    }

    #[test]
    fn test_sphere_far_to_the_side_is_outside() {
        let fc = perspective_culler();
        // At z = -10 with a 90 degree FOV the frustum is ~10 units wide
        assert!(!fc.is_sphere_inside_frustum(Vec3::new(100.0, 0.0, -10.0), 1.0));
    }

    #[test]
    fn test_sphere_beyond_far_plane_is_outside() {
        let fc = perspective_culler();
        assert!(!fc.is_sphere_inside_frustum(Vec3::new(0.0, 0.0, -150.0), 1.0));
    }

    #[test]
    fn test_sphere_straddling_a_plane_counts_as_inside() {
        let fc = perspective_culler();
        // Center just past the far plane, but the radius reaches back inside
        assert!(fc.is_sphere_inside_frustum(Vec3::new(0.0, 0.0, -101.0), 5.0));
    }

    #[test]
    fn test_view_matrix_offsets_the_frustum() {
        // Camera translated to +Z 10, still looking down -Z
        let projection = Mat4::new_perspective(1.0, degrees_to_radians(90.0), 0.1, 100.0);
        let view = Mat4::new_translation(&Vec3::new(0.0, 0.0, -10.0));
        let fc = FrustumCuller::new(&(projection * view));
        assert!(fc.is_sphere_inside_frustum(Vec3::new(0.0, 0.0, -5.0), 1.0));
        assert!(!fc.is_sphere_inside_frustum(Vec3::new(0.0, 0.0, 15.0), 1.0));
    }
}
