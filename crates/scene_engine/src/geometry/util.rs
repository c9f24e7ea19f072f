//! Small geometric helpers: angle conversions, quaternion distance,
//! 2D rectangle overlap, and the axis-projection helpers used by the
//! shadow-map projection fitting.

use crate::foundation::math::{Quat, Vec2, Vec3};

/// Convert an angle in degrees to radians
pub fn degrees_to_radians(angle_in_degrees: f32) -> f32 {
    std::f32::consts::PI * angle_in_degrees / 180.0
}

/// Convert an angle in radians to degrees
pub fn radians_to_degrees(angle_in_radians: f32) -> f32 {
    180.0 * angle_in_radians / std::f32::consts::PI
}

/// Angular distance between two rotations, in radians.
///
/// Uses the inner-product form `acos(2 * <q1, q2>^2 - 1)`; the result is in
/// `[0, pi]` and insensitive to the double-cover sign of the quaternions.
pub fn radial_distance(q1: &Quat, q2: &Quat) -> f32 {
    let inner_product = q1.coords.dot(&q2.coords);
    (2.0 * inner_product * inner_product - 1.0).clamp(-1.0, 1.0).acos()
}

/// Return true when two 2D rectangles overlap
pub fn rects_overlap(r1_min: Vec2, r1_max: Vec2, r2_min: Vec2, r2_max: Vec2) -> bool {
    !(r1_max.x < r2_min.x || r2_max.x < r1_min.x || r1_max.y < r2_min.y || r2_max.y < r1_min.y)
}

/// Pick two unit axes perpendicular to `z_axis`, forming a right-handed
/// basis `(x, y, z)`
pub fn two_perp_axes(z_axis: Vec3) -> (Vec3, Vec3) {
    let z_axis = z_axis.normalize();
    let delta = 0.01;
    let x_axis = if z_axis.x.abs() < delta && z_axis.y.abs() < delta {
        // z is (anti)parallel to the world z axis
        Vec3::new(1.0, 0.0, 0.0)
    } else {
        Vec3::new(z_axis.y, -z_axis.x, 0.0).normalize()
    };
    let y_axis = z_axis.cross(&x_axis);
    (x_axis, y_axis)
}

/// Project a point onto three (unit-length) axes, returning its coordinates
/// in that basis
pub fn project_coord(point: Vec3, dir_x: Vec3, dir_y: Vec3, dir_z: Vec3) -> Vec3 {
    Vec3::new(point.dot(&dir_x), point.dot(&dir_y), point.dot(&dir_z))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Quat;
    use approx::assert_relative_eq;
    use std::f32::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_angle_conversions_are_inverse() {
        assert_relative_eq!(degrees_to_radians(180.0), PI);
        assert_relative_eq!(radians_to_degrees(PI), 180.0);
        assert_relative_eq!(radians_to_degrees(degrees_to_radians(37.5)), 37.5, epsilon = 1e-5);
    }

    #[test]
    fn test_radial_distance_of_identical_rotations_is_zero() {
        let q = Quat::from_axis_angle(&Vec3::y_axis(), 0.7);
        assert_relative_eq!(radial_distance(&q, &q), 0.0, epsilon = 1e-3);
    }

    #[test]
    fn test_radial_distance_of_quarter_turn() {
        let q1 = Quat::identity();
        let q2 = Quat::from_axis_angle(&Vec3::x_axis(), FRAC_PI_2);
        assert_relative_eq!(radial_distance(&q1, &q2), FRAC_PI_2, epsilon = 1e-5);
    }

    #[test]
    fn test_rects_overlap() {
        let overlap = rects_overlap(
            Vec2::new(0.0, 0.0),
            Vec2::new(2.0, 2.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(3.0, 3.0),
        );
        assert!(overlap);

        let disjoint = rects_overlap(
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(2.0, 2.0),
            Vec2::new(3.0, 3.0),
        );
        assert!(!disjoint);

        // touching edges count as overlapping
        let touching = rects_overlap(
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(2.0, 1.0),
        );
        assert!(touching);
    }

    #[test]
    fn test_two_perp_axes_form_orthonormal_basis() {
        for z in [
            Vec3::new(0.0, 0.0, -1.0),
            Vec3::new(1.0, 2.0, 3.0),
            Vec3::new(-4.0, 0.5, 0.0),
        ] {
            let (x, y) = two_perp_axes(z);
            let z = z.normalize();
            assert_relative_eq!(x.norm(), 1.0, epsilon = 1e-5);
            assert_relative_eq!(y.norm(), 1.0, epsilon = 1e-5);
            assert_relative_eq!(x.dot(&z), 0.0, epsilon = 1e-5);
            assert_relative_eq!(y.dot(&z), 0.0, epsilon = 1e-5);
            assert_relative_eq!(x.dot(&y), 0.0, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_project_coord_recovers_basis_coordinates() {
        let (x, y) = two_perp_axes(Vec3::new(0.0, 0.0, -1.0));
        let z = Vec3::new(0.0, 0.0, -1.0);
        let p = x * 2.0 + y * 3.0 + z * 4.0;
        let coords = project_coord(p, x, y, z);
        assert_relative_eq!(coords, Vec3::new(2.0, 3.0, 4.0), epsilon = 1e-5);
    }
}
