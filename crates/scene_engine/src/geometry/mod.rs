//! Geometry math library
//!
//! Pure geometric primitives and intersection algorithms: rays, axis-aligned
//! bounding boxes, bounding spheres, triangles, and a handful of small
//! helpers. No state, no GPU types.

mod aabb;
mod ray;
mod sphere;
mod triangle;
pub mod util;

pub use aabb::Aabb;
pub use ray::Ray;
pub use sphere::BoundingSphere;
pub use triangle::Triangle;
