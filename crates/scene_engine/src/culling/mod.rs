//! Visibility culling
//!
//! A frustum culler is built once per frame from the combined
//! view-projection matrix and tests world-space bounding spheres.

mod frustum;

pub use frustum::{FrustumCuller, Plane};
