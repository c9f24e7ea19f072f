//! # Scene Engine
//!
//! Runtime core of a real-time 3D scene engine. It owns the set of
//! renderable objects and lights, decides each frame which objects are
//! visible, drives depth-only shadow-map passes, and answers ray-picking
//! queries against the scene.
//!
//! Everything GPU-shaped is reached through the [`render::RenderDevice`]
//! trait; shader compilation, vertex-buffer upload, camera management, and
//! windowing are external collaborators.
//!
//! ## Quick Start
//!
//! ```rust
//! use scene_engine::prelude::*;
//!
//! let mut scene = Scene::new();
//! scene.render_config.frustum_culling = true;
//!
//! let mesh = TriangleMesh::from_vertices(
//!     &[
//!         Vec3::new(-1.0, -1.0, 0.0),
//!         Vec3::new(1.0, -1.0, 0.0),
//!         Vec3::new(0.0, 1.0, 0.0),
//!     ],
//!     &[0, 1, 2],
//! );
//! scene.add_object(Box::new(MeshObject::with_mesh(mesh)));
//!
//! scene.update();
//! scene.render();
//!
//! let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0));
//! let picked = scene.intersect(&ray);
//! assert_eq!(picked, Some(0));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod foundation;
pub mod geometry;
pub mod culling;
pub mod render;
pub mod lights;
pub mod scene;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        culling::FrustumCuller,
        foundation::math::{Mat4, Quat, Vec2, Vec3, Transform},
        geometry::{Aabb, BoundingSphere, Ray, Triangle},
        lights::{Light, ShadowMap, ShadowMapError, ShadowMapPool},
        render::{RenderConfig, RenderDevice, RenderStats, WireframeMode},
        scene::{Camera, MeshObject, RenderState, Scene, SceneObject, TriangleMesh},
    };
}
