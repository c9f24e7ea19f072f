//! Scene ownership and the per-frame update/render/pick loop

mod camera;
mod mesh;
mod object;
#[allow(clippy::module_inception)]
mod scene;

pub use camera::Camera;
pub use mesh::TriangleMesh;
pub use object::{MeshObject, RenderState, RenderStateFlags, SceneObject};
pub use scene::{BeforeRenderCallback, BeforeRenderKey, Scene};
