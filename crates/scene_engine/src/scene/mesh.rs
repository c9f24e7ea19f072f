//! Local-space triangle meshes used for precise picking

use crate::foundation::math::Vec3;
use crate::geometry::Triangle;

/// A triangle mesh stored in model space (local coordinates, never
/// modified after construction)
#[derive(Debug, Clone)]
pub struct TriangleMesh {
    triangles: Vec<Triangle>,
    bounding_radius: f32,
}

impl TriangleMesh {
    /// Build a mesh from model-space vertices and triangle indices.
    /// Trailing indices that do not form a full triangle are ignored.
    pub fn from_vertices(vertices: &[Vec3], indices: &[u32]) -> Self {
        let mut triangles = Vec::new();
        for chunk in indices.chunks(3) {
            if chunk.len() == 3 {
                triangles.push(Triangle::new(
                    vertices[chunk[0] as usize],
                    vertices[chunk[1] as usize],
                    vertices[chunk[2] as usize],
                ));
            }
        }

        // Bounding radius from the furthest vertex
        let mut max_distance_sq = 0.0f32;
        for tri in &triangles {
            for vertex in [tri.v0, tri.v1, tri.v2] {
                max_distance_sq = max_distance_sq.max(vertex.magnitude_squared());
            }
        }

        Self {
            triangles,
            bounding_radius: max_distance_sq.sqrt(),
        }
    }

    /// The mesh's triangles in model space
    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    /// Radius of the model-space bounding sphere centered at the origin
    pub fn bounding_radius(&self) -> f32 {
        self.bounding_radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_from_vertices_builds_triangles() {
        let mesh = TriangleMesh::from_vertices(
            &[
                Vec3::new(-1.0, -1.0, 0.0),
                Vec3::new(1.0, -1.0, 0.0),
                Vec3::new(0.0, 1.0, 0.0),
            ],
            &[0, 1, 2],
        );
        assert_eq!(mesh.triangles().len(), 1);
    }

    #[test]
    fn test_bounding_radius_is_furthest_vertex() {
        let mesh = TriangleMesh::from_vertices(
            &[
                Vec3::new(3.0, 0.0, 0.0),
                Vec3::new(0.0, 1.0, 0.0),
                Vec3::new(0.0, 0.0, -1.0),
            ],
            &[0, 1, 2],
        );
        assert_relative_eq!(mesh.bounding_radius(), 3.0);
    }

    #[test]
    fn test_incomplete_index_triple_is_ignored() {
        let mesh = TriangleMesh::from_vertices(
            &[
                Vec3::new(-1.0, -1.0, 0.0),
                Vec3::new(1.0, -1.0, 0.0),
                Vec3::new(0.0, 1.0, 0.0),
            ],
            &[0, 1, 2, 0, 1],
        );
        assert_eq!(mesh.triangles().len(), 1);
    }
}
