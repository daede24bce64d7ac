//! Immutable vertex/index buffer pair.

use glam::Vec3;

use crate::MeshError;

/// Positions plus triangle indices, ready to be handed to a renderer.
///
/// A mesh with no indices is a point cloud. For triangle meshes every index
/// is below the vertex count and the index count is a multiple of three.
#[derive(Clone, Debug, PartialEq)]
pub struct Mesh {
    positions: Vec<[f32; 3]>,
    indices: Vec<u32>,
}

impl Mesh {
    /// Build an indexed triangle mesh, validating the index buffer.
    pub fn triangles(positions: Vec<[f32; 3]>, indices: Vec<u32>) -> Result<Self, MeshError> {
        if indices.len() % 3 != 0 {
            return Err(MeshError::IncompleteTriangle(indices.len()));
        }
        if let Some(&index) = indices.iter().find(|&&i| i as usize >= positions.len()) {
            return Err(MeshError::IndexOutOfBounds {
                index,
                vertex_count: positions.len(),
            });
        }
        Ok(Self { positions, indices })
    }

    /// Build a point cloud. No indices, so nothing to validate.
    pub fn point_cloud(positions: Vec<[f32; 3]>) -> Self {
        Self {
            positions,
            indices: Vec::new(),
        }
    }

    /// Vertex positions in buffer order.
    pub fn positions(&self) -> &[[f32; 3]] {
        &self.positions
    }

    /// Triangle-vertex indices. Empty for point clouds.
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of indices.
    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    /// Number of triangles described by the index buffer.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// True when the mesh has no index buffer.
    pub fn is_point_cloud(&self) -> bool {
        self.indices.is_empty()
    }

    /// Distance of the farthest vertex from the origin.
    pub fn bounding_radius(&self) -> f32 {
        self.positions
            .iter()
            .map(|&p| Vec3::from_array(p).length())
            .fold(0.0, f32::max)
    }

    /// Raw vertex bytes (tightly packed `f32` triples) for device upload.
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.positions)
    }

    /// Raw `u32` index bytes for device upload.
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}
