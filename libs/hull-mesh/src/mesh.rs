//! # Hull Mesh
//!
//! Non-indexed, flat-shaded triangle list produced from a convex hull.
//! Every face contributes three consecutive vertices, each carrying the
//! face's outward unit normal.

use bytemuck::{Pod, Zeroable};
use glam::DVec3;
use serde::{Deserialize, Serialize};

/// Interleaved GPU vertex in the `3f 3f` layout (position, then normal).
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct GpuVertex {
    /// Vertex position.
    pub position: [f32; 3],
    /// Outward face normal.
    pub normal: [f32; 3],
}

/// A flat-shaded triangle list.
///
/// All geometry calculations use f64 internally. Export to f32 only
/// happens at the GPU byte boundary.
///
/// # Example
///
/// ```rust
/// use hull_mesh::HullMesh;
/// use glam::DVec3;
///
/// let mut mesh = HullMesh::new();
/// mesh.add_face([DVec3::ZERO, DVec3::X, DVec3::Y], DVec3::Z);
/// assert_eq!(mesh.vertex_count(), 3);
/// assert_eq!(mesh.triangle_count(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HullMesh {
    /// Corner positions, three per face.
    positions: Vec<DVec3>,
    /// Face normals replicated on each corner.
    normals: Vec<DVec3>,
}

impl HullMesh {
    /// Creates an empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a mesh with room for `face_count` faces.
    pub fn with_capacity(face_count: usize) -> Self {
        Self {
            positions: Vec::with_capacity(face_count * 3),
            normals: Vec::with_capacity(face_count * 3),
        }
    }

    /// Appends a face given its corners (CCW from outside) and unit normal.
    pub fn add_face(&mut self, corners: [DVec3; 3], normal: DVec3) {
        self.positions.extend_from_slice(&corners);
        self.normals.extend_from_slice(&[normal; 3]);
    }

    /// Returns the number of emitted vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Returns the number of triangles.
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// Returns true if the mesh is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Returns the corner positions.
    #[inline]
    pub fn positions(&self) -> &[DVec3] {
        &self.positions
    }

    /// Returns the per-vertex normals.
    #[inline]
    pub fn normals(&self) -> &[DVec3] {
        &self.normals
    }

    /// Returns the corners and normal of face `index`.
    pub fn face(&self, index: usize) -> ([DVec3; 3], DVec3) {
        let base = index * 3;
        (
            [
                self.positions[base],
                self.positions[base + 1],
                self.positions[base + 2],
            ],
            self.normals[base],
        )
    }

    /// Iterates over `(corners, normal)` pairs, one per face.
    pub fn faces(&self) -> impl Iterator<Item = ([DVec3; 3], DVec3)> + '_ {
        (0..self.triangle_count()).map(move |i| self.face(i))
    }

    /// Splits the mesh into `(vertex_positions, vertex_normals)`.
    pub fn into_parts(self) -> (Vec<DVec3>, Vec<DVec3>) {
        (self.positions, self.normals)
    }

    /// Computes the axis-aligned bounding box.
    ///
    /// Returns (min, max) corners of the bounding box.
    pub fn bounding_box(&self) -> (DVec3, DVec3) {
        let Some((first, rest)) = self.positions.split_first() else {
            return (DVec3::ZERO, DVec3::ZERO);
        };

        rest.iter()
            .fold((*first, *first), |(min, max), v| (min.min(*v), max.max(*v)))
    }

    /// Exports positions as f32 array for GPU.
    ///
    /// Returns flattened [x, y, z, x, y, z, ...] array.
    pub fn vertices_f32(&self) -> Vec<f32> {
        flatten_f32(&self.positions)
    }

    /// Exports normals as f32 array for GPU.
    pub fn normals_f32(&self) -> Vec<f32> {
        flatten_f32(&self.normals)
    }

    /// Interleaves positions and normals into GPU vertices.
    pub fn interleaved(&self) -> Vec<GpuVertex> {
        self.positions
            .iter()
            .zip(&self.normals)
            .map(|(p, n)| GpuVertex {
                position: p.as_vec3().to_array(),
                normal: n.as_vec3().to_array(),
            })
            .collect()
    }

    /// Packs the mesh into tightly packed `3f 3f` bytes in native byte order.
    pub fn to_bytes(&self) -> Vec<u8> {
        bytemuck::cast_slice(&self.interleaved()).to_vec()
    }
}

fn flatten_f32(values: &[DVec3]) -> Vec<f32> {
    let mut result = Vec::with_capacity(values.len() * 3);
    for v in values {
        result.push(v.x as f32);
        result.push(v.y as f32);
        result.push(v.z as f32);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_triangle() -> HullMesh {
        let mut mesh = HullMesh::new();
        mesh.add_face(
            [
                DVec3::new(0.0, 0.0, 0.0),
                DVec3::new(1.0, 0.0, 0.0),
                DVec3::new(0.0, 1.0, 0.0),
            ],
            DVec3::Z,
        );
        mesh
    }

    #[test]
    fn test_mesh_new() {
        let mesh = HullMesh::new();
        assert!(mesh.is_empty());
        assert_eq!(mesh.vertex_count(), 0);
        assert_eq!(mesh.triangle_count(), 0);
    }

    #[test]
    fn test_mesh_add_face_replicates_normal() {
        let mesh = unit_triangle();
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.normals(), &[DVec3::Z; 3]);
        let (corners, normal) = mesh.face(0);
        assert_eq!(corners[1], DVec3::X);
        assert_eq!(normal, DVec3::Z);
    }

    #[test]
    fn test_mesh_bounding_box() {
        let mut mesh = HullMesh::new();
        mesh.add_face(
            [
                DVec3::new(-1.0, -2.0, -3.0),
                DVec3::new(4.0, 5.0, 6.0),
                DVec3::ZERO,
            ],
            DVec3::X,
        );
        let (min, max) = mesh.bounding_box();
        assert_eq!(min, DVec3::new(-1.0, -2.0, -3.0));
        assert_eq!(max, DVec3::new(4.0, 5.0, 6.0));
    }

    #[test]
    fn test_mesh_vertices_f32() {
        let mesh = unit_triangle();
        assert_eq!(
            mesh.vertices_f32(),
            vec![0.0f32, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0]
        );
        assert_eq!(mesh.normals_f32()[..3], [0.0f32, 0.0, 1.0]);
    }

    #[test]
    fn test_mesh_bytes_are_interleaved() {
        let mesh = unit_triangle();
        let bytes = mesh.to_bytes();
        assert_eq!(bytes.len(), 3 * std::mem::size_of::<GpuVertex>());
        assert_eq!(std::mem::size_of::<GpuVertex>(), 24);

        // Second vertex: position (1, 0, 0) followed by normal (0, 0, 1)
        let expected: Vec<u8> = [1.0f32, 0.0, 0.0, 0.0, 0.0, 1.0]
            .iter()
            .flat_map(|f| f.to_ne_bytes())
            .collect();
        assert_eq!(&bytes[24..48], expected.as_slice());
    }

    #[test]
    fn test_mesh_into_parts() {
        let (positions, normals) = unit_triangle().into_parts();
        assert_eq!(positions.len(), normals.len());
        assert_eq!(positions.len(), 3);
    }
}
