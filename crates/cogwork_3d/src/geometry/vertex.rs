//! Vertex format and geometry structures

use crate::math::{BoundingBox, BoundingSphere};
use cogwork_core::Vec3;
use rustc_hash::FxHashMap;

/// Vertex data for 3D geometry
#[derive(Clone, Copy, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
#[repr(C)]
pub struct Vertex {
    /// Position in local space
    pub position: [f32; 3],
    /// Normal vector
    pub normal: [f32; 3],
    /// Texture coordinates
    pub uv: [f32; 2],
}

impl Default for Vertex {
    fn default() -> Self {
        Self {
            position: [0.0, 0.0, 0.0],
            normal: [0.0, 1.0, 0.0],
            uv: [0.0, 0.0],
        }
    }
}

impl Vertex {
    pub fn new(position: [f32; 3], normal: [f32; 3], uv: [f32; 2]) -> Self {
        Self {
            position,
            normal,
            uv,
        }
    }

    pub fn position(&self) -> Vec3 {
        Vec3::from(self.position)
    }
}

/// How the index buffer is interpreted
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Topology {
    /// Every three indices form a triangle
    #[default]
    Triangles,
    /// Every two indices form an independent line segment
    Lines,
}

/// Geometry resource containing vertex and index data
#[derive(Clone, Debug, Default)]
pub struct Geometry {
    /// Vertex data
    pub vertices: Vec<Vertex>,
    /// Index data
    pub indices: Vec<u32>,
    pub topology: Topology,
    /// Axis-aligned bounding box
    pub bounding_box: BoundingBox,
    /// Bounding sphere
    pub bounding_sphere: BoundingSphere,
}

impl Geometry {
    /// Create a triangle mesh from vertices and indices
    pub fn from_data(vertices: Vec<Vertex>, indices: Vec<u32>) -> Self {
        let mut geometry = Self {
            vertices,
            indices,
            topology: Topology::Triangles,
            bounding_box: BoundingBox::empty(),
            bounding_sphere: BoundingSphere::default(),
        };
        geometry.compute_bounds();
        geometry
    }

    /// Line-segment geometry, consecutive points pair up into segments
    ///
    /// A trailing unpaired point is dropped so the point buffer always holds
    /// whole segments.
    pub fn line_segments(points: &[Vec3]) -> Self {
        let usable = points.len() - points.len() % 2;
        let vertices: Vec<Vertex> = points[..usable]
            .iter()
            .map(|p| Vertex::new(p.to_array(), [0.0, 1.0, 0.0], [0.0, 0.0]))
            .collect();
        let indices = (0..vertices.len() as u32).collect();

        let mut geometry = Self::from_data(vertices, indices);
        geometry.topology = Topology::Lines;
        geometry
    }

    /// Compute bounding volumes from vertex data
    pub fn compute_bounds(&mut self) {
        let points: Vec<Vec3> = self.vertices.iter().map(Vertex::position).collect();
        self.bounding_box = BoundingBox::from_points(points.iter().copied());
        self.bounding_sphere = BoundingSphere::from_points(&points);
    }

    /// Translate so the bounding box center sits at the origin
    pub fn center(&mut self) -> Vec3 {
        if self.bounding_box.is_empty() {
            return Vec3::ZERO;
        }
        let offset = -self.bounding_box.center();
        for vertex in &mut self.vertices {
            vertex.position = (vertex.position() + offset).to_array();
        }
        self.compute_bounds();
        offset
    }

    /// Compute flat normals (one normal per face)
    pub fn compute_flat_normals(&mut self) {
        if self.topology != Topology::Triangles {
            return;
        }
        for chunk in self.indices.chunks_exact(3) {
            let [i0, i1, i2] = [chunk[0] as usize, chunk[1] as usize, chunk[2] as usize];
            let p0 = self.vertices[i0].position();
            let p1 = self.vertices[i1].position();
            let p2 = self.vertices[i2].position();

            let normal = (p1 - p0).cross(p2 - p0);
            if normal.length() > 1e-6 {
                let normal = normal.normalize().to_array();
                self.vertices[i0].normal = normal;
                self.vertices[i1].normal = normal;
                self.vertices[i2].normal = normal;
            }
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of points in the vertex buffer
    pub fn point_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    pub fn triangle_count(&self) -> usize {
        match self.topology {
            Topology::Triangles => self.indices.len() / 3,
            Topology::Lines => 0,
        }
    }

    pub fn segment_count(&self) -> usize {
        match self.topology {
            Topology::Triangles => 0,
            Topology::Lines => self.indices.len() / 2,
        }
    }

    /// Raw vertex bytes for upload
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Count triangle edges used by exactly one triangle
    ///
    /// Vertices are welded by position first, so seams between faces that
    /// carry their own normals do not count. A closed solid reports zero.
    pub fn boundary_edge_count(&self) -> usize {
        if self.topology != Topology::Triangles {
            return 0;
        }

        let quantize = |v: &Vertex| {
            let q = |c: f32| (c * 1e4).round() as i64;
            (q(v.position[0]), q(v.position[1]), q(v.position[2]))
        };
        let mut welded: FxHashMap<(i64, i64, i64), u32> = FxHashMap::default();
        let ids: Vec<u32> = self
            .vertices
            .iter()
            .map(|v| {
                let next = welded.len() as u32;
                *welded.entry(quantize(v)).or_insert(next)
            })
            .collect();

        let mut edges: FxHashMap<(u32, u32), u32> = FxHashMap::default();
        for tri in self.indices.chunks_exact(3) {
            let [a, b, c] = [ids[tri[0] as usize], ids[tri[1] as usize], ids[tri[2] as usize]];
            for (u, v) in [(a, b), (b, c), (c, a)] {
                if u == v {
                    continue;
                }
                *edges.entry((u.min(v), u.max(v))).or_insert(0) += 1;
            }
        }
        edges.values().filter(|&&count| count == 1).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_segments_keep_whole_pairs() {
        let points = [Vec3::ZERO, Vec3::ONE, Vec3::UP];
        let lines = Geometry::line_segments(&points);
        assert_eq!(lines.point_count(), 2);
        assert_eq!(lines.segment_count(), 1);
        assert_eq!(lines.triangle_count(), 0);
    }

    #[test]
    fn test_center_moves_box_to_origin() {
        let mut geometry = Geometry::from_data(
            vec![
                Vertex::new([1.0, 1.0, 1.0], [0.0, 0.0, 1.0], [0.0, 0.0]),
                Vertex::new([3.0, 1.0, 1.0], [0.0, 0.0, 1.0], [1.0, 0.0]),
                Vertex::new([3.0, 5.0, 1.0], [0.0, 0.0, 1.0], [1.0, 1.0]),
            ],
            vec![0, 1, 2],
        );
        let offset = geometry.center();
        assert_eq!(offset, Vec3::new(-2.0, -3.0, -1.0));
        assert_eq!(geometry.bounding_box.center(), Vec3::ZERO);
    }

    #[test]
    fn test_single_triangle_is_open() {
        let geometry = Geometry::from_data(
            vec![
                Vertex::new([0.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 0.0]),
                Vertex::new([1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [1.0, 0.0]),
                Vertex::new([0.0, 1.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0]),
            ],
            vec![0, 1, 2],
        );
        assert_eq!(geometry.boundary_edge_count(), 3);
        assert_eq!(geometry.vertex_bytes().len(), 3 * std::mem::size_of::<Vertex>());
    }
}
