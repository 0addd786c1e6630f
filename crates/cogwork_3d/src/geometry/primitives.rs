//! Geometry primitive generators

use super::{Geometry, Vertex};
use std::f32::consts::{PI, TAU};

/// Axis-aligned box centered on the origin
pub struct BoxGeometry;

impl BoxGeometry {
    pub fn new(width: f32, height: f32, depth: f32) -> Geometry {
        let mut vertices = Vec::with_capacity(24);
        let mut indices = Vec::with_capacity(36);

        let half = [width / 2.0, height / 2.0, depth / 2.0];

        // (u axis, v axis, normal axis, normal sign); u x v points along the normal
        let faces: [(usize, usize, usize, f32); 6] = [
            (0, 1, 2, 1.0),
            (1, 0, 2, -1.0),
            (2, 0, 1, 1.0),
            (0, 2, 1, -1.0),
            (1, 2, 0, 1.0),
            (2, 1, 0, -1.0),
        ];

        for (u, v, w, sign) in faces {
            let base = vertices.len() as u32;
            for (du, dv) in [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
                let mut position = [0.0f32; 3];
                position[u] = du * half[u];
                position[v] = dv * half[v];
                position[w] = sign * half[w];

                let mut normal = [0.0f32; 3];
                normal[w] = sign;

                vertices.push(Vertex::new(
                    position,
                    normal,
                    [(du + 1.0) / 2.0, (dv + 1.0) / 2.0],
                ));
            }
            indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
        }

        Geometry::from_data(vertices, indices)
    }
}

/// UV sphere
pub struct SphereGeometry;

impl SphereGeometry {
    pub fn new(radius: f32) -> Geometry {
        Self::with_detail(radius, 32, 16)
    }

    /// Create a sphere with custom segment count
    pub fn with_detail(radius: f32, width_segments: u32, height_segments: u32) -> Geometry {
        let width_segments = width_segments.max(3);
        let height_segments = height_segments.max(2);

        let mut vertices = Vec::new();
        let mut indices = Vec::new();

        for iy in 0..=height_segments {
            let v = iy as f32 / height_segments as f32;
            let phi = v * PI;

            for ix in 0..=width_segments {
                let u = ix as f32 / width_segments as f32;
                let theta = u * TAU;

                let normal = [-phi.sin() * theta.cos(), phi.cos(), phi.sin() * theta.sin()];
                let position = [normal[0] * radius, normal[1] * radius, normal[2] * radius];
                vertices.push(Vertex::new(position, normal, [u, v]));
            }
        }

        for iy in 0..height_segments {
            for ix in 0..width_segments {
                let a = iy * (width_segments + 1) + ix;
                let b = a + width_segments + 1;
                let c = b + 1;
                let d = a + 1;

                if iy != 0 {
                    indices.extend_from_slice(&[a, b, d]);
                }
                if iy != height_segments - 1 {
                    indices.extend_from_slice(&[b, c, d]);
                }
            }
        }

        Geometry::from_data(vertices, indices)
    }
}

/// Cylinder along the Y axis, centered on the origin
pub struct CylinderGeometry;

impl CylinderGeometry {
    pub fn new(radius: f32, height: f32, radial_segments: u32) -> Geometry {
        let radial_segments = radial_segments.max(3);
        let half_height = height / 2.0;

        let mut vertices = Vec::new();
        let mut indices = Vec::new();

        // Side
        for row in 0..=1u32 {
            let y = half_height - row as f32 * height;
            for x in 0..=radial_segments {
                let u = x as f32 / radial_segments as f32;
                let (sin, cos) = (u * TAU).sin_cos();
                vertices.push(Vertex::new(
                    [radius * sin, y, radius * cos],
                    [sin, 0.0, cos],
                    [u, row as f32],
                ));
            }
        }
        for x in 0..radial_segments {
            let a = x;
            let b = a + radial_segments + 1;
            indices.extend_from_slice(&[a, b, a + 1, b, b + 1, a + 1]);
        }

        // Caps
        for (y, ny) in [(half_height, 1.0f32), (-half_height, -1.0)] {
            let center = vertices.len() as u32;
            vertices.push(Vertex::new([0.0, y, 0.0], [0.0, ny, 0.0], [0.5, 0.5]));
            for x in 0..=radial_segments {
                let (sin, cos) = (x as f32 / radial_segments as f32 * TAU).sin_cos();
                vertices.push(Vertex::new(
                    [radius * sin, y, radius * cos],
                    [0.0, ny, 0.0],
                    [0.5 + 0.5 * sin, 0.5 + 0.5 * cos * ny],
                ));
            }
            for x in 0..radial_segments {
                let (i, j) = (center + x + 1, center + x + 2);
                if ny > 0.0 {
                    indices.extend_from_slice(&[center, i, j]);
                } else {
                    indices.extend_from_slice(&[center, j, i]);
                }
            }
        }

        Geometry::from_data(vertices, indices)
    }
}
