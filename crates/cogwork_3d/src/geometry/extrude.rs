//! Extrusion of planar shapes into bevelled solids
//!
//! The outline is swept along +Z through a stack of layers: a back bevel, the
//! straight wall, then a front bevel. Bevel layers follow a quarter circle,
//! pulling the outline inward near the caps. Caps are triangulated with lyon.

use super::shape::{signed_area, Shape};
use super::{Geometry, Vertex};
use crate::error::{invalid, GeometryError, Result};
use cogwork_core::{Vec2, Vec3};
use lyon::lyon_tessellation::{
    BuffersBuilder, FillOptions, FillTessellator, FillVertex, VertexBuffers,
};
use lyon::math::point;
use lyon::path::PathEvent;
use std::f32::consts::FRAC_PI_2;

/// Miter offsets are capped so sharp tooth corners do not spike outward
const MAX_MITER: f32 = 2.0;

/// Extrusion settings
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ExtrudeOptions {
    /// Length of the straight wall
    pub depth: f32,
    pub bevel_enabled: bool,
    /// How far each bevel extends past the wall along Z
    pub bevel_thickness: f32,
    /// How far the wall sits outside the cap outline
    pub bevel_size: f32,
    pub bevel_segments: u32,
}

impl Default for ExtrudeOptions {
    fn default() -> Self {
        Self {
            depth: 1.0,
            bevel_enabled: true,
            bevel_thickness: 0.2,
            bevel_size: 0.1,
            bevel_segments: 3,
        }
    }
}

impl ExtrudeOptions {
    pub fn new(depth: f32) -> Self {
        Self {
            depth,
            ..Default::default()
        }
    }

    pub fn bevel(mut self, thickness: f32, size: f32, segments: u32) -> Self {
        self.bevel_enabled = true;
        self.bevel_thickness = thickness;
        self.bevel_size = size;
        self.bevel_segments = segments;
        self
    }

    pub fn without_bevel(mut self) -> Self {
        self.bevel_enabled = false;
        self
    }
}

/// Layer of the sweep: Z height and outward offset of the outline
#[derive(Clone, Copy, Debug)]
struct Layer {
    z: f32,
    offset: f32,
}

fn layers(options: &ExtrudeOptions) -> Vec<Layer> {
    if !options.bevel_enabled || options.bevel_segments == 0 {
        return vec![
            Layer { z: 0.0, offset: 0.0 },
            Layer {
                z: options.depth,
                offset: 0.0,
            },
        ];
    }

    let segments = options.bevel_segments;
    let bevel = |s: u32| {
        let t = s as f32 / segments as f32;
        (
            options.bevel_thickness * (t * FRAC_PI_2).cos(),
            options.bevel_size * (t * FRAC_PI_2).sin(),
        )
    };

    let mut layers = Vec::with_capacity(2 * (segments as usize + 1));
    for s in 0..=segments {
        let (dz, offset) = bevel(s);
        layers.push(Layer { z: -dz, offset });
    }
    for s in (0..=segments).rev() {
        let (dz, offset) = bevel(s);
        layers.push(Layer {
            z: options.depth + dz,
            offset,
        });
    }
    layers
}

/// Per-point outward miter direction for a counter-clockwise contour
fn miter_normals(contour: &[Vec2]) -> Vec<Vec2> {
    let n = contour.len();
    let edge_normal = |a: Vec2, b: Vec2| {
        let d = b - a;
        let len = d.length();
        if len > 0.0 {
            Vec2::new(d.y / len, -d.x / len)
        } else {
            Vec2::ZERO
        }
    };

    (0..n)
        .map(|i| {
            let prev = contour[(i + n - 1) % n];
            let here = contour[i];
            let next = contour[(i + 1) % n];
            let n0 = edge_normal(prev, here);
            let n1 = edge_normal(here, next);

            let sum = Vec2::new(n0.x + n1.x, n0.y + n1.y);
            let len = sum.length();
            if len < 1e-6 {
                return n1;
            }
            let dir = Vec2::new(sum.x / len, sum.y / len);
            let cos = dir.x * n0.x + dir.y * n0.y;
            let scale = if cos > 1.0 / MAX_MITER { 1.0 / cos } else { MAX_MITER };
            Vec2::new(dir.x * scale, dir.y * scale)
        })
        .collect()
}

/// Triangulate a simple polygon, returning cap triangles wound counter-clockwise
fn triangulate(contour: &[Vec2]) -> Result<(Vec<Vec2>, Vec<[u32; 3]>)> {
    let first = point(contour[0].x, contour[0].y);
    let mut events = Vec::with_capacity(contour.len() + 1);
    events.push(PathEvent::Begin { at: first });
    for pair in contour.windows(2) {
        events.push(PathEvent::Line {
            from: point(pair[0].x, pair[0].y),
            to: point(pair[1].x, pair[1].y),
        });
    }
    let last = contour[contour.len() - 1];
    events.push(PathEvent::End {
        last: point(last.x, last.y),
        first,
        close: true,
    });

    let mut geometry: VertexBuffers<Vec2, u32> = VertexBuffers::new();
    let mut tessellator = FillTessellator::new();
    let result = tessellator.tessellate(
        events.iter().cloned(),
        &FillOptions::default().with_tolerance(0.01),
        &mut BuffersBuilder::new(&mut geometry, |vertex: FillVertex| {
            let p = vertex.position();
            Vec2::new(p.x, p.y)
        }),
    );
    if let Err(err) = result {
        tracing::warn!("cap tessellation failed: {:?}", err);
        return Err(GeometryError::Tessellation(format!("{err:?}")));
    }

    let triangles = geometry
        .indices
        .chunks_exact(3)
        .map(|tri| {
            let t = [tri[0], tri[1], tri[2]];
            let points = [
                geometry.vertices[t[0] as usize],
                geometry.vertices[t[1] as usize],
                geometry.vertices[t[2] as usize],
            ];
            if signed_area(&points) < 0.0 {
                [t[0], t[2], t[1]]
            } else {
                t
            }
        })
        .collect();
    Ok((geometry.vertices, triangles))
}

/// Extruded solid generator (like Three.js ExtrudeGeometry)
pub struct ExtrudeGeometry;

impl ExtrudeGeometry {
    /// Sweep a closed shape into a solid spanning the bevelled depth along Z
    pub fn new(shape: &Shape, options: &ExtrudeOptions) -> Result<Geometry> {
        if !(options.depth.is_finite() && options.depth > 0.0) {
            return Err(invalid("depth", options.depth, "must be a positive finite number"));
        }
        if options.bevel_enabled
            && !(options.bevel_thickness >= 0.0 && options.bevel_size >= 0.0)
        {
            return Err(invalid(
                "bevel_size",
                options.bevel_size,
                "bevel dimensions must not be negative",
            ));
        }

        let contour = shape.contour();
        if contour.len() < 3 {
            return Err(invalid(
                "points",
                contour.len() as f64,
                "a shape needs at least three distinct points",
            ));
        }

        let normals = miter_normals(&contour);
        let layers = layers(options);
        let n = contour.len();
        let ring = |layer: &Layer, i: usize| {
            let p = contour[i % n];
            let m = normals[i % n];
            Vec3::new(p.x + m.x * layer.offset, p.y + m.y * layer.offset, layer.z)
        };

        let mut vertices = Vec::new();
        let mut indices = Vec::new();

        // Walls, one flat quad per contour edge per layer step
        for (l, pair) in layers.windows(2).enumerate() {
            let v0 = l as f32 / (layers.len() - 1) as f32;
            let v1 = (l + 1) as f32 / (layers.len() - 1) as f32;
            for i in 0..n {
                let quad = [
                    ring(&pair[0], i),
                    ring(&pair[0], i + 1),
                    ring(&pair[1], i + 1),
                    ring(&pair[1], i),
                ];
                let normal = (quad[1] - quad[0]).cross(quad[2] - quad[0]);
                let normal = if normal.length() > 1e-9 {
                    normal.normalize()
                } else {
                    (quad[2] - quad[1]).cross(quad[3] - quad[1]).normalize()
                };

                let u0 = i as f32 / n as f32;
                let u1 = (i + 1) as f32 / n as f32;
                let base = vertices.len() as u32;
                for (p, uv) in quad.iter().zip([[u0, v0], [u1, v0], [u1, v1], [u0, v1]]) {
                    vertices.push(Vertex::new(p.to_array(), normal.to_array(), uv));
                }
                indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
            }
        }

        // Caps
        let (cap_points, cap_triangles) = triangulate(&contour)?;
        let back = layers[0].z;
        let front = layers[layers.len() - 1].z;
        for (z, nz) in [(back, -1.0f32), (front, 1.0)] {
            let base = vertices.len() as u32;
            for p in &cap_points {
                vertices.push(Vertex::new([p.x, p.y, z], [0.0, 0.0, nz], [p.x, p.y]));
            }
            for tri in &cap_triangles {
                if nz > 0.0 {
                    indices.extend_from_slice(&[base + tri[0], base + tri[1], base + tri[2]]);
                } else {
                    indices.extend_from_slice(&[base + tri[0], base + tri[2], base + tri[1]]);
                }
            }
        }

        tracing::debug!(
            contour = n,
            layers = layers.len(),
            vertices = vertices.len(),
            "extruded shape"
        );
        Ok(Geometry::from_data(vertices, indices))
    }
}
