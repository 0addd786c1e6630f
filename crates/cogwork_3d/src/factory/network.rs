//! Network factory
//!
//! Glowing sphere nodes placed by a layout pattern and joined by a sparse
//! random edge set. Every random draw goes through the caller's generator,
//! so a seeded generator reproduces the same network.

use crate::error::{invalid, GeometryError, Result};
use crate::geometry::{Geometry, SphereGeometry};
use crate::materials::{BasicMaterial, BlendMode, LineMaterial, StandardMaterial};
use crate::scene::{GeometryId, MaterialId, ObjectId, Scene};
use cogwork_core::{Color, Vec3};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

pub const NODE_BLUE: u32 = 0x3b82f6;
pub const NODE_CYAN: u32 = 0x06b6d4;

/// Largest accepted `node_count`; edge selection visits every pair
pub const MAX_NODE_COUNT: usize = 512;

/// Appearance of a single node
#[derive(Clone, Debug, PartialEq)]
pub struct NodeOptions {
    pub radius: f32,
    pub color: Color,
    /// Emissive strength, also drives the glow shell opacity
    pub glow_intensity: f32,
    /// Active nodes glow twice as bright
    pub active: bool,
}

impl Default for NodeOptions {
    fn default() -> Self {
        Self {
            radius: 0.3,
            color: Color::from_hex(NODE_BLUE),
            glow_intensity: 0.5,
            active: false,
        }
    }
}

/// A node built by [`create_node`]
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    pub mesh: ObjectId,
    pub material: MaterialId,
    /// Additive shell, absent when the glow intensity is zero
    pub glow: Option<ObjectId>,
    pub glow_material: Option<MaterialId>,
    pub active: bool,
}

/// Build a node sphere with an optional glow shell, detached from the scene
pub fn create_node(scene: &mut Scene, options: &NodeOptions) -> Result<Node> {
    if !(options.radius.is_finite() && options.radius > 0.0) {
        return Err(invalid("radius", options.radius, "must be a positive finite number"));
    }
    if !(options.glow_intensity.is_finite() && options.glow_intensity >= 0.0) {
        return Err(invalid(
            "glow_intensity",
            options.glow_intensity,
            "must be a finite number no less than zero",
        ));
    }

    let emissive_intensity = if options.active {
        options.glow_intensity * 2.0
    } else {
        options.glow_intensity
    };
    let geometry = scene.add_geometry(SphereGeometry::with_detail(options.radius, 32, 32));
    let material = scene.add_material(
        StandardMaterial::new(options.color)
            .with_emissive(options.color, emissive_intensity)
            .with_roughness(0.3)
            .with_metalness(0.7),
    );
    let mesh = scene.spawn_mesh(geometry, material);

    let (glow, glow_material) = if options.glow_intensity > 0.0 {
        let geometry = scene.add_geometry(SphereGeometry::with_detail(options.radius * 1.5, 16, 16));
        let material = scene.add_material(
            BasicMaterial::new(options.color)
                .with_opacity(options.glow_intensity * 0.3)
                .with_blend_mode(BlendMode::Additive),
        );
        let glow = scene.spawn_mesh(geometry, material);
        scene.add_child(mesh, glow)?;
        (Some(glow), Some(material))
    } else {
        (None, None)
    };

    Ok(Node {
        mesh,
        material,
        glow,
        glow_material,
        active: options.active,
    })
}

/// Node placement strategy
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutPattern {
    /// Uniform inside the bounds
    #[default]
    Random,
    /// Near-square grid with z jitter
    Grid,
    /// Ring in the XZ plane with vertical jitter
    Circular,
    /// Three horizontal bands: one root, up to three children, the rest
    Hierarchical,
}

/// Extent of the placement volume, centered on the origin
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Bounds {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::new(10.0, 6.0, 10.0)
    }
}

fn default_density() -> f32 {
    0.3
}

/// Parameters of [`create_network`]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NetworkOptions {
    pub node_count: usize,
    #[serde(default)]
    pub pattern: LayoutPattern,
    #[serde(default)]
    pub bounds: Bounds,
    /// Probability that a pair within reach gets an edge
    #[serde(default = "default_density")]
    pub connection_density: f32,
}

impl NetworkOptions {
    pub fn new(node_count: usize) -> Self {
        Self {
            node_count,
            pattern: LayoutPattern::default(),
            bounds: Bounds::default(),
            connection_density: default_density(),
        }
    }

    pub fn with_pattern(mut self, pattern: LayoutPattern) -> Self {
        self.pattern = pattern;
        self
    }

    pub fn with_bounds(mut self, bounds: Bounds) -> Self {
        self.bounds = bounds;
        self
    }

    pub fn with_density(mut self, density: f32) -> Self {
        self.connection_density = density;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.node_count > MAX_NODE_COUNT {
            return Err(invalid("node_count", self.node_count as f64, "must be at most 512"));
        }
        let density = self.connection_density;
        if !(0.0..=1.0).contains(&density) {
            return Err(invalid("connection_density", density, "must lie in [0, 1]"));
        }
        for (name, value) in [("bounds.x", self.bounds.x), ("bounds.y", self.bounds.y), ("bounds.z", self.bounds.z)] {
            if !(value.is_finite() && value > 0.0) {
                return Err(invalid(name, value, "must be a positive finite number"));
            }
        }
        Ok(())
    }
}

/// Position of node `index` out of `total`
///
/// Draws one value from `rng` per jittered axis.
pub fn layout_position<R: Rng + ?Sized>(
    pattern: LayoutPattern,
    index: usize,
    total: usize,
    bounds: &Bounds,
    rng: &mut R,
) -> Vec3 {
    let mut jitter = |extent: f32| (rng.gen::<f32>() - 0.5) * extent;
    match pattern {
        LayoutPattern::Random => {
            let x = jitter(bounds.x);
            let y = jitter(bounds.y);
            let z = jitter(bounds.z);
            Vec3::new(x, y, z)
        }
        LayoutPattern::Grid => {
            let cols = (total as f32).sqrt().ceil().max(1.0) as usize;
            let (row, col) = (index / cols, index % cols);
            let half = cols as f32 / 2.0;
            Vec3::new(
                (col as f32 - half) * (bounds.x / cols as f32),
                (row as f32 - half) * (bounds.y / cols as f32),
                jitter(bounds.z * 0.3),
            )
        }
        LayoutPattern::Circular => {
            let angle = index as f32 / total.max(1) as f32 * TAU;
            let radius = bounds.x * 0.4;
            let y = jitter(bounds.y);
            Vec3::new(angle.cos() * radius, y, angle.sin() * radius)
        }
        LayoutPattern::Hierarchical => {
            let second = total.saturating_sub(1).min(3);
            let (level, slot, width) = match index {
                0 => (0, 0, 1),
                i if i <= second => (1, i - 1, second),
                i => (2, i - 1 - second, total - 1 - second),
            };
            let band = bounds.y * 0.4;
            Vec3::new(
                (slot as f32 - width as f32 / 2.0) * (bounds.x / width as f32),
                band - level as f32 * band,
                jitter(bounds.z * 0.2),
            )
        }
    }
}

/// Pick edges: each pair `(i, j)`, `i < j`, is kept with probability
/// `density` when the nodes are closer than `0.8 * bounds.x`
///
/// One draw is made per pair whether or not the pair is in reach, so the
/// cost is quadratic in the number of nodes. [`create_network`] caps the
/// count at [`MAX_NODE_COUNT`].
pub fn select_connections<R: Rng + ?Sized>(
    positions: &[Vec3],
    bounds: &Bounds,
    density: f32,
    rng: &mut R,
) -> Vec<(usize, usize)> {
    let reach = bounds.x * 0.8;
    let mut pairs = Vec::new();
    for i in 0..positions.len() {
        for j in (i + 1)..positions.len() {
            if rng.gen::<f32>() < density && positions[i].distance(positions[j]) < reach {
                pairs.push((i, j));
            }
        }
    }
    pairs
}

/// Line segments joining pairs of nodes
#[derive(Clone, Debug, PartialEq)]
pub struct Connections {
    pub object: ObjectId,
    pub geometry: GeometryId,
    pub material: MaterialId,
    /// Edges actually drawn
    pub pairs: Vec<(usize, usize)>,
}

/// Build line segments between the given node pairs, detached from the scene
///
/// Pairs naming an index past the end of `nodes`, or a node no longer in the
/// scene, are skipped.
pub fn create_connections(
    scene: &mut Scene,
    nodes: &[ObjectId],
    pairs: &[(usize, usize)],
) -> Connections {
    let position = |scene: &Scene, index: usize| {
        nodes
            .get(index)
            .and_then(|&id| scene.transform(id))
            .map(|t| t.position)
    };

    let mut points = Vec::with_capacity(pairs.len() * 2);
    let mut drawn = Vec::with_capacity(pairs.len());
    for &(from, to) in pairs {
        if let (Some(a), Some(b)) = (position(scene, from), position(scene, to)) {
            points.push(a);
            points.push(b);
            drawn.push((from, to));
        }
    }

    let geometry = scene.add_geometry(Geometry::line_segments(&points));
    let material = scene.add_material(LineMaterial::new(Color::from_hex(NODE_CYAN)).with_opacity(0.4));
    let object = scene.spawn_line_segments(geometry, material);
    Connections {
        object,
        geometry,
        material,
        pairs: drawn,
    }
}

/// Nodes, their connections and the group holding both
#[derive(Clone, Debug, PartialEq)]
pub struct Network {
    pub nodes: Vec<Node>,
    pub connections: Connections,
    pub group: ObjectId,
}

impl Network {
    pub fn node_ids(&self) -> Vec<ObjectId> {
        self.nodes.iter().map(|node| node.mesh).collect()
    }
}

/// Build a network under a detached group
///
/// Per node the generator is drawn for radius, glow, the active flag and
/// then the layout jitter; edges are drawn afterwards.
pub fn create_network<R: Rng + ?Sized>(
    scene: &mut Scene,
    options: &NetworkOptions,
    rng: &mut R,
) -> Result<Network> {
    options.validate()?;

    let group = scene.spawn_group();
    let mut nodes = Vec::with_capacity(options.node_count);
    let mut positions = Vec::with_capacity(options.node_count);

    for i in 0..options.node_count {
        let color = if i % 3 == 0 { NODE_BLUE } else { NODE_CYAN };
        let node_options = NodeOptions {
            radius: 0.2 + rng.gen::<f32>() * 0.2,
            color: Color::from_hex(color),
            glow_intensity: 0.4 + rng.gen::<f32>() * 0.3,
            active: rng.gen::<f32>() > 0.7,
        };
        let node = create_node(scene, &node_options)?;

        let position = layout_position(options.pattern, i, options.node_count, &options.bounds, rng);
        if let Some(transform) = scene.transform_mut(node.mesh) {
            transform.position = position;
        }
        scene.add_child(group, node.mesh)?;
        positions.push(position);
        nodes.push(node);
    }

    let pairs = select_connections(&positions, &options.bounds, options.connection_density, rng);
    let ids: Vec<ObjectId> = nodes.iter().map(|node| node.mesh).collect();
    let connections = create_connections(scene, &ids, &pairs);
    scene.add_child(group, connections.object)?;

    tracing::debug!(
        nodes = nodes.len(),
        connections = connections.pairs.len(),
        pattern = ?options.pattern,
        "created network"
    );
    Ok(Network {
        nodes,
        connections,
        group,
    })
}

/// Small spheres spaced evenly from one node toward another, detached
///
/// Particle `i` sits at `t = i / count`; all particles share one geometry
/// and each gets its own material so they can fade independently.
pub fn create_data_flow_particles(
    scene: &mut Scene,
    from: ObjectId,
    to: ObjectId,
    count: usize,
) -> Result<Vec<ObjectId>> {
    let start = scene.transform(from).ok_or(GeometryError::MissingObject)?.position;
    let end = scene.transform(to).ok_or(GeometryError::MissingObject)?.position;
    if count == 0 {
        return Ok(Vec::new());
    }

    let geometry = scene.add_geometry(SphereGeometry::with_detail(0.05, 8, 8));
    let particles = (0..count)
        .map(|i| {
            let material = scene.add_material(BasicMaterial::new(Color::from_hex(NODE_CYAN)).with_opacity(0.8));
            let particle = scene.spawn_mesh(geometry, material);
            if let Some(transform) = scene.transform_mut(particle) {
                transform.position = start.lerp(end, i as f32 / count as f32);
            }
            particle
        })
        .collect();
    Ok(particles)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Topology;
    use crate::materials::Material;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn positions(scene: &Scene, network: &Network) -> Vec<Vec3> {
        network
            .nodes
            .iter()
            .map(|node| scene.transform(node.mesh).unwrap().position)
            .collect()
    }

    fn within(value: f32, extent: f32) -> bool {
        value >= -extent / 2.0 && value <= extent / 2.0
    }

    #[test]
    fn test_node_glow_and_emissive() {
        let mut scene = Scene::new();
        let node = create_node(
            &mut scene,
            &NodeOptions {
                active: true,
                ..Default::default()
            },
        )
        .unwrap();
        let material = scene.material(node.material).and_then(|m| m.as_standard()).unwrap();
        assert_eq!(material.emissive_intensity, 1.0);
        assert_eq!(material.emissive.to_hex(), NODE_BLUE);

        let glow = scene.material(node.glow_material.unwrap()).unwrap();
        assert!((glow.opacity() - 0.15).abs() < 1e-6);
        assert_eq!(scene.children(node.mesh), &[node.glow.unwrap()]);

        let dim = create_node(
            &mut scene,
            &NodeOptions {
                glow_intensity: 0.0,
                ..Default::default()
            },
        )
        .unwrap();
        assert!(dim.glow.is_none());
        assert!(scene.children(dim.mesh).is_empty());
    }

    #[test]
    fn test_diagram_network() {
        let mut scene = Scene::new();
        let mut rng = StdRng::seed_from_u64(7);
        let options = NetworkOptions::new(10)
            .with_pattern(LayoutPattern::Hierarchical)
            .with_bounds(Bounds::new(8.0, 5.0, 3.0))
            .with_density(0.25);
        let network = create_network(&mut scene, &options, &mut rng).unwrap();

        assert_eq!(network.nodes.len(), 10);
        let lines = scene.geometry(network.connections.geometry).unwrap();
        assert_eq!(lines.topology, Topology::Lines);
        assert_eq!(lines.point_count() % 2, 0);
        assert_eq!(lines.point_count(), network.connections.pairs.len() * 2);
        assert!(network.connections.pairs.len() <= 45);
        assert_eq!(scene.children(network.group).len(), 11);

        let bands = [2.0, 0.0, -2.0];
        for (i, p) in positions(&scene, &network).into_iter().enumerate() {
            let level = match i {
                0 => 0,
                1..=3 => 1,
                _ => 2,
            };
            assert!((p.y - bands[level]).abs() < 1e-6);
            assert!(within(p.x, 8.0));
            assert!(p.z.abs() <= 0.3 + 1e-6);
        }
    }

    #[test]
    fn test_random_and_grid_stay_in_bounds() {
        let bounds = Bounds::new(10.0, 6.0, 10.0);
        for pattern in [LayoutPattern::Random, LayoutPattern::Grid] {
            let mut scene = Scene::new();
            let mut rng = StdRng::seed_from_u64(11);
            let options = NetworkOptions::new(17).with_pattern(pattern).with_bounds(bounds);
            let network = create_network(&mut scene, &options, &mut rng).unwrap();
            for p in positions(&scene, &network) {
                assert!(within(p.x, bounds.x) && within(p.y, bounds.y) && within(p.z, bounds.z));
            }
        }
    }

    #[test]
    fn test_circular_ring() {
        let mut scene = Scene::new();
        let mut rng = StdRng::seed_from_u64(3);
        let options = NetworkOptions::new(8).with_pattern(LayoutPattern::Circular);
        let network = create_network(&mut scene, &options, &mut rng).unwrap();
        for p in positions(&scene, &network) {
            assert!(((p.x * p.x + p.z * p.z).sqrt() - 4.0).abs() < 1e-4);
            assert!(within(p.y, 6.0));
        }
    }

    #[test]
    fn test_hierarchical_small_counts() {
        let bounds = Bounds::new(8.0, 5.0, 3.0);
        let mut rng = StdRng::seed_from_u64(5);
        for total in 1..=5 {
            for index in 0..total {
                let p = layout_position(LayoutPattern::Hierarchical, index, total, &bounds, &mut rng);
                assert!(p.is_finite(), "{total} nodes");
                assert!(within(p.x, bounds.x));
            }
        }
    }

    #[test]
    fn test_density_extremes() {
        let bounds = Bounds::new(10.0, 0.01, 0.01);
        let mut rng = StdRng::seed_from_u64(1);
        let grid: Vec<Vec3> = (0..9)
            .map(|i| layout_position(LayoutPattern::Grid, i, 9, &bounds, &mut rng))
            .collect();

        assert!(select_connections(&grid, &bounds, 0.0, &mut rng).is_empty());
        assert_eq!(select_connections(&grid, &bounds, 1.0, &mut rng).len(), 36);
    }

    #[test]
    fn test_distance_cutoff() {
        let bounds = Bounds::new(1.0, 1.0, 1.0);
        let far = [Vec3::ZERO, Vec3::new(0.9, 0.0, 0.0)];
        let mut rng = StdRng::seed_from_u64(1);
        assert!(select_connections(&far, &bounds, 1.0, &mut rng).is_empty());
    }

    #[test]
    fn test_seeded_networks_repeat() {
        let build = || {
            let mut scene = Scene::new();
            let mut rng = StdRng::seed_from_u64(42);
            let network = create_network(&mut scene, &NetworkOptions::new(12), &mut rng).unwrap();
            (positions(&scene, &network), network.connections.pairs.clone())
        };
        assert_eq!(build(), build());
    }

    #[test]
    fn test_validation() {
        let mut scene = Scene::new();
        let mut rng = StdRng::seed_from_u64(0);
        let bad_density = NetworkOptions::new(3).with_density(1.5);
        assert!(create_network(&mut scene, &bad_density, &mut rng).is_err());
        let bad_bounds = NetworkOptions::new(3).with_bounds(Bounds::new(0.0, 1.0, 1.0));
        assert!(create_network(&mut scene, &bad_bounds, &mut rng).is_err());
        assert_eq!(scene.object_count(), 0);
    }

    #[test]
    fn test_connections_skip_unknown_nodes() {
        let mut scene = Scene::new();
        let a = scene.spawn_group();
        let b = scene.spawn_group();
        let connections = create_connections(&mut scene, &[a, b], &[(0, 1), (1, 5)]);
        assert_eq!(connections.pairs, vec![(0, 1)]);
        let material = scene.material(connections.material).unwrap();
        assert_eq!(material.base_color().to_hex(), NODE_CYAN);
        assert_eq!(material.opacity(), 0.4);
    }

    #[test]
    fn test_node_count_is_capped() {
        let mut scene = Scene::new();
        let mut rng = StdRng::seed_from_u64(1);
        let options = NetworkOptions::new(MAX_NODE_COUNT + 1);
        assert!(matches!(
            create_network(&mut scene, &options, &mut rng),
            Err(GeometryError::InvalidParameter { name: "node_count", .. })
        ));
        assert_eq!(scene.object_count(), 0);
        assert!(NetworkOptions::new(MAX_NODE_COUNT).validate().is_ok());
    }

    #[test]
    fn test_particles_interpolate() {
        let mut scene = Scene::new();
        let a = scene.spawn_group();
        let b = scene.spawn_group();
        if let Some(t) = scene.transform_mut(b) {
            t.position = Vec3::new(5.0, 0.0, 0.0);
        }
        let particles = create_data_flow_particles(&mut scene, a, b, 5).unwrap();
        let xs: Vec<f32> = particles
            .iter()
            .map(|&p| scene.transform(p).unwrap().position.x)
            .collect();
        for (i, x) in xs.iter().enumerate() {
            assert!((x - i as f32).abs() < 1e-5);
        }
        assert_eq!(scene.geometry_count(), 1);
        assert_eq!(scene.material_count(), 5);

        let before = scene.geometry_count();
        assert!(create_data_flow_particles(&mut scene, a, b, 0).unwrap().is_empty());
        assert_eq!(scene.geometry_count(), before);

        scene.remove_object(b);
        assert_eq!(
            create_data_flow_particles(&mut scene, a, b, 2),
            Err(GeometryError::MissingObject)
        );
    }
}
