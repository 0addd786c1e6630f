//! JSON summaries printed by the CLI

use cogwork_3d::factory::{GearModel, GearOptions, Network};
use cogwork_3d::scene::Scene;
use cogwork_3d::utils::DisposeReport;
use cogwork_diagram::{HostLog, MechanicalDiagram, HeadlessHost};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct GearSummary {
    pub style: &'static str,
    pub radius: f32,
    pub teeth_count: u32,
    pub thickness: f32,
    pub tooth_height: f32,
    pub tooth_width: f32,
    pub outer_radius: f32,
    /// Largest distance of a body vertex from the axis, solid gears only
    pub measured_outer_radius: Option<f32>,
    pub objects: usize,
    pub vertices: usize,
    pub triangles: usize,
    pub open_edges: usize,
}

impl GearSummary {
    pub fn new(scene: &Scene, model: &GearModel, options: &GearOptions) -> Self {
        let mut summary = GearSummary {
            style: match model {
                GearModel::Solid(_) => "solid",
                GearModel::Composite(_) => "simple",
            },
            radius: options.radius,
            teeth_count: options.teeth_count,
            thickness: options.thickness,
            tooth_height: options.tooth_height(),
            tooth_width: options.tooth_width(),
            outer_radius: options.outer_radius(),
            measured_outer_radius: None,
            objects: 0,
            vertices: 0,
            triangles: 0,
            open_edges: 0,
        };

        for id in scene.descendants(model.root()) {
            summary.objects += 1;
            let geometry = scene
                .get(id)
                .and_then(|node| node.kind.mesh())
                .and_then(|mesh| scene.geometry(mesh.geometry));
            if let Some(geometry) = geometry {
                summary.vertices += geometry.vertex_count();
                summary.triangles += geometry.triangle_count();
                summary.open_edges += geometry.boundary_edge_count();
            }
        }

        if let GearModel::Solid(gear) = model {
            summary.measured_outer_radius = scene
                .get(gear.mesh)
                .and_then(|node| node.kind.mesh())
                .and_then(|mesh| scene.geometry(mesh.geometry))
                .map(|geometry| {
                    geometry
                        .vertices
                        .iter()
                        .map(|v| v.position[0].hypot(v.position[1]))
                        .fold(0.0, f32::max)
                });
        }
        summary
    }
}

#[derive(Debug, Serialize)]
pub struct NodeSummary {
    pub position: [f32; 3],
    pub active: bool,
    pub glow: bool,
}

#[derive(Debug, Serialize)]
pub struct NetworkSummary {
    pub nodes: Vec<NodeSummary>,
    pub edges: Vec<(usize, usize)>,
    /// Endpoints in the line buffer, two per edge
    pub segment_points: usize,
}

impl NetworkSummary {
    pub fn new(scene: &Scene, network: &Network) -> Self {
        let nodes = network
            .nodes
            .iter()
            .map(|node| NodeSummary {
                position: scene
                    .transform(node.mesh)
                    .map(|t| t.position.to_array())
                    .unwrap_or_default(),
                active: node.active,
                glow: node.glow.is_some(),
            })
            .collect();
        let segment_points = scene
            .geometry(network.connections.geometry)
            .map_or(0, |geometry| geometry.point_count());
        NetworkSummary {
            nodes,
            edges: network.connections.pairs.clone(),
            segment_points,
        }
    }
}

#[derive(Debug, Default, Serialize)]
pub struct DisposedSummary {
    pub objects: usize,
    pub geometries: usize,
    pub materials: usize,
    pub textures: usize,
}

impl From<DisposeReport> for DisposedSummary {
    fn from(report: DisposeReport) -> Self {
        Self {
            objects: report.objects,
            geometries: report.geometries,
            materials: report.materials,
            textures: report.textures,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HostSummary {
    pub renderers_created: usize,
    pub renderers_disposed: usize,
    pub canvases_attached: usize,
    pub canvases_detached: usize,
    pub frames_rendered: usize,
    pub pending_frames: usize,
    pub live_listeners: usize,
}

impl From<&HostLog> for HostSummary {
    fn from(log: &HostLog) -> Self {
        Self {
            renderers_created: log.renderers_created,
            renderers_disposed: log.renderers_disposed,
            canvases_attached: log.canvases_attached,
            canvases_detached: log.canvases_detached,
            frames_rendered: log.frames_rendered,
            pending_frames: log.pending_frames.len(),
            live_listeners: log.live_listeners.len(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SimulationReport {
    /// State reached after mounting and running frames
    pub state: String,
    pub scheme: String,
    pub frames_requested: usize,
    pub frames_drawn: usize,
    pub animations: usize,
    pub gear_rotations: Vec<f32>,
    pub disposed: DisposedSummary,
    pub host: HostSummary,
}

impl SimulationReport {
    /// Capture the running diagram; `disposed` and `host` are filled after unmount
    pub fn running(diagram: &MechanicalDiagram<HeadlessHost>, frames_requested: usize, frames_drawn: usize) -> Self {
        Self {
            state: diagram.state().to_string(),
            scheme: diagram.environment().scheme.to_string(),
            frames_requested,
            frames_drawn,
            animations: diagram.animation_count(),
            gear_rotations: diagram.gear_rotations(),
            disposed: DisposedSummary::default(),
            host: HostSummary::from(&HostLog::default()),
        }
    }
}
