//! Gear factory

use crate::error::Result;
use crate::geometry::{BoxGeometry, CylinderGeometry, GearGeometry, GearOptions};
use crate::materials::StandardMaterial;
use crate::scene::{MaterialId, Object3D, ObjectId, Scene};
use crate::utils::create_standard_material;
use cogwork_core::{Color, Vec3};
use smallvec::{smallvec, SmallVec};
use std::f32::consts::{FRAC_PI_2, TAU};

/// Gap added between neighbouring gears in [`create_gear_set`]
pub const DEFAULT_GEAR_SPACING: f32 = 0.1;

const GEAR_COLOR: u32 = 0x64748b;

/// Extruded gear with a bore
#[derive(Clone, Debug, PartialEq)]
pub struct SolidGear {
    pub mesh: ObjectId,
    pub bore: ObjectId,
    pub material: MaterialId,
    pub bore_material: MaterialId,
}

/// Cylinder hub with box teeth
#[derive(Clone, Debug, PartialEq)]
pub struct CompositeGear {
    pub group: ObjectId,
    pub hub: ObjectId,
    pub teeth: Vec<ObjectId>,
    pub hub_material: MaterialId,
    pub tooth_material: MaterialId,
}

/// A gear as built by one of the factories
///
/// Both variants take the same options; callers handle either.
#[derive(Clone, Debug, PartialEq)]
pub enum GearModel {
    Solid(SolidGear),
    Composite(CompositeGear),
}

impl GearModel {
    /// Object to position, rotate and dispose
    pub fn root(&self) -> ObjectId {
        match self {
            GearModel::Solid(gear) => gear.mesh,
            GearModel::Composite(gear) => gear.group,
        }
    }

    /// Materials that take the themed gear color
    pub fn body_materials(&self) -> SmallVec<[MaterialId; 2]> {
        match self {
            GearModel::Solid(gear) => smallvec![gear.material],
            GearModel::Composite(gear) => smallvec![gear.hub_material, gear.tooth_material],
        }
    }
}

fn gear_material() -> StandardMaterial {
    create_standard_material(Color::from_hex(GEAR_COLOR))
}

/// Build a bevelled gear solid with a translucent bore, detached from the scene
pub fn create_gear(scene: &mut Scene, options: &GearOptions) -> Result<GearModel> {
    let body = GearGeometry::new(options)?;
    let bore = CylinderGeometry::new(
        options.radius * 0.3,
        options.thickness * 1.2,
        options.radial_segments.unwrap_or(64),
    );

    let geometry = scene.add_geometry(body);
    let material = scene.add_material(gear_material());
    let mesh = scene.spawn_mesh(geometry, material);

    let bore_geometry = scene.add_geometry(bore);
    let bore_material = scene.add_material(StandardMaterial::new(Color::BLACK).with_opacity(0.8));
    let bore = scene.spawn_mesh(bore_geometry, bore_material);
    if let Some(transform) = scene.transform_mut(bore) {
        transform.rotation.x = FRAC_PI_2;
    }
    scene.add_child(mesh, bore)?;

    tracing::debug!(
        radius = options.radius,
        teeth = options.teeth_count,
        thickness = options.thickness,
        "created gear"
    );
    Ok(GearModel::Solid(SolidGear {
        mesh,
        bore,
        material,
        bore_material,
    }))
}

/// Cheaper gear: a hub cylinder with one box per tooth
pub fn create_simple_gear(scene: &mut Scene, options: &GearOptions) -> Result<GearModel> {
    options.validate()?;
    let tooth_height = options.tooth_height();

    let group = scene.spawn_group();

    let hub_geometry = scene.add_geometry(CylinderGeometry::new(
        options.radius,
        options.thickness,
        options.radial_segments.unwrap_or(32),
    ));
    let hub_material = scene.add_material(gear_material());
    let hub = scene.spawn_mesh(hub_geometry, hub_material);
    if let Some(transform) = scene.transform_mut(hub) {
        transform.rotation.x = FRAC_PI_2;
    }
    scene.add_child(group, hub)?;

    let tooth_geometry = scene.add_geometry(BoxGeometry::new(
        tooth_height,
        options.thickness,
        options.radius * 0.2,
    ));
    let tooth_material = scene.add_material(gear_material());
    let distance = options.radius + tooth_height / 2.0;

    let mut teeth = Vec::with_capacity(options.teeth_count as usize);
    for i in 0..options.teeth_count {
        let angle = i as f32 / options.teeth_count as f32 * TAU;
        let tooth = scene.spawn_mesh(tooth_geometry, tooth_material);
        if let Some(transform) = scene.transform_mut(tooth) {
            transform.position = Vec3::new(angle.cos() * distance, 0.0, angle.sin() * distance);
            transform.rotation.y = angle;
        }
        scene.add_child(group, tooth)?;
        teeth.push(tooth);
    }

    Ok(GearModel::Composite(CompositeGear {
        group,
        hub,
        teeth,
        hub_material,
        tooth_material,
    }))
}

/// Build several gears laid out along the X axis
///
/// Gear `i > 0` sits at `x = (r[i-1] + r[i] + spacing) * 2i`. Tooth pitch is
/// not checked, so neighbours need not actually mesh.
pub fn create_gear_set(
    scene: &mut Scene,
    gears: &[GearOptions],
    spacing: f32,
) -> Result<Vec<GearModel>> {
    for options in gears {
        options.validate()?;
    }

    let mut models = Vec::with_capacity(gears.len());
    for (index, options) in gears.iter().enumerate() {
        let model = create_gear(scene, options)?;
        if index > 0 {
            let x = (gears[index - 1].radius + options.radius + spacing) * (index * 2) as f32;
            if let Some(transform) = scene.transform_mut(model.root()) {
                transform.position.x = x;
            }
        }
        models.push(model);
    }
    Ok(models)
}
