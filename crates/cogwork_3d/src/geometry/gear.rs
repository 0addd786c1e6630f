//! Gear outline and solid

use super::{ExtrudeGeometry, ExtrudeOptions, Geometry, Shape};
use crate::error::{invalid, Result};
use cogwork_core::Vec2;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

/// Parameters of a toothed disc
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GearOptions {
    /// Radius of the disc at the tooth roots
    pub radius: f32,
    pub teeth_count: u32,
    /// Extrusion depth
    pub thickness: f32,
    /// Defaults to 15% of the radius
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tooth_height: Option<f32>,
    /// Linear width of one tooth flank, defaults to a third of the arc per tooth
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tooth_width: Option<f32>,
    /// Smoothness of the bore cylinder
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radial_segments: Option<u32>,
}

impl GearOptions {
    pub fn new(radius: f32, teeth_count: u32, thickness: f32) -> Self {
        Self {
            radius,
            teeth_count,
            thickness,
            tooth_height: None,
            tooth_width: None,
            radial_segments: None,
        }
    }

    pub fn with_tooth_height(mut self, height: f32) -> Self {
        self.tooth_height = Some(height);
        self
    }

    pub fn with_tooth_width(mut self, width: f32) -> Self {
        self.tooth_width = Some(width);
        self
    }

    pub fn with_radial_segments(mut self, segments: u32) -> Self {
        self.radial_segments = Some(segments);
        self
    }

    pub fn tooth_height(&self) -> f32 {
        self.tooth_height.unwrap_or(self.radius * 0.15)
    }

    pub fn tooth_width(&self) -> f32 {
        self.tooth_width
            .unwrap_or_else(|| TAU * self.radius / (self.teeth_count.max(1) * 3) as f32)
    }

    /// Radius at the tooth tips
    pub fn outer_radius(&self) -> f32 {
        self.radius + self.tooth_height()
    }

    /// Angle swept by one tooth flank
    pub fn tooth_angle(&self) -> f32 {
        self.tooth_width() / self.radius
    }

    /// Reject options that would produce a degenerate or self-intersecting outline
    pub fn validate(&self) -> Result<()> {
        if !(self.radius.is_finite() && self.radius > 0.0) {
            return Err(invalid("radius", self.radius, "must be a positive finite number"));
        }
        if !(self.thickness.is_finite() && self.thickness > 0.0) {
            return Err(invalid("thickness", self.thickness, "must be a positive finite number"));
        }
        if self.teeth_count < 3 {
            return Err(invalid("teeth_count", self.teeth_count, "a gear needs at least 3 teeth"));
        }
        let height = self.tooth_height();
        if !(height.is_finite() && height > 0.0) {
            return Err(invalid("tooth_height", height, "must be a positive finite number"));
        }
        let width = self.tooth_width();
        if !(width.is_finite() && width > 0.0) {
            return Err(invalid("tooth_width", width, "must be a positive finite number"));
        }
        if 2.0 * self.tooth_angle() >= TAU / self.teeth_count as f32 {
            return Err(invalid("tooth_width", width, "teeth overlap their neighbours"));
        }
        Ok(())
    }
}

/// Gear solid generator
pub struct GearGeometry;

impl GearGeometry {
    /// Closed outline of the gear, first and last points coincide
    ///
    /// Each tooth contributes a root point, two tip points one flank angle
    /// apart, and the root point where the next tooth starts.
    pub fn profile(options: &GearOptions) -> Result<Shape> {
        options.validate()?;

        let n = options.teeth_count;
        let delta = options.tooth_angle();
        let outer = options.outer_radius();
        let root = |i: u32| Vec2::from_polar(options.radius, (i % n) as f32 / n as f32 * TAU);

        let mut shape = Shape::new();
        let start = root(0);
        shape.move_to(start.x, start.y);
        for i in 0..n {
            let base = i as f32 / n as f32 * TAU;
            let rise = Vec2::from_polar(outer, base + delta);
            let top = Vec2::from_polar(outer, base + 2.0 * delta);
            let next = root(i + 1);
            shape
                .line_to(rise.x, rise.y)
                .line_to(top.x, top.y)
                .line_to(next.x, next.y);
        }
        shape.close_path();
        Ok(shape)
    }

    /// Extruded, bevelled gear centered on the origin
    pub fn new(options: &GearOptions) -> Result<Geometry> {
        let shape = Self::profile(options)?;
        let bevel = options.thickness * 0.05;
        let extrude = ExtrudeOptions::new(options.thickness).bevel(bevel, bevel, 2);

        let mut geometry = ExtrudeGeometry::new(&shape, &extrude)?;
        geometry.center();
        Ok(geometry)
    }
}
