//! Line material

use super::{Material, MaterialType};
use cogwork_core::Color;

/// Unlit material for line segments
#[derive(Clone, Debug, PartialEq)]
pub struct LineMaterial {
    pub color: Color,
    pub opacity: f32,
    pub transparent: bool,
    pub line_width: f32,
}

impl LineMaterial {
    pub fn new(color: Color) -> Self {
        Self {
            color,
            opacity: 1.0,
            transparent: false,
            line_width: 1.0,
        }
    }

    /// Make translucent with the given opacity
    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self.transparent = true;
        self
    }
}

impl Material for LineMaterial {
    fn material_type(&self) -> MaterialType {
        MaterialType::Line
    }

    fn base_color(&self) -> Color {
        self.color
    }

    fn is_transparent(&self) -> bool {
        self.transparent
    }
}
