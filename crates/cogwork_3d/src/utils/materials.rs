//! Material presets

use crate::materials::{LineMaterial, StandardMaterial};
use cogwork_core::{Color, CoreError};

/// Brushed-metal look shared by the gears
pub fn create_standard_material(color: Color) -> StandardMaterial {
    StandardMaterial::new(color).with_roughness(0.4).with_metalness(0.6)
}

/// Translucent line material
pub fn create_line_material(color: Color) -> LineMaterial {
    LineMaterial::new(color).with_opacity(0.6)
}

/// Parse a `#rrggbb` color string
pub fn hex_to_color(hex: &str) -> Result<Color, CoreError> {
    Color::parse_hex(hex)
}
