//! Unlit material

use super::{BlendMode, Material, MaterialType, TextureSlots};
use cogwork_core::Color;

/// Basic unlit material (like Three.js MeshBasicMaterial)
#[derive(Clone, Debug, PartialEq)]
pub struct BasicMaterial {
    pub color: Color,
    pub opacity: f32,
    pub transparent: bool,
    pub blend_mode: BlendMode,
    pub textures: TextureSlots,
}

impl Default for BasicMaterial {
    fn default() -> Self {
        Self {
            color: Color::WHITE,
            opacity: 1.0,
            transparent: false,
            blend_mode: BlendMode::Normal,
            textures: TextureSlots::default(),
        }
    }
}

impl BasicMaterial {
    pub fn new(color: Color) -> Self {
        Self {
            color,
            ..Default::default()
        }
    }

    /// Make translucent with the given opacity
    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self.transparent = true;
        self
    }

    pub fn with_blend_mode(mut self, blend_mode: BlendMode) -> Self {
        self.blend_mode = blend_mode;
        self
    }
}

impl Material for BasicMaterial {
    fn material_type(&self) -> MaterialType {
        MaterialType::Basic
    }

    fn base_color(&self) -> Color {
        self.color
    }

    fn is_transparent(&self) -> bool {
        self.transparent
    }

    fn textures(&self) -> TextureSlots {
        self.textures
    }
}
