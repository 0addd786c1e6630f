//! Standard PBR material

use super::{BlendMode, Material, MaterialType, TextureSlots};
use cogwork_core::Color;

/// Standard PBR material (like Three.js MeshStandardMaterial)
///
/// Uses metallic-roughness workflow for physically-based rendering.
#[derive(Clone, Debug, PartialEq)]
pub struct StandardMaterial {
    /// Base color (albedo)
    pub color: Color,
    /// Metalness factor (0.0 = dielectric, 1.0 = metal)
    pub metalness: f32,
    /// Roughness factor (0.0 = smooth/mirror, 1.0 = rough)
    pub roughness: f32,
    /// Emissive color
    pub emissive: Color,
    /// Emissive intensity
    pub emissive_intensity: f32,
    pub opacity: f32,
    pub transparent: bool,
    pub flat_shading: bool,
    pub blend_mode: BlendMode,
    pub textures: TextureSlots,
}

impl Default for StandardMaterial {
    fn default() -> Self {
        Self {
            color: Color::WHITE,
            metalness: 0.0,
            roughness: 1.0,
            emissive: Color::BLACK,
            emissive_intensity: 1.0,
            opacity: 1.0,
            transparent: false,
            flat_shading: false,
            blend_mode: BlendMode::Normal,
            textures: TextureSlots::default(),
        }
    }
}

impl StandardMaterial {
    pub fn new(color: Color) -> Self {
        Self {
            color,
            ..Default::default()
        }
    }

    pub fn with_metalness(mut self, metalness: f32) -> Self {
        self.metalness = metalness;
        self
    }

    pub fn with_roughness(mut self, roughness: f32) -> Self {
        self.roughness = roughness;
        self
    }

    pub fn with_emissive(mut self, color: Color, intensity: f32) -> Self {
        self.emissive = color;
        self.emissive_intensity = intensity;
        self
    }

    /// Make translucent with the given opacity
    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self.transparent = true;
        self
    }

    pub fn with_textures(mut self, textures: TextureSlots) -> Self {
        self.textures = textures;
        self
    }
}

impl Material for StandardMaterial {
    fn material_type(&self) -> MaterialType {
        MaterialType::Standard
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
