//! Material system

mod basic;
mod line;
mod standard;

pub use basic::BasicMaterial;
pub use line::LineMaterial;
pub use standard::StandardMaterial;

use crate::scene::TextureId;
use cogwork_core::Color;

/// Material trait for all material types
pub trait Material {
    /// Get the material type
    fn material_type(&self) -> MaterialType;

    /// Get base color
    fn base_color(&self) -> Color;

    /// Whether this material is transparent
    fn is_transparent(&self) -> bool {
        false
    }

    /// Textures bound to this material
    fn textures(&self) -> TextureSlots {
        TextureSlots::default()
    }
}

/// Material types
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MaterialType {
    /// Unlit basic material
    Basic,
    /// PBR standard material
    Standard,
    /// Unlit line material
    Line,
}

/// Blend mode for transparent materials
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BlendMode {
    /// Standard alpha blending
    #[default]
    Normal,
    /// Additive blending, used for glows
    Additive,
}

/// Texture maps a material may reference
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TextureSlots {
    pub map: Option<TextureId>,
    pub light_map: Option<TextureId>,
    pub bump_map: Option<TextureId>,
    pub normal_map: Option<TextureId>,
    pub specular_map: Option<TextureId>,
    pub env_map: Option<TextureId>,
}

impl TextureSlots {
    /// Every bound texture
    pub fn iter(&self) -> impl Iterator<Item = TextureId> {
        [
            self.map,
            self.light_map,
            self.bump_map,
            self.normal_map,
            self.specular_map,
            self.env_map,
        ]
        .into_iter()
        .flatten()
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }
}

/// Any material a scene can hold
#[derive(Clone, Debug, PartialEq)]
pub enum AnyMaterial {
    Standard(StandardMaterial),
    Basic(BasicMaterial),
    Line(LineMaterial),
}

impl AnyMaterial {
    /// Replace the base color
    pub fn set_color(&mut self, color: Color) {
        match self {
            AnyMaterial::Standard(m) => m.color = color,
            AnyMaterial::Basic(m) => m.color = color,
            AnyMaterial::Line(m) => m.color = color,
        }
    }

    /// Replace the emissive color; materials without one ignore it
    pub fn set_emissive(&mut self, color: Color) {
        if let AnyMaterial::Standard(m) = self {
            m.emissive = color;
        }
    }

    pub fn emissive(&self) -> Option<Color> {
        match self {
            AnyMaterial::Standard(m) => Some(m.emissive),
            _ => None,
        }
    }

    pub fn opacity(&self) -> f32 {
        match self {
            AnyMaterial::Standard(m) => m.opacity,
            AnyMaterial::Basic(m) => m.opacity,
            AnyMaterial::Line(m) => m.opacity,
        }
    }

    pub fn set_opacity(&mut self, opacity: f32) {
        let opacity = opacity.clamp(0.0, 1.0);
        match self {
            AnyMaterial::Standard(m) => m.opacity = opacity,
            AnyMaterial::Basic(m) => m.opacity = opacity,
            AnyMaterial::Line(m) => m.opacity = opacity,
        }
    }

    pub fn as_standard(&self) -> Option<&StandardMaterial> {
        match self {
            AnyMaterial::Standard(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_standard_mut(&mut self) -> Option<&mut StandardMaterial> {
        match self {
            AnyMaterial::Standard(m) => Some(m),
            _ => None,
        }
    }

    fn inner(&self) -> &dyn Material {
        match self {
            AnyMaterial::Standard(m) => m,
            AnyMaterial::Basic(m) => m,
            AnyMaterial::Line(m) => m,
        }
    }
}

impl Material for AnyMaterial {
    fn material_type(&self) -> MaterialType {
        self.inner().material_type()
    }

    fn base_color(&self) -> Color {
        self.inner().base_color()
    }

    fn is_transparent(&self) -> bool {
        self.inner().is_transparent()
    }

    fn textures(&self) -> TextureSlots {
        self.inner().textures()
    }
}

impl From<StandardMaterial> for AnyMaterial {
    fn from(m: StandardMaterial) -> Self {
        AnyMaterial::Standard(m)
    }
}

impl From<BasicMaterial> for AnyMaterial {
    fn from(m: BasicMaterial) -> Self {
        AnyMaterial::Basic(m)
    }
}

impl From<LineMaterial> for AnyMaterial {
    fn from(m: LineMaterial) -> Self {
        AnyMaterial::Line(m)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recolor_through_enum() {
        let mut material = AnyMaterial::from(StandardMaterial::new(Color::from_hex(0x64748b)));
        material.set_color(Color::from_hex(0x475569));
        material.set_emissive(Color::from_hex(0x2563eb));
        assert_eq!(material.base_color().to_hex(), 0x475569);
        assert_eq!(material.emissive().map(|c| c.to_hex()), Some(0x2563eb));
        assert_eq!(material.material_type(), MaterialType::Standard);
    }

    #[test]
    fn test_line_material_has_no_emissive() {
        let mut material = AnyMaterial::from(LineMaterial::new(Color::WHITE));
        material.set_emissive(Color::BLACK);
        assert_eq!(material.emissive(), None);
        material.set_opacity(1.5);
        assert_eq!(material.opacity(), 1.0);
    }
}
