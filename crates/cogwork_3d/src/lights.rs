//! Lights
//!
//! The diagram only needs an ambient fill and directional key/fill lights.
//! Nothing casts shadows.

use cogwork_core::Color;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LightKind {
    /// Uniform illumination with no direction
    Ambient,
    /// Parallel rays from the light's position toward the origin
    Directional,
}

/// A light stored in the scene graph
#[derive(Clone, Debug, PartialEq)]
pub struct SceneLight {
    pub kind: LightKind,
    pub color: Color,
    pub intensity: f32,
}

impl SceneLight {
    /// White ambient light
    pub fn ambient(intensity: f32) -> Self {
        Self {
            kind: LightKind::Ambient,
            color: Color::WHITE,
            intensity,
        }
    }

    /// White directional light
    pub fn directional(intensity: f32) -> Self {
        Self {
            kind: LightKind::Directional,
            color: Color::WHITE,
            intensity,
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn is_directional(&self) -> bool {
        self.kind == LightKind::Directional
    }
}
