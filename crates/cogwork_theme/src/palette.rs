//! Diagram palettes

use crate::scheme::ColorScheme;
use cogwork_core::Color;
use serde::{Deserialize, Serialize};

/// Colors applied to the diagram's materials
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DiagramPalette {
    /// Gear body color
    pub gear: Color,
    /// Node base and emissive color
    pub node_active: Color,
    /// Connection line color
    pub node_glow: Color,
}

impl DiagramPalette {
    /// Light variant (slate 500, blue 500, cyan 500)
    pub fn light() -> Self {
        Self {
            gear: Color::from_hex(0x64748b),
            node_active: Color::from_hex(0x3b82f6),
            node_glow: Color::from_hex(0x06b6d4),
        }
    }

    /// Dark variant (slate 600, blue 600, cyan 600)
    pub fn dark() -> Self {
        Self {
            gear: Color::from_hex(0x475569),
            node_active: Color::from_hex(0x2563eb),
            node_glow: Color::from_hex(0x0891b2),
        }
    }
}

/// Light and dark palettes together
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PaletteBundle {
    pub light: DiagramPalette,
    pub dark: DiagramPalette,
}

impl PaletteBundle {
    pub fn new(light: DiagramPalette, dark: DiagramPalette) -> Self {
        Self { light, dark }
    }

    /// Palette for the given scheme
    pub fn for_scheme(&self, scheme: ColorScheme) -> &DiagramPalette {
        match scheme {
            ColorScheme::Light => &self.light,
            ColorScheme::Dark => &self.dark,
        }
    }
}

impl Default for PaletteBundle {
    fn default() -> Self {
        Self::new(DiagramPalette::light(), DiagramPalette::dark())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundle_selects_by_scheme() {
        let bundle = PaletteBundle::default();
        assert_eq!(bundle.for_scheme(ColorScheme::Light).gear.to_hex(), 0x64748b);
        assert_eq!(bundle.for_scheme(ColorScheme::Dark).node_glow.to_hex(), 0x0891b2);
    }

    #[test]
    fn test_palette_from_toml() {
        let palette: DiagramPalette = toml::from_str(
            r##"
            gear = "#111111"
            node_active = "#222222"
            node_glow = "#333333"
            "##,
        )
        .unwrap();
        assert_eq!(palette.node_active.to_hex(), 0x222222);
    }
}
