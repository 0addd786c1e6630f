//! Diagram configuration
//!
//! The defaults reproduce the stock scene: five gears around the origin and
//! a ten node hierarchical network floating one unit above them. Any field
//! can be overridden from TOML:
//!
//! ```toml
//! seed = 7
//! gear_style = "simple"
//!
//! [network]
//! node_count = 6
//! pattern = "circular"
//! ```

use crate::error::Result;
use cogwork_3d::factory::{Bounds, GearOptions, LayoutPattern, NetworkOptions};
use cogwork_3d::render::{RendererOptions, MAX_PIXEL_RATIO};
use cogwork_3d::utils::DEFAULT_CAMERA_POSITION;
use cogwork_3d::GeometryError;
use cogwork_core::Vec3;
use cogwork_theme::PaletteBundle;
use serde::{Deserialize, Serialize};

/// Which gear factory builds the diagram's gears
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GearStyle {
    /// Extruded tooth profile with a bore
    #[default]
    Solid,
    /// Cylinder hub with box teeth
    Simple,
}

/// One gear and where it sits
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GearPlacement {
    #[serde(flatten)]
    pub options: GearOptions,
    #[serde(default)]
    pub position: Vec3,
}

impl GearPlacement {
    pub fn new(radius: f32, teeth_count: u32, thickness: f32, position: Vec3) -> Self {
        Self {
            options: GearOptions::new(radius, teeth_count, thickness),
            position,
        }
    }
}

/// Serializable mirror of [`RendererOptions`]
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RendererConfig {
    pub alpha: bool,
    pub antialias: bool,
    pub max_pixel_ratio: f32,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            alpha: true,
            antialias: true,
            max_pixel_ratio: MAX_PIXEL_RATIO,
        }
    }
}

impl RendererConfig {
    pub fn options(&self) -> RendererOptions {
        RendererOptions {
            alpha: self.alpha,
            antialias: self.antialias,
            max_pixel_ratio: self.max_pixel_ratio,
        }
    }
}

/// Everything [`MechanicalDiagram`](crate::MechanicalDiagram) builds from
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiagramConfig {
    pub gears: Vec<GearPlacement>,
    pub gear_style: GearStyle,
    pub network: NetworkOptions,
    /// Position of the network group
    pub network_offset: Vec3,
    pub camera_position: Vec3,
    pub renderer: RendererConfig,
    /// Minimum container height hint in CSS pixels
    pub min_height_px: u32,
    pub palettes: PaletteBundle,
    /// Fixed seed for the network layout; entropy when unset
    pub seed: Option<u64>,
}

impl Default for DiagramConfig {
    fn default() -> Self {
        Self {
            gears: default_gears(),
            gear_style: GearStyle::default(),
            network: NetworkOptions::new(10)
                .with_pattern(LayoutPattern::Hierarchical)
                .with_bounds(Bounds::new(8.0, 5.0, 3.0))
                .with_density(0.25),
            network_offset: Vec3::new(0.0, 1.0, 0.0),
            camera_position: DEFAULT_CAMERA_POSITION,
            renderer: RendererConfig::default(),
            min_height_px: 400,
            palettes: PaletteBundle::default(),
            seed: None,
        }
    }
}

/// Central gear, two flanking gears and two small ones at the upper corners
fn default_gears() -> Vec<GearPlacement> {
    vec![
        GearPlacement::new(2.0, 24, 0.4, Vec3::ZERO),
        GearPlacement::new(1.2, 16, 0.3, Vec3::new(-4.0, -1.0, 0.0)),
        GearPlacement::new(1.2, 16, 0.3, Vec3::new(4.0, -1.0, 0.0)),
        GearPlacement::new(0.8, 12, 0.25, Vec3::new(-3.0, 2.5, -1.0)),
        GearPlacement::new(0.8, 12, 0.25, Vec3::new(3.0, 2.5, -1.0)),
    ]
}

impl DiagramConfig {
    /// Parse a TOML document; missing fields keep their defaults
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: DiagramConfig = toml::from_str(source)?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|err| crate::DiagramError::Config(err.to_string()))
    }

    /// Check every gear and the network before anything is allocated
    pub fn validate(&self) -> Result<()> {
        for gear in &self.gears {
            gear.options.validate()?;
            if !gear.position.is_finite() {
                return Err(GeometryError::InvalidParameter {
                    name: "gear.position",
                    value: f64::NAN,
                    reason: "must be finite",
                }
                .into());
            }
        }
        self.network.validate()?;
        let ratio = self.renderer.max_pixel_ratio;
        if !(ratio.is_finite() && ratio > 0.0) {
            return Err(GeometryError::InvalidParameter {
                name: "renderer.max_pixel_ratio",
                value: ratio.into(),
                reason: "must be a positive finite number",
            }
            .into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DiagramError;

    #[test]
    fn test_defaults_match_stock_scene() {
        let config = DiagramConfig::default();
        assert_eq!(config.gears.len(), 5);
        assert_eq!(config.gears[0].options.teeth_count, 24);
        assert_eq!(config.network.node_count, 10);
        assert_eq!(config.network.pattern, LayoutPattern::Hierarchical);
        assert_eq!(config.network_offset.y, 1.0);
        assert_eq!(config.min_height_px, 400);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = DiagramConfig::from_toml_str(
            r#"
            seed = 7
            gear_style = "simple"

            [network]
            node_count = 6
            pattern = "circular"
            "#,
        )
        .unwrap();
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.gear_style, GearStyle::Simple);
        assert_eq!(config.network.node_count, 6);
        assert_eq!(config.network.connection_density, 0.3);
        assert_eq!(config.gears.len(), 5);
    }

    #[test]
    fn test_gear_list_from_toml() {
        let config = DiagramConfig::from_toml_str(
            r#"
            [[gears]]
            radius = 1.5
            teeth_count = 18
            thickness = 0.3
            tooth_height = 0.2
            position = { x = 1.0, y = 0.0, z = 0.0 }
            "#,
        )
        .unwrap();
        assert_eq!(config.gears.len(), 1);
        assert_eq!(config.gears[0].options.tooth_height, Some(0.2));
        assert_eq!(config.gears[0].position.x, 1.0);
    }

    #[test]
    fn test_syntax_errors_are_config_errors() {
        let err = DiagramConfig::from_toml_str("gears = 3").unwrap_err();
        assert!(matches!(err, DiagramError::Config(_)));
    }

    #[test]
    fn test_validate_rejects_bad_gear() {
        let mut config = DiagramConfig::default();
        config.gears[1].options.teeth_count = 2;
        assert!(matches!(config.validate(), Err(DiagramError::Geometry(_))));
    }

    #[test]
    fn test_validate_caps_network_size() {
        let mut config = DiagramConfig::default();
        config.network.node_count = cogwork_3d::factory::MAX_NODE_COUNT + 1;
        assert!(matches!(config.validate(), Err(DiagramError::Geometry(_))));
    }

    #[test]
    fn test_json_view_uses_lowercase_names() {
        let value = serde_json::to_value(DiagramConfig::default()).unwrap();
        assert_eq!(value["gear_style"], "solid");
        assert_eq!(value["network"]["pattern"], "hierarchical");
        assert_eq!(value["palettes"]["light"]["gear"], "#64748b");
        assert_eq!(value["gears"][0]["teeth_count"], 24);
    }

    #[test]
    fn test_toml_round_trip_of_defaults() {
        let text = DiagramConfig::default().to_toml_string().unwrap();
        let parsed = DiagramConfig::from_toml_str(&text).unwrap();
        assert_eq!(parsed, DiagramConfig::default());
    }
}
