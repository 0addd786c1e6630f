//! Cogwork Theme
//!
//! Color scheme selection and the three-color palette the mechanical
//! diagram paints its materials with. The host decides which scheme is
//! active; this crate only maps a scheme onto colors.

mod palette;
mod scheme;

pub use palette::{DiagramPalette, PaletteBundle};
pub use scheme::{ColorScheme, ThemeError};
