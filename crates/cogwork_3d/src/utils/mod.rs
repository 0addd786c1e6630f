//! Scene lifecycle helpers

mod camera;
mod dispose;
mod layout;
mod lighting;
mod materials;

pub use camera::{setup_isometric_camera, DEFAULT_CAMERA_POSITION};
pub use dispose::{dispose_object, DisposeReport};
pub use layout::position_in_circle;
pub use lighting::{setup_cad_lighting, CadLighting};
pub use materials::{create_line_material, create_standard_material, hex_to_color};
