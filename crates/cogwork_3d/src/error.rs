//! Error types for cogwork_3d

use thiserror::Error;

/// Errors raised while building geometry or scene objects
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// A numeric option was out of range
    #[error("invalid {name} = {value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },

    /// A shape could not be triangulated
    #[error("tessellation failed: {0}")]
    Tessellation(String),

    /// An object id did not refer to a live scene object
    #[error("object is not part of the scene")]
    MissingObject,

    /// Attaching would make an object its own ancestor
    #[error("object cannot be attached below itself")]
    CyclicHierarchy,
}

pub(crate) fn invalid(name: &'static str, value: impl Into<f64>, reason: &'static str) -> GeometryError {
    GeometryError::InvalidParameter {
        name,
        value: value.into(),
        reason,
    }
}

/// Errors raised by a rendering backend
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// No usable WebGL context
    #[error("WebGL is not available")]
    ContextUnavailable,

    /// Renderer allocation failed
    #[error("renderer creation failed: {0}")]
    Creation(String),

    /// Drawing a frame failed
    #[error("rendering failed: {0}")]
    Frame(String),
}

/// Result type for geometry and scene construction
pub type Result<T> = std::result::Result<T, GeometryError>;
