//! Host-provided preferences

use cogwork_theme::ColorScheme;

/// Preferences the host page passes in at mount time
///
/// The diagram never looks these up on its own. Theme flips after mounting
/// go through [`MechanicalDiagram::set_theme`](crate::MechanicalDiagram::set_theme).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Environment {
    pub scheme: ColorScheme,
    /// Mirrors `(prefers-reduced-motion: reduce)`
    pub reduced_motion: bool,
}

impl Environment {
    pub fn new(scheme: ColorScheme) -> Self {
        Self {
            scheme,
            reduced_motion: false,
        }
    }

    pub fn with_reduced_motion(mut self, reduced: bool) -> Self {
        self.reduced_motion = reduced;
        self
    }

    pub fn motion_allowed(&self) -> bool {
        !self.reduced_motion
    }
}
