//! Diagram lifecycle states

use std::fmt;

/// Where a [`MechanicalDiagram`](crate::MechanicalDiagram) is in its lifecycle
///
/// ```text
/// Uninitialized -> Initializing -> Rendering <-> ThemeUpdating
///                       |              |
///                       v              v
///                     Error ------> Disposed -> Initializing ...
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DiagramState {
    #[default]
    Uninitialized,
    Initializing,
    Rendering,
    ThemeUpdating,
    Disposed,
    /// Setup failed; nothing is drawn until the next unmount/mount cycle
    Error,
}

impl DiagramState {
    /// Whether scene resources are currently held
    pub fn is_live(self) -> bool {
        matches!(self, DiagramState::Rendering | DiagramState::ThemeUpdating)
    }

    /// Whether `mount` may start from this state
    pub fn can_mount(self) -> bool {
        matches!(self, DiagramState::Uninitialized | DiagramState::Disposed)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DiagramState::Uninitialized => "uninitialized",
            DiagramState::Initializing => "initializing",
            DiagramState::Rendering => "rendering",
            DiagramState::ThemeUpdating => "theme-updating",
            DiagramState::Disposed => "disposed",
            DiagramState::Error => "error",
        }
    }
}

impl fmt::Display for DiagramState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mountable_states() {
        assert!(DiagramState::Uninitialized.can_mount());
        assert!(DiagramState::Disposed.can_mount());
        assert!(!DiagramState::Error.can_mount());
        assert!(!DiagramState::Rendering.can_mount());
    }

    #[test]
    fn test_display() {
        assert_eq!(DiagramState::ThemeUpdating.to_string(), "theme-updating");
    }
}
