//! Single-segment focus mode.
//!
//! ```text
//! Unfocused   --click(i)-->       Focused(i)
//! Focused(i)  --click(i)-->       Unfocused
//! Focused(i)  --click(j), j≠i-->  Focused(j)
//! Focused(i)  --close-->          Unfocused
//! any         --new plan-->       Unfocused
//! ```

use crate::model::SegmentId;

/// Which segment, if any, is shown in the focus overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusState {
    #[default]
    Unfocused,
    Focused(SegmentId),
}

impl FocusState {
    /// Applies a click on segment `id`: repeat clicks toggle focus off,
    /// clicks on another segment switch focus directly.
    pub fn click(&mut self, id: SegmentId) {
        *self = match *self {
            FocusState::Focused(current) if current == id => FocusState::Unfocused,
            _ => FocusState::Focused(id),
        };
    }

    /// Explicit close of the focus overlay.
    pub fn close(&mut self) {
        *self = FocusState::Unfocused;
    }

    /// Reset for a new plan.
    pub fn reset(&mut self) {
        *self = FocusState::Unfocused;
    }

    pub fn focused(self) -> Option<SegmentId> {
        match self {
            FocusState::Focused(id) => Some(id),
            FocusState::Unfocused => None,
        }
    }

    pub fn is_focused(self, id: SegmentId) -> bool {
        self.focused() == Some(id)
    }
}
