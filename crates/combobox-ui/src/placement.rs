//! Popup placement relative to the input.

use combobox_core::{Rect, Viewport};

/// Where the popup sits relative to the input.
///
/// Offsets are measured from the input container's top edge (for `Below`)
/// or bottom edge (for `Above`), matching absolutely positioned CSS.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Placement {
    /// Popup below the input; `bottom` is disabled.
    Below { top: f32 },
    /// Popup above the input; `top` is disabled.
    Above { bottom: f32 },
}

impl Default for Placement {
    fn default() -> Self {
        Self::Below { top: 0.0 }
    }
}

impl Placement {
    pub fn is_above(&self) -> bool {
        matches!(self, Placement::Above { .. })
    }

    /// The `top` offset, or `None` when disabled ("auto").
    pub fn top(&self) -> Option<f32> {
        match self {
            Placement::Below { top } => Some(*top),
            Placement::Above { .. } => None,
        }
    }

    /// The `bottom` offset, or `None` when disabled ("auto").
    pub fn bottom(&self) -> Option<f32> {
        match self {
            Placement::Below { .. } => None,
            Placement::Above { bottom } => Some(*bottom),
        }
    }
}

/// Choose a placement for a popup of `popup_height` under `input`.
///
/// The popup is measured as if placed below. If its bottom edge would pass
/// the viewport it flips above, pinned `input.height + gap` from the
/// container's bottom edge.
pub fn compute_placement(input: Rect, popup_height: f32, viewport: Viewport, gap: f32) -> Placement {
    let offset = input.height + gap;
    let popup_bottom = input.top() + offset + popup_height;

    if popup_bottom > viewport.height {
        Placement::Above { bottom: offset }
    } else {
        Placement::Below { top: offset }
    }
}
