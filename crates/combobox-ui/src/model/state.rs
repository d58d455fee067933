//! Interaction state for the select widget.
//!
//! This module defines the state machine and data structures that drive a
//! select. These types are runtime-independent: every transition is a plain
//! synchronous method, so the whole interaction contract is testable without
//! timers or a host. Side effects (delayed close, source resolution, change
//! callbacks) are driven by `views::Select` from the values returned here.

use combobox_core::{Options, SelectOption};

use crate::placement::Placement;

// =============================================================================
// Popup Phase State Machine
// =============================================================================

/// Popup lifecycle. Invalid states are impossible: a cursor only exists while
/// the popup is visible.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PopupPhase {
    /// Popup hidden.
    #[default]
    Closed,
    /// Popup visible and interactive.
    Open {
        /// Keyboard cursor into the filtered options.
        cursor: Option<usize>,
    },
    /// Popup still visible, waiting for the delayed close to fire.
    ///
    /// The filtered list is frozen in this phase so a click that is already
    /// in flight lands on the rows the user saw.
    Closing { cursor: Option<usize> },
}

impl PopupPhase {
    /// Check if the popup is on screen.
    pub fn is_visible(&self) -> bool {
        !matches!(self, PopupPhase::Closed)
    }

    /// Get the cursor if the popup is visible.
    pub fn cursor(&self) -> Option<usize> {
        match self {
            PopupPhase::Open { cursor } | PopupPhase::Closing { cursor } => *cursor,
            PopupPhase::Closed => None,
        }
    }
}

// =============================================================================
// Resolution
// =============================================================================

/// Resolved option set.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Resolution {
    /// Source not settled yet.
    #[default]
    Pending,
    /// Source settled. A failed source settles to an empty list.
    Ready(Options),
}

impl Resolution {
    pub fn options(&self) -> Option<&[SelectOption]> {
        match self {
            Resolution::Ready(options) => Some(options),
            Resolution::Pending => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Resolution::Pending)
    }
}

// =============================================================================
// Navigation
// =============================================================================

/// Cursor movement direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    /// Cursor position when entering a list of `len` rows with no cursor.
    fn entry(self, len: usize) -> Option<usize> {
        match self {
            Direction::Down if len > 0 => Some(0),
            Direction::Down => None,
            Direction::Up => len.checked_sub(1),
        }
    }

    /// Move `cursor` one step, wrapping at both ends.
    fn step(self, cursor: Option<usize>, len: usize) -> Option<usize> {
        let current = cursor.filter(|&i| i < len);
        match (self, current) {
            (_, None) => self.entry(len),
            (Direction::Down, Some(i)) if i + 1 < len => Some(i + 1),
            (Direction::Down, Some(_)) => Some(0),
            (Direction::Up, Some(0)) => Some(len - 1),
            (Direction::Up, Some(i)) => Some(i - 1),
        }
    }
}

/// A committed selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    /// Position in the filtered list at commit time.
    pub index: usize,
    /// The committed option.
    pub option: SelectOption,
}

// =============================================================================
// Select State
// =============================================================================

/// Full interaction state of one select widget.
#[derive(Debug, Default)]
pub struct SelectState {
    // -------------------------------------------------------------------------
    // Search State
    // -------------------------------------------------------------------------
    /// Text in the input.
    query: String,

    /// Whether the text was typed since it last matched the selection.
    query_edited: bool,

    /// Options from the source.
    resolution: Resolution,

    /// Positions into the resolved options that match the query, in order.
    filtered: Vec<usize>,

    // -------------------------------------------------------------------------
    // Selection State
    // -------------------------------------------------------------------------
    /// Last committed option.
    selected: Option<SelectOption>,

    /// Popup phase, including the keyboard cursor.
    phase: PopupPhase,

    // -------------------------------------------------------------------------
    // Presentation State
    // -------------------------------------------------------------------------
    hovered: bool,
    focused: bool,
    placement: Placement,
}

impl SelectState {
    /// Create a state with the input pre-populated.
    pub fn new(initial_value: Option<String>) -> Self {
        Self {
            query: initial_value.unwrap_or_default(),
            ..Self::default()
        }
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn resolution(&self) -> &Resolution {
        &self.resolution
    }

    pub fn resolved_options(&self) -> Option<&[SelectOption]> {
        self.resolution.options()
    }

    /// Filtered options in display order. Empty while unresolved.
    pub fn filtered_options(&self) -> impl Iterator<Item = &SelectOption> + '_ {
        let resolved = self.resolved_options().unwrap_or_default();
        self.filtered.iter().filter_map(move |&i| resolved.get(i))
    }

    pub fn filtered_len(&self) -> usize {
        self.filtered.len()
    }

    /// Get the filtered option at `index`.
    pub fn filtered_option(&self, index: usize) -> Option<&SelectOption> {
        let position = *self.filtered.get(index)?;
        self.resolved_options()?.get(position)
    }

    pub fn selected(&self) -> Option<&SelectOption> {
        self.selected.as_ref()
    }

    pub fn phase(&self) -> PopupPhase {
        self.phase
    }

    /// Check if the popup is visible, including while a close is pending.
    pub fn is_open(&self) -> bool {
        self.phase.is_visible()
    }

    pub fn is_closing(&self) -> bool {
        matches!(self.phase, PopupPhase::Closing { .. })
    }

    /// The focused row in the filtered list.
    ///
    /// While closed this is the committed selection's row, which is where
    /// the cursor starts when the popup reopens.
    pub fn focused_index(&self) -> Option<usize> {
        match self.phase {
            PopupPhase::Closed => self.selection_position(),
            phase => phase.cursor(),
        }
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn placement(&self) -> Placement {
        self.placement
    }

    pub fn set_placement(&mut self, placement: Placement) {
        self.placement = placement;
    }

    /// The clear button needs text and either hover or focus.
    pub fn clear_enabled(&self) -> bool {
        !self.query.is_empty() && (self.hovered || self.focused)
    }

    // -------------------------------------------------------------------------
    // Source
    // -------------------------------------------------------------------------

    /// Install the resolved option list.
    ///
    /// Before the user has interacted, an option whose label equals the
    /// pre-populated text is adopted as the selection.
    pub fn set_resolved(&mut self, options: Options) {
        if self.selected.is_none() && !self.focused && !self.query.is_empty() {
            self.selected = options.iter().find(|o| o.label == self.query).cloned();
            self.query_edited = false;
        }
        self.resolution = Resolution::Ready(options);
        self.refilter();
    }

    // -------------------------------------------------------------------------
    // Input Events
    // -------------------------------------------------------------------------

    /// Input gained focus: open and reapply the search.
    pub fn focus(&mut self) {
        self.focused = true;
        self.open();
    }

    /// Input lost focus without a commit.
    ///
    /// Uncommitted text is discarded. Returns true if the popup is now
    /// closing and needs the delayed close.
    pub fn blur(&mut self) -> bool {
        self.focused = false;
        self.hovered = false;
        self.restore_query();

        match self.phase {
            PopupPhase::Open { cursor } => {
                self.phase = PopupPhase::Closing { cursor };
                true
            }
            PopupPhase::Closing { .. } => true,
            PopupPhase::Closed => {
                self.refilter();
                false
            }
        }
    }

    /// Text in the input changed.
    ///
    /// The cursor resets on every change. Empty text also drops the
    /// selection.
    pub fn type_text(&mut self, text: impl Into<String>) {
        self.query = text.into();
        self.query_edited = true;
        self.focused = true;
        if self.query.is_empty() {
            self.selected = None;
        }
        self.refilter();
        self.phase = PopupPhase::Open { cursor: None };
    }

    /// Arrow key: open, or move the cursor circularly.
    ///
    /// Opening starts at the committed selection when there is one, else at
    /// the first (Down) or last (Up) row.
    pub fn navigate(&mut self, direction: Direction) {
        self.focused = true;

        let phase = self.phase;
        self.phase = match phase {
            PopupPhase::Open { cursor } => PopupPhase::Open {
                cursor: direction.step(cursor, self.filtered.len()),
            },
            PopupPhase::Closing { .. } => {
                self.refilter();
                PopupPhase::Open {
                    cursor: direction.step(self.selection_position(), self.filtered.len()),
                }
            }
            PopupPhase::Closed => {
                self.refilter();
                PopupPhase::Open {
                    cursor: self
                        .selection_position()
                        .or_else(|| direction.entry(self.filtered.len())),
                }
            }
        };
    }

    /// Enter: commit the option under the cursor.
    pub fn submit(&mut self) -> Option<Commit> {
        let cursor = self.phase.cursor()?;
        self.commit(cursor)
    }

    /// Escape: hide the popup immediately.
    pub fn dismiss(&mut self) -> bool {
        if !self.phase.is_visible() {
            return false;
        }
        self.phase = PopupPhase::Closed;
        self.refilter();
        true
    }

    /// Option row clicked.
    pub fn click_option(&mut self, index: usize) -> Option<Commit> {
        if !self.phase.is_visible() {
            return None;
        }
        self.commit(index)
    }

    // -------------------------------------------------------------------------
    // Button Events
    // -------------------------------------------------------------------------

    /// Toggle button clicked. Opening also focuses the input.
    pub fn toggle(&mut self) -> bool {
        if self.phase.is_visible() {
            self.phase = PopupPhase::Closed;
            self.refilter();
        } else {
            self.focus();
        }
        self.phase.is_visible()
    }

    /// Clear button clicked. Returns false when the button is disabled.
    pub fn clear(&mut self) -> bool {
        if !self.clear_enabled() {
            return false;
        }
        self.query.clear();
        self.query_edited = false;
        self.selected = None;
        self.focused = true;
        self.refilter();
        self.phase = match self.phase {
            PopupPhase::Open { .. } => PopupPhase::Open { cursor: None },
            PopupPhase::Closing { .. } => PopupPhase::Closing { cursor: None },
            PopupPhase::Closed => PopupPhase::Closed,
        };
        true
    }

    // -------------------------------------------------------------------------
    // Pointer Events
    // -------------------------------------------------------------------------

    pub fn mouse_enter(&mut self) {
        self.hovered = true;
    }

    /// Leaving keeps the hover style while the input has focus.
    pub fn mouse_leave(&mut self) {
        self.hovered = self.focused;
    }

    // -------------------------------------------------------------------------
    // Timers and Owner
    // -------------------------------------------------------------------------

    /// Delayed close fired. Returns false if the close was overtaken.
    pub fn finish_close(&mut self) -> bool {
        if !self.is_closing() {
            return false;
        }
        self.phase = PopupPhase::Closed;
        self.refilter();
        true
    }

    /// Set the current value from outside by label.
    ///
    /// Unknown labels and `None` clear the selection.
    pub fn set_value(&mut self, label: Option<&str>) {
        self.selected = label.and_then(|label| {
            self.resolved_options()
                .and_then(|options| options.iter().find(|o| o.label == label))
                .cloned()
        });
        self.restore_query();
        self.refilter();
        if let PopupPhase::Open { .. } = self.phase {
            self.phase = PopupPhase::Open {
                cursor: self.selection_position(),
            };
        }
    }

    // -------------------------------------------------------------------------
    // Internals
    // -------------------------------------------------------------------------

    fn open(&mut self) {
        match self.phase {
            PopupPhase::Open { .. } => self.refilter(),
            PopupPhase::Closing { .. } | PopupPhase::Closed => {
                self.refilter();
                self.phase = PopupPhase::Open {
                    cursor: self.selection_position(),
                };
            }
        }
    }

    fn commit(&mut self, index: usize) -> Option<Commit> {
        let option = self.filtered_option(index)?.clone();
        self.query = option.label.clone();
        self.query_edited = false;
        self.selected = Some(option.clone());
        self.focused = true;
        self.phase = PopupPhase::Closing {
            cursor: Some(index),
        };
        Some(Commit { index, option })
    }

    /// Reset the text to the committed label, or empty without one.
    fn restore_query(&mut self) {
        self.query = self
            .selected
            .as_ref()
            .map(|o| o.label.clone())
            .unwrap_or_default();
        self.query_edited = false;
    }

    /// Text the filter applies.
    ///
    /// The committed label, left untouched since the commit, is treated as
    /// no filter so the reopened list shows the selection among all
    /// options. Typed text always filters literally.
    fn effective_query(&self) -> &str {
        match &self.selected {
            Some(option) if !self.query_edited && option.label == self.query => "",
            _ => &self.query,
        }
    }

    /// Recompute the filtered list and drop a cursor that no longer fits.
    fn refilter(&mut self) {
        let needle = self.effective_query().to_lowercase();
        self.filtered = match self.resolution.options() {
            Some(options) => options
                .iter()
                .enumerate()
                .filter(|(_, option)| option.matches_lowercase(&needle))
                .map(|(i, _)| i)
                .collect(),
            None => Vec::new(),
        };

        let len = self.filtered.len();
        self.phase = match self.phase {
            PopupPhase::Open { cursor } => PopupPhase::Open {
                cursor: cursor.filter(|&i| i < len),
            },
            PopupPhase::Closing { cursor } => PopupPhase::Closing {
                cursor: cursor.filter(|&i| i < len),
            },
            PopupPhase::Closed => PopupPhase::Closed,
        };
    }

    /// Position of the committed option in the filtered list.
    fn selection_position(&self) -> Option<usize> {
        let selected = self.selected.as_ref()?;
        let options = self.resolved_options()?;
        self.filtered
            .iter()
            .position(|&i| options.get(i) == Some(selected))
    }
}

// =============================================================================
// Tests
// =============================================================================
