//! Option list rendering and scroll bookkeeping.
//!
//! The list itself is stateless: `OptionList::render` is a pure function of
//! the options, the open flag and the focused index. The only thing carried
//! between renders is `ScrollSync`, the scroll position that keeps the
//! focused row in view.

use combobox_core::SelectOption;

// =============================================================================
// Events
// =============================================================================

/// Events emitted by an option list.
#[derive(Debug, Clone, PartialEq)]
pub enum OptionListEvent {
    /// A row was clicked.
    Selected { index: usize, option: SelectOption },
}

// =============================================================================
// View
// =============================================================================

/// One rendered option row.
#[derive(Debug, Clone, PartialEq)]
pub struct OptionRow {
    /// Position in the filtered list.
    pub index: usize,
    pub value: String,
    pub label: String,
    /// Whether the row carries the highlighted style.
    pub focused: bool,
}

/// What the option list shows.
#[derive(Debug, Clone, PartialEq)]
pub enum OptionListView {
    /// Popup closed, nothing rendered.
    Hidden,
    /// Popup open with no matching options.
    NoResults(String),
    /// Popup open with rows.
    Rows(Vec<OptionRow>),
}

impl OptionListView {
    pub fn is_visible(&self) -> bool {
        !matches!(self, OptionListView::Hidden)
    }

    pub fn rows(&self) -> &[OptionRow] {
        match self {
            OptionListView::Rows(rows) => rows,
            OptionListView::Hidden | OptionListView::NoResults(_) => &[],
        }
    }

    pub fn focused_row(&self) -> Option<&OptionRow> {
        self.rows().iter().find(|row| row.focused)
    }

    /// Resolve a click on row `index` to a selection event.
    pub fn click(&self, index: usize) -> Option<OptionListEvent> {
        let row = self.rows().get(index)?;
        Some(OptionListEvent::Selected {
            index: row.index,
            option: SelectOption::new(row.value.clone(), row.label.clone()),
        })
    }

    /// Plain-text rendering for terminals and tests.
    ///
    /// The focused row is marked with `>`.
    pub fn to_text(&self) -> String {
        match self {
            OptionListView::Hidden => String::new(),
            OptionListView::NoResults(text) => text.clone(),
            OptionListView::Rows(rows) => rows
                .iter()
                .map(|row| {
                    let marker = if row.focused { '>' } else { ' ' };
                    format!("{} {}", marker, row.label)
                })
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }
}

/// Stateless option list renderer.
pub struct OptionList;

impl OptionList {
    /// Render the list.
    pub fn render<'a>(
        options: impl IntoIterator<Item = &'a SelectOption>,
        open: bool,
        focused_index: Option<usize>,
        no_results_text: &str,
    ) -> OptionListView {
        if !open {
            return OptionListView::Hidden;
        }

        let rows: Vec<OptionRow> = options
            .into_iter()
            .enumerate()
            .map(|(index, option)| OptionRow {
                index,
                value: option.value.clone(),
                label: option.label.clone(),
                focused: focused_index == Some(index),
            })
            .collect();

        if rows.is_empty() {
            OptionListView::NoResults(no_results_text.to_string())
        } else {
            OptionListView::Rows(rows)
        }
    }
}

// =============================================================================
// Scroll Sync
// =============================================================================

/// Keeps the focused row visible with a "nearest" scroll policy.
///
/// Run `sync` after each render. The scroll position is first clamped to
/// the content, so a list that shrank never leaves the window past its
/// end. Beyond that it only acts when the focused index changed since the
/// last run, and only moves when the row is outside the visible window: up
/// to align its top edge, down to align its bottom edge. Nothing is
/// animated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScrollSync {
    synced: Option<usize>,
    scroll_top: f32,
}

impl ScrollSync {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bring `focused` into view in a list of `rows` rows. Returns true if
    /// the scroll position moved.
    pub fn sync(
        &mut self,
        focused: Option<usize>,
        rows: usize,
        row_height: f32,
        viewport_height: f32,
    ) -> bool {
        let previous = self.scroll_top;
        let max_scroll = (rows as f32 * row_height - viewport_height).max(0.0);
        self.scroll_top = self.scroll_top.min(max_scroll);

        if focused != self.synced {
            self.synced = focused;
            if let Some(index) = focused {
                if !self.is_row_visible(index, row_height, viewport_height) {
                    let row_top = index as f32 * row_height;
                    self.scroll_top = if row_top < self.scroll_top {
                        row_top
                    } else {
                        row_top + row_height - viewport_height
                    };
                }
            }
        }

        self.scroll_top != previous
    }

    /// Forget the scroll position, e.g. when the list unmounts.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn scroll_top(&self) -> f32 {
        self.scroll_top
    }

    /// Check whether row `index` lies fully inside the visible window.
    pub fn is_row_visible(&self, index: usize, row_height: f32, viewport_height: f32) -> bool {
        let row_top = index as f32 * row_height;
        row_top >= self.scroll_top && row_top + row_height <= self.scroll_top + viewport_height
    }
}

// =============================================================================
// Tests
// =============================================================================
