//! Theme metrics for the select widget.
//!
//! The widget is headless, so the theme carries only the measurements that
//! feed layout decisions: row heights for scrolling and popup placement, and
//! glyph metrics for sizing the input to its widest option.

use unicode_segmentation::UnicodeSegmentation;

/// Layout metrics used by Select and OptionList.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    // -------------------------------------------------------------------------
    // Option List
    // -------------------------------------------------------------------------
    /// Height of one option row.
    pub item_height: f32,
    /// Height of the "no results" row.
    pub no_results_height: f32,
    /// Maximum height of the popup before it scrolls.
    pub list_max_height: f32,
    /// Vertical padding inside the popup (top + bottom).
    pub list_padding_y: f32,

    // -------------------------------------------------------------------------
    // Input
    // -------------------------------------------------------------------------
    /// Horizontal padding inside the input (left + right).
    pub input_padding_x: f32,
    /// Width reserved for the clear and toggle buttons.
    pub indicator_width: f32,
    /// Average advance of one grapheme.
    pub glyph_width: f32,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            item_height: 36.0,
            no_results_height: 40.0,
            list_max_height: 300.0,
            list_padding_y: 8.0,
            input_padding_x: 24.0,
            indicator_width: 56.0,
            glyph_width: 8.0,
        }
    }
}

impl Theme {
    /// Estimate the rendered width of a label.
    pub fn label_width(&self, label: &str) -> f32 {
        label.graphemes(true).count() as f32 * self.glyph_width
    }

    /// Minimum input width that shows any of `labels` untruncated.
    pub fn content_width<'a>(&self, labels: impl IntoIterator<Item = &'a str>) -> f32 {
        let widest = labels
            .into_iter()
            .map(|label| self.label_width(label))
            .fold(0.0_f32, f32::max);
        widest + self.input_padding_x + self.indicator_width
    }

    /// Height of the popup when it shows `rows` options.
    ///
    /// An empty list still shows the "no results" row.
    pub fn popup_height(&self, rows: usize) -> f32 {
        let content = if rows == 0 {
            self.no_results_height
        } else {
            rows as f32 * self.item_height
        };
        (content + self.list_padding_y).min(self.list_max_height)
    }

    /// Height of the scrollable row area.
    pub fn list_viewport_height(&self) -> f32 {
        self.list_max_height - self.list_padding_y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_width_counts_graphemes() {
        let theme = Theme::default();
        assert_eq!(theme.label_width("abc"), 24.0);
        // "é" written as e + combining accent is one grapheme
        assert_eq!(theme.label_width("e\u{301}"), 8.0);
    }

    #[test]
    fn test_content_width_uses_widest_label() {
        let theme = Theme::default();
        let width = theme.content_width(["Up", "Amélie", "Heat"]);
        assert_eq!(width, 6.0 * 8.0 + 24.0 + 56.0);
    }

    #[test]
    fn test_content_width_without_labels() {
        let theme = Theme::default();
        assert_eq!(theme.content_width(std::iter::empty::<&str>()), 80.0);
    }

    #[test]
    fn test_popup_height() {
        let theme = Theme::default();
        assert_eq!(theme.popup_height(0), 48.0);
        assert_eq!(theme.popup_height(2), 80.0);
        // Capped
        assert_eq!(theme.popup_height(100), 300.0);
    }
}
