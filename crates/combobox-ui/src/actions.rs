//! Centralized actions for the select widget.
//!
//! Every input the widget reacts to is a `SelectAction`. Hosts translate
//! their native events into actions, either directly or by key name through
//! the `Keymap`.

use combobox_core::Viewport;

/// An input to the select widget.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectAction {
    // -------------------------------------------------------------------------
    // Navigation
    // -------------------------------------------------------------------------
    CursorUp,
    CursorDown,

    // -------------------------------------------------------------------------
    // Execution
    // -------------------------------------------------------------------------
    /// Commit the focused option (Enter).
    Submit,
    /// Close the popup (Escape).
    Dismiss,

    // -------------------------------------------------------------------------
    // Buttons
    // -------------------------------------------------------------------------
    Toggle,
    Clear,

    // -------------------------------------------------------------------------
    // Input
    // -------------------------------------------------------------------------
    Focus,
    Blur,
    /// The input's text changed to this value.
    Input(String),

    // -------------------------------------------------------------------------
    // Pointer
    // -------------------------------------------------------------------------
    MouseEnter,
    MouseLeave,
    /// An option row was clicked.
    ClickOption(usize),

    // -------------------------------------------------------------------------
    // Window
    // -------------------------------------------------------------------------
    Resize(Viewport),
}

/// Look up a keyboard action by name.
///
/// Only actions without a payload are nameable.
pub fn action_from_name(name: &str) -> Option<SelectAction> {
    match name {
        // Navigation
        "cursor_up" => Some(SelectAction::CursorUp),
        "cursor_down" => Some(SelectAction::CursorDown),

        // Execution
        "submit" => Some(SelectAction::Submit),
        "dismiss" => Some(SelectAction::Dismiss),

        // Buttons
        "toggle" => Some(SelectAction::Toggle),
        "clear" => Some(SelectAction::Clear),

        _ => None,
    }
}

/// Get all nameable action names.
pub fn available_actions() -> &'static [&'static str] {
    &[
        // Navigation
        "cursor_up",
        "cursor_down",
        // Execution
        "submit",
        "dismiss",
        // Buttons
        "toggle",
        "clear",
    ]
}
