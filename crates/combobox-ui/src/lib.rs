//! Headless searchable select widget.
//!
//! This crate provides the combobox itself:
//! - SelectState, the runtime-independent interaction state machine
//! - Select, the async controller driving timers and option sources
//! - OptionList rendering and scroll bookkeeping
//! - Popup placement, theme metrics and the keymap

pub mod actions;
pub mod keymap;
pub mod model;
pub mod placement;
pub mod source;
pub mod theme;
pub mod timer;
pub mod views;

// Re-export commonly used types
pub use actions::{action_from_name, available_actions, SelectAction};
pub use combobox_core::{Options, SelectConfig, SelectOption};
pub use keymap::Keymap;
pub use model::{Commit, Direction, PopupPhase, Resolution, SelectState};
pub use placement::{compute_placement, Placement};
pub use source::{resolve, JsonProvider, OptionProvider, OptionSource};
pub use theme::Theme;
pub use timer::{Debouncer, ScheduledTask};
pub use views::{
    InputStyle, OptionList, OptionListEvent, OptionListView, OptionRow, ScrollSync, Select,
    SelectView,
};
