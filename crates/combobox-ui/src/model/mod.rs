//! State model for the select widget.
//!
//! This module contains the state machine and data structures that drive the UI.
//! All types are runtime-independent for testability.

mod state;

pub use state::{Commit, Direction, PopupPhase, Resolution, SelectState};
