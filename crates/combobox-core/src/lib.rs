//! Core types for the combobox widget.
//!
//! This crate contains shared data structures used across the workspace:
//! - SelectOption, the unit of data a combobox offers
//! - Geometry reported by the host for placement
//! - Configuration types
//! - Error types

mod config;
mod error;
mod geometry;
mod option;

pub use config::{config_dir, config_path, SelectConfig};
pub use error::{ConfigError, SourceError};
pub use geometry::{Rect, Viewport};
pub use option::{options_from_json, Options, SelectOption};
