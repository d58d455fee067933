//! Views for the select widget.
//!
//! `Select` is the stateful controller; `OptionList` is the stateless list
//! it renders through.

mod option_list;
mod select;

pub use option_list::{OptionList, OptionListEvent, OptionListView, OptionRow, ScrollSync};
pub use select::{ChangeCallback, InputStyle, Select, SelectView};
