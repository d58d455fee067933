//! Key binding table.
//!
//! Maps key names to `SelectAction`s.
//!
//! ## Binding Order
//!
//! Last-wins semantics: binding a key that is already bound replaces the
//! previous action. Defaults are registered first, then user bindings, so
//! user bindings take precedence.

use std::collections::HashMap;

use crate::actions::{action_from_name, SelectAction};

// =============================================================================
// Key Parsing
// =============================================================================

/// Convert a key name to canonical form.
///
/// Accepts DOM `KeyboardEvent.key` names ("ArrowDown", "Escape") as well as
/// short names ("down", "esc"), and both "ctrl+n" and "ctrl-n" chords.
fn normalize_key(s: &str) -> String {
    s.split(['+', '-'])
        .map(|part| {
            let part = part.trim().to_lowercase();
            match part.as_str() {
                "arrowdown" => "down".to_string(),
                "arrowup" => "up".to_string(),
                "esc" => "escape".to_string(),
                "return" => "enter".to_string(),
                _ => part,
            }
        })
        .collect::<Vec<_>>()
        .join("-")
}

// =============================================================================
// Keymap
// =============================================================================

/// Key name to action table.
#[derive(Debug, Clone, Default)]
pub struct Keymap {
    bindings: HashMap<String, SelectAction>,
}

impl Keymap {
    /// Create an empty keymap.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a keymap with the default combobox bindings.
    pub fn with_defaults() -> Self {
        let mut keymap = Self::new();
        for (key, action) in [
            ("down", "cursor_down"),
            ("up", "cursor_up"),
            ("enter", "submit"),
            ("escape", "dismiss"),
        ] {
            keymap.bind(key, action);
        }
        tracing::debug!("Registered {} default bindings", keymap.binding_count());
        keymap
    }

    /// Bind `key` to the action named `action`.
    ///
    /// Returns false and leaves the keymap untouched for unknown actions.
    pub fn bind(&mut self, key: &str, action: &str) -> bool {
        match action_from_name(action) {
            Some(resolved) => {
                self.bindings.insert(normalize_key(key), resolved);
                true
            }
            None => {
                tracing::warn!("Unknown action: {}", action);
                false
            }
        }
    }

    /// Remove the binding for `key`.
    pub fn unbind(&mut self, key: &str) -> Option<SelectAction> {
        self.bindings.remove(&normalize_key(key))
    }

    /// Look up the action bound to `key`.
    pub fn resolve(&self, key: &str) -> Option<SelectAction> {
        self.bindings.get(&normalize_key(key)).cloned()
    }

    pub fn binding_count(&self) -> usize {
        self.bindings.len()
    }
}
