//! Action table: the fixed single-key lookup used by the classifier

use std::collections::HashMap;

use super::action::Action;
use super::binding::Keybinding;
use super::types::CanonicalKey;

/// Canonical key → action, built once at startup
#[derive(Debug, Clone, Default)]
pub struct ActionTable {
    lookup: HashMap<CanonicalKey, Action>,
}

impl ActionTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self {
            lookup: HashMap::new(),
        }
    }

    /// Create a table from bindings; later bindings for the same key win
    pub fn with_bindings(bindings: Vec<Keybinding>) -> Self {
        let mut table = Self::new();
        for binding in bindings {
            table.add_binding(binding);
        }
        table
    }

    /// Add or replace a binding. `Unbound` removes the key instead.
    pub fn add_binding(&mut self, binding: Keybinding) {
        if binding.action == Action::Unbound {
            self.lookup.remove(&binding.key);
        } else {
            self.lookup.insert(binding.key, binding.action);
        }
    }

    /// Look up the action for a single canonical key
    pub fn lookup(&self, key: &CanonicalKey) -> Option<Action> {
        self.lookup.get(key).copied()
    }

    /// Key bound to an action (first in key order)
    pub fn key_for(&self, action: Action) -> Option<&CanonicalKey> {
        self.lookup
            .iter()
            .filter(|(_, &a)| a == action)
            .map(|(k, _)| k)
            .min()
    }

    pub fn len(&self) -> usize {
        self.lookup.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lookup.is_empty()
    }

    /// All bindings sorted by key, for display
    pub fn bindings(&self) -> Vec<Keybinding> {
        let mut bindings: Vec<Keybinding> = self
            .lookup
            .iter()
            .map(|(key, &action)| Keybinding::new(key.clone(), action))
            .collect();
        bindings.sort_by(|a, b| a.key.cmp(&b.key));
        bindings
    }
}
