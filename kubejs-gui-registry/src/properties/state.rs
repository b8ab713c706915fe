use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// The player's property choices for one editing session.
///
/// A missing value and an empty one are different things: blank input
/// removes the entry, so `has_value` only reports real values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "StoredPropertyState")]
pub struct PropertyState {
    options: HashMap<String, usize>,
    values: HashMap<String, String>,
    slots: HashMap<String, usize>,
    slot_values: HashMap<String, HashMap<usize, String>>,
}

/// `PropertyState` as written in a draft, before blank values are dropped.
#[derive(Deserialize, Default)]
#[serde(default)]
struct StoredPropertyState {
    options: HashMap<String, usize>,
    values: HashMap<String, String>,
    slots: HashMap<String, usize>,
    slot_values: HashMap<String, HashMap<usize, String>>,
}

impl From<StoredPropertyState> for PropertyState {
    fn from(stored: StoredPropertyState) -> Self {
        let mut state = Self {
            options: stored.options,
            slots: stored.slots,
            ..Self::default()
        };
        for (property_id, value) in &stored.values {
            state.set_value(property_id, value);
        }
        for (property_id, values) in &stored.slot_values {
            for (slot, value) in values {
                state.set_slot_value(property_id, *slot, value);
            }
        }
        state
    }
}

impl PropertyState {
    pub fn new() -> Self {
        Self::default()
    }

    /// The selected option, 0 when nothing was chosen yet.
    pub fn option_index(&self, property_id: &str) -> usize {
        self.options.get(property_id).copied().unwrap_or(0)
    }

    pub fn set_option_index(&mut self, property_id: &str, index: usize) {
        self.options.insert(property_id.to_string(), index);
    }

    pub fn clear_options(&mut self) {
        self.options.clear();
    }

    pub fn has_value(&self, property_id: &str) -> bool {
        self.values.contains_key(property_id)
    }

    pub fn value(&self, property_id: &str) -> Option<&str> {
        self.values.get(property_id).map(String::as_str)
    }

    /// Stores a value; blank input removes the entry instead.
    pub fn set_value(&mut self, property_id: &str, value: &str) {
        if value.trim().is_empty() {
            self.values.remove(property_id);
        } else {
            self.values.insert(property_id.to_string(), value.to_string());
        }
    }

    pub fn clear_values(&mut self) {
        self.values.clear();
        self.slot_values.clear();
    }

    /// The slot a property is pinned to, `None` when unset.
    pub fn slot_index(&self, property_id: &str) -> Option<usize> {
        self.slots.get(property_id).copied()
    }

    pub fn set_slot_index(&mut self, property_id: &str, slot: Option<usize>) {
        match slot {
            Some(slot) => {
                self.slots.insert(property_id.to_string(), slot);
            }
            None => {
                self.slots.remove(property_id);
            }
        }
    }

    pub fn slot_value(&self, property_id: &str, slot: usize) -> Option<&str> {
        self.slot_values
            .get(property_id)?
            .get(&slot)
            .map(String::as_str)
    }

    /// Stores a per-slot value; blank input removes it.
    pub fn set_slot_value(&mut self, property_id: &str, slot: usize, value: &str) {
        if value.trim().is_empty() {
            if let Some(values) = self.slot_values.get_mut(property_id) {
                values.remove(&slot);
                if values.is_empty() {
                    self.slot_values.remove(property_id);
                }
            }
        } else {
            self.slot_values
                .entry(property_id.to_string())
                .or_default()
                .insert(slot, value.to_string());
        }
    }

    /// Forgets every option, value and slot choice.
    pub fn clear(&mut self) {
        self.options.clear();
        self.values.clear();
        self.slots.clear();
        self.slot_values.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
            && self.values.is_empty()
            && self.slots.is_empty()
            && self.slot_values.is_empty()
    }
}
