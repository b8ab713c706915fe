//! The editing model behind the recipe properties screen: one row per
//! property, pending choices that only reach the [`PropertyState`] on save.

use super::definition::{PropertyDefinition, PropertyKind, SlotDomain};
use super::library::PropertyLibrary;
use super::state::PropertyState;

#[derive(Debug)]
pub struct FormRow<'a> {
    definition: &'a PropertyDefinition,
    option_index: Option<usize>,
    slot_index: Option<usize>,
    text: Option<String>,
}

impl<'a> FormRow<'a> {
    pub fn definition(&self) -> &'a PropertyDefinition {
        self.definition
    }

    pub fn label(&self) -> &str {
        self.definition.label()
    }

    /// Display name of the pending option, select rows only.
    pub fn option_label(&self) -> Option<&str> {
        let index = self.option_index?;
        self.definition
            .options()
            .get(index)
            .map(|option| option.display_name())
    }

    pub fn option_index(&self) -> Option<usize> {
        self.option_index
    }

    pub fn slot_index(&self) -> Option<usize> {
        self.slot_index
    }

    pub fn slot_label(&self) -> Option<String> {
        self.slot_index
            .map(|slot| slot_label(self.definition.slot_domain(), slot))
    }

    /// Text in the value field, value rows only.
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }
}

/// `Input 1`, `Output 3`: slots are shown 1-based.
pub fn slot_label(domain: SlotDomain, slot: usize) -> String {
    match domain {
        SlotDomain::Input => format!("Input {}", slot + 1),
        SlotDomain::Output => format!("Output {}", slot + 1),
        SlotDomain::None => "Slot".to_string(),
    }
}

pub struct PropertyForm<'a> {
    rows: Vec<FormRow<'a>>,
    active_inputs: usize,
    active_outputs: usize,
}

impl<'a> PropertyForm<'a> {
    /// Builds the rows for a recipe type from the saved state. Properties
    /// that need a slot are dropped when the recipe has no such slots, and
    /// stored indices that no longer fit are reset to the first entry.
    pub fn open(
        library: &'a PropertyLibrary,
        recipe_type_id: &str,
        state: &PropertyState,
        active_inputs: usize,
        active_outputs: usize,
    ) -> Self {
        let mut form = Self {
            rows: Vec::new(),
            active_inputs,
            active_outputs,
        };
        for definition in library.properties_for(recipe_type_id) {
            let slot_count = form.slot_count(definition.slot_domain());
            if definition.requires_slot_selection() && slot_count == 0 {
                continue;
            }
            let slot_index = (definition.supports_slot_selection() && slot_count > 0).then(|| {
                state
                    .slot_index(definition.id())
                    .filter(|slot| *slot < slot_count)
                    .unwrap_or(0)
            });

            let row = match definition.kind() {
                PropertyKind::Select { options } => {
                    if options.is_empty() {
                        continue;
                    }
                    let index = state.option_index(definition.id());
                    FormRow {
                        definition,
                        option_index: Some(if index < options.len() { index } else { 0 }),
                        slot_index,
                        text: None,
                    }
                }
                PropertyKind::Value { default_value, .. } => {
                    let stored = if definition.supports_slot_selection() {
                        slot_index.and_then(|slot| state.slot_value(definition.id(), slot))
                    } else {
                        state.value(definition.id())
                    };
                    FormRow {
                        definition,
                        option_index: None,
                        slot_index,
                        text: Some(stored.unwrap_or(default_value).to_string()),
                    }
                }
            };
            form.rows.push(row);
        }
        form
    }

    pub fn rows(&self) -> &[FormRow<'a>] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn slot_count(&self, domain: SlotDomain) -> usize {
        match domain {
            SlotDomain::Input => self.active_inputs,
            SlotDomain::Output => self.active_outputs,
            SlotDomain::None => 0,
        }
    }

    /// Moves a select row to its next option, wrapping around. Returns the
    /// new option's display name.
    pub fn cycle_option(&mut self, row: usize) -> Option<&str> {
        let row = self.rows.get_mut(row)?;
        let count = row.definition.options().len();
        let current = row.option_index?;
        row.option_index = Some((current + 1) % count);
        row.option_label()
    }

    /// Moves a slot scoped row to the next active slot, wrapping around.
    /// Value rows reload their text for the new slot. Returns the new label.
    pub fn cycle_slot(&mut self, state: &PropertyState, row: usize) -> Option<String> {
        let slot_count = self.slot_count(self.rows.get(row)?.definition.slot_domain());
        let row = self.rows.get_mut(row)?;
        if slot_count == 0 {
            return None;
        }
        let next = (row.slot_index? + 1) % slot_count;
        row.slot_index = Some(next);
        if row.text.is_some() {
            let stored = state
                .slot_value(row.definition.id(), next)
                .filter(|value| !value.trim().is_empty())
                .unwrap_or(row.definition.default_value());
            row.text = Some(stored.to_string());
        }
        row.slot_label()
    }

    /// Replaces the text of a value row. Select rows ignore it.
    pub fn set_text(&mut self, row: usize, text: &str) {
        if let Some(row) = self.rows.get_mut(row) {
            if row.text.is_some() {
                row.text = Some(text.to_string());
            }
        }
    }

    /// Writes every row into the state. Value text is sanitized first and
    /// the row shows the sanitized text afterwards.
    pub fn save(&mut self, state: &mut PropertyState) {
        for row in &mut self.rows {
            let definition = row.definition;
            let id = definition.id();
            if let Some(index) = row.option_index {
                state.set_option_index(id, index);
                if definition.supports_slot_selection() {
                    state.set_slot_index(id, row.slot_index);
                }
            } else if let Some(text) = &row.text {
                let sanitized = definition.sanitize(text);
                if definition.supports_slot_selection() {
                    state.set_slot_index(id, row.slot_index);
                    if let Some(slot) = row.slot_index {
                        state.set_slot_value(id, slot, &sanitized);
                    }
                } else {
                    state.set_value(id, &sanitized);
                }
                row.text = Some(sanitized);
            }
        }
        log::debug!("saved {} property rows", self.rows.len());
    }
}
