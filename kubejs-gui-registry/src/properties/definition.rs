use std::fmt;

use serde::{Deserialize, Serialize};

use super::library::RecipeContext;
use super::state::PropertyState;
use super::template::format_template;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyType {
    Select,
    Value,
}

/// Which slots, if any, a property can be pinned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotDomain {
    #[default]
    None,
    Input,
    Output,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PropertyOption {
    display_name: String,
    script_value: String,
    emit: bool,
}

impl PropertyOption {
    /// An option that writes `script_value` into the script.
    pub fn emit(display_name: &str, script_value: &str) -> Self {
        Self {
            display_name: display_name.to_string(),
            script_value: script_value.to_string(),
            emit: true,
        }
    }

    /// An option that leaves the property out of the script, like "None".
    pub fn skip(display_name: &str) -> Self {
        Self {
            display_name: display_name.to_string(),
            script_value: String::new(),
            emit: false,
        }
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn script_value(&self) -> &str {
        &self.script_value
    }

    pub fn should_emit(&self) -> bool {
        self.emit
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyKind {
    Select {
        options: Vec<PropertyOption>,
    },
    Value {
        default_value: String,
        numeric: bool,
        hint: String,
    },
}

pub type CustomEmitter =
    fn(&PropertyDefinition, &PropertyState, &RecipeContext<'_>) -> Option<String>;

/// How a property turns into a script line.
///
/// Templates and custom emitters receive their arguments in the same
/// order: the value first, the slot index second.
#[derive(Clone)]
pub enum SnippetEmitter {
    Template(String),
    Custom(CustomEmitter),
}

impl fmt::Debug for SnippetEmitter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Template(template) => f.debug_tuple("Template").field(template).finish(),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PropertyDefinition {
    id: String,
    label: String,
    kind: PropertyKind,
    slot_domain: SlotDomain,
    slot_required: bool,
    emitter: SnippetEmitter,
}

impl PropertyDefinition {
    pub fn select(id: &str, label: &str, template: &str, options: Vec<PropertyOption>) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            kind: PropertyKind::Select { options },
            slot_domain: SlotDomain::None,
            slot_required: false,
            emitter: SnippetEmitter::Template(template.to_string()),
        }
    }

    pub fn value(id: &str, label: &str, template: &str, default_value: &str) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            kind: PropertyKind::Value {
                default_value: default_value.to_string(),
                numeric: false,
                hint: String::new(),
            },
            slot_domain: SlotDomain::None,
            slot_required: false,
            emitter: SnippetEmitter::Template(template.to_string()),
        }
    }

    /// Marks a value property as digits only. No effect on select properties.
    #[must_use]
    pub fn numeric(mut self) -> Self {
        if let PropertyKind::Value { numeric, .. } = &mut self.kind {
            *numeric = true;
        }
        self
    }

    #[must_use]
    pub fn with_hint(mut self, value_hint: &str) -> Self {
        if let PropertyKind::Value { hint, .. } = &mut self.kind {
            *hint = value_hint.to_string();
        }
        self
    }

    #[must_use]
    pub fn slot_scoped(mut self, domain: SlotDomain, required: bool) -> Self {
        self.slot_domain = domain;
        self.slot_required = required && domain != SlotDomain::None;
        self
    }

    #[must_use]
    pub fn with_emitter(mut self, emitter: CustomEmitter) -> Self {
        self.emitter = SnippetEmitter::Custom(emitter);
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn kind(&self) -> &PropertyKind {
        &self.kind
    }

    pub fn property_type(&self) -> PropertyType {
        match self.kind {
            PropertyKind::Select { .. } => PropertyType::Select,
            PropertyKind::Value { .. } => PropertyType::Value,
        }
    }

    pub fn options(&self) -> &[PropertyOption] {
        match &self.kind {
            PropertyKind::Select { options } => options,
            PropertyKind::Value { .. } => &[],
        }
    }

    pub fn default_value(&self) -> &str {
        match &self.kind {
            PropertyKind::Value { default_value, .. } => default_value,
            PropertyKind::Select { .. } => "",
        }
    }

    pub fn value_hint(&self) -> &str {
        match &self.kind {
            PropertyKind::Value { hint, .. } => hint,
            PropertyKind::Select { .. } => "",
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self.kind, PropertyKind::Value { numeric: true, .. })
    }

    pub fn slot_domain(&self) -> SlotDomain {
        self.slot_domain
    }

    pub fn supports_slot_selection(&self) -> bool {
        self.slot_domain != SlotDomain::None
    }

    pub fn requires_slot_selection(&self) -> bool {
        self.supports_slot_selection() && self.slot_required
    }

    pub fn emitter(&self) -> &SnippetEmitter {
        &self.emitter
    }

    /// Cleans up text typed into a value field: trims it and, for numeric
    /// properties, drops every character that isn't a digit.
    pub fn sanitize(&self, raw: &str) -> String {
        let trimmed = raw.trim();
        if self.is_numeric() {
            trimmed.chars().filter(char::is_ascii_digit).collect()
        } else {
            trimmed.to_string()
        }
    }

    /// The slot this property currently targets, if it is slot scoped and
    /// the stored index fits the recipe's active slots.
    pub fn selected_slot(&self, state: &PropertyState, context: &RecipeContext<'_>) -> Option<usize> {
        if !self.supports_slot_selection() {
            return None;
        }
        state
            .slot_index(&self.id)
            .filter(|slot| *slot < context.slot_count(self.slot_domain))
    }

    /// Renders this property into a script line. Blank output counts as
    /// nothing.
    pub fn render(&self, state: &PropertyState, context: &RecipeContext<'_>) -> Option<String> {
        let snippet = match &self.emitter {
            SnippetEmitter::Custom(emit) => emit(self, state, context),
            SnippetEmitter::Template(template) => self.render_template(template, state, context),
        };
        snippet.filter(|snippet| !snippet.trim().is_empty())
    }

    fn render_template(
        &self,
        template: &str,
        state: &PropertyState,
        context: &RecipeContext<'_>,
    ) -> Option<String> {
        let slot = self.selected_slot(state, context);
        if self.requires_slot_selection() && slot.is_none() {
            return None;
        }
        let value = match &self.kind {
            PropertyKind::Select { options } => {
                let option = self.selected_option(state, options)?;
                if !option.should_emit() {
                    return None;
                }
                option.script_value().to_string()
            }
            PropertyKind::Value { .. } => {
                let stored = if self.supports_slot_selection() {
                    state.slot_value(&self.id, slot?)
                } else {
                    state.value(&self.id)
                };
                stored.filter(|value| !value.trim().is_empty())?.to_string()
            }
        };
        let slot = slot.map(|slot| slot.to_string());
        let mut args = vec![value.as_str()];
        args.extend(slot.as_deref());
        Some(format_template(template, &args))
    }

    /// Stored option, reclamped to the first one when out of range.
    pub fn selected_option<'a>(
        &self,
        state: &PropertyState,
        options: &'a [PropertyOption],
    ) -> Option<&'a PropertyOption> {
        let index = state.option_index(&self.id);
        options.get(index).or_else(|| options.first())
    }
}

#[cfg(test)]
mod test {
    use super::{PropertyDefinition, PropertyOption, PropertyType, SlotDomain};

    #[test]
    fn numeric_sanitize_strips_non_digits() {
        let definition = PropertyDefinition::value("time", "Time", "time: %s,", "100").numeric();
        assert_eq!(definition.sanitize("  1a2b0 ticks "), "120");
        assert_eq!(definition.sanitize("-5"), "5");
        assert_eq!(definition.sanitize("abc"), "");
    }

    #[test]
    fn text_sanitize_only_trims() {
        let definition = PropertyDefinition::value("chance", "Chance", "chance: %s,", "");
        assert_eq!(definition.sanitize(" 0.25 "), "0.25");
    }

    #[test]
    fn value_only_builders_ignore_selects() {
        let definition = PropertyDefinition::select(
            "mode",
            "Mode",
            "mode: %s,",
            vec![PropertyOption::skip("None")],
        )
        .numeric()
        .with_hint("ignored");
        assert_eq!(definition.property_type(), PropertyType::Select);
        assert!(!definition.is_numeric());
        assert_eq!(definition.value_hint(), "");
    }

    #[test]
    fn slot_required_needs_a_domain() {
        let definition =
            PropertyDefinition::value("x", "X", "%s", "").slot_scoped(SlotDomain::None, true);
        assert!(!definition.supports_slot_selection());
        assert!(!definition.requires_slot_selection());

        let definition =
            PropertyDefinition::value("x", "X", "%s", "").slot_scoped(SlotDomain::Input, true);
        assert!(definition.requires_slot_selection());
    }
}
