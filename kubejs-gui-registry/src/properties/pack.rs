use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use super::definition::{PropertyDefinition, PropertyOption, SlotDomain};
use super::library::{PropertyLibraryBuilder, WILDCARD_RECIPE};

#[derive(Error, Debug)]
pub enum PropertyPackError {
    #[error("Couldn't read property pack: {0}")]
    Io(#[from] std::io::Error),
    #[error("Couldn't parse property pack: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Property '{id}' is invalid: {reason}")]
    InvalidEntry { id: String, reason: &'static str },
}

/// One property as written in a JSON property pack.
#[derive(Deserialize)]
struct PackEntry {
    namespace: String,
    #[serde(default = "wildcard")]
    recipe: String,
    id: String,
    label: String,
    template: String,
    #[serde(default)]
    slot: SlotDomain,
    #[serde(default)]
    slot_required: bool,
    select: Option<Vec<PackOption>>,
    value: Option<PackValue>,
}

fn wildcard() -> String {
    WILDCARD_RECIPE.to_string()
}

#[derive(Deserialize)]
struct PackOption {
    name: String,
    /// Options without a value leave the property out of the script.
    value: Option<String>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct PackValue {
    default: String,
    numeric: bool,
    hint: String,
}

impl PackEntry {
    fn into_definition(self) -> Result<(String, String, PropertyDefinition), PropertyPackError> {
        let invalid = |reason| PropertyPackError::InvalidEntry {
            id: self.id.clone(),
            reason,
        };
        if self.id.trim().is_empty() {
            return Err(invalid("id is empty"));
        }
        if self.namespace.trim().is_empty() || self.recipe.trim().is_empty() {
            return Err(invalid("namespace and recipe must not be empty"));
        }
        let definition = match (&self.select, &self.value) {
            (Some(options), None) => {
                if options.is_empty() {
                    return Err(invalid("select property has no options"));
                }
                let options = options
                    .iter()
                    .map(|option| match &option.value {
                        Some(value) => PropertyOption::emit(&option.name, value),
                        None => PropertyOption::skip(&option.name),
                    })
                    .collect();
                PropertyDefinition::select(&self.id, &self.label, &self.template, options)
            }
            (None, Some(value)) => {
                let definition =
                    PropertyDefinition::value(&self.id, &self.label, &self.template, &value.default)
                        .with_hint(&value.hint);
                if value.numeric {
                    definition.numeric()
                } else {
                    definition
                }
            }
            _ => return Err(invalid("needs exactly one of 'select' or 'value'")),
        };
        let definition = definition.slot_scoped(self.slot, self.slot_required);
        Ok((self.namespace, self.recipe, definition))
    }
}

impl PropertyLibraryBuilder {
    /// Registers every property of a JSON property pack. Nothing is
    /// registered when any entry is invalid.
    pub fn load_pack(&mut self, json: &str) -> Result<usize, PropertyPackError> {
        let entries: Vec<PackEntry> = serde_json::from_str(json)?;
        let definitions = entries
            .into_iter()
            .map(PackEntry::into_definition)
            .collect::<Result<Vec<_>, _>>()?;
        let count = definitions.len();
        for (namespace, recipe, definition) in definitions {
            self.register(&namespace, &recipe, definition);
        }
        log::info!("Loaded {count} properties from property pack");
        Ok(count)
    }

    pub fn load_pack_file(&mut self, path: &Path) -> Result<usize, PropertyPackError> {
        let json = std::fs::read_to_string(path)?;
        self.load_pack(&json)
    }
}
