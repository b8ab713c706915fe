use std::collections::HashMap;

use indexmap::IndexMap;
use kubejs_gui_core::{Identifier, ItemStack};

use super::definition::{PropertyDefinition, SlotDomain};
use super::state::PropertyState;

/// Recipe path that registers a property for every recipe type of a namespace.
pub const WILDCARD_RECIPE: &str = "*";

/// Read-only view of the recipe being exported, handed to custom emitters.
pub struct RecipeContext<'a> {
    recipe_type_id: &'a str,
    inputs: &'a [Option<ItemStack>],
    outputs: &'a [Option<ItemStack>],
}

impl<'a> RecipeContext<'a> {
    pub fn new(
        recipe_type_id: &'a str,
        inputs: &'a [Option<ItemStack>],
        outputs: &'a [Option<ItemStack>],
    ) -> Self {
        Self {
            recipe_type_id,
            inputs,
            outputs,
        }
    }

    pub fn recipe_type_id(&self) -> &str {
        self.recipe_type_id
    }

    /// Item id in an input slot, empty for empty or out of range slots.
    pub fn input_item(&self, slot: usize) -> String {
        item_id(self.inputs, slot)
    }

    /// Item id in an output slot, empty for empty or out of range slots.
    pub fn output_item(&self, slot: usize) -> String {
        item_id(self.outputs, slot)
    }

    pub fn item(&self, domain: SlotDomain, slot: usize) -> String {
        match domain {
            SlotDomain::Input => self.input_item(slot),
            SlotDomain::Output => self.output_item(slot),
            SlotDomain::None => String::new(),
        }
    }

    pub fn slot_count(&self, domain: SlotDomain) -> usize {
        match domain {
            SlotDomain::Input => self.inputs.len(),
            SlotDomain::Output => self.outputs.len(),
            SlotDomain::None => 0,
        }
    }
}

fn item_id(slots: &[Option<ItemStack>], slot: usize) -> String {
    slots
        .get(slot)
        .and_then(Option::as_ref)
        .map(|stack| stack.item.to_string())
        .unwrap_or_default()
}

#[derive(Default)]
struct NamespaceProperties {
    wildcard: Vec<PropertyDefinition>,
    recipes: IndexMap<String, Vec<PropertyDefinition>>,
}

impl NamespaceProperties {
    fn slot_mut(&mut self, recipe_path: &str) -> &mut Vec<PropertyDefinition> {
        if recipe_path == WILDCARD_RECIPE {
            &mut self.wildcard
        } else {
            self.recipes.entry(recipe_path.to_string()).or_default()
        }
    }
}

/// Collects property registrations before they are frozen into a
/// [`PropertyLibrary`].
#[derive(Default)]
pub struct PropertyLibraryBuilder {
    namespaces: HashMap<String, NamespaceProperties>,
}

impl PropertyLibraryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// A builder that already holds the properties shipped with the editor.
    pub fn with_builtin() -> Self {
        let mut builder = Self::new();
        super::builtin::register_builtin(&mut builder);
        builder
    }

    /// Registers a property for `namespace:recipe_path`, or for the whole
    /// namespace when `recipe_path` is `*`. A second property with the same
    /// id under the same key is ignored.
    pub fn register(
        &mut self,
        namespace: &str,
        recipe_path: &str,
        definition: PropertyDefinition,
    ) -> &mut Self {
        let namespace = namespace.trim().to_lowercase();
        let recipe_path = recipe_path.trim().to_lowercase();
        let definitions = self
            .namespaces
            .entry(namespace.clone())
            .or_default()
            .slot_mut(&recipe_path);
        if definitions.iter().any(|d| d.id() == definition.id()) {
            log::warn!(
                "property '{}' is already registered for {namespace}:{recipe_path}, ignoring it",
                definition.id()
            );
        } else {
            definitions.push(definition);
        }
        self
    }

    /// Registers the same properties for several recipe paths.
    pub fn register_all(
        &mut self,
        namespace: &str,
        recipe_paths: &[&str],
        definitions: &[PropertyDefinition],
    ) -> &mut Self {
        for path in recipe_paths {
            for definition in definitions {
                self.register(namespace, path, definition.clone());
            }
        }
        self
    }

    pub fn build(self) -> PropertyLibrary {
        let library = PropertyLibrary {
            namespaces: self.namespaces,
        };
        log::debug!(
            "property library built with {} namespaces",
            library.namespaces.len()
        );
        library
    }
}

/// Every known recipe property, keyed by namespace and recipe path.
///
/// Built once at startup and only read afterwards, so it can be shared by
/// reference between sessions.
pub struct PropertyLibrary {
    namespaces: HashMap<String, NamespaceProperties>,
}

impl PropertyLibrary {
    pub fn builder() -> PropertyLibraryBuilder {
        PropertyLibraryBuilder::new()
    }

    /// The properties that ship with the editor.
    pub fn builtin() -> Self {
        PropertyLibraryBuilder::with_builtin().build()
    }

    /// Properties for a recipe type: namespace wide ones first, then those
    /// registered for the exact recipe, each group in registration order.
    /// Unknown or malformed ids have no properties.
    pub fn properties_for(&self, recipe_type_id: &str) -> Vec<&PropertyDefinition> {
        let Ok(id) = recipe_type_id.parse::<Identifier>() else {
            return Vec::new();
        };
        let Some(namespace) = self.namespaces.get(&id.namespace) else {
            return Vec::new();
        };
        namespace
            .wildcard
            .iter()
            .chain(namespace.recipes.get(&id.path).into_iter().flatten())
            .collect()
    }

    /// Renders the player's choices into script lines, in property order.
    /// Properties that produce nothing are left out.
    pub fn render_snippets(
        &self,
        recipe_type_id: &str,
        state: &PropertyState,
        inputs: &[Option<ItemStack>],
        outputs: &[Option<ItemStack>],
    ) -> Vec<String> {
        let context = RecipeContext::new(recipe_type_id, inputs, outputs);
        self.properties_for(recipe_type_id)
            .into_iter()
            .filter_map(|definition| definition.render(state, &context))
            .collect()
    }

    /// Recipe types with properties of their own. Wildcards are not listed.
    pub fn registered_recipe_types(&self) -> Vec<Identifier> {
        self.namespaces
            .iter()
            .flat_map(|(namespace, properties)| {
                properties
                    .recipes
                    .keys()
                    .filter_map(move |path| Identifier::new(namespace, path).ok())
            })
            .collect()
    }
}
