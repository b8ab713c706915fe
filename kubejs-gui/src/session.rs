use std::path::{Path, PathBuf};

use kubejs_gui_core::{Identifier, ItemStack};
use kubejs_gui_inventory::{
    menu::{MAX_INPUT_SLOTS, MAX_OUTPUT_SLOTS},
    plan_layout, EditorMenu, InventoryError, LayoutConfig,
};
use kubejs_gui_registry::{PropertyForm, PropertyLibrary, PropertyState, RecipeTypeCatalog};

use crate::draft::RecipeDraft;
use crate::error::{DraftError, ExportError};
use crate::script::{export_to_file, generate_script};

/// Everything the recipe editor screen tracks between clicks: the selected
/// namespace and recipe type, the recipe id, the menu and the property
/// choices.
pub struct EditorSession<'a> {
    library: &'a PropertyLibrary,
    catalog: RecipeTypeCatalog,
    namespace_index: usize,
    type_index: usize,
    recipe_type: Identifier,
    recipe_id: String,
    default_recipe_id: String,
    layout: LayoutConfig,
    menu: EditorMenu,
    properties: PropertyState,
}

impl<'a> EditorSession<'a> {
    /// Opens a session on `namespace` when the catalog knows it, otherwise
    /// on the catalog's default namespace.
    pub fn new(
        library: &'a PropertyLibrary,
        catalog: RecipeTypeCatalog,
        namespace: &str,
        default_recipe_id: &str,
    ) -> Self {
        let recipe_type = Identifier::vanilla("crafting_shaped");
        let layout = plan_layout(&recipe_type.to_string());
        let mut session = Self {
            library,
            catalog,
            namespace_index: 0,
            type_index: 0,
            recipe_type,
            recipe_id: String::new(),
            default_recipe_id: default_recipe_id.to_string(),
            layout,
            menu: EditorMenu::new(),
            properties: PropertyState::new(),
        };
        let namespaces = session.catalog.namespaces();
        let start = namespaces
            .iter()
            .position(|candidate| *candidate == namespace)
            .or_else(|| {
                let fallback = session.catalog.default_namespace()?;
                namespaces.iter().position(|candidate| *candidate == fallback)
            })
            .unwrap_or(0);
        session.namespace_index = start;
        session.select_first_type();
        session
    }

    pub fn namespace(&self) -> &str {
        self.catalog
            .namespaces()
            .get(self.namespace_index)
            .copied()
            .unwrap_or(&self.recipe_type.namespace)
    }

    pub fn recipe_type(&self) -> &Identifier {
        &self.recipe_type
    }

    pub fn catalog(&self) -> &RecipeTypeCatalog {
        &self.catalog
    }

    /// Moves to the next namespace, wrapping around, and selects its first
    /// recipe type.
    pub fn cycle_namespace(&mut self) -> &str {
        let count = self.catalog.namespaces().len();
        if count > 0 {
            self.namespace_index = (self.namespace_index + 1) % count;
            self.select_first_type();
        }
        self.namespace()
    }

    /// Moves to the next recipe type of the current namespace, wrapping
    /// around.
    pub fn cycle_recipe_type(&mut self) -> &Identifier {
        let types = self.catalog.types_for(self.namespace());
        if !types.is_empty() {
            let next = (self.type_index + 1) % types.len();
            let recipe_type = types[next].clone();
            self.type_index = next;
            self.apply_recipe_type(recipe_type);
        }
        &self.recipe_type
    }

    /// Selects any recipe type, including ones the catalog doesn't know.
    /// Known types also move the namespace and type cursors.
    pub fn select_recipe_type(&mut self, recipe_type: Identifier) {
        if let Some(namespace_index) = self
            .catalog
            .namespaces()
            .iter()
            .position(|namespace| *namespace == recipe_type.namespace)
        {
            self.namespace_index = namespace_index;
            if let Some(type_index) = self
                .catalog
                .types_for(&recipe_type.namespace)
                .iter()
                .position(|known| *known == recipe_type)
            {
                self.type_index = type_index;
            }
        }
        self.apply_recipe_type(recipe_type);
    }

    fn select_first_type(&mut self) {
        self.type_index = 0;
        if let Some(first) = self.catalog.types_for(self.namespace()).first().cloned() {
            self.apply_recipe_type(first);
        }
    }

    fn apply_recipe_type(&mut self, recipe_type: Identifier) {
        self.layout = plan_layout(&recipe_type.to_string());
        self.menu.configure_layout(&self.layout);
        log::debug!("selected recipe type {recipe_type}");
        self.recipe_type = recipe_type;
    }

    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    pub fn menu(&self) -> &EditorMenu {
        &self.menu
    }

    pub fn menu_mut(&mut self) -> &mut EditorMenu {
        &mut self.menu
    }

    pub fn properties(&self) -> &PropertyState {
        &self.properties
    }

    pub fn properties_mut(&mut self) -> &mut PropertyState {
        &mut self.properties
    }

    /// The id the recipe is exported under; blank falls back to the default.
    pub fn recipe_id(&self) -> &str {
        let trimmed = self.recipe_id.trim();
        if trimmed.is_empty() {
            &self.default_recipe_id
        } else {
            trimmed
        }
    }

    pub fn set_recipe_id(&mut self, recipe_id: &str) {
        self.recipe_id = recipe_id.to_string();
    }

    /// Empties the active recipe slots and forgets every property choice.
    pub fn clear(&mut self) {
        self.menu.clear_recipe_slots();
        self.properties.clear();
    }

    pub fn property_form(&self) -> PropertyForm<'a> {
        PropertyForm::open(
            self.library,
            &self.recipe_type.to_string(),
            &self.properties,
            self.menu.active_input_slots(),
            self.menu.active_output_slots(),
        )
    }

    /// Lets a form write its rows into this session's property state.
    pub fn save_form(&mut self, form: &mut PropertyForm<'_>) {
        form.save(&mut self.properties);
    }

    pub fn snippets(&self) -> Vec<String> {
        self.library.render_snippets(
            &self.recipe_type.to_string(),
            &self.properties,
            self.menu.input_items(),
            self.menu.output_items(),
        )
    }

    pub fn script(&self) -> String {
        generate_script(
            &self.recipe_type,
            self.recipe_id(),
            self.menu.input_items(),
            self.menu.output_items(),
            &self.snippets(),
        )
    }

    pub fn export(&self, directory: &Path) -> Result<PathBuf, ExportError> {
        export_to_file(directory, self.recipe_id(), &self.script())
    }

    /// Replaces the recipe with a saved draft. Items must fit the draft's
    /// recipe type layout.
    /// A rejected draft leaves the session untouched.
    pub fn load_draft(&mut self, draft: RecipeDraft) -> Result<(), DraftError> {
        let layout = plan_layout(&draft.recipe_type.to_string());
        check_draft_slots(
            &draft.inputs,
            0,
            layout.active_input_slots().min(MAX_INPUT_SLOTS),
            MAX_INPUT_SLOTS,
        )?;
        check_draft_slots(
            &draft.outputs,
            MAX_INPUT_SLOTS,
            layout.active_output_slots().min(MAX_OUTPUT_SLOTS),
            MAX_OUTPUT_SLOTS,
        )?;
        self.select_recipe_type(draft.recipe_type);
        self.menu.clear_recipe_slots();
        for (slot, stack) in draft.inputs.into_iter().enumerate() {
            if stack.is_some() {
                self.menu.set_item(slot, stack)?;
            }
        }
        for (slot, stack) in draft.outputs.into_iter().enumerate() {
            if stack.is_some() {
                self.menu.set_item(MAX_INPUT_SLOTS + slot, stack)?;
            }
        }
        self.recipe_id = draft.recipe_id;
        self.properties = draft.properties;
        Ok(())
    }
}

/// Fails on the first filled draft slot the layout can't show. Errors carry
/// the menu slot index, `start` being the first menu slot of the section.
fn check_draft_slots(
    slots: &[Option<ItemStack>],
    start: usize,
    active: usize,
    capacity: usize,
) -> Result<(), InventoryError> {
    for (slot, _) in slots.iter().enumerate().filter(|(_, stack)| stack.is_some()) {
        if slot >= capacity {
            return Err(InventoryError::InvalidSlot(start + slot));
        }
        if slot >= active {
            return Err(InventoryError::InactiveSlot(start + slot));
        }
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use std::fs;

    use kubejs_gui_core::{Identifier, ItemStack};
    use kubejs_gui_inventory::InventoryError;
    use kubejs_gui_registry::{PropertyLibrary, RecipeTypeCatalog};

    use super::EditorSession;
    use crate::draft::RecipeDraft;
    use crate::error::DraftError;

    fn catalog() -> RecipeTypeCatalog {
        RecipeTypeCatalog::with_vanilla(["create:mixing", "create:crushing"])
    }

    #[test]
    fn opens_on_requested_namespace() {
        let library = PropertyLibrary::builtin();
        let session = EditorSession::new(&library, catalog(), "create", "my_recipe");
        assert_eq!(session.namespace(), "create");
        assert_eq!(session.recipe_type().to_string(), "create:crushing");

        let session = EditorSession::new(&library, catalog(), "unknown", "my_recipe");
        assert_eq!(session.namespace(), "minecraft");
        assert_eq!(session.recipe_type().to_string(), "minecraft:blasting");
        assert_eq!(session.menu().active_input_slots(), 1);
    }

    #[test]
    fn cycling_wraps_and_replans() {
        let library = PropertyLibrary::builtin();
        let mut session = EditorSession::new(&library, catalog(), "create", "my_recipe");
        assert_eq!(session.cycle_recipe_type().to_string(), "create:mixing");
        assert_eq!(session.layout().active_input_slots(), 9);
        assert_eq!(session.cycle_recipe_type().to_string(), "create:crushing");

        assert_eq!(session.cycle_namespace(), "minecraft");
        assert_eq!(session.recipe_type().to_string(), "minecraft:blasting");
        assert_eq!(session.layout().active_input_slots(), 1);
        assert_eq!(session.cycle_namespace(), "create");
    }

    #[test]
    fn select_unknown_recipe_type() {
        let library = PropertyLibrary::builtin();
        let mut session = EditorSession::new(&library, catalog(), "minecraft", "my_recipe");
        session.select_recipe_type("create:mechanical_crafting".parse().unwrap());
        assert_eq!(session.namespace(), "create");
        assert_eq!(session.menu().active_input_slots(), 81);
        assert_eq!(session.property_form().rows().len(), 1);
    }

    #[test]
    fn blank_recipe_id_uses_default() {
        let library = PropertyLibrary::builtin();
        let mut session = EditorSession::new(&library, catalog(), "minecraft", "my_recipe");
        assert_eq!(session.recipe_id(), "my_recipe");
        session.set_recipe_id("  ");
        assert_eq!(session.recipe_id(), "my_recipe");
        session.set_recipe_id(" brass ");
        assert_eq!(session.recipe_id(), "brass");
    }

    #[test]
    fn clear_empties_slots_and_properties() {
        let library = PropertyLibrary::builtin();
        let mut session = EditorSession::new(&library, catalog(), "create", "my_recipe");
        session
            .menu_mut()
            .set_item(0, Some(ItemStack::single(Identifier::vanilla("stone"))))
            .unwrap();
        session.properties_mut().set_value("processingTime", "20");
        session.clear();
        assert!(session.menu().input_items().iter().all(Option::is_none));
        assert!(session.properties().is_empty());
    }

    #[test]
    fn form_edits_reach_the_script() {
        let library = PropertyLibrary::builtin();
        let mut session = EditorSession::new(&library, catalog(), "create", "brass");
        session.cycle_recipe_type();
        let mut form = session.property_form();
        form.cycle_option(0);
        form.set_text(2, "80");
        session.save_form(&mut form);
        // no ingredientCount line while input 1 is empty
        assert_eq!(
            session.snippets(),
            [
                "heatRequirement: \"heated\",",
                "processingTime: 80,",
                "resultCount: { slot: 0, count: 1 },"
            ]
        );
    }

    #[test]
    fn draft_export() {
        let library = PropertyLibrary::builtin();
        let mut session = EditorSession::new(&library, catalog(), "minecraft", "my_recipe");
        let draft = RecipeDraft::from_json(
            r#"{
                "recipe_type": "create:mixing",
                "recipe_id": "Brass Ingot",
                "inputs": [{ "item": "minecraft:copper_ingot" }, { "item": "create:zinc_ingot" }],
                "outputs": [{ "item": "create:brass_ingot", "count": 2 }],
                "properties": {
                    "options": { "heatRequirement": 1 },
                    "slots": { "resultCount": 0 },
                    "slot_values": { "resultCount": { "0": "2" } }
                }
            }"#,
        )
        .unwrap();
        session.load_draft(draft).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = session.export(dir.path()).unwrap();
        assert_eq!(path, dir.path().join("brass_ingot.js"));
        let script = fs::read_to_string(path).unwrap();
        assert!(script.contains(
            "event.recipes.create.mixing(\"Brass Ingot\", [\"2x create:brass_ingot\"], [\"minecraft:copper_ingot\", \"create:zinc_ingot\"], {"
        ));
        assert!(script.contains("        heatRequirement: \"heated\",\n"));
        assert!(script.contains("        resultCount: { slot: 0, count: 2 },\n"));
    }

    #[test]
    fn draft_items_must_fit_the_layout() {
        let library = PropertyLibrary::builtin();
        let mut session = EditorSession::new(&library, catalog(), "minecraft", "my_recipe");
        let draft = RecipeDraft::from_json(
            r#"{
                "recipe_type": "minecraft:smelting",
                "inputs": [{ "item": "minecraft:iron_ore" }, { "item": "minecraft:coal" }]
            }"#,
        )
        .unwrap();
        assert!(matches!(
            session.load_draft(draft),
            Err(DraftError::Inventory(InventoryError::InactiveSlot(1)))
        ));
    }

    #[test]
    fn rejected_draft_keeps_the_session() {
        let library = PropertyLibrary::builtin();
        let mut session = EditorSession::new(&library, catalog(), "create", "my_recipe");
        session.select_recipe_type("create:mixing".parse().unwrap());
        session.set_recipe_id("brass");
        let stone = ItemStack::single(Identifier::vanilla("stone"));
        session.menu_mut().set_item(0, Some(stone.clone())).unwrap();
        session.properties_mut().set_value("processingTime", "100");

        let draft = RecipeDraft::from_json(
            r#"{
                "recipe_type": "minecraft:smelting",
                "recipe_id": "iron",
                "inputs": [{ "item": "minecraft:iron_ore" }],
                "outputs": [{ "item": "minecraft:iron_ingot" }, { "item": "minecraft:stone" }]
            }"#,
        )
        .unwrap();
        assert!(matches!(
            session.load_draft(draft),
            Err(DraftError::Inventory(InventoryError::InactiveSlot(82)))
        ));
        assert_eq!(session.recipe_type().to_string(), "create:mixing");
        assert_eq!(session.recipe_id(), "brass");
        assert_eq!(session.menu().input_items()[0], Some(stone));
        assert_eq!(session.properties().value("processingTime"), Some("100"));
    }

    #[test]
    fn draft_slots_past_the_menu_are_invalid() {
        let library = PropertyLibrary::builtin();
        let mut session = EditorSession::new(&library, catalog(), "minecraft", "my_recipe");
        let mut inputs = vec!["null"; 81];
        inputs.push(r#"{ "item": "minecraft:stone" }"#);
        let json = format!(
            r#"{{ "recipe_type": "minecraft:crafting_shaped", "inputs": [{}] }}"#,
            inputs.join(", ")
        );
        let draft = RecipeDraft::from_json(&json).unwrap();
        assert!(matches!(
            session.load_draft(draft),
            Err(DraftError::Inventory(InventoryError::InvalidSlot(81)))
        ));
    }
}
