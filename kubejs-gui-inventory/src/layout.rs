use kubejs_gui_core::Identifier;
use serde::Serialize;

/// Size of one slot in pixels, borders included.
pub const SLOT_SIZE: i32 = 18;
/// Gap kept between the recipe grid and the panel edges.
const PANEL_MARGIN: i32 = 6;

const DEFAULT_PLAYER_INVENTORY_Y: i32 = 84;
const DEFAULT_HOTBAR_Y: i32 = 142;
const DEFAULT_IMAGE_WIDTH: i32 = 176;
const DEFAULT_IMAGE_HEIGHT: i32 = 166;

/// The handful of slot arrangements the editor knows how to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutKind {
    // Create's mechanical crafter, up to 9x9 inputs
    Mechanical,
    // 3x3 grid feeding one result, shaped and shapeless alike
    StandardCrafting,
    // Furnace, blast furnace, smoker, campfire and stonecutter
    Cooker,
    // Template, base and addition feeding one result
    Smithing,
    // Anything else: 3x3 in, 3x3 out
    GenericProcessing,
}

fn is_mechanical(path: &str) -> bool {
    path.contains("mechanical_crafting")
}

fn is_vanilla_crafting(path: &str) -> bool {
    path.contains("crafting_shaped") || path.contains("crafting_shapeless") || path == "crafting"
}

fn is_custom_crafting(path: &str) -> bool {
    path.contains("shaped") || path.contains("shapeless")
}

fn is_cooking(path: &str) -> bool {
    ["smelting", "blasting", "smoking", "campfire"]
        .iter()
        .any(|kind| path.contains(kind))
}

fn is_stonecutting(path: &str) -> bool {
    path.contains("stonecutting")
}

fn is_smithing(path: &str) -> bool {
    path.contains("smithing")
}

/// Evaluated top to bottom, the first matching predicate decides the layout.
static CLASSIFICATION: &[(fn(&str) -> bool, LayoutKind)] = &[
    (is_mechanical, LayoutKind::Mechanical),
    (is_vanilla_crafting, LayoutKind::StandardCrafting),
    (is_custom_crafting, LayoutKind::StandardCrafting),
    (is_cooking, LayoutKind::Cooker),
    (is_stonecutting, LayoutKind::Cooker),
    (is_smithing, LayoutKind::Smithing),
];

impl LayoutKind {
    /// Classifies a recipe type id. Ids that fail to parse fall back to
    /// [`LayoutKind::GenericProcessing`].
    pub fn classify(recipe_type_id: &str) -> Self {
        let Ok(id) = recipe_type_id.parse::<Identifier>() else {
            return Self::GenericProcessing;
        };
        CLASSIFICATION
            .iter()
            .find(|(matches, _)| matches(&id.path))
            .map_or(Self::GenericProcessing, |(_, kind)| *kind)
    }

    pub fn layout(self) -> LayoutConfig {
        match self {
            Self::StandardCrafting => LayoutConfig::with_default_inventory(
                SlotGrid::new(9, 3, 8, 17),
                SlotGrid::new(1, 3, 116, 17),
            ),
            Self::GenericProcessing => LayoutConfig::with_default_inventory(
                SlotGrid::new(9, 3, 8, 17),
                SlotGrid::new(9, 3, 116, 17),
            ),
            Self::Cooker => LayoutConfig::with_default_inventory(
                SlotGrid::new(1, 1, 44, 35),
                SlotGrid::new(1, 1, 116, 35),
            ),
            Self::Smithing => LayoutConfig::with_default_inventory(
                SlotGrid::new(3, 3, 26, 35),
                SlotGrid::new(1, 1, 134, 53),
            ),
            Self::Mechanical => mechanical_layout(),
        }
    }
}

fn mechanical_layout() -> LayoutConfig {
    let input = SlotGrid::new(81, 9, 8, 17);
    let rows = input.rows() as i32;
    let output_x = input.offset_x + input.columns as i32 * SLOT_SIZE + 24;
    let output_y = input.offset_y + (rows * SLOT_SIZE) / 2 - SLOT_SIZE / 2;
    let player_inventory_y = input.offset_y + rows * SLOT_SIZE + 36;
    let hotbar_y = player_inventory_y + 58;
    LayoutConfig::new(
        input,
        SlotGrid::new(1, 1, output_x, output_y),
        player_inventory_y,
        hotbar_y,
        output_x + SLOT_SIZE + 8,
        hotbar_y + 24,
    )
}

/// Computes the slot layout for a recipe type. Never fails: empty or
/// malformed ids get the generic processing layout.
pub fn plan_layout(recipe_type_id: &str) -> LayoutConfig {
    let kind = LayoutKind::classify(recipe_type_id);
    log::debug!("recipe type '{recipe_type_id}' uses the {kind:?} layout");
    kind.layout()
}

/// A block of slots laid out left to right, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SlotGrid {
    pub slots: usize,
    pub columns: usize,
    pub offset_x: i32,
    pub offset_y: i32,
}

impl SlotGrid {
    pub fn new(slots: usize, columns: usize, offset_x: i32, offset_y: i32) -> Self {
        Self {
            slots,
            columns: columns.max(1),
            offset_x: offset_x.max(0),
            offset_y: offset_y.max(0),
        }
    }

    /// Number of rows the grid occupies, at least one.
    pub fn rows(&self) -> usize {
        if self.slots == 0 {
            1
        } else {
            self.slots.div_ceil(self.columns)
        }
    }

    pub fn position(&self, index: usize) -> (i32, i32) {
        (
            self.offset_x + (index % self.columns) as i32 * SLOT_SIZE,
            self.offset_y + (index / self.columns) as i32 * SLOT_SIZE,
        )
    }

    pub fn right(&self) -> i32 {
        self.offset_x + self.columns.min(self.slots.max(1)) as i32 * SLOT_SIZE
    }

    pub fn bottom(&self) -> i32 {
        self.offset_y + self.rows() as i32 * SLOT_SIZE
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LayoutConfig {
    input: SlotGrid,
    output: SlotGrid,
    player_inventory_y: i32,
    hotbar_y: i32,
    image_width: i32,
    image_height: i32,
    recipe_panel_bottom: i32,
    inventory_panel_top: i32,
    inventory_label_y: i32,
}

impl LayoutConfig {
    pub fn new(
        input: SlotGrid,
        output: SlotGrid,
        player_inventory_y: i32,
        hotbar_y: i32,
        image_width: i32,
        image_height: i32,
    ) -> Self {
        let recipe_panel_bottom =
            (input.bottom() + PANEL_MARGIN).max(player_inventory_y - PANEL_MARGIN);
        Self {
            input,
            output,
            player_inventory_y,
            hotbar_y,
            image_width,
            image_height,
            recipe_panel_bottom,
            inventory_panel_top: player_inventory_y - 5,
            inventory_label_y: player_inventory_y - 12,
        }
    }

    fn with_default_inventory(input: SlotGrid, output: SlotGrid) -> Self {
        Self::new(
            input,
            output,
            DEFAULT_PLAYER_INVENTORY_Y,
            DEFAULT_HOTBAR_Y,
            DEFAULT_IMAGE_WIDTH,
            DEFAULT_IMAGE_HEIGHT,
        )
    }

    pub fn input(&self) -> &SlotGrid {
        &self.input
    }

    pub fn output(&self) -> &SlotGrid {
        &self.output
    }

    pub fn active_input_slots(&self) -> usize {
        self.input.slots
    }

    pub fn input_columns(&self) -> usize {
        self.input.columns
    }

    pub fn active_output_slots(&self) -> usize {
        self.output.slots
    }

    pub fn output_columns(&self) -> usize {
        self.output.columns
    }

    pub fn player_inventory_y(&self) -> i32 {
        self.player_inventory_y
    }

    pub fn hotbar_y(&self) -> i32 {
        self.hotbar_y
    }

    pub fn image_width(&self) -> i32 {
        self.image_width
    }

    pub fn image_height(&self) -> i32 {
        self.image_height
    }

    pub fn recipe_panel_bottom(&self) -> i32 {
        self.recipe_panel_bottom
    }

    pub fn inventory_panel_top(&self) -> i32 {
        self.inventory_panel_top
    }

    pub fn inventory_label_y(&self) -> i32 {
        self.inventory_label_y
    }

    /// Whether the panel bounds contain every slot the layout places,
    /// player inventory and hotbar included.
    pub fn encloses_slots(&self) -> bool {
        let inventory = SlotGrid::new(27, 9, 8, self.player_inventory_y);
        let hotbar = SlotGrid::new(9, 9, 8, self.hotbar_y);
        let recipe_fits = [self.input, self.output]
            .iter()
            .all(|grid| grid.right() <= self.image_width && grid.bottom() <= self.recipe_panel_bottom);
        let inventory_fits = [inventory, hotbar]
            .iter()
            .all(|grid| grid.right() <= self.image_width && grid.bottom() <= self.image_height);
        recipe_fits && inventory_fits && self.recipe_panel_bottom < self.player_inventory_y
    }
}

#[cfg(test)]
mod test {
    use proptest::prelude::*;

    use super::{plan_layout, LayoutKind};

    #[test]
    fn standard_crafting_layout() {
        for id in [
            "minecraft:crafting_shaped",
            "minecraft:crafting_shapeless",
            "minecraft:crafting",
            "somemod:crafting",
            "extendedcrafting:shaped_table",
        ] {
            let layout = plan_layout(id);
            assert_eq!(layout.active_input_slots(), 9, "{id}");
            assert_eq!(layout.input_columns(), 3, "{id}");
            assert_eq!(layout.active_output_slots(), 1, "{id}");
        }
    }

    #[test]
    fn cooker_layout() {
        for id in [
            "minecraft:smelting",
            "minecraft:blasting",
            "minecraft:smoking",
            "minecraft:campfire_cooking",
            "minecraft:stonecutting",
        ] {
            let layout = plan_layout(id);
            assert_eq!(layout.active_input_slots(), 1, "{id}");
            assert_eq!(layout.active_output_slots(), 1, "{id}");
        }
    }

    #[test]
    fn mechanical_layout() {
        let layout = plan_layout("create:mechanical_crafting");
        assert_eq!(layout.active_input_slots(), 81);
        assert_eq!(layout.input_columns(), 9);
        assert_eq!(layout.active_output_slots(), 1);
        assert_eq!(layout.output().offset_x, 194);
        assert_eq!(layout.output().offset_y, 89);
        assert_eq!(layout.player_inventory_y(), 215);
        assert_eq!(layout.hotbar_y(), 273);
        assert_eq!(layout.image_width(), 220);
        assert_eq!(layout.image_height(), 297);
        assert_eq!(layout.recipe_panel_bottom(), 209);
        assert_eq!(layout.inventory_panel_top(), 210);
        assert_eq!(layout.inventory_label_y(), 203);
    }

    #[test]
    fn smithing_layout() {
        let layout = plan_layout("minecraft:smithing_transform");
        assert_eq!(layout.active_input_slots(), 3);
        assert_eq!(layout.input_columns(), 3);
        assert_eq!(layout.active_output_slots(), 1);
    }

    #[test]
    fn mechanical_wins_over_crafting() {
        // also contains "crafting", the first row of the table must decide
        assert_eq!(
            LayoutKind::classify("create:mechanical_crafting"),
            LayoutKind::Mechanical
        );
    }

    #[test]
    fn unknown_and_malformed_ids_use_generic_layout() {
        for id in ["", "bogus:nonsense", "create:mixing", "not an id", "a:b:c"] {
            let layout = plan_layout(id);
            assert_eq!(LayoutKind::classify(id), LayoutKind::GenericProcessing);
            assert_eq!(layout.active_input_slots(), 9);
            assert_eq!(layout.input_columns(), 3);
            assert_eq!(layout.active_output_slots(), 9);
            assert_eq!(layout.output_columns(), 3);
        }
    }

    #[test]
    fn classification_is_case_insensitive() {
        assert_eq!(
            LayoutKind::classify("Minecraft:Smelting"),
            LayoutKind::Cooker
        );
    }

    #[test]
    fn derived_bounds_for_default_inventory() {
        let layout = plan_layout("minecraft:crafting_shaped");
        assert_eq!(layout.recipe_panel_bottom(), 78);
        assert_eq!(layout.inventory_panel_top(), 79);
        assert_eq!(layout.inventory_label_y(), 72);
    }

    #[test]
    fn every_layout_encloses_its_slots() {
        for kind in [
            LayoutKind::Mechanical,
            LayoutKind::StandardCrafting,
            LayoutKind::Cooker,
            LayoutKind::Smithing,
            LayoutKind::GenericProcessing,
        ] {
            assert!(kind.layout().encloses_slots(), "{kind:?}");
        }
    }

    proptest! {
        #[test]
        fn planning_is_deterministic(id in ".{0,40}") {
            prop_assert_eq!(plan_layout(&id), plan_layout(&id));
        }

        #[test]
        fn planned_layouts_enclose_their_slots(namespace in "[a-z]{1,8}", path in "[a-z_]{1,24}") {
            let layout = plan_layout(&format!("{namespace}:{path}"));
            prop_assert!(layout.encloses_slots());
            prop_assert!(layout.input_columns() >= 1);
            prop_assert!(layout.output_columns() >= 1);
        }
    }
}
