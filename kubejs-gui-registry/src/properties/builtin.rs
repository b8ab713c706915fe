use super::definition::{PropertyDefinition, PropertyOption, SlotDomain};
use super::library::{PropertyLibraryBuilder, RecipeContext, WILDCARD_RECIPE};
use super::state::PropertyState;
use super::template::format_template;

const CREATE: &str = "create";
const THERMAL: &str = "thermal";

pub(super) fn register_builtin(builder: &mut PropertyLibraryBuilder) {
    builder
        .register_all(
            CREATE,
            &["mixing", "compacting"],
            &[
                heat_requirement(),
                required_fluid(),
                processing_time(),
                ingredient_count(),
                result_count(),
            ],
        )
        .register_all(
            CREATE,
            &["crushing", "milling", "cutting"],
            &[processing_time(), result_chance()],
        )
        .register(CREATE, "deploying", boolean("keepHeldItem", "Keep Held Item"))
        .register(
            CREATE,
            "mechanical_crafting",
            boolean("acceptMirrored", "Accept Mirrored"),
        )
        .register(
            CREATE,
            "sequenced_assembly",
            PropertyDefinition::value("loops", "Loops", "loops: %s,", "1").numeric(),
        )
        .register(CREATE, "sequenced_assembly", transitional_item())
        .register(
            THERMAL,
            WILDCARD_RECIPE,
            PropertyDefinition::value("energy", "Energy", "energy: %s,", "4000")
                .numeric()
                .with_hint("RF"),
        )
        .register_all(
            THERMAL,
            &["pulverizer", "smelter"],
            &[PropertyDefinition::value("experience", "Experience", "experience: %s,", "")
                .with_hint("0.1")],
        );
}

fn heat_requirement() -> PropertyDefinition {
    PropertyDefinition::select(
        "heatRequirement",
        "Heat Requirement",
        "heatRequirement: \"%s\",",
        vec![
            PropertyOption::skip("None"),
            PropertyOption::emit("Heated", "heated"),
            PropertyOption::emit("Superheated", "superheated"),
        ],
    )
}

fn required_fluid() -> PropertyDefinition {
    PropertyDefinition::select(
        "requiredFluid",
        "Required Fluid",
        "requiredFluid: \"%s\",",
        vec![
            PropertyOption::skip("None"),
            PropertyOption::emit("Water", "minecraft:water"),
            PropertyOption::emit("Lava", "minecraft:lava"),
        ],
    )
}

fn processing_time() -> PropertyDefinition {
    PropertyDefinition::value(
        "processingTime",
        "Processing Time",
        "processingTime: %s,",
        "100",
    )
    .numeric()
    .with_hint("ticks")
}

fn boolean(id: &str, label: &str) -> PropertyDefinition {
    PropertyDefinition::select(
        id,
        label,
        &format!("{id}: %s,"),
        vec![
            PropertyOption::skip("Default"),
            PropertyOption::emit("True", "true"),
            PropertyOption::emit("False", "false"),
        ],
    )
}

fn ingredient_count() -> PropertyDefinition {
    PropertyDefinition::value("ingredientCount", "Ingredient Count", "", "1")
        .numeric()
        .slot_scoped(SlotDomain::Input, true)
        .with_emitter(emit_ingredient_count)
}

fn result_count() -> PropertyDefinition {
    PropertyDefinition::value(
        "resultCount",
        "Result Count",
        "resultCount: { slot: %2$s, count: %1$s },",
        "1",
    )
    .numeric()
    .slot_scoped(SlotDomain::Output, true)
}

fn result_chance() -> PropertyDefinition {
    PropertyDefinition::value(
        "resultChance",
        "Result Chance",
        "resultChance: { slot: %2$s, chance: %1$s },",
        "1.0",
    )
    .with_hint("0.0 - 1.0")
    .slot_scoped(SlotDomain::Output, true)
}

fn transitional_item() -> PropertyDefinition {
    PropertyDefinition::select(
        "transitionalItem",
        "Transitional Item",
        "",
        vec![
            PropertyOption::skip("None"),
            PropertyOption::emit("From Output", "output"),
        ],
    )
    .slot_scoped(SlotDomain::Output, false)
    .with_emitter(emit_transitional_item)
}

/// Names the ingredient the count belongs to, nothing if the slot is empty.
fn emit_ingredient_count(
    definition: &PropertyDefinition,
    state: &PropertyState,
    context: &RecipeContext<'_>,
) -> Option<String> {
    let slot = definition.selected_slot(state, context)?;
    let count = state
        .slot_value(definition.id(), slot)
        .map(str::trim)
        .filter(|count| !count.is_empty())?;
    let item = context.input_item(slot);
    if item.is_empty() {
        return None;
    }
    let slot = slot.to_string();
    Some(format_template(
        "ingredientCount: { slot: %2$s, item: \"%3$s\", count: %1$s },",
        &[count, slot.as_str(), item.as_str()],
    ))
}

/// Uses the item in the chosen output slot, the first one when none was picked.
fn emit_transitional_item(
    definition: &PropertyDefinition,
    state: &PropertyState,
    context: &RecipeContext<'_>,
) -> Option<String> {
    let option = definition.selected_option(state, definition.options())?;
    if !option.should_emit() {
        return None;
    }
    let slot = definition.selected_slot(state, context).unwrap_or(0);
    let item = context.output_item(slot);
    if item.is_empty() {
        return None;
    }
    let slot = slot.to_string();
    Some(format_template(
        "transitionalItem: \"%1$s\",",
        &[item.as_str(), slot.as_str()],
    ))
}
