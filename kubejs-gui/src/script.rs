//! KubeJS script generation.
//!
//! A recipe becomes one `ServerEvents.recipes` handler calling the recipe
//! type's factory with the recipe id, the outputs, the inputs and an object
//! holding the rendered property snippets:
//!
//! ```text
//! // Generated by kubejs-gui
//! ServerEvents.recipes(event => {
//!     event.recipes.create.mixing("brass", ["2x create:brass_ingot"], ["minecraft:copper_ingot"], {
//!         heatRequirement: "heated",
//!     })
//! })
//! ```

use std::{
    fmt::Write as _,
    fs,
    path::{Path, PathBuf},
};

use itertools::Itertools;
use kubejs_gui_core::{Identifier, ItemStack};

use crate::error::ExportError;

pub const SCRIPT_HEADER: &str = "// Generated by kubejs-gui";
const SNIPPET_INDENT: &str = "        ";

/// Quotes text as a JavaScript string literal.
fn js_string(text: &str) -> String {
    serde_json::Value::String(text.to_string()).to_string()
}

/// `.name` when `name` is a plain JavaScript identifier, `["name"]`
/// otherwise.
fn js_member(name: &str) -> String {
    let mut chars = name.chars();
    let plain = chars
        .next()
        .is_some_and(|first| first.is_ascii_lowercase() || first == '_')
        && chars.all(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '_');
    if plain {
        format!(".{name}")
    } else {
        format!("[{}]", js_string(name))
    }
}

/// `minecraft:stick`, or `4x minecraft:stick` for larger stacks.
pub fn format_item(stack: &ItemStack) -> String {
    if stack.count > 1 {
        format!("{}x {}", stack.count, stack.item)
    } else {
        stack.item.to_string()
    }
}

fn item_list(slots: &[Option<ItemStack>]) -> String {
    let items = slots
        .iter()
        .flatten()
        .map(|stack| js_string(&format_item(stack)))
        .join(", ");
    format!("[{items}]")
}

pub fn generate_script(
    recipe_type: &Identifier,
    recipe_id: &str,
    inputs: &[Option<ItemStack>],
    outputs: &[Option<ItemStack>],
    snippets: &[String],
) -> String {
    let mut script = String::new();
    // writing into a String can't fail
    let _ = writeln!(script, "{SCRIPT_HEADER}");
    let _ = writeln!(script, "ServerEvents.recipes(event => {{");
    let _ = writeln!(
        script,
        "    event.recipes{}{}({}, {}, {}, {{",
        js_member(&recipe_type.namespace),
        js_member(&recipe_type.path),
        js_string(recipe_id),
        item_list(outputs),
        item_list(inputs),
    );
    for snippet in snippets {
        let _ = writeln!(script, "{SNIPPET_INDENT}{snippet}");
    }
    script.push_str("    })\n");
    script.push_str("})\n");
    script
}

/// File name (without extension) for a recipe id: lowercase, with every
/// character outside `[a-z0-9_]` replaced by `_`.
pub fn script_file_stem(recipe_id: &str) -> String {
    recipe_id
        .trim()
        .to_lowercase()
        .chars()
        .map(|ch| match ch {
            'a'..='z' | '0'..='9' | '_' => ch,
            _ => '_',
        })
        .collect()
}

/// Writes a script to `<directory>/<stem>.js`, creating the directory when
/// needed, and returns the file's path.
pub fn export_to_file(
    directory: &Path,
    recipe_id: &str,
    script: &str,
) -> Result<PathBuf, ExportError> {
    let stem = script_file_stem(recipe_id);
    if stem.is_empty() {
        return Err(ExportError::InvalidRecipeId(recipe_id.to_string()));
    }
    fs::create_dir_all(directory).map_err(|source| ExportError::Io {
        path: directory.to_path_buf(),
        source,
    })?;
    let path = directory.join(format!("{stem}.js"));
    fs::write(&path, script).map_err(|source| ExportError::Io {
        path: path.clone(),
        source,
    })?;
    log::info!("Exported recipe '{recipe_id}' to {}", path.display());
    Ok(path)
}

#[cfg(test)]
mod test {
    use std::fs;

    use kubejs_gui_core::{Identifier, ItemStack};

    use super::{export_to_file, format_item, generate_script, script_file_stem};
    use crate::error::ExportError;

    fn stack(id: &str, count: u8) -> Option<ItemStack> {
        Some(ItemStack::new(id.parse().unwrap(), count))
    }

    #[test]
    fn item_counts() {
        let single = ItemStack::single(Identifier::vanilla("stick"));
        assert_eq!(format_item(&single), "minecraft:stick");
        let many = ItemStack::new(Identifier::vanilla("stick"), 16);
        assert_eq!(format_item(&many), "16x minecraft:stick");
    }

    #[test]
    fn script_shape() {
        let script = generate_script(
            &"create:mixing".parse().unwrap(),
            "brass",
            &[stack("minecraft:copper_ingot", 1), None, stack("create:zinc_ingot", 1)],
            &[stack("create:brass_ingot", 2)],
            &[
                "heatRequirement: \"heated\",".to_string(),
                "processingTime: 200,".to_string(),
            ],
        );
        assert_eq!(
            script,
            "// Generated by kubejs-gui\n\
             ServerEvents.recipes(event => {\n\
             \x20   event.recipes.create.mixing(\"brass\", [\"2x create:brass_ingot\"], [\"minecraft:copper_ingot\", \"create:zinc_ingot\"], {\n\
             \x20       heatRequirement: \"heated\",\n\
             \x20       processingTime: 200,\n\
             \x20   })\n\
             })\n"
        );
    }

    #[test]
    fn empty_recipe_still_closes() {
        let script = generate_script(
            &Identifier::vanilla("smelting"),
            "a \"quoted\" id",
            &[],
            &[],
            &[],
        );
        assert!(script.contains(
            "event.recipes.minecraft.smelting(\"a \\\"quoted\\\" id\", [], [], {\n    })\n})\n"
        ));
    }

    #[test]
    fn awkward_type_names_use_bracket_access() {
        let script = generate_script(&"mod-x:1st.press".parse().unwrap(), "r", &[], &[], &[]);
        assert!(script.contains("    event.recipes[\"mod-x\"][\"1st.press\"](\"r\", [], [], {\n"));

        let script = generate_script(&"thermal:machine/press".parse().unwrap(), "r", &[], &[], &[]);
        assert!(script.contains("event.recipes.thermal[\"machine/press\"](\"r\""));

        let script = generate_script(&"create:_sequenced_2".parse().unwrap(), "r", &[], &[], &[]);
        assert!(script.contains("event.recipes.create._sequenced_2(\"r\""));
    }

    #[test]
    fn file_stems() {
        assert_eq!(script_file_stem("My Recipe"), "my_recipe");
        assert_eq!(script_file_stem("create:brass-ingot"), "create_brass_ingot");
        assert_eq!(script_file_stem("  ok_1 "), "ok_1");
        assert_eq!(script_file_stem(""), "");
    }

    #[test]
    fn export_writes_into_new_directory() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("kubejs/server_scripts");
        let path = export_to_file(&target, "My Recipe", "script").unwrap();
        assert_eq!(path, target.join("my_recipe.js"));
        assert_eq!(fs::read_to_string(path).unwrap(), "script");

        assert!(matches!(
            export_to_file(&target, "   ", "script"),
            Err(ExportError::InvalidRecipeId(_))
        ));
    }
}
