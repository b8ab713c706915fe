use std::path::Path;

use kubejs_gui_core::{Identifier, ItemStack};
use kubejs_gui_registry::PropertyState;
use serde::{Deserialize, Serialize};

use crate::error::DraftError;

/// A saved editing session: everything needed to export a recipe without
/// the editor screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeDraft {
    pub recipe_type: Identifier,
    #[serde(default)]
    pub recipe_id: String,
    #[serde(default)]
    pub inputs: Vec<Option<ItemStack>>,
    #[serde(default)]
    pub outputs: Vec<Option<ItemStack>>,
    #[serde(default)]
    pub properties: PropertyState,
}

impl RecipeDraft {
    pub fn from_json(json: &str) -> Result<Self, DraftError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self, DraftError> {
        let json = std::fs::read_to_string(path).map_err(|source| DraftError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }
}

#[cfg(test)]
mod test {
    use std::io::Write;

    use super::RecipeDraft;
    use crate::error::DraftError;

    #[test]
    fn minimal_draft() {
        let draft = RecipeDraft::from_json(r#"{ "recipe_type": "Create:Mixing" }"#).unwrap();
        assert_eq!(draft.recipe_type.to_string(), "create:mixing");
        assert!(draft.recipe_id.is_empty());
        assert!(draft.inputs.is_empty());
        assert!(draft.properties.is_empty());
    }

    #[test]
    fn full_draft_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(
            br#"{
                "recipe_type": "create:mixing",
                "recipe_id": "brass",
                "inputs": [{ "item": "minecraft:copper_ingot" }, null, { "item": "create:zinc_ingot", "count": 2 }],
                "outputs": [{ "item": "create:brass_ingot", "count": 2 }],
                "properties": { "options": { "heatRequirement": 1 } }
            }"#,
        )
        .unwrap();
        let draft = RecipeDraft::load(file.path()).unwrap();
        assert_eq!(draft.inputs.len(), 3);
        assert!(draft.inputs[1].is_none());
        assert_eq!(draft.inputs[2].as_ref().map(|stack| stack.count), Some(2));
        assert_eq!(draft.properties.option_index("heatRequirement"), 1);
    }

    #[test]
    fn bad_drafts() {
        assert!(matches!(
            RecipeDraft::from_json(r#"{ "recipe_type": "nocolon" }"#),
            Err(DraftError::Json(_))
        ));
        assert!(matches!(
            RecipeDraft::load(std::path::Path::new("/nonexistent/draft.json")),
            Err(DraftError::Io { .. })
        ));
    }
}
