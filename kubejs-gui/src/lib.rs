use kubejs_gui_config::EditorConfiguration;
use kubejs_gui_registry::{PropertyLibrary, PropertyLibraryBuilder, PropertyPackError, RecipeTypeCatalog};

pub mod draft;
pub mod error;
pub mod script;
pub mod session;

pub use draft::RecipeDraft;
pub use error::{DraftError, ExportError};
pub use session::EditorSession;

/// The built-in properties plus the configured property pack, if any.
pub fn load_property_library(
    config: &EditorConfiguration,
) -> Result<PropertyLibrary, PropertyPackError> {
    let mut builder = PropertyLibraryBuilder::with_builtin();
    if let Some(pack) = &config.property_pack {
        builder.load_pack_file(pack)?;
    }
    Ok(builder.build())
}

/// The vanilla recipe types and every type the configuration lists.
pub fn load_catalog(config: &EditorConfiguration) -> RecipeTypeCatalog {
    RecipeTypeCatalog::with_vanilla(&config.recipe_types)
}
