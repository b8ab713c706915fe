pub mod catalog;
pub mod properties;

pub use catalog::{RecipeTypeCatalog, VANILLA_RECIPE_TYPES};
pub use properties::{
    PropertyDefinition, PropertyForm, PropertyKind, PropertyLibrary, PropertyLibraryBuilder,
    PropertyOption, PropertyPackError, PropertyState, PropertyType, RecipeContext, SlotDomain,
    SnippetEmitter,
};
