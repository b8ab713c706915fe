mod builtin;
mod definition;
pub mod form;
mod library;
mod pack;
mod state;
mod template;

pub use definition::{
    CustomEmitter, PropertyDefinition, PropertyKind, PropertyOption, PropertyType, SlotDomain,
    SnippetEmitter,
};
pub use form::PropertyForm;
pub use library::{PropertyLibrary, PropertyLibraryBuilder, RecipeContext, WILDCARD_RECIPE};
pub use pack::PropertyPackError;
pub use state::PropertyState;
pub use template::format_template;
