pub mod identifier;
pub mod item;

pub use identifier::{Identifier, IdentifierError};
pub use item::ItemStack;

/// Namespace used by vanilla recipe types.
pub const VANILLA_NAMESPACE: &str = "minecraft";
