pub mod error;
pub mod layout;
pub mod menu;

pub use error::InventoryError;
pub use layout::{plan_layout, LayoutConfig, LayoutKind, SlotGrid, SLOT_SIZE};
pub use menu::{EditorMenu, SlotKind, SlotPosition};
