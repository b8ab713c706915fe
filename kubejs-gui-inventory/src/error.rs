use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum InventoryError {
    #[error("Invalid slot {0}")]
    InvalidSlot(usize),
    #[error("Slot {0} is not active for the current layout")]
    InactiveSlot(usize),
}
