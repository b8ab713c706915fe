use std::path::PathBuf;

use kubejs_gui_inventory::InventoryError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Recipe id '{0}' doesn't leave a usable file name")]
    InvalidRecipeId(String),
    #[error("Couldn't write script to {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

#[derive(Error, Debug)]
pub enum DraftError {
    #[error("Couldn't read draft at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Couldn't parse draft: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Draft doesn't fit the recipe layout: {0}")]
    Inventory(#[from] InventoryError),
}
