//! Error types for page_assets

use thiserror::Error;

/// Main error type for asset bundle operations
#[derive(Error, Debug)]
pub enum AssetError {
    #[error("Invalid bundle id: {0:?}")]
    InvalidBundleId(String),

    #[error("Bundle not found: {0}")]
    BundleNotFound(String),

    #[error("Bundle already registered in registry: {0}")]
    DuplicateBundle(String),

    #[error("View not found: {0}")]
    ViewNotFound(String),

    #[error("Failed to render view {view}: {message}")]
    Render { view: String, message: String },

    #[error("Invalid template {name}: {message}")]
    Template { name: String, message: String },

    #[error("No section is open")]
    SectionNotOpen,

    #[error("Manifest error: {0}")]
    Manifest(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

/// Result type alias for page_assets operations
pub type Result<T> = std::result::Result<T, AssetError>;
