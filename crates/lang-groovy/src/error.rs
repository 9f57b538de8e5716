use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Extension class not found: {0}")]
    ClassNotFound(String),
    #[error("Invalid extension class {name}: {reason}")]
    InvalidClass { name: String, reason: String },
    #[error("Invalid module descriptor {}: {reason}", path.display())]
    InvalidDescriptor { path: PathBuf, reason: String },
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),
}

pub type Result<T> = std::result::Result<T, CatalogError>;

/// An extension module skipped while building a catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtensionLoadFailure {
    pub module: String,
    /// The class that could not be loaded
    pub class: String,
    pub reason: String,
}
