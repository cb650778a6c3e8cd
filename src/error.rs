//! Error types for Blueprint operations.
//!
//! This module defines [`BlueprintError`], the primary error type used
//! throughout the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Structural problems in the manifest (`ShapeError`, `MissingSubfield`,
//!   `WrongType`) abort the whole decode; no partial manifest is returned
//! - Variable resolution never fails here: unresolved variables are carried
//!   as displayable sentinels (see [`crate::variables::VariableValue`])
//! - Use `anyhow::Error` (via `BlueprintError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for Blueprint operations.
#[derive(Debug, Error)]
pub enum BlueprintError {
    /// Manifest file not found at the given location.
    #[error("the path {path:?} does not exist")]
    ManifestNotFound { path: PathBuf },

    /// The manifest is not valid TOML.
    #[error("Failed to parse manifest at {path}: {message}")]
    ManifestParseError { path: PathBuf, message: String },

    /// A field's runtime shape matches none of its recognized variants.
    #[error("invalid shape for '{field}': expected {expected}, found {found}")]
    ShapeError {
        field: String,
        expected: &'static str,
        found: &'static str,
    },

    /// A structured variant is missing one of its required inner fields.
    #[error("'{field}' is missing required field '{subfield}'")]
    MissingSubfield { field: String, subfield: String },

    /// A field is present but holds the wrong primitive type.
    #[error("expected '{field}' to be {expected}, found {found}")]
    WrongType {
        field: String,
        expected: &'static str,
        found: &'static str,
    },

    /// A trigger record of the given kind failed to decode.
    #[error("failed to map trigger {kind:?}: {source}")]
    TriggerDecode {
        kind: String,
        #[source]
        source: Box<BlueprintError>,
    },

    /// The environment source is not usable.
    #[error("environment source {path:?}: {message}")]
    EnvSourceError { path: PathBuf, message: String },

    /// A template references a variable that has no resolved value.
    #[error("no value found for variable '{name}'")]
    UnresolvedTemplateVariable { name: String },

    /// The requested component is not declared in the manifest.
    #[error("component {name:?} does not exist")]
    ComponentNotFound { name: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for Blueprint operations.
pub type Result<T> = std::result::Result<T, BlueprintError>;
