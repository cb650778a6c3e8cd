//! Blueprint - Inspect Spin application manifests.
//!
//! Blueprint decodes a Spin application manifest (`spin.toml`) into a typed
//! model, resolves the application's variables against `SPIN_VARIABLE_*`
//! overrides, and renders component variable templates.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`error`] - Error types and result aliases
//! - [`manifest`] - Manifest decoding, trigger classification and loading
//! - [`ui`] - Tables, themes and terminal output
//! - [`variables`] - Environment overrides, variable resolution and templates
//!
//! # Example
//!
//! ```
//! use blueprint::manifest::parse_manifest;
//! use blueprint::variables::{resolve_variables, ResolvedVariables, VariableValue};
//!
//! let manifest = parse_manifest(r#"
//! [variables]
//! region = { default = "eu-west-1" }
//! "#).unwrap();
//!
//! let resolved = resolve_variables(&manifest.variables, &ResolvedVariables::new());
//! assert_eq!(resolved[0].value, VariableValue::Default("eu-west-1".to_string()));
//! ```
//!
//! For file-based manifest loading, see the integration tests.

pub mod cli;
pub mod error;
pub mod manifest;
pub mod ui;
pub mod variables;

pub use error::{BlueprintError, Result};
