//! Application variable resolution.
//!
//! - Override extraction from the environment in [`environment`]
//! - Effective values and error markers in [`resolver`]
//! - `{{ name }}` substitution in [`template`]
//!
//! # Example
//!
//! ```
//! use blueprint::manifest::parse_manifest;
//! use blueprint::variables::{apply_defaults, resolve_lines, substitute};
//!
//! let manifest = parse_manifest(r#"
//! [variables]
//! greeting = { default = "hello" }
//! name = { required = true }
//! "#).unwrap();
//!
//! let mut vars = resolve_lines(vec!["SPIN_VARIABLE_NAME=world".to_string()]).unwrap();
//! apply_defaults(&mut vars, &manifest.variables);
//!
//! assert_eq!(substitute("{{ greeting }}, {{name}}!", &vars).unwrap(), "hello, world!");
//! ```

pub mod environment;
pub mod resolver;
pub mod template;

use std::collections::HashMap;

/// Variable name (lower-case, prefix stripped) to value.
pub type ResolvedVariables = HashMap<String, String>;

pub use environment::{
    load_variables, parse_assignment, resolve_lines, EnvSource, ENV_FILE_SUFFIX, VARIABLE_PREFIX,
};
pub use resolver::{
    apply_defaults, resolve_variable, resolve_variables, ResolvedVariable, VariableValue,
    MISSING_REQUIRED_SENTINEL, NOT_FOUND_SENTINEL,
};
pub use template::{referenced_variables, substitute};
