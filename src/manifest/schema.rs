//! Typed model of a Spin application manifest.
//!
//! These structs are produced by [`crate::manifest::loader`] from the
//! generic TOML tree; they are never deserialized directly. They derive
//! `Serialize` so the `show --json` output can emit them unchanged.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::error::{BlueprintError, Result};

/// Executor type assumed for HTTP triggers that do not declare one.
pub const DEFAULT_EXECUTOR: &str = "spin";

/// A fully decoded `spin.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Manifest {
    /// Application-wide metadata and trigger defaults
    pub application: Application,

    /// Every trigger, partitioned by kind
    pub triggers: Triggers,

    /// Components keyed by name
    pub components: BTreeMap<String, Component>,

    /// Application variables keyed by name
    pub variables: BTreeMap<String, Variable>,
}

impl Manifest {
    /// Look up a component by name.
    ///
    /// # Errors
    ///
    /// Returns `ComponentNotFound` if the manifest does not declare it.
    pub fn component(&self, name: &str) -> Result<&Component> {
        self.components
            .get(name)
            .ok_or_else(|| BlueprintError::ComponentNotFound {
                name: name.to_string(),
            })
    }
}

/// The `[application]` table.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Application {
    pub name: String,
    pub version: String,
    pub authors: Vec<String>,
    pub description: String,

    /// Defaults inherited by triggers that omit the matching field
    pub trigger: ApplicationTrigger,
}

/// The `[application.trigger.*]` defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ApplicationTrigger {
    /// `[application.trigger.http] base`, prefixed to every plain route
    pub http_base: String,

    /// `[application.trigger.redis] address`, used by redis triggers without one
    pub redis_address: String,
}

/// A `[component.<name>]` table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Component {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub source: Source,

    /// Local variable name to raw template string
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub variables: BTreeMap<String, String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub allowed_outbound_hosts: Vec<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub key_value_stores: Vec<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ai_models: Vec<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sqlite_databases: Vec<String>,
}

impl Component {
    /// Whether the component declares any outbound resource.
    pub fn has_outbound_resources(&self) -> bool {
        !self.allowed_outbound_hosts.is_empty()
            || !self.key_value_stores.is_empty()
            || !self.ai_models.is_empty()
            || !self.sqlite_databases.is_empty()
    }
}

/// Where a component's Wasm module comes from.
///
/// Written either as `source = "path/to/main.wasm"` or as
/// `source = { url = "...", digest = "..." }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Source {
    /// Local file path
    Path(String),
    /// Remote module pinned by digest
    Remote { url: String, digest: String },
}

impl Source {
    /// The path or URL of the module.
    pub fn location(&self) -> &str {
        match self {
            Self::Path(path) => path,
            Self::Remote { url, .. } => url,
        }
    }

    /// The digest, for remote sources.
    pub fn digest(&self) -> Option<&str> {
        match self {
            Self::Path(_) => None,
            Self::Remote { digest, .. } => Some(digest),
        }
    }
}

/// An HTTP trigger route.
///
/// Written either as `route = "/path/..."` or as `route = { private = true }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Route {
    /// Path relative to the application base
    Path(String),
    /// Route without a public path
    Config { private: bool },
}

/// A `[variables.<name>]` declaration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Variable {
    /// Declared default; empty means "no default"
    pub default: String,
    pub secret: bool,
    pub required: bool,
}

impl Variable {
    /// Whether a non-empty default is declared.
    pub fn has_default(&self) -> bool {
        !self.default.is_empty()
    }
}

/// The `[[trigger.<kind>]]` arrays, partitioned by kind.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Triggers {
    pub http: Vec<HttpTrigger>,
    pub redis: Vec<RedisTrigger>,
    pub other: Vec<OtherTrigger>,
}

/// A `[[trigger.http]]` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HttpTrigger {
    pub route: Route,
    pub component: String,
    pub executor: Executor,
}

/// The `executor` table of an HTTP trigger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Executor {
    #[serde(rename = "type")]
    pub kind: String,
}

impl Default for Executor {
    fn default() -> Self {
        Self {
            kind: DEFAULT_EXECUTOR.to_string(),
        }
    }
}

/// A `[[trigger.redis]]` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RedisTrigger {
    /// Empty when the application default applies
    pub address: String,
    pub channel: String,
    pub component: String,
}

/// A trigger of any kind other than `http` or `redis`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OtherTrigger {
    /// The `<kind>` in `[[trigger.<kind>]]`
    pub kind: String,
    pub component: String,
}
