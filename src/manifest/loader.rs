//! Manifest discovery, parsing and model building.
//!
//! Loading happens in two steps: the file is parsed into a generic
//! [`toml::Value`] tree, then [`build_manifest`] decodes that tree into a
//! [`Manifest`]. Building is all-or-nothing: the first structural problem
//! aborts it.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use toml::Value;

use crate::error::{BlueprintError, Result};
use crate::manifest::decode::{decode_source, Fields};
use crate::manifest::schema::{Application, ApplicationTrigger, Component, Manifest, Variable};
use crate::manifest::triggers::classify_triggers;

/// File name looked up when a directory is given.
pub const DEFAULT_MANIFEST: &str = "spin.toml";

/// Resolve the manifest path.
///
/// A directory resolves to the `spin.toml` inside it.
///
/// # Errors
///
/// Returns `ManifestNotFound` if nothing exists at the resolved path.
pub fn find_manifest(path: &Path) -> Result<PathBuf> {
    let candidate = if path.is_dir() {
        path.join(DEFAULT_MANIFEST)
    } else {
        path.to_path_buf()
    };

    if candidate.exists() {
        Ok(candidate)
    } else {
        Err(BlueprintError::ManifestNotFound { path: candidate })
    }
}

/// Load and decode a manifest file.
///
/// # Errors
///
/// Returns `ManifestNotFound` if the file doesn't exist,
/// `ManifestParseError` if it isn't valid TOML, and any decode error
/// from [`build_manifest`].
pub fn load_manifest(path: &Path) -> Result<Manifest> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            BlueprintError::ManifestNotFound {
                path: path.to_path_buf(),
            }
        } else {
            BlueprintError::Io(e)
        }
    })?;

    tracing::debug!("Loading manifest from {}", path.display());
    let value = parse_manifest_value(&content, path)?;
    build_manifest(&value)
}

/// Parse manifest text into the generic tree.
pub fn parse_manifest_value(content: &str, path: &Path) -> Result<Value> {
    content
        .parse::<toml::Table>()
        .map(Value::Table)
        .map_err(|e| BlueprintError::ManifestParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
}

/// Parse manifest text straight into a [`Manifest`].
pub fn parse_manifest(content: &str) -> Result<Manifest> {
    let value = parse_manifest_value(content, Path::new(DEFAULT_MANIFEST))?;
    build_manifest(&value)
}

/// Decode a parsed manifest tree.
///
/// Unknown top-level keys (such as `spin_manifest_version`) are ignored.
///
/// # Errors
///
/// Returns the first `ShapeError`, `MissingSubfield`, `WrongType` or
/// `TriggerDecode` encountered.
pub fn build_manifest(value: &Value) -> Result<Manifest> {
    let root = Fields::new("", value)?;

    let application = match root.table("application")? {
        Some(app) => decode_application(&app)?,
        None => Application::default(),
    };

    let components = match root.table("component")? {
        Some(section) => decode_components(&section)?,
        None => BTreeMap::new(),
    };

    let variables = match root.table("variables")? {
        Some(section) => decode_variables(&section)?,
        None => BTreeMap::new(),
    };

    let triggers = match root.get("trigger") {
        Some(section) => classify_triggers(section)?,
        None => Default::default(),
    };

    tracing::debug!(
        components = components.len(),
        variables = variables.len(),
        triggers = triggers.len(),
        "Decoded manifest"
    );

    Ok(Manifest {
        application,
        triggers,
        components,
        variables,
    })
}

fn decode_application(app: &Fields<'_>) -> Result<Application> {
    let mut trigger = ApplicationTrigger::default();
    if let Some(defaults) = app.table("trigger")? {
        if let Some(http) = defaults.table("http")? {
            trigger.http_base = http.string("base")?;
        }
        if let Some(redis) = defaults.table("redis")? {
            trigger.redis_address = redis.string("address")?;
        }
    }

    Ok(Application {
        name: app.string("name")?,
        version: app.string("version")?,
        authors: app.string_list("authors")?,
        description: app.string("description")?,
        trigger,
    })
}

fn decode_components(section: &Fields<'_>) -> Result<BTreeMap<String, Component>> {
    section
        .entries()
        .map(|(name, value)| -> Result<(String, Component)> {
            let component = Fields::new(section.field_path(name), value)?;
            Ok((name.clone(), decode_component(&component)?))
        })
        .collect()
}

fn decode_component(component: &Fields<'_>) -> Result<Component> {
    let source = match component.get("source") {
        Some(value) => decode_source(&component.field_path("source"), value)?,
        None => {
            return Err(BlueprintError::MissingSubfield {
                field: component.path().to_string(),
                subfield: "source".to_string(),
            })
        }
    };

    Ok(Component {
        description: component
            .optional_string("description")?
            .filter(|d| !d.is_empty()),
        source,
        variables: component.string_map("variables")?,
        allowed_outbound_hosts: component.string_list("allowed_outbound_hosts")?,
        key_value_stores: component.string_list("key_value_stores")?,
        ai_models: component.string_list("ai_models")?,
        sqlite_databases: component.string_list("sqlite_databases")?,
    })
}

fn decode_variables(section: &Fields<'_>) -> Result<BTreeMap<String, Variable>> {
    section
        .entries()
        .map(|(name, value)| -> Result<(String, Variable)> {
            let decl = Fields::new(section.field_path(name), value)?;
            let variable = Variable {
                default: decl.string("default")?,
                secret: decl.bool("secret")?,
                required: decl.bool("required")?,
            };
            Ok((name.clone(), variable))
        })
        .collect()
}
