//! Effective values of declared variables.
//!
//! For each `[variables]` declaration the effective value is, in order:
//!
//! 1. the environment override, if one exists (even when a default is declared)
//! 2. a "missing required value" marker, if the variable is required
//! 3. the declared default, if non-empty
//! 4. a "not found" marker
//!
//! Markers are values, not errors: one broken variable never stops the
//! others from resolving.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

use crate::manifest::Variable;
use crate::variables::ResolvedVariables;

/// Shown in place of a required variable that has no override.
pub const MISSING_REQUIRED_SENTINEL: &str = "ERR: MISSING REQUIRED VALUE";

/// Shown in place of an optional variable with neither override nor default.
pub const NOT_FOUND_SENTINEL: &str = "ERR: ENV VAR NOT FOUND, DEFAULT NOT DEFINED";

/// Outcome of resolving one variable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "source", content = "value", rename_all = "snake_case")]
pub enum VariableValue {
    /// Supplied by the environment
    Override(String),
    /// Taken from the declaration
    Default(String),
    /// Required, but no override was supplied
    MissingRequired,
    /// Optional, with no override and no default
    NotFound,
}

impl VariableValue {
    /// The usable value, if resolution produced one.
    pub fn value(&self) -> Option<&str> {
        match self {
            Self::Override(v) | Self::Default(v) => Some(v),
            Self::MissingRequired | Self::NotFound => None,
        }
    }

    /// The value, or its marker text.
    pub fn display(&self) -> &str {
        match self {
            Self::Override(v) | Self::Default(v) => v,
            Self::MissingRequired => MISSING_REQUIRED_SENTINEL,
            Self::NotFound => NOT_FOUND_SENTINEL,
        }
    }

    /// Whether this is one of the error markers.
    pub fn is_error(&self) -> bool {
        self.value().is_none()
    }

    /// Whether the value came from the declared default.
    pub fn is_default(&self) -> bool {
        matches!(self, Self::Default(_))
    }
}

impl fmt::Display for VariableValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display())
    }
}

/// A declared variable together with its effective value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedVariable {
    pub name: String,
    pub value: VariableValue,
    pub required: bool,
    pub secret: bool,
}

/// Resolve one declared variable against the overrides.
pub fn resolve_variable(name: &str, decl: &Variable, env: &ResolvedVariables) -> VariableValue {
    if let Some(value) = env.get(name) {
        VariableValue::Override(value.clone())
    } else if decl.required {
        VariableValue::MissingRequired
    } else if decl.has_default() {
        VariableValue::Default(decl.default.clone())
    } else {
        VariableValue::NotFound
    }
}

/// Resolve every declared variable, in name order.
pub fn resolve_variables(
    decls: &BTreeMap<String, Variable>,
    env: &ResolvedVariables,
) -> Vec<ResolvedVariable> {
    decls
        .iter()
        .map(|(name, decl)| {
            let value = resolve_variable(name, decl, env);
            if value.is_error() {
                tracing::debug!("Variable '{}' is unresolved: {}", name, value);
            }
            ResolvedVariable {
                name: name.clone(),
                value,
                required: decl.required,
                secret: decl.secret,
            }
        })
        .collect()
}

/// Extend the overrides in place with every default that resolution would use.
///
/// Required variables never receive their default; variables that end up
/// as markers are left out, so templates referencing them fail to render.
pub fn apply_defaults(env: &mut ResolvedVariables, decls: &BTreeMap<String, Variable>) {
    for (name, decl) in decls {
        if let VariableValue::Default(value) = resolve_variable(name, decl, env) {
            env.insert(name.clone(), value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decl(default: &str, required: bool) -> Variable {
        Variable {
            default: default.to_string(),
            secret: false,
            required,
        }
    }

    fn env(pairs: &[(&str, &str)]) -> ResolvedVariables {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn override_wins_over_default() {
        let value = resolve_variable(
            "override_default_var",
            &decl("some_val", false),
            &env(&[("override_default_var", "overridden_val")]),
        );
        assert_eq!(value, VariableValue::Override("overridden_val".into()));
    }

    #[test]
    fn override_wins_over_required() {
        let value = resolve_variable("v", &decl("", true), &env(&[("v", "given")]));
        assert_eq!(value.value(), Some("given"));
    }

    #[test]
    fn empty_override_still_wins() {
        let value = resolve_variable("v", &decl("fallback", false), &env(&[("v", "")]));
        assert_eq!(value, VariableValue::Override(String::new()));
    }

    #[test]
    fn required_without_override_is_missing_even_with_default() {
        let value = resolve_variable("v", &decl("ignored", true), &env(&[]));
        assert_eq!(value, VariableValue::MissingRequired);
        assert_eq!(value.display(), MISSING_REQUIRED_SENTINEL);
    }

    #[test]
    fn optional_uses_default() {
        let value = resolve_variable("v", &decl("another_val", false), &env(&[]));
        assert!(value.is_default());
        assert_eq!(value.display(), "another_val");
    }

    #[test]
    fn optional_without_default_is_not_found() {
        let value = resolve_variable("v", &decl("", false), &env(&[]));
        assert_eq!(value, VariableValue::NotFound);
        assert_eq!(value.to_string(), NOT_FOUND_SENTINEL);
        assert!(value.is_error());
    }

    #[test]
    fn resolve_variables_continues_past_failures() {
        let mut decls = BTreeMap::new();
        decls.insert("missing_required_var".to_string(), decl("", true));
        decls.insert("test_var".to_string(), decl("test", false));
        decls.insert("missing_default_var".to_string(), decl("", false));

        let resolved = resolve_variables(&decls, &env(&[]));

        let by_name: BTreeMap<_, _> = resolved
            .iter()
            .map(|r| (r.name.as_str(), &r.value))
            .collect();
        assert_eq!(by_name["missing_required_var"], &VariableValue::MissingRequired);
        assert_eq!(by_name["missing_default_var"], &VariableValue::NotFound);
        assert_eq!(by_name["test_var"], &VariableValue::Default("test".into()));
    }

    #[test]
    fn apply_defaults_only_adds_used_defaults() {
        let mut decls = BTreeMap::new();
        decls.insert("test_var".to_string(), decl("test", false));
        decls.insert("overridden".to_string(), decl("default", false));
        decls.insert("required".to_string(), decl("unused", true));
        decls.insert("nothing".to_string(), decl("", false));

        let mut vars = env(&[("overridden", "from_env")]);
        apply_defaults(&mut vars, &decls);

        assert_eq!(vars.get("test_var"), Some(&"test".to_string()));
        assert_eq!(vars.get("overridden"), Some(&"from_env".to_string()));
        assert!(!vars.contains_key("required"));
        assert!(!vars.contains_key("nothing"));
    }

    #[test]
    fn value_serializes_with_source_tag() {
        let json = serde_json::to_value(VariableValue::Default("x".into())).unwrap();
        assert_eq!(json, serde_json::json!({ "source": "default", "value": "x" }));

        let json = serde_json::to_value(VariableValue::MissingRequired).unwrap();
        assert_eq!(json, serde_json::json!({ "source": "missing_required" }));
    }
}
