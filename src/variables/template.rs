//! Variable substitution in component variable templates.
//!
//! Component variables reference application variables with
//! `{{ name }}`. Whitespace between the braces and the name is
//! insignificant, so `{{name}}`, `{{ name}}` and `{{    name }}` are all
//! the same reference. Names are word characters only. Anything else,
//! including single braces like `{ name }`, is copied through untouched.

use regex::Regex;
use std::sync::LazyLock;

use crate::error::{BlueprintError, Result};
use crate::variables::ResolvedVariables;

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{\s*([A-Za-z0-9_]+)\s*\}\}").expect("valid placeholder regex"));

/// Replace every `{{ name }}` in `input` with its resolved value.
///
/// # Errors
///
/// Returns `UnresolvedTemplateVariable` for the first referenced name that
/// is absent from `vars`. An empty value is not an error.
///
/// # Example
///
/// ```
/// use blueprint::variables::{substitute, ResolvedVariables};
///
/// let mut vars = ResolvedVariables::new();
/// vars.insert("region".to_string(), "eu-west-1".to_string());
///
/// let out = substitute("https://{{ region }}.example.com/{single}", &vars).unwrap();
/// assert_eq!(out, "https://eu-west-1.example.com/{single}");
/// ```
pub fn substitute(input: &str, vars: &ResolvedVariables) -> Result<String> {
    let mut result = String::with_capacity(input.len());
    let mut last = 0;

    for caps in PLACEHOLDER.captures_iter(input) {
        let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        let name = name.as_str();
        let value = vars
            .get(name)
            .ok_or_else(|| BlueprintError::UnresolvedTemplateVariable {
                name: name.to_string(),
            })?;

        result.push_str(&input[last..whole.start()]);
        result.push_str(value);
        last = whole.end();
    }

    result.push_str(&input[last..]);
    Ok(result)
}

/// Names referenced by `input`, in order of first appearance.
pub fn referenced_variables(input: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for caps in PLACEHOLDER.captures_iter(input) {
        if let Some(name) = caps.get(1) {
            if !names.iter().any(|n| n == name.as_str()) {
                names.push(name.as_str().to_string());
            }
        }
    }
    names
}
