//! Views rendered by the `show` command.
//!
//! Each view borrows from the decoded [`Manifest`] and is both
//! serializable (for `--json`) and renderable as annotations plus titled
//! tables. Empty tables are left out.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::error::{BlueprintError, Result};
use crate::manifest::{Application, Component, ComponentTriggers, Manifest};
use crate::ui::{BlueprintTheme, Table};
use crate::variables::{
    resolve_variables, substitute, ResolvedVariable, ResolvedVariables, VariableValue,
};

/// Prefix of the cell shown for a component variable that cannot be rendered.
pub const UNRESOLVED_PREFIX: &str = "ERR: UNRESOLVED VARIABLE";

const NOT_APPLICABLE: &str = "n/a";

/// The application summary: metadata, components and declared variables.
#[derive(Debug, Serialize)]
pub struct SummaryView<'a> {
    pub application: &'a Application,
    pub components: &'a BTreeMap<String, Component>,
    pub variables: Vec<ResolvedVariable>,
}

impl<'a> SummaryView<'a> {
    /// Build the summary, resolving declared variables against the overrides.
    pub fn build(manifest: &'a Manifest, overrides: &ResolvedVariables) -> Self {
        Self {
            application: &manifest.application,
            components: &manifest.components,
            variables: resolve_variables(&manifest.variables, overrides),
        }
    }

    pub fn render(&self, theme: &BlueprintTheme) -> String {
        let app = self.application;
        let mut sections = Vec::new();

        let mut annotations = Vec::new();
        push_annotation(&mut annotations, theme, "Name", &app.name);
        push_annotation(&mut annotations, theme, "Version", &app.version);
        push_annotation(&mut annotations, theme, "Description", &app.description);
        push_annotation(&mut annotations, theme, "Authors", &app.authors.join(", "));
        if !annotations.is_empty() {
            sections.push(annotations.join("\n"));
        }

        if !self.components.is_empty() {
            let mut table = Table::new(vec!["name", "source"]).with_title(&title(theme, "Components"));
            for (name, component) in self.components {
                table.add_row(vec![name.as_str(), component.source.location()]);
            }
            sections.push(table.render());
        }

        if !self.variables.is_empty() {
            let mut table = Table::new(vec![
                "env_key",
                "env_value",
                "is_required",
                "is_secret",
                "is_default",
            ])
            .with_title(&title(theme, "Variables"));
            for variable in &self.variables {
                table.add_row(variable_row(variable, theme));
            }
            sections.push(table.render());
        }

        sections.join("\n\n")
    }

    /// Declared variables that resolved to an error marker.
    pub fn unresolved(&self) -> impl Iterator<Item = &ResolvedVariable> {
        self.variables.iter().filter(|v| v.value.is_error())
    }
}

fn variable_row(variable: &ResolvedVariable, theme: &BlueprintTheme) -> Vec<String> {
    let name = variable.name.clone();
    match &variable.value {
        VariableValue::Override(value) => vec![
            name,
            value.clone(),
            variable.required.to_string(),
            variable.secret.to_string(),
            false.to_string(),
        ],
        VariableValue::Default(value) => vec![
            name,
            value.clone(),
            variable.required.to_string(),
            variable.secret.to_string(),
            true.to_string(),
        ],
        marker @ VariableValue::MissingRequired => vec![
            name,
            theme.sentinel.apply_to(marker.display()).to_string(),
            true.to_string(),
            NOT_APPLICABLE.to_string(),
            NOT_APPLICABLE.to_string(),
        ],
        marker @ VariableValue::NotFound => vec![
            name,
            theme.sentinel.apply_to(marker.display()).to_string(),
            false.to_string(),
            NOT_APPLICABLE.to_string(),
            NOT_APPLICABLE.to_string(),
        ],
    }
}

/// One component variable with its template rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComponentVariable {
    pub key: String,
    pub template: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// The first referenced name that had no value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unresolved: Option<String>,
}

impl ComponentVariable {
    /// Render `template` against the defaults-augmented variables.
    pub fn render(key: &str, template: &str, vars: &ResolvedVariables) -> Self {
        let (value, unresolved) = match substitute(template, vars) {
            Ok(value) => (Some(value), None),
            Err(BlueprintError::UnresolvedTemplateVariable { name }) => (None, Some(name)),
            Err(other) => (None, Some(other.to_string())),
        };

        Self {
            key: key.to_string(),
            template: template.to_string(),
            value,
            unresolved,
        }
    }

    /// The rendered value, or the unresolved marker.
    pub fn display(&self) -> String {
        match (&self.value, &self.unresolved) {
            (Some(value), _) => value.clone(),
            (None, Some(name)) => format!("{} {}", UNRESOLVED_PREFIX, name),
            (None, None) => String::new(),
        }
    }
}

/// Everything shown for a single component.
#[derive(Debug, Serialize)]
pub struct ComponentView<'a> {
    pub name: String,
    pub component: &'a Component,
    pub triggers: ComponentTriggers<'a>,
    pub variables: Vec<ComponentVariable>,
    #[serde(skip)]
    application: &'a Application,
}

impl<'a> ComponentView<'a> {
    /// Build the view for `name`.
    ///
    /// # Errors
    ///
    /// Returns `ComponentNotFound` if the manifest does not declare it.
    pub fn build(manifest: &'a Manifest, name: &str, vars: &ResolvedVariables) -> Result<Self> {
        let component = manifest.component(name)?;
        let variables = component
            .variables
            .iter()
            .map(|(key, template)| ComponentVariable::render(key, template, vars))
            .collect();

        Ok(Self {
            name: name.to_string(),
            component,
            triggers: manifest.triggers.for_component(name),
            variables,
            application: &manifest.application,
        })
    }

    /// Component variables whose template could not be rendered.
    pub fn unresolved(&self) -> impl Iterator<Item = &ComponentVariable> {
        self.variables.iter().filter(|v| v.unresolved.is_some())
    }

    pub fn render(&self, theme: &BlueprintTheme) -> String {
        let component = self.component;
        let mut sections = Vec::new();

        let mut annotations = vec![theme.format_annotation("Name", &self.name)];
        if let Some(description) = component.description.as_deref() {
            push_annotation(&mut annotations, theme, "Description", description);
        }
        annotations.push(theme.format_annotation("Source", component.source.location()));
        annotations.push(theme.format_annotation(
            "Source Digest",
            component.source.digest().unwrap_or(NOT_APPLICABLE),
        ));
        sections.push(annotations.join("\n"));

        if component.has_outbound_resources() {
            let mut table =
                Table::new(vec!["Type", "Value"]).with_title(&title(theme, "Outbound Resources"));
            let groups = [
                ("Outbound Host", &component.allowed_outbound_hosts),
                ("KV", &component.key_value_stores),
                ("SQLite", &component.sqlite_databases),
                ("AI", &component.ai_models),
            ];
            for (kind, values) in groups {
                for value in values {
                    table.add_row(vec![kind, value.as_str()]);
                }
            }
            sections.push(table.render());
        }

        if !self.triggers.http.is_empty() {
            let mut table =
                Table::new(vec!["Route", "Executor"]).with_title(&title(theme, "HTTP Triggers"));
            for trigger in &self.triggers.http {
                table.add_row(vec![
                    trigger.display_route(self.application),
                    trigger.executor.kind.clone(),
                ]);
            }
            sections.push(table.render());
        }

        if !self.triggers.redis.is_empty() {
            let mut table =
                Table::new(vec!["Address", "Channel"]).with_title(&title(theme, "Redis Triggers"));
            for trigger in &self.triggers.redis {
                table.add_row(vec![
                    trigger.effective_address(self.application),
                    trigger.channel.as_str(),
                ]);
            }
            sections.push(table.render());
        }

        if !self.triggers.other.is_empty() {
            let mut table = Table::new(vec!["Type"]).with_title(&title(theme, "Other Triggers"));
            for trigger in &self.triggers.other {
                table.add_row(vec![trigger.kind.as_str()]);
            }
            sections.push(table.render());
        }

        if !self.variables.is_empty() {
            let mut table =
                Table::new(vec!["var_key", "var_value"]).with_title(&title(theme, "Variables"));
            for variable in &self.variables {
                let value = if variable.unresolved.is_some() {
                    theme.sentinel.apply_to(variable.display()).to_string()
                } else {
                    variable.display()
                };
                table.add_row(vec![variable.key.clone(), value]);
            }
            sections.push(table.render());
        }

        sections.join("\n\n")
    }
}

/// The summary followed by every component, for `--all`.
#[derive(Debug, Serialize)]
pub struct FullView<'a> {
    pub summary: SummaryView<'a>,
    pub components: Vec<ComponentView<'a>>,
}

impl<'a> FullView<'a> {
    pub fn build(
        manifest: &'a Manifest,
        overrides: &ResolvedVariables,
        vars: &ResolvedVariables,
    ) -> Result<Self> {
        let components = manifest
            .components
            .keys()
            .map(|name| ComponentView::build(manifest, name, vars))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            summary: SummaryView::build(manifest, overrides),
            components,
        })
    }

    pub fn render(&self, theme: &BlueprintTheme) -> String {
        std::iter::once(self.summary.render(theme))
            .chain(self.components.iter().map(|c| c.render(theme)))
            .filter(|section| !section.is_empty())
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

fn push_annotation(lines: &mut Vec<String>, theme: &BlueprintTheme, key: &str, value: &str) {
    if !value.is_empty() {
        lines.push(theme.format_annotation(key, value));
    }
}

fn title(theme: &BlueprintTheme, text: &str) -> String {
    theme.header.apply_to(text).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::parse_manifest;
    use crate::variables::{apply_defaults, MISSING_REQUIRED_SENTINEL, NOT_FOUND_SENTINEL};

    const MANIFEST: &str = r#"
spin_manifest_version = 2

[application]
name = "Test Spin TOML"
version = "0.1.0"
authors = ["Ada <ada@example.com>", "Grace"]
description = "A test manifest"

[application.trigger.http]
base = "/blueprint"

[application.trigger.redis]
address = "redis://localhost:6379"

[variables]
test_var = { default = "test" }
secret_var = { required = true, secret = true }
missing_default_var = { required = false }

[[trigger.http]]
route = "/one"
component = "number-one"

[[trigger.http]]
route = { private = true }
component = "number-one"
executor = { type = "wagi" }

[[trigger.redis]]
channel = "messages"
component = "number-one"

[[trigger.cron]]
component = "number-one"

[component.number-one]
description = "The first component"
source = "component-one/main.wasm"
allowed_outbound_hosts = ["https://example.com"]
key_value_stores = ["default"]
sqlite_databases = ["default"]
ai_models = ["llama2-chat"]

[component.number-one.variables]
greeting = "{{ test_var }}"
token = "Bearer {{ secret_var }}"

[component.number-two]
source = { url = "https://ghcr.io/fermyon/two.wasm", digest = "sha256:abc" }
"#;

    fn manifest() -> Manifest {
        parse_manifest(MANIFEST).unwrap()
    }

    fn augmented(manifest: &Manifest, overrides: &ResolvedVariables) -> ResolvedVariables {
        let mut vars = overrides.clone();
        apply_defaults(&mut vars, &manifest.variables);
        vars
    }

    #[test]
    fn summary_lists_annotations_and_tables() {
        let manifest = manifest();
        let output = SummaryView::build(&manifest, &ResolvedVariables::new())
            .render(&BlueprintTheme::plain());

        assert!(output.contains("* Name: Test Spin TOML"));
        assert!(output.contains("* Version: 0.1.0"));
        assert!(output.contains("* Description: A test manifest"));
        assert!(output.contains("* Authors: Ada <ada@example.com>, Grace"));
        assert!(output.contains("Components"));
        assert!(output.contains("component-one/main.wasm"));
        assert!(output.contains("https://ghcr.io/fermyon/two.wasm"));
    }

    #[test]
    fn summary_variable_rows() {
        let manifest = manifest();
        let view = SummaryView::build(&manifest, &ResolvedVariables::new());
        let theme = BlueprintTheme::plain();

        let rows: BTreeMap<String, Vec<String>> = view
            .variables
            .iter()
            .map(|v| (v.name.clone(), variable_row(v, &theme)))
            .collect();

        assert_eq!(rows["test_var"], ["test_var", "test", "false", "false", "true"]);
        assert_eq!(
            rows["secret_var"],
            ["secret_var", MISSING_REQUIRED_SENTINEL, "true", "n/a", "n/a"]
        );
        assert_eq!(
            rows["missing_default_var"],
            ["missing_default_var", NOT_FOUND_SENTINEL, "false", "n/a", "n/a"]
        );
        assert_eq!(view.unresolved().count(), 2);
    }

    #[test]
    fn summary_override_row_is_not_default() {
        let manifest = manifest();
        let overrides: ResolvedVariables =
            [("secret_var".to_string(), "hunter2".to_string())].into();
        let view = SummaryView::build(&manifest, &overrides);
        let row = view
            .variables
            .iter()
            .find(|v| v.name == "secret_var")
            .map(|v| variable_row(v, &BlueprintTheme::plain()))
            .unwrap();

        assert_eq!(row, ["secret_var", "hunter2", "true", "true", "false"]);
    }

    #[test]
    fn summary_without_variables_omits_table() {
        let manifest = parse_manifest("[application]\nname = \"bare\"\n").unwrap();
        let output = SummaryView::build(&manifest, &ResolvedVariables::new())
            .render(&BlueprintTheme::plain());

        assert!(output.contains("* Name: bare"));
        assert!(!output.contains("Variables"));
        assert!(!output.contains("Components"));
        assert!(!output.contains("* Version:"));
    }

    #[test]
    fn component_details() {
        let manifest = manifest();
        let overrides: ResolvedVariables =
            [("secret_var".to_string(), "hunter2".to_string())].into();
        let vars = augmented(&manifest, &overrides);

        let view = ComponentView::build(&manifest, "number-one", &vars).unwrap();
        let output = view.render(&BlueprintTheme::plain());

        assert!(output.contains("* Name: number-one"));
        assert!(output.contains("* Description: The first component"));
        assert!(output.contains("* Source: component-one/main.wasm"));
        assert!(output.contains("* Source Digest: n/a"));
        assert!(output.contains("/blueprint/one"));
        assert!(output.contains("Private"));
        assert!(output.contains("wagi"));
        assert!(output.contains("redis://localhost:6379"));
        assert!(output.contains("messages"));
        assert!(output.contains("cron"));
        assert!(output.contains("Bearer hunter2"));
        assert_eq!(view.unresolved().count(), 0);
    }

    #[test]
    fn outbound_rows_follow_fixed_order() {
        let manifest = manifest();
        let output = ComponentView::build(&manifest, "number-one", &ResolvedVariables::new())
            .unwrap()
            .render(&BlueprintTheme::plain());

        let host = output.find("Outbound Host").unwrap();
        let kv = output.find("KV").unwrap();
        let sqlite = output.find("SQLite").unwrap();
        let ai = output.find("AI ").unwrap();
        assert!(host < kv && kv < sqlite && sqlite < ai);
    }

    #[test]
    fn unresolved_component_variable_is_shown_inline() {
        let manifest = manifest();
        let vars = augmented(&manifest, &ResolvedVariables::new());

        let view = ComponentView::build(&manifest, "number-one", &vars).unwrap();
        let unresolved: Vec<_> = view.unresolved().collect();
        assert_eq!(unresolved.len(), 1);
        assert_eq!(unresolved[0].key, "token");
        assert_eq!(unresolved[0].unresolved.as_deref(), Some("secret_var"));

        let output = view.render(&BlueprintTheme::plain());
        assert!(output.contains("ERR: UNRESOLVED VARIABLE secret_var"));
        assert!(output.contains("test"));
    }

    #[test]
    fn remote_component_without_triggers() {
        let manifest = manifest();
        let output = ComponentView::build(&manifest, "number-two", &ResolvedVariables::new())
            .unwrap()
            .render(&BlueprintTheme::plain());

        assert!(output.contains("* Source Digest: sha256:abc"));
        assert!(!output.contains("HTTP Triggers"));
        assert!(!output.contains("Redis Triggers"));
        assert!(!output.contains("Other Triggers"));
        assert!(!output.contains("Outbound Resources"));
        assert!(!output.contains("Variables"));
    }

    #[test]
    fn unknown_component() {
        let manifest = manifest();
        let err = ComponentView::build(&manifest, "ghost", &ResolvedVariables::new()).unwrap_err();
        assert_eq!(err.to_string(), "component \"ghost\" does not exist");
    }

    #[test]
    fn full_view_renders_every_component() {
        let manifest = manifest();
        let vars = augmented(&manifest, &ResolvedVariables::new());
        let view = FullView::build(&manifest, &ResolvedVariables::new(), &vars).unwrap();

        assert_eq!(view.components.len(), 2);
        let output = view.render(&BlueprintTheme::plain());
        assert!(output.contains("* Name: Test Spin TOML"));
        assert!(output.contains("* Name: number-one"));
        assert!(output.contains("* Name: number-two"));
    }

    #[test]
    fn component_view_serializes() {
        let manifest = manifest();
        let vars = augmented(&manifest, &ResolvedVariables::new());
        let view = ComponentView::build(&manifest, "number-one", &vars).unwrap();

        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["name"], "number-one");
        assert_eq!(json["triggers"]["http"][1]["route"]["private"], true);
        assert_eq!(json["variables"][0]["key"], "greeting");
        assert_eq!(json["variables"][0]["value"], "test");
        assert_eq!(json["variables"][1]["unresolved"], "secret_var");
    }
}
