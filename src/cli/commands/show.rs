//! Show command implementation.
//!
//! The `blueprint show` command prints the application summary, one
//! component's details, or both (`--all`).

use serde::Serialize;

use crate::cli::args::ShowArgs;
use crate::error::{BlueprintError, Result};
use crate::manifest::{find_manifest, load_manifest};
use crate::ui::UserInterface;
use crate::variables::{
    apply_defaults, load_variables, referenced_variables, EnvSource, ResolvedVariables,
};

use super::dispatcher::{Command, CommandResult};
use super::display::{ComponentView, FullView, SummaryView};

/// The show command implementation.
pub struct ShowCommand {
    args: ShowArgs,
}

impl ShowCommand {
    /// Create a new show command.
    pub fn new(args: ShowArgs) -> Self {
        Self { args }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &ShowArgs {
        &self.args
    }
}

impl Command for ShowCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let path = match find_manifest(&self.args.file) {
            Ok(path) => path,
            Err(e @ BlueprintError::ManifestNotFound { .. }) => {
                ui.error(&e.to_string());
                return Ok(CommandResult::failure(2));
            }
            Err(e) => return Err(e),
        };
        ui.hint(&format!("Reading manifest from {}", path.display()));
        let manifest = load_manifest(&path)?;

        let source = EnvSource::from_path(self.args.env.as_deref());
        if let EnvSource::File(env_file) = &source {
            ui.hint(&format!("Reading variable overrides from {}", env_file.display()));
        }
        let overrides = load_variables(&source)?;

        let mut vars = overrides.clone();
        apply_defaults(&mut vars, &manifest.variables);

        let theme = ui.theme();

        if let Some(name) = &self.args.component {
            let view = ComponentView::build(&manifest, name, &vars)?;
            warn_unresolved(ui, &view, &vars);
            emit(ui, self.args.json, &view, || view.render(&theme))?;
        } else if self.args.all {
            let view = FullView::build(&manifest, &overrides, &vars)?;
            for component in &view.components {
                warn_unresolved(ui, component, &vars);
            }
            emit(ui, self.args.json, &view, || view.render(&theme))?;
        } else {
            let view = SummaryView::build(&manifest, &overrides);
            for variable in view.unresolved() {
                ui.hint(&format!("Variable '{}': {}", variable.name, variable.value));
            }
            emit(ui, self.args.json, &view, || view.render(&theme))?;
        }

        Ok(CommandResult::success())
    }
}

fn warn_unresolved(ui: &mut dyn UserInterface, view: &ComponentView<'_>, vars: &ResolvedVariables) {
    for variable in view.unresolved() {
        let missing: Vec<String> = referenced_variables(&variable.template)
            .into_iter()
            .filter(|name| !vars.contains_key(name))
            .map(|name| format!("'{}'", name))
            .collect();
        tracing::warn!(
            "Unresolved variables {} in component '{}'",
            missing.join(", "),
            view.name
        );
        ui.warning(&format!(
            "Component '{}' variable '{}' references {}, which has no value",
            view.name,
            variable.key,
            missing.join(", ")
        ));
    }
}

fn emit<T: Serialize>(
    ui: &mut dyn UserInterface,
    json: bool,
    view: &T,
    render: impl FnOnce() -> String,
) -> Result<()> {
    if json {
        let json =
            serde_json::to_string_pretty(view).map_err(|e| BlueprintError::Other(e.into()))?;
        ui.message(&json);
    } else {
        let text = render();
        if !text.is_empty() {
            ui.message(&text);
        }
    }
    Ok(())
}
