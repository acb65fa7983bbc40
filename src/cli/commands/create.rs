//! Create command implementation.
//!
//! The `wanpc create` command collects variable values for a template and
//! hands them to the templating engine.

use std::path::{Path, PathBuf};

use crate::cli::args::CreateArgs;
use crate::config::{expand_home, resolve_with_sources, ConfigStore, Defaults};
use crate::error::{Result, WanpcError};
use crate::template::{collect_context, parse_overrides, TemplateEngine, VariableSchema};
use crate::ui::{UserInterface, WanpcTheme};

use super::dispatcher::{Command, CommandResult};

/// The create command implementation.
pub struct CreateCommand {
    store: ConfigStore,
    cwd: PathBuf,
    args: CreateArgs,
    engine: Box<dyn TemplateEngine>,
}

impl CreateCommand {
    /// Create a new create command.
    pub fn new(
        store: ConfigStore,
        cwd: &Path,
        args: CreateArgs,
        engine: Box<dyn TemplateEngine>,
    ) -> Self {
        Self {
            store,
            cwd: cwd.to_path_buf(),
            args,
            engine,
        }
    }

    /// Absolute directory the project is generated into.
    pub fn output_dir(&self) -> PathBuf {
        let dir = expand_home(&self.args.output_dir.to_string_lossy());
        if dir.is_absolute() {
            dir
        } else {
            self.cwd.join(dir)
        }
    }
}

impl Command for CreateCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let name = self.args.template.as_str();
        let config = self.store.load()?;
        let entry = config.template(name)?;

        if entry.path.as_os_str().is_empty() {
            return Err(WanpcError::validation(format!(
                "No path set for template '{}'",
                name
            )));
        }
        if !entry.path.exists() {
            return Err(WanpcError::validation(format!(
                "Template path does not exist: {}",
                entry.path.display()
            )));
        }

        let schema = VariableSchema::load(&entry.path)?;
        let theme = WanpcTheme::detect();

        let detail = ui.output_mode().shows_detail();

        let overrides = parse_overrides(&self.args.overrides, &schema);
        for note in &overrides.ignored {
            ui.warning(note);
        }
        if detail {
            for (key, value) in &overrides.values {
                ui.message(&format!("Using override for {}: {}", key, value));
            }
        }

        let resolved = if self.args.no_defaults {
            tracing::debug!("Saved defaults disabled for this run");
            None
        } else {
            let annotated = resolve_with_sources(&config, name)?;
            let mut defaults = Defaults::new();
            for (key, default) in annotated {
                if !schema.declares(&key) || overrides.values.contains_key(&key) {
                    continue;
                }
                if detail {
                    ui.message(&format!(
                        "  {}: {} {}",
                        key,
                        default.value,
                        theme.source.apply_to(format!("({})", default.source.label()))
                    ));
                }
                defaults.insert(key, default.value);
            }
            Some(defaults)
        };

        if ui.is_interactive() {
            ui.show_header("Please provide values for the following:");
        }
        let context = collect_context(&schema, &overrides.values, resolved.as_ref(), ui)?;

        let output_dir = self.output_dir();
        let mut spinner = ui.start_spinner(&format!("Creating project from '{}'", name));
        match self.engine.render(&entry.path, &output_dir, &context) {
            Ok(output) => {
                spinner.finish_success(&format!("Rendered into {}", output_dir.display()));
                if ui.output_mode().shows_command_output() {
                    for stream in [&output.stdout, &output.stderr] {
                        let text = stream.trim_end();
                        if !text.is_empty() {
                            ui.message(text);
                        }
                    }
                }
            }
            Err(e) => {
                spinner.finish_error("Templating failed");
                return Err(e);
            }
        }

        ui.success(&format!("Created project from template '{}'", name));
        Ok(CommandResult::success())
    }
}
