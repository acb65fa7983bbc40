//! Config command implementation.
//!
//! The `wanpc config` command inspects and edits the configuration
//! document. Every mutating action loads the document, applies one change,
//! and saves only when the change succeeded.

use std::path::{Path, PathBuf};

use crate::cli::args::{
    AddTemplateArgs, ConfigAction, RemoveDefaultArgs, RemoveGlobalDefaultArgs, RemoveTemplateArgs,
    SetDefaultArgs, SetDescriptionArgs, SetGlobalDefaultArgs, ShowArgs,
};
use crate::config::{ConfigDocument, ConfigStore, Defaults, NO_DESCRIPTION};
use crate::error::{Result, WanpcError};
use crate::ui::{Prompt, UserInterface};

use super::dispatcher::{Command, CommandResult};

/// The config command implementation.
pub struct ConfigCommand {
    store: ConfigStore,
    cwd: PathBuf,
    action: ConfigAction,
}

impl ConfigCommand {
    /// Create a new config command.
    pub fn new(store: ConfigStore, cwd: &Path, action: ConfigAction) -> Self {
        Self {
            store,
            cwd: cwd.to_path_buf(),
            action,
        }
    }

    fn show(&self, args: &ShowArgs, ui: &mut dyn UserInterface) -> Result<()> {
        let config = self.store.load()?;
        if config.is_empty() {
            ui.message("No configuration found.");
            return Ok(());
        }

        let rendered = if args.yaml {
            serde_yaml::to_string(&config).map_err(|e| WanpcError::Other(e.into()))?
        } else {
            serde_json::to_string_pretty(&config).map_err(|e| WanpcError::Other(e.into()))?
        };
        ui.message(rendered.trim_end());
        Ok(())
    }

    fn path(&self, ui: &mut dyn UserInterface) {
        ui.message(&format!("Config file: {}", self.store.path().display()));
        match self.store.size() {
            Some(size) => {
                ui.message("Exists: yes");
                ui.message(&format!("Size: {} bytes", size));
            }
            None => ui.message("Exists: no (created on first change)"),
        }
    }

    fn add_template(&self, args: &AddTemplateArgs, ui: &mut dyn UserInterface) -> Result<()> {
        let mut config = self.store.load()?;
        let name = required(ui, args.name.as_deref(), "name", "Template name")?;
        let path = required(ui, args.path.as_deref(), "path", "Template path")?;
        let description = match &args.description {
            Some(d) => d.clone(),
            None => ui
                .prompt(&Prompt::input(
                    "description",
                    "Template description",
                    Some(NO_DESCRIPTION),
                ))?
                .as_string(),
        };

        let replacing = config.templates.contains_key(name.trim());
        let stored = config.add_template(&name, &path, Some(&description), &self.cwd)?;
        self.store.save(&config)?;

        if replacing {
            ui.warning(&format!(
                "Replaced template '{}'; its saved defaults were cleared",
                name.trim()
            ));
        }
        ui.success(&format!(
            "Added template '{}' at {}",
            name.trim(),
            stored.display()
        ));
        Ok(())
    }

    fn set_description(
        &self,
        args: &SetDescriptionArgs,
        ui: &mut dyn UserInterface,
    ) -> Result<()> {
        let mut config = self.store.load()?;
        let name = required(ui, args.name.as_deref(), "name", "Template name")?;
        let current = config.template(&name)?.description.clone();
        let description = match &args.description {
            Some(d) => d.clone(),
            None => ui
                .prompt(&Prompt::input(
                    "description",
                    "Template description",
                    Some(&current),
                ))?
                .as_string(),
        };

        config.set_description(&name, Some(&description))?;
        self.store.save(&config)?;
        ui.success(&format!("Updated description for template '{}'", name));
        Ok(())
    }

    fn set_default(&self, args: &SetDefaultArgs, ui: &mut dyn UserInterface) -> Result<()> {
        let mut config = self.store.load()?;
        let name = required(ui, args.name.as_deref(), "name", "Template name")?;
        config.template(&name)?;
        let key = required(ui, args.key.as_deref(), "key", "Variable name")?;
        let value = value_arg(ui, args.value.as_deref(), "value", "Default value")?;

        config.set_default(&name, &key, &value)?;
        self.store.save(&config)?;
        ui.success(&format!(
            "Set default {} = {} for template '{}'",
            key, value, name
        ));
        Ok(())
    }

    fn set_global_default(
        &self,
        args: &SetGlobalDefaultArgs,
        ui: &mut dyn UserInterface,
    ) -> Result<()> {
        let mut config = self.store.load()?;
        let key = required(ui, args.key.as_deref(), "key", "Variable name")?;
        let value = value_arg(ui, args.value.as_deref(), "value", "Default value")?;

        config.set_global_default(&key, &value)?;
        self.store.save(&config)?;
        ui.success(&format!("Set global default {} = {}", key, value));
        Ok(())
    }

    fn remove_template(
        &self,
        args: &RemoveTemplateArgs,
        ui: &mut dyn UserInterface,
    ) -> Result<()> {
        let mut config = self.store.load()?;
        let name = required(ui, args.name.as_deref(), "name", "Template name")?;
        config.template(&name)?;

        if !confirm(
            ui,
            args.yes,
            &format!("Remove template '{}' and all its defaults?", name),
        )? {
            ui.message("Operation cancelled");
            return Ok(());
        }

        config.remove_template(&name)?;
        self.store.save(&config)?;
        ui.success(&format!("Removed template '{}'", name));
        Ok(())
    }

    fn remove_default(&self, args: &RemoveDefaultArgs, ui: &mut dyn UserInterface) -> Result<()> {
        let mut config = self.store.load()?;
        if args.name.is_none() {
            if config.templates.is_empty() {
                return Err(WanpcError::validation("No templates configured."));
            }
            let names = config.templates.keys().map(|name| format!("  - {}", name));
            show_choices(ui, "Available templates:", names);
        }
        let name = required(ui, args.name.as_deref(), "name", "Template name")?;
        let defaults = &config.template(&name)?.defaults;

        if args.key.is_none() {
            if defaults.is_empty() {
                return Err(WanpcError::validation(format!(
                    "No defaults configured for template '{}'",
                    name
                )));
            }
            show_choices(ui, "Available defaults:", format_defaults(defaults));
        }
        let key = required(ui, args.key.as_deref(), "key", "Variable name")?;
        ensure_default(&config, &name, &key)?;

        if !confirm(
            ui,
            args.yes,
            &format!("Remove default '{}' from template '{}'?", key, name),
        )? {
            ui.message("Operation cancelled");
            return Ok(());
        }

        config.remove_default(&name, &key)?;
        self.store.save(&config)?;
        ui.success(&format!("Removed default '{}' from template '{}'", key, name));
        Ok(())
    }

    fn remove_global_default(
        &self,
        args: &RemoveGlobalDefaultArgs,
        ui: &mut dyn UserInterface,
    ) -> Result<()> {
        let mut config = self.store.load()?;
        if args.key.is_none() {
            if config.global_defaults.is_empty() {
                return Err(WanpcError::validation("No global defaults configured."));
            }
            let listing = format_defaults(&config.global_defaults);
            show_choices(ui, "Available global defaults:", listing);
        }
        let key = required(ui, args.key.as_deref(), "key", "Variable name")?;
        if !config.global_defaults.contains_key(&key) {
            return Err(WanpcError::GlobalDefaultNotFound { key });
        }

        if !confirm(
            ui,
            args.yes,
            &format!("Remove global default '{}'?", key),
        )? {
            ui.message("Operation cancelled");
            return Ok(());
        }

        config.remove_global_default(&key)?;
        self.store.save(&config)?;
        ui.success(&format!("Removed global default '{}'", key));
        Ok(())
    }
}

impl Command for ConfigCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        match &self.action {
            ConfigAction::Show(args) => self.show(args, ui)?,
            ConfigAction::Path => self.path(ui),
            ConfigAction::AddTemplate(args) => self.add_template(args, ui)?,
            ConfigAction::SetDescription(args) => self.set_description(args, ui)?,
            ConfigAction::SetDefault(args) => self.set_default(args, ui)?,
            ConfigAction::SetGlobalDefault(args) => self.set_global_default(args, ui)?,
            ConfigAction::RemoveTemplate(args) => self.remove_template(args, ui)?,
            ConfigAction::RemoveDefault(args) => self.remove_default(args, ui)?,
            ConfigAction::RemoveGlobalDefault(args) => self.remove_global_default(args, ui)?,
        }
        Ok(CommandResult::success())
    }
}

/// Use the given argument, or prompt for it. Blank values are rejected.
fn required(
    ui: &mut dyn UserInterface,
    given: Option<&str>,
    key: &str,
    label: &str,
) -> Result<String> {
    let raw = match given {
        Some(v) => v.to_string(),
        None => ui.prompt(&Prompt::input(key, label, None))?.as_string(),
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(WanpcError::validation(format!("{} is required", label)));
    }
    Ok(trimmed.to_string())
}

/// Like [`required`], but an explicitly passed empty value is kept as is.
fn value_arg(
    ui: &mut dyn UserInterface,
    given: Option<&str>,
    key: &str,
    label: &str,
) -> Result<String> {
    match given {
        Some(v) => Ok(v.to_string()),
        None => {
            let answer = ui.prompt(&Prompt::input(key, label, None))?.as_string();
            if answer.is_empty() {
                return Err(WanpcError::validation(format!("{} is required", label)));
            }
            Ok(answer)
        }
    }
}

fn confirm(ui: &mut dyn UserInterface, assume_yes: bool, question: &str) -> Result<bool> {
    if assume_yes {
        return Ok(true);
    }
    Ok(ui.prompt(&Prompt::confirm("confirm", question))?.as_bool() == Some(true))
}

/// List what a following prompt can pick from.
fn show_choices(ui: &mut dyn UserInterface, title: &str, items: impl IntoIterator<Item = String>) {
    ui.message("");
    ui.message(title);
    for item in items {
        ui.message(&item);
    }
}

fn format_defaults(defaults: &Defaults) -> impl Iterator<Item = String> + '_ {
    defaults
        .iter()
        .map(|(key, value)| format!("  - {} = {}", key, value))
}

fn ensure_default(config: &ConfigDocument, name: &str, key: &str) -> Result<()> {
    if config.template(name)?.defaults.contains_key(key) {
        Ok(())
    } else {
        Err(WanpcError::DefaultNotFound {
            template: name.to_string(),
            key: key.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TemplateEntry;
    use crate::ui::MockUI;
    use std::fs;
    use tempfile::TempDir;

    const DESCRIPTOR: &str = r#"{"project_name": "demo", "author": "John Doe", "license": ["MIT", "BSD-3"]}"#;

    struct Fixture {
        temp: TempDir,
        store: ConfigStore,
    }

    impl Fixture {
        fn new() -> Self {
            let temp = TempDir::new().unwrap();
            let dir = temp.path().join("tpl");
            fs::create_dir_all(&dir).unwrap();
            fs::write(dir.join("cookiecutter.json"), DESCRIPTOR).unwrap();
            let store = ConfigStore::new(temp.path().join("config.toml"));
            Self { temp, store }
        }

        fn with_template() -> Self {
            let fx = Self::new();
            let mut config = ConfigDocument::default();
            let mut entry = TemplateEntry::new(fx.temp.path().join("tpl"), Some("Demo"));
            entry.defaults.insert("author".into(), "Jane".into());
            config.templates.insert("tpl".into(), entry);
            config.global_defaults.insert("license".into(), "MIT".into());
            fx.store.save(&config).unwrap();
            fx
        }

        fn run(&self, action: ConfigAction, ui: &mut MockUI) -> Result<CommandResult> {
            ConfigCommand::new(self.store.clone(), self.temp.path(), action).execute(ui)
        }

        fn config(&self) -> ConfigDocument {
            self.store.load().unwrap()
        }
    }

    #[test]
    fn show_empty_config() {
        let fx = Fixture::new();
        let mut ui = MockUI::new();

        fx.run(ConfigAction::Show(ShowArgs::default()), &mut ui)
            .unwrap();

        assert!(ui.has_message("No configuration found."));
        assert!(!fx.store.exists());
    }

    #[test]
    fn show_json_and_yaml() {
        let fx = Fixture::with_template();

        let mut ui = MockUI::new();
        fx.run(ConfigAction::Show(ShowArgs::default()), &mut ui)
            .unwrap();
        assert!(ui.has_message("\"global_defaults\""));

        let mut ui = MockUI::new();
        fx.run(ConfigAction::Show(ShowArgs { yaml: true }), &mut ui)
            .unwrap();
        assert!(ui.has_message("global_defaults:"));
    }

    #[test]
    fn path_reports_location_and_existence() {
        let fx = Fixture::new();
        let mut ui = MockUI::new();
        fx.run(ConfigAction::Path, &mut ui).unwrap();
        assert!(ui.has_message("config.toml"));
        assert!(ui.has_message("Exists: no"));

        let fx = Fixture::with_template();
        let mut ui = MockUI::new();
        fx.run(ConfigAction::Path, &mut ui).unwrap();
        assert!(ui.has_message("Exists: yes"));
        assert!(ui.has_message("bytes"));
    }

    #[test]
    fn add_template_with_flags() {
        let fx = Fixture::new();
        let mut ui = MockUI::new();

        fx.run(
            ConfigAction::AddTemplate(AddTemplateArgs {
                name: Some("py".into()),
                path: Some("tpl".into()),
                description: Some("Python".into()),
            }),
            &mut ui,
        )
        .unwrap();

        let config = fx.config();
        assert_eq!(config.templates["py"].description, "Python");
        assert!(config.templates["py"].path.is_absolute());
        assert!(ui.has_success("Added template 'py'"));
        assert!(ui.prompts_shown().is_empty());
    }

    #[test]
    fn add_template_prompts_for_missing_values() {
        let fx = Fixture::new();
        let mut ui = MockUI::new();
        ui.set_prompt_response("name", "py");
        ui.set_prompt_response("path", "tpl");

        fx.run(
            ConfigAction::AddTemplate(AddTemplateArgs::default()),
            &mut ui,
        )
        .unwrap();

        assert_eq!(ui.prompts_shown(), &["name", "path", "description"]);
        assert_eq!(fx.config().templates["py"].description, "No description");
    }

    #[test]
    fn add_template_without_descriptor_leaves_file_untouched() {
        let fx = Fixture::new();
        fs::create_dir_all(fx.temp.path().join("bare")).unwrap();
        let mut ui = MockUI::new();

        let err = fx
            .run(
                ConfigAction::AddTemplate(AddTemplateArgs {
                    name: Some("bare".into()),
                    path: Some("bare".into()),
                    description: None,
                }),
                &mut ui,
            )
            .unwrap_err();

        assert!(matches!(err, WanpcError::Validation { .. }));
        assert!(!fx.store.exists());
    }

    #[test]
    fn replacing_template_warns_and_clears_defaults() {
        let fx = Fixture::with_template();
        let mut ui = MockUI::new();

        fx.run(
            ConfigAction::AddTemplate(AddTemplateArgs {
                name: Some("tpl".into()),
                path: Some("tpl".into()),
                description: Some("Again".into()),
            }),
            &mut ui,
        )
        .unwrap();

        assert!(ui.has_warning("Replaced template 'tpl'"));
        assert!(fx.config().templates["tpl"].defaults.is_empty());
    }

    #[test]
    fn set_description_prompts_with_current_value() {
        let fx = Fixture::with_template();
        let mut ui = MockUI::new();

        fx.run(
            ConfigAction::SetDescription(SetDescriptionArgs {
                name: Some("tpl".into()),
                description: None,
            }),
            &mut ui,
        )
        .unwrap();

        assert_eq!(fx.config().templates["tpl"].description, "Demo");
    }

    #[test]
    fn set_default_for_declared_key() {
        let fx = Fixture::with_template();
        let mut ui = MockUI::new();

        fx.run(
            ConfigAction::SetDefault(SetDefaultArgs {
                name: Some("tpl".into()),
                key: Some("license".into()),
                value: Some("BSD-3".into()),
            }),
            &mut ui,
        )
        .unwrap();

        assert_eq!(fx.config().templates["tpl"].defaults["license"], "BSD-3");
    }

    #[test]
    fn set_default_for_undeclared_key_fails_without_saving() {
        let fx = Fixture::with_template();
        let before = fs::read_to_string(fx.store.path()).unwrap();
        let mut ui = MockUI::new();

        let err = fx
            .run(
                ConfigAction::SetDefault(SetDefaultArgs {
                    name: Some("tpl".into()),
                    key: Some("color".into()),
                    value: Some("blue".into()),
                }),
                &mut ui,
            )
            .unwrap_err();

        assert!(err.to_string().contains("Available keys"));
        assert_eq!(fs::read_to_string(fx.store.path()).unwrap(), before);
    }

    #[test]
    fn set_default_unknown_template_fails_before_prompting() {
        let fx = Fixture::with_template();
        let mut ui = MockUI::new();

        let err = fx
            .run(
                ConfigAction::SetDefault(SetDefaultArgs {
                    name: Some("ghost".into()),
                    ..Default::default()
                }),
                &mut ui,
            )
            .unwrap_err();

        assert!(matches!(err, WanpcError::TemplateNotFound { .. }));
        assert!(ui.prompts_shown().is_empty());
    }

    #[test]
    fn set_global_default_prompts_for_missing_value() {
        let fx = Fixture::new();
        let mut ui = MockUI::new();
        ui.set_prompt_response("value", "Jane");

        fx.run(
            ConfigAction::SetGlobalDefault(SetGlobalDefaultArgs {
                key: Some("author".into()),
                value: None,
            }),
            &mut ui,
        )
        .unwrap();

        assert_eq!(fx.config().global_defaults["author"], "Jane");
    }

    #[test]
    fn missing_value_without_answer_is_validation_error() {
        let fx = Fixture::new();
        let mut ui = MockUI::new();

        let err = fx
            .run(
                ConfigAction::SetGlobalDefault(SetGlobalDefaultArgs {
                    key: Some("author".into()),
                    value: None,
                }),
                &mut ui,
            )
            .unwrap_err();

        assert!(matches!(err, WanpcError::Validation { .. }));
    }

    #[test]
    fn remove_template_declined_keeps_state() {
        let fx = Fixture::with_template();
        let mut ui = MockUI::new();
        ui.set_prompt_response("confirm", "false");

        let result = fx
            .run(
                ConfigAction::RemoveTemplate(RemoveTemplateArgs {
                    name: Some("tpl".into()),
                    yes: false,
                }),
                &mut ui,
            )
            .unwrap();

        assert!(result.success);
        assert!(ui.has_message("Operation cancelled"));
        assert!(fx.config().templates.contains_key("tpl"));
    }

    #[test]
    fn remove_template_confirmed() {
        let fx = Fixture::with_template();
        let mut ui = MockUI::new();
        ui.set_prompt_response("confirm", "yes");

        fx.run(
            ConfigAction::RemoveTemplate(RemoveTemplateArgs {
                name: Some("tpl".into()),
                yes: false,
            }),
            &mut ui,
        )
        .unwrap();

        assert!(fx.config().templates.is_empty());
    }

    #[test]
    fn remove_missing_default_is_not_found() {
        let fx = Fixture::with_template();
        let mut ui = MockUI::new();

        let err = fx
            .run(
                ConfigAction::RemoveDefault(RemoveDefaultArgs {
                    name: Some("tpl".into()),
                    key: Some("license".into()),
                    yes: true,
                }),
                &mut ui,
            )
            .unwrap_err();

        assert!(matches!(err, WanpcError::DefaultNotFound { .. }));
        assert_eq!(fx.config().templates["tpl"].defaults["author"], "Jane");
        assert!(!ui.prompts_shown().contains(&"confirm".to_string()));
    }

    #[test]
    fn remove_default_with_yes() {
        let fx = Fixture::with_template();
        let mut ui = MockUI::new();

        fx.run(
            ConfigAction::RemoveDefault(RemoveDefaultArgs {
                name: Some("tpl".into()),
                key: Some("author".into()),
                yes: true,
            }),
            &mut ui,
        )
        .unwrap();

        assert!(fx.config().templates["tpl"].defaults.is_empty());
    }

    #[test]
    fn remove_global_default_missing_and_present() {
        let fx = Fixture::with_template();
        let mut ui = MockUI::new();

        let err = fx
            .run(
                ConfigAction::RemoveGlobalDefault(RemoveGlobalDefaultArgs {
                    key: Some("email".into()),
                    yes: true,
                }),
                &mut ui,
            )
            .unwrap_err();
        assert!(matches!(err, WanpcError::GlobalDefaultNotFound { .. }));

        fx.run(
            ConfigAction::RemoveGlobalDefault(RemoveGlobalDefaultArgs {
                key: Some("license".into()),
                yes: true,
            }),
            &mut ui,
        )
        .unwrap();
        assert!(fx.config().global_defaults.is_empty());
    }

    #[test]
    fn remove_default_lists_choices_before_prompting() {
        let fx = Fixture::with_template();
        let mut ui = MockUI::new();
        ui.set_prompt_response("name", "tpl");
        ui.set_prompt_response("key", "author");
        ui.set_prompt_response("confirm", "y");

        fx.run(
            ConfigAction::RemoveDefault(RemoveDefaultArgs::default()),
            &mut ui,
        )
        .unwrap();

        let messages = ui.messages();
        let templates_at = messages
            .iter()
            .position(|m| m == "Available templates:")
            .unwrap();
        assert_eq!(messages[templates_at + 1], "  - tpl");
        assert!(ui.has_message("Available defaults:"));
        assert!(ui.has_message("  - author = Jane"));
        assert_eq!(ui.prompts_shown(), &["name", "key", "confirm"]);
        assert!(fx.config().templates["tpl"].defaults.is_empty());
    }

    #[test]
    fn remove_default_without_templates_fails_before_prompting() {
        let fx = Fixture::new();
        let mut ui = MockUI::new();

        let err = fx
            .run(
                ConfigAction::RemoveDefault(RemoveDefaultArgs::default()),
                &mut ui,
            )
            .unwrap_err();

        assert_eq!(err.to_string(), "No templates configured.");
        assert!(ui.prompts_shown().is_empty());
    }

    #[test]
    fn remove_default_without_defaults_fails_before_key_prompt() {
        let fx = Fixture::with_template();
        let mut config = fx.config();
        config.templates.get_mut("tpl").unwrap().defaults.clear();
        fx.store.save(&config).unwrap();
        let mut ui = MockUI::new();

        let err = fx
            .run(
                ConfigAction::RemoveDefault(RemoveDefaultArgs {
                    name: Some("tpl".into()),
                    ..Default::default()
                }),
                &mut ui,
            )
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "No defaults configured for template 'tpl'"
        );
        assert!(ui.prompts_shown().is_empty());
    }

    #[test]
    fn remove_global_default_lists_choices_before_prompting() {
        let fx = Fixture::with_template();
        let mut ui = MockUI::new();
        ui.set_prompt_response("key", "license");

        fx.run(
            ConfigAction::RemoveGlobalDefault(RemoveGlobalDefaultArgs::default()),
            &mut ui,
        )
        .unwrap();

        assert!(ui.has_message("Available global defaults:"));
        assert!(ui.has_message("  - license = MIT"));
        assert!(ui.has_message("Operation cancelled"));
        assert_eq!(fx.config().global_defaults["license"], "MIT");
    }

    #[test]
    fn remove_global_default_without_globals_fails_before_prompting() {
        let fx = Fixture::new();
        let mut ui = MockUI::new();

        let err = fx
            .run(
                ConfigAction::RemoveGlobalDefault(RemoveGlobalDefaultArgs::default()),
                &mut ui,
            )
            .unwrap_err();

        assert_eq!(err.to_string(), "No global defaults configured.");
        assert!(ui.prompts_shown().is_empty());
    }
}
