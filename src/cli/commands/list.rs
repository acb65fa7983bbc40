//! List command implementation.
//!
//! The `wanpc list` command lists registered templates.

use crate::cli::args::ListArgs;
use std::collections::BTreeMap;

use crate::config::{
    resolve_with_sources, ConfigDocument, ConfigStore, DefaultSource, ResolvedDefault,
    TemplateEntry,
};
use crate::error::Result;
use crate::ui::{Table, UserInterface, WanpcTheme};

use super::dispatcher::{Command, CommandResult};

/// Hint shown when nothing is registered yet.
pub const EMPTY_REGISTRY_HINT: &str =
    "No templates configured. Use 'wanpc config add-template' to add one.";

/// The list command implementation.
pub struct ListCommand {
    store: ConfigStore,
    args: ListArgs,
}

impl ListCommand {
    /// Create a new list command.
    pub fn new(store: ConfigStore, args: ListArgs) -> Self {
        Self { store, args }
    }

    fn show_table(&self, config: &ConfigDocument, ui: &mut dyn UserInterface) {
        let mut table = Table::new(vec!["Name", "Description", "Path"]);
        for (name, entry) in &config.templates {
            let path = entry.path.display().to_string();
            let path = if path.is_empty() { "Not set" } else { &path };
            table.add_row(vec![name, &entry.description, path]);
        }

        ui.show_header("Available Templates");
        ui.message(table.render().trim_end());
    }

    fn show_details(
        &self,
        name: &str,
        entry: &TemplateEntry,
        resolved: &BTreeMap<String, ResolvedDefault>,
        ui: &mut dyn UserInterface,
    ) {
        let theme = WanpcTheme::detect();

        ui.message("");
        ui.message(&format!(
            "{} {}",
            theme.header.apply_to("Template:"),
            theme.name.apply_to(name)
        ));
        ui.message(&format!(
            "{} {}",
            theme.key.apply_to("Description:"),
            entry.description
        ));
        ui.message(&format!(
            "{} {}",
            theme.key.apply_to("Path:"),
            theme.path.apply_to(entry.path.display())
        ));

        let (inherited, own): (Vec<_>, Vec<_>) = resolved
            .iter()
            .partition(|(_, default)| default.source == DefaultSource::Global);

        for (title, defaults) in [
            ("Template Defaults:", own),
            ("Applicable Global Defaults:", inherited),
        ] {
            if defaults.is_empty() {
                continue;
            }
            ui.message("");
            ui.message(&format!("{}", theme.key.apply_to(title)));
            for (key, default) in defaults {
                ui.message(&theme.format_pair(key, &default.value));
            }
        }
    }
}

impl Command for ListCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let config = self.store.load()?;

        if config.templates.is_empty() {
            ui.warning(EMPTY_REGISTRY_HINT);
            return Ok(CommandResult::success());
        }

        if self.args.show_defaults {
            for (name, entry) in &config.templates {
                let resolved = resolve_with_sources(&config, name)?;
                self.show_details(name, entry, &resolved, ui);
            }
        } else {
            self.show_table(&config, ui);
        }

        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MockUI;
    use tempfile::TempDir;

    fn store_with(temp: &TempDir, config: &ConfigDocument) -> ConfigStore {
        let store = ConfigStore::new(temp.path().join("config.toml"));
        store.save(config).unwrap();
        store
    }

    fn sample() -> ConfigDocument {
        let mut config = ConfigDocument::default();
        let mut entry = TemplateEntry::new("/templates/python", Some("Python package"));
        entry.defaults.insert("author".into(), "Jane".into());
        entry.defaults.insert("license".into(), "Apache".into());
        config.templates.insert("python-pkg".into(), entry);
        config.global_defaults.insert("license".into(), "MIT".into());
        config
            .global_defaults
            .insert("email".into(), "me@example.com".into());
        config
    }

    #[test]
    fn empty_registry_prints_hint_and_succeeds() {
        let temp = TempDir::new().unwrap();
        let store = ConfigStore::new(temp.path().join("config.toml"));
        let cmd = ListCommand::new(store, ListArgs::default());
        let mut ui = MockUI::new();

        let result = cmd.execute(&mut ui).unwrap();

        assert!(result.success);
        assert!(ui.has_warning("No templates configured"));
    }

    #[test]
    fn lists_templates_in_table() {
        let temp = TempDir::new().unwrap();
        let cmd = ListCommand::new(store_with(&temp, &sample()), ListArgs::default());
        let mut ui = MockUI::new();

        cmd.execute(&mut ui).unwrap();

        assert_eq!(ui.headers(), &["Available Templates"]);
        assert!(ui.has_message("python-pkg"));
        assert!(ui.has_message("Python package"));
        assert!(ui.has_message("/templates/python"));
    }

    #[test]
    fn show_defaults_lists_only_inherited_globals() {
        let temp = TempDir::new().unwrap();
        let cmd = ListCommand::new(
            store_with(&temp, &sample()),
            ListArgs {
                show_defaults: true,
            },
        );
        let mut ui = MockUI::new();

        cmd.execute(&mut ui).unwrap();

        let messages = ui.messages();
        let globals_at = messages
            .iter()
            .position(|m| m.contains("Applicable Global Defaults:"))
            .unwrap();
        let after: Vec<_> = messages[globals_at..].to_vec();
        assert!(after.iter().any(|m| m.contains("me@example.com")));
        assert!(!after.iter().any(|m| m.contains("MIT")));
        assert!(ui.has_message("Apache"));
    }

    #[test]
    fn list_never_writes_config() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        let cmd = ListCommand::new(ConfigStore::new(&path), ListArgs::default());
        let mut ui = MockUI::new();

        cmd.execute(&mut ui).unwrap();

        assert!(!path.exists());
    }
}
