//! Template registry and defaults mutations.
//!
//! Every operation works on an in-memory [`ConfigDocument`] and leaves it
//! untouched when it fails. Persisting is the caller's job.

use std::path::{Path, PathBuf};

use crate::error::{Result, WanpcError};
use crate::template::VariableSchema;

use super::schema::{normalize_description, ConfigDocument, TemplateEntry};

impl ConfigDocument {
    /// Look up a registered template.
    pub fn template(&self, name: &str) -> Result<&TemplateEntry> {
        self.templates
            .get(name)
            .ok_or_else(|| WanpcError::TemplateNotFound {
                name: name.to_string(),
            })
    }

    fn template_mut(&mut self, name: &str) -> Result<&mut TemplateEntry> {
        self.templates
            .get_mut(name)
            .ok_or_else(|| WanpcError::TemplateNotFound {
                name: name.to_string(),
            })
    }

    /// Register a template, replacing any entry with the same name.
    ///
    /// `raw_path` is resolved against `cwd` and must point at a directory
    /// containing `cookiecutter.json`. Replacing an entry discards its
    /// defaults. Returns the stored absolute path.
    pub fn add_template(
        &mut self,
        name: &str,
        raw_path: &str,
        description: Option<&str>,
        cwd: &Path,
    ) -> Result<PathBuf> {
        let name = name.trim();
        if name.is_empty() {
            return Err(WanpcError::validation("Template name cannot be empty"));
        }

        let path = resolve_template_path(raw_path, cwd)?;
        if !VariableSchema::exists_in(&path) {
            return Err(WanpcError::validation(format!(
                "No cookiecutter.json found in {}",
                path.display()
            )));
        }

        if self.templates.contains_key(name) {
            tracing::debug!("Replacing template '{}'", name);
        }
        self.templates
            .insert(name.to_string(), TemplateEntry::new(&path, description));
        Ok(path)
    }

    /// Change a template's description.
    pub fn set_description(&mut self, name: &str, description: Option<&str>) -> Result<()> {
        self.template_mut(name)?.description = normalize_description(description);
        Ok(())
    }

    /// Set a template-scoped default.
    ///
    /// The key must be declared by the template's `cookiecutter.json`.
    pub fn set_default(&mut self, name: &str, key: &str, value: &str) -> Result<()> {
        let entry = self.template(name)?;
        let schema = VariableSchema::load(&entry.path)?;
        if !schema.declares(key) {
            return Err(WanpcError::validation(format!(
                "Key '{}' is not a variable of template '{}'. Available keys: {}",
                key,
                name,
                schema.keys().join(", ")
            )));
        }

        self.template_mut(name)?
            .defaults
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    /// Set a default applied to every template.
    pub fn set_global_default(&mut self, key: &str, value: &str) -> Result<()> {
        if key.trim().is_empty() {
            return Err(WanpcError::validation("Default key cannot be empty"));
        }
        self.global_defaults
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    /// Unregister a template together with its defaults.
    pub fn remove_template(&mut self, name: &str) -> Result<TemplateEntry> {
        self.templates
            .remove(name)
            .ok_or_else(|| WanpcError::TemplateNotFound {
                name: name.to_string(),
            })
    }

    /// Remove one template-scoped default. Returns the removed value.
    pub fn remove_default(&mut self, name: &str, key: &str) -> Result<String> {
        self.template_mut(name)?
            .defaults
            .remove(key)
            .ok_or_else(|| WanpcError::DefaultNotFound {
                template: name.to_string(),
                key: key.to_string(),
            })
    }

    /// Remove one global default. Returns the removed value.
    pub fn remove_global_default(&mut self, key: &str) -> Result<String> {
        self.global_defaults
            .remove(key)
            .ok_or_else(|| WanpcError::GlobalDefaultNotFound {
                key: key.to_string(),
            })
    }
}

/// Expand a leading `~` to the home directory.
pub fn expand_home(raw: &str) -> PathBuf {
    if raw == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    }
    if let Some(rest) = raw.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(raw)
}

/// Turn a user-supplied template path into an absolute, canonical path.
///
/// # Errors
///
/// [`WanpcError::Validation`] if the path is blank or does not exist.
pub fn resolve_template_path(raw: &str, cwd: &Path) -> Result<PathBuf> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(WanpcError::validation("Template path cannot be empty"));
    }

    let expanded = expand_home(raw);
    let joined = if expanded.is_absolute() {
        expanded
    } else {
        cwd.join(expanded)
    };

    joined.canonicalize().map_err(|_| {
        WanpcError::validation(format!("Path does not exist: {}", joined.display()))
    })
}
