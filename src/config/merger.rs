//! Defaults resolution.
//!
//! Every template sees two layers of defaults. Global defaults form the
//! base and the template's own defaults are laid over them.
//!
//! # Merge Rules
//!
//! - The result holds the union of keys from both layers
//! - On a shared key the template value wins
//! - Resolving an unregistered template is an error, never an empty mapping

use std::collections::BTreeMap;

use crate::error::{Result, WanpcError};

use super::schema::{ConfigDocument, Defaults};

/// Where an effective default came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultSource {
    /// Only the global layer sets this key.
    Global,
    /// Only the template layer sets this key.
    Template,
    /// Both layers set it; the template value is used.
    TemplateOverridingGlobal,
}

impl DefaultSource {
    /// Short label for display next to a value.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Global => "global default",
            Self::Template => "template default",
            Self::TemplateOverridingGlobal => "template default, overriding global",
        }
    }
}

/// An effective default together with its origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedDefault {
    pub value: String,
    pub source: DefaultSource,
}

/// Compute the effective defaults for a template.
///
/// # Arguments
///
/// * `config` - The configuration document
/// * `template` - Name of a registered template
///
/// # Errors
///
/// [`WanpcError::TemplateNotFound`] if `template` is not registered.
pub fn resolve_defaults(config: &ConfigDocument, template: &str) -> Result<Defaults> {
    let entry = config
        .templates
        .get(template)
        .ok_or_else(|| WanpcError::TemplateNotFound {
            name: template.to_string(),
        })?;

    let mut merged = config.global_defaults.clone();
    for (key, value) in &entry.defaults {
        merged.insert(key.clone(), value.clone());
    }
    Ok(merged)
}

/// Like [`resolve_defaults`], but annotates each value with its layer.
pub fn resolve_with_sources(
    config: &ConfigDocument,
    template: &str,
) -> Result<BTreeMap<String, ResolvedDefault>> {
    let entry = config
        .templates
        .get(template)
        .ok_or_else(|| WanpcError::TemplateNotFound {
            name: template.to_string(),
        })?;

    let mut resolved: BTreeMap<String, ResolvedDefault> = config
        .global_defaults
        .iter()
        .map(|(key, value)| {
            let resolved = ResolvedDefault {
                value: value.clone(),
                source: DefaultSource::Global,
            };
            (key.clone(), resolved)
        })
        .collect();

    for (key, value) in &entry.defaults {
        let source = if config.global_defaults.contains_key(key) {
            DefaultSource::TemplateOverridingGlobal
        } else {
            DefaultSource::Template
        };
        resolved.insert(
            key.clone(),
            ResolvedDefault {
                value: value.clone(),
                source,
            },
        );
    }

    Ok(resolved)
}
