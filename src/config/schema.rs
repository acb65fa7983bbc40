//! Configuration document schema.
//!
//! The document is a TOML file with two sections:
//!
//! ```toml
//! [templates.python-pkg]
//! path = "/home/me/templates/python"
//! description = "Python package"
//!
//! [templates.python-pkg.defaults]
//! author = "Jane"
//!
//! [global_defaults]
//! license = "MIT"
//! ```
//!
//! Both `defaults` tables and `global_defaults` are read leniently: a value
//! that is not a table becomes an empty mapping instead of a load failure.
//! Keys wanpc does not know about (such as a `[user]` section) are kept and
//! written back unchanged.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Description stored when a template is registered without one.
pub const NO_DESCRIPTION: &str = "No description";

/// Flat mapping of variable name to default value.
pub type Defaults = BTreeMap<String, String>;

/// The whole persisted configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigDocument {
    /// Registered templates by name.
    #[serde(default)]
    pub templates: BTreeMap<String, TemplateEntry>,

    /// Defaults applied to every template unless the template overrides them.
    #[serde(default, deserialize_with = "lenient_defaults")]
    pub global_defaults: Defaults,

    /// Unrecognised top-level keys.
    #[serde(flatten)]
    pub extra: toml::Table,
}

/// A registered template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateEntry {
    /// Absolute location of the template directory.
    #[serde(default)]
    pub path: PathBuf,

    /// Human-readable description.
    #[serde(default = "default_description")]
    pub description: String,

    /// Defaults scoped to this template.
    #[serde(default, deserialize_with = "lenient_defaults")]
    pub defaults: Defaults,

    /// Unrecognised keys of this entry.
    #[serde(flatten)]
    pub extra: toml::Table,
}

impl TemplateEntry {
    /// Create an entry with no defaults.
    pub fn new(path: impl Into<PathBuf>, description: Option<&str>) -> Self {
        Self {
            path: path.into(),
            description: normalize_description(description),
            defaults: Defaults::new(),
            extra: toml::Table::new(),
        }
    }
}

impl ConfigDocument {
    /// Whether the document holds nothing at all.
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty() && self.global_defaults.is_empty() && self.extra.is_empty()
    }
}

fn default_description() -> String {
    NO_DESCRIPTION.to_string()
}

/// Blank or missing descriptions are stored as [`NO_DESCRIPTION`].
pub fn normalize_description(description: Option<&str>) -> String {
    match description.map(str::trim) {
        Some(d) if !d.is_empty() => d.to_string(),
        _ => default_description(),
    }
}

/// Read a defaults table, tolerating malformed content.
///
/// Scalars are kept in their string form; arrays and nested tables are dropped.
fn lenient_defaults<'de, D>(deserializer: D) -> Result<Defaults, D::Error>
where
    D: Deserializer<'de>,
{
    let value = toml::Value::deserialize(deserializer)?;
    let toml::Value::Table(table) = value else {
        tracing::warn!("Ignoring defaults section that is not a table");
        return Ok(Defaults::new());
    };

    Ok(table
        .into_iter()
        .filter_map(|(key, value)| match value {
            toml::Value::String(s) => Some((key, s)),
            toml::Value::Integer(i) => Some((key, i.to_string())),
            toml::Value::Float(f) => Some((key, f.to_string())),
            toml::Value::Boolean(b) => Some((key, b.to_string())),
            toml::Value::Datetime(d) => Some((key, d.to_string())),
            toml::Value::Array(_) | toml::Value::Table(_) => {
                tracing::warn!("Ignoring non-scalar default '{}'", key);
                None
            }
        })
        .collect())
}
