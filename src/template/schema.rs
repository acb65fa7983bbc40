//! Template variable schema (`cookiecutter.json`).

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::{Result, WanpcError};

/// Name of the variable descriptor inside a template directory.
pub const SCHEMA_FILE_NAME: &str = "cookiecutter.json";

/// Variables whose names start with this prefix are internal to the engine.
pub const INTERNAL_PREFIX: char = '_';

/// Declared default of a template variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefaultValue {
    /// A literal default the user may replace.
    Scalar(String),
    /// A fixed list of allowed values; the first is the default.
    Choices(Vec<String>),
    /// An expression the templating engine computes from other variables.
    Derived(String),
}

impl DefaultValue {
    /// Classify a raw JSON value from the descriptor.
    ///
    /// Returns `None` for values the engine handles on its own (objects).
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) if is_template_expression(s) => Some(Self::Derived(s.clone())),
            Value::String(s) => Some(Self::Scalar(s.clone())),
            Value::Null => Some(Self::Scalar(String::new())),
            Value::Bool(b) => Some(Self::Scalar(b.to_string())),
            Value::Number(n) => Some(Self::Scalar(n.to_string())),
            Value::Array(items) if items.is_empty() => Some(Self::Scalar(String::new())),
            Value::Array(items) => Some(Self::Choices(items.iter().map(json_to_text).collect())),
            Value::Object(_) => None,
        }
    }

    /// The value used when nobody supplies one.
    pub fn fallback(&self) -> Option<&str> {
        match self {
            Self::Scalar(s) => Some(s),
            Self::Choices(choices) => choices.first().map(String::as_str),
            Self::Derived(_) => None,
        }
    }
}

/// A variable declared by a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variable {
    pub name: String,
    pub default: DefaultValue,
}

impl Variable {
    /// Whether the engine reserves this variable for itself.
    pub fn is_internal(&self) -> bool {
        self.name.starts_with(INTERNAL_PREFIX)
    }
}

/// Parsed variable descriptor of a template, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableSchema {
    path: PathBuf,
    keys: Vec<String>,
    variables: Vec<Variable>,
}

impl VariableSchema {
    /// Location of the descriptor inside a template directory.
    pub fn descriptor_path(template_dir: &Path) -> PathBuf {
        template_dir.join(SCHEMA_FILE_NAME)
    }

    /// Whether a template directory has a descriptor.
    pub fn exists_in(template_dir: &Path) -> bool {
        Self::descriptor_path(template_dir).is_file()
    }

    /// Load the descriptor from a template directory.
    ///
    /// # Errors
    ///
    /// [`WanpcError::SchemaUnavailable`] if the file is missing, unreadable,
    /// or not a JSON object.
    pub fn load(template_dir: &Path) -> Result<Self> {
        let path = Self::descriptor_path(template_dir);
        let content = fs::read_to_string(&path).map_err(|e| WanpcError::SchemaUnavailable {
            path: path.clone(),
            message: e.to_string(),
        })?;
        Self::parse(&path, &content)
    }

    /// Parse descriptor content.
    pub fn parse(path: &Path, content: &str) -> Result<Self> {
        let unavailable = |message: String| WanpcError::SchemaUnavailable {
            path: path.to_path_buf(),
            message,
        };

        let value: Value = serde_json::from_str(content).map_err(|e| unavailable(e.to_string()))?;
        let Value::Object(map) = value else {
            return Err(unavailable("expected a JSON object".to_string()));
        };

        let mut keys = Vec::with_capacity(map.len());
        let mut variables = Vec::with_capacity(map.len());
        for (name, raw) in &map {
            keys.push(name.clone());
            match DefaultValue::from_json(raw) {
                Some(default) => variables.push(Variable {
                    name: name.clone(),
                    default,
                }),
                None => tracing::debug!("Leaving structured variable '{}' to the engine", name),
            }
        }

        Ok(Self {
            path: path.to_path_buf(),
            keys,
            variables,
        })
    }

    /// Path the schema was read from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Every top-level key in the descriptor, in file order.
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// Variables with a scalar, choice, or derived default.
    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    /// Whether the descriptor declares `name`.
    pub fn declares(&self, name: &str) -> bool {
        self.keys.iter().any(|k| k == name)
    }

    /// Look up a variable by name.
    pub fn get(&self, name: &str) -> Option<&Variable> {
        self.variables.iter().find(|v| v.name == name)
    }
}

/// Whether a string is a templating-engine expression rather than a literal.
pub fn is_template_expression(s: &str) -> bool {
    s.contains("{{") || s.contains("{%")
}

fn json_to_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
