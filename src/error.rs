//! Error types for wanpc operations.
//!
//! This module defines [`WanpcError`], the primary error type used throughout
//! the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Use `WanpcError` for domain-specific errors that need distinct handling
//! - Use `anyhow::Error` (via `WanpcError::Other`) for unexpected errors
//! - All errors should provide actionable messages for users

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for wanpc operations.
#[derive(Debug, Error)]
pub enum WanpcError {
    /// Referenced template is not registered.
    #[error("Template '{name}' not found")]
    TemplateNotFound { name: String },

    /// Template exists but has no default with this key.
    #[error("Default '{key}' not found in template '{template}'")]
    DefaultNotFound { template: String, key: String },

    /// No global default with this key.
    #[error("Global default '{key}' not found")]
    GlobalDefaultNotFound { key: String },

    /// Supplied input failed validation. Nothing was changed.
    #[error("{message}")]
    Validation { message: String },

    /// Failed to parse the configuration document.
    #[error("Failed to load config file {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Failed to persist the configuration document.
    #[error("Failed to save config file {path}: {message}")]
    ConfigWriteError { path: PathBuf, message: String },

    /// The template's cookiecutter.json is missing or unreadable.
    #[error("Template variables unavailable at {path}: {message}")]
    SchemaUnavailable { path: PathBuf, message: String },

    /// The templating engine failed to generate the project.
    #[error("Error creating project: {message}")]
    RenderFailed { message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl WanpcError {
    /// Build a validation error from anything displayable.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}

/// Result type alias for wanpc operations.
pub type Result<T> = std::result::Result<T, WanpcError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_not_found_displays_name() {
        let err = WanpcError::TemplateNotFound {
            name: "python-pkg".into(),
        };
        assert_eq!(err.to_string(), "Template 'python-pkg' not found");
    }

    #[test]
    fn default_not_found_displays_template_and_key() {
        let err = WanpcError::DefaultNotFound {
            template: "python-pkg".into(),
            key: "author".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("python-pkg"));
        assert!(msg.contains("author"));
    }

    #[test]
    fn config_parse_error_displays_path_and_message() {
        let err = WanpcError::ConfigParseError {
            path: PathBuf::from("/home/me/.wanpc/config.toml"),
            message: "invalid syntax".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("/home/me/.wanpc/config.toml"));
        assert!(msg.contains("invalid syntax"));
    }

    #[test]
    fn schema_unavailable_displays_path() {
        let err = WanpcError::SchemaUnavailable {
            path: PathBuf::from("/templates/py/cookiecutter.json"),
            message: "No such file".into(),
        };
        assert!(err.to_string().contains("/templates/py/cookiecutter.json"));
    }

    #[test]
    fn io_error_converts_from_std() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: WanpcError = io_err.into();
        assert!(matches!(err, WanpcError::Io(_)));
    }
}
