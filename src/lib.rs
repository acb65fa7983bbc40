//! wanpc - A wrapper around cookiecutter with saved defaults.
//!
//! wanpc keeps a registry of cookiecutter templates together with default
//! values at two levels: per template, and global for every template. When a
//! project is created, command-line overrides, saved defaults, and answers
//! to prompts are merged into one context and handed to cookiecutter.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Configuration document, registry, and defaults resolution
//! - [`error`] - Error types and result aliases
//! - [`template`] - Template variables, context collection, and rendering
//! - [`ui`] - Interactive prompts, spinners, and terminal output
//!
//! # Example
//!
//! ```
//! use wanpc::config::{resolve_defaults, ConfigDocument, TemplateEntry};
//!
//! let mut config = ConfigDocument::default();
//! config.global_defaults.insert("license".into(), "MIT".into());
//! let mut entry = TemplateEntry::new("/templates/python", Some("Python package"));
//! entry.defaults.insert("license".into(), "Apache".into());
//! entry.defaults.insert("author".into(), "Jane".into());
//! config.templates.insert("python-pkg".into(), entry);
//!
//! let defaults = resolve_defaults(&config, "python-pkg").unwrap();
//! assert_eq!(defaults["license"], "Apache");
//! assert_eq!(defaults["author"], "Jane");
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod template;
pub mod ui;

pub use error::{Result, WanpcError};
