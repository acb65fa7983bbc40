//! Configuration document handling.
//!
//! - Schema definitions in [`schema`]
//! - Loading and atomic saving in [`store`]
//! - Defaults resolution in [`merger`]
//! - Registry mutations in [`registry`]
//!
//! # Example
//!
//! ```
//! use wanpc::config::{resolve_defaults, ConfigDocument, TemplateEntry};
//!
//! let mut config = ConfigDocument::default();
//! config.global_defaults.insert("license".into(), "MIT".into());
//! config
//!     .templates
//!     .insert("py".into(), TemplateEntry::new("/templates/py", None));
//!
//! let defaults = resolve_defaults(&config, "py").unwrap();
//! assert_eq!(defaults["license"], "MIT");
//! ```

pub mod merger;
pub mod registry;
pub mod schema;
pub mod store;

pub use merger::{resolve_defaults, resolve_with_sources, DefaultSource, ResolvedDefault};
pub use registry::{expand_home, resolve_template_path};
pub use schema::{normalize_description, ConfigDocument, Defaults, TemplateEntry, NO_DESCRIPTION};
pub use store::{ConfigStore, CONFIG_DIR_NAME, CONFIG_FILE_NAME};
