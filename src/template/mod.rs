//! Template variables and project rendering.
//!
//! - [`schema`] reads a template's `cookiecutter.json`
//! - [`context`] turns overrides, defaults and answers into a final context
//! - [`engine`] hands that context to the templating engine

pub mod context;
pub mod engine;
pub mod schema;

pub use context::{collect_context, parse_overrides, Context, ParsedOverrides};
pub use engine::{CookiecutterEngine, RenderOutput, TemplateEngine, DEFAULT_PROGRAM, ENGINE_ENV};
pub use schema::{
    is_template_expression, DefaultValue, Variable, VariableSchema, SCHEMA_FILE_NAME,
};
