//! Variable collection for project creation.
//!
//! Values for a template's variables come from four places, highest
//! precedence first:
//!
//! 1. Explicit `--KEY VALUE` overrides on the command line
//! 2. Resolved defaults (template defaults over global defaults)
//! 3. Interactive answers
//! 4. The default declared in `cookiecutter.json`
//!
//! Internal (`_`-prefixed) and derived (`{{ ... }}`) variables are never
//! collected; the templating engine owns them.

use std::collections::BTreeMap;

use crate::config::Defaults;
use crate::error::{Result, WanpcError};
use crate::ui::{Prompt, UserInterface};

use super::schema::{DefaultValue, VariableSchema};

/// Final variable values handed to the templating engine.
pub type Context = BTreeMap<String, String>;

/// Overrides parsed from trailing command-line arguments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedOverrides {
    /// Accepted `key -> value` pairs.
    pub values: Context,
    /// Human-readable notes about arguments that were not used.
    pub ignored: Vec<String>,
}

/// Parse trailing `--KEY VALUE` and `--KEY=VALUE` arguments.
///
/// Only keys the schema declares are accepted. A flag with no value (end of
/// input, or directly followed by another flag) is ignored, as is any bare
/// word that is not the value of a flag.
pub fn parse_overrides(args: &[String], schema: &VariableSchema) -> ParsedOverrides {
    let mut parsed = ParsedOverrides::default();
    let mut iter = args.iter().peekable();

    while let Some(arg) = iter.next() {
        let Some(flag) = arg.strip_prefix("--") else {
            parsed
                .ignored
                .push(format!("Ignoring unexpected argument '{}'", arg));
            continue;
        };

        let (key, value) = match flag.split_once('=') {
            Some((key, value)) => (key.to_string(), value.to_string()),
            None => match iter.peek() {
                Some(next) if !next.starts_with("--") => {
                    let value = (*next).clone();
                    iter.next();
                    (flag.to_string(), value)
                }
                _ => {
                    parsed
                        .ignored
                        .push(format!("Ignoring '--{}': no value given", flag));
                    continue;
                }
            },
        };

        if !schema.declares(&key) {
            parsed.ignored.push(format!(
                "Ignoring '--{}': not a variable of this template",
                key
            ));
            continue;
        }

        tracing::debug!("Override {} = {}", key, value);
        parsed.values.insert(key, value);
    }

    parsed
}

/// Build the final context for a template.
///
/// # Arguments
///
/// * `schema` - The template's declared variables
/// * `overrides` - Explicit command-line values
/// * `resolved` - Effective defaults, or `None` when defaults are bypassed
/// * `ui` - Source of interactive answers
///
/// An empty interactive answer counts as "no value supplied" and the
/// declared default is used instead.
pub fn collect_context(
    schema: &VariableSchema,
    overrides: &Context,
    resolved: Option<&Defaults>,
    ui: &mut dyn UserInterface,
) -> Result<Context> {
    let mut context = overrides.clone();

    if let Some(defaults) = resolved {
        for (key, value) in defaults {
            if schema.declares(key) && !context.contains_key(key) {
                context.insert(key.clone(), value.clone());
            }
        }
    }

    for variable in schema.variables() {
        if context.contains_key(&variable.name) {
            continue;
        }
        if variable.is_internal() {
            continue;
        }

        let prompt = match &variable.default {
            DefaultValue::Derived(_) => {
                tracing::debug!("Skipping derived variable '{}'", variable.name);
                continue;
            }
            DefaultValue::Choices(choices) => Prompt::select(
                &variable.name,
                format!("{} (choices: {})", variable.name, choices.join(", ")),
                choices,
            ),
            DefaultValue::Scalar(default) => {
                Prompt::input(&variable.name, &variable.name, Some(default.as_str()))
            }
        };

        let answer = ui.prompt(&prompt)?.as_string();
        let value = if answer.is_empty() {
            variable.default.fallback().unwrap_or_default().to_string()
        } else {
            answer
        };

        if let DefaultValue::Choices(choices) = &variable.default {
            if !choices.contains(&value) {
                return Err(WanpcError::validation(format!(
                    "'{}' is not a valid choice for '{}' (choices: {})",
                    value,
                    variable.name,
                    choices.join(", ")
                )));
            }
        }

        context.insert(variable.name.clone(), value);
    }

    Ok(context)
}
