//! Interactive prompts.

use console::{style, Term};
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, Select};

use crate::error::{Result, WanpcError};

use super::{Prompt, PromptOption, PromptResult, PromptType};

/// Convert dialoguer errors to WanpcError.
fn map_dialoguer_err(e: dialoguer::Error) -> WanpcError {
    WanpcError::Io(e.into())
}

/// Dialoguer theme without the default yellow `?` prefix.
fn prompt_theme() -> ColorfulTheme {
    ColorfulTheme {
        prompt_prefix: style("".to_string()),
        ..ColorfulTheme::default()
    }
}

/// Prompt the user for input.
pub fn prompt_user(prompt: &Prompt, term: &Term) -> Result<PromptResult> {
    match &prompt.prompt_type {
        PromptType::Confirm => prompt_confirm(prompt, term),
        PromptType::Input => prompt_input(prompt, term),
        PromptType::Select { options } => prompt_select(prompt, options, term),
    }
}

fn prompt_confirm(prompt: &Prompt, term: &Term) -> Result<PromptResult> {
    let default = prompt
        .default
        .as_deref()
        .map(super::parse_confirm)
        .unwrap_or(false);

    let result = Confirm::with_theme(&prompt_theme())
        .with_prompt(&prompt.question)
        .default(default)
        .interact_on(term)
        .map_err(map_dialoguer_err)?;

    Ok(PromptResult::Bool(result))
}

fn prompt_input(prompt: &Prompt, term: &Term) -> Result<PromptResult> {
    let theme = prompt_theme();
    let input = Input::<String>::with_theme(&theme).with_prompt(&prompt.question);

    // An empty default means "Enter skips", which dialoguer models as allow_empty.
    let result: String = match prompt.default.as_deref() {
        Some("") => input
            .allow_empty(true)
            .interact_on(term)
            .map_err(map_dialoguer_err)?,
        Some(default) => input
            .default(default.to_string())
            .interact_on(term)
            .map_err(map_dialoguer_err)?,
        None => input.interact_on(term).map_err(map_dialoguer_err)?,
    };

    Ok(PromptResult::String(result))
}

fn prompt_select(prompt: &Prompt, options: &[PromptOption], term: &Term) -> Result<PromptResult> {
    if options.is_empty() {
        return Err(WanpcError::validation(format!(
            "No choices available for '{}'",
            prompt.key
        )));
    }

    let labels: Vec<_> = options.iter().map(|o| o.label.as_str()).collect();

    let default_idx = prompt
        .default
        .as_ref()
        .and_then(|d| options.iter().position(|o| o.value == *d))
        .unwrap_or(0);

    let selection = Select::with_theme(&prompt_theme())
        .with_prompt(&prompt.question)
        .items(&labels)
        .default(default_idx)
        .interact_on(term)
        .map_err(map_dialoguer_err)?;

    Ok(PromptResult::String(options[selection].value.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn select_without_options_is_rejected_before_touching_the_terminal() {
        let prompt = Prompt {
            key: "license".to_string(),
            question: "license".to_string(),
            prompt_type: PromptType::Select { options: vec![] },
            default: None,
        };
        let err = prompt_user(&prompt, &Term::stdout()).unwrap_err();
        assert!(err.to_string().contains("license"));
    }
}
