//! Non-interactive UI for scripts and piped output.

use std::collections::HashMap;

use crate::error::{Result, WanpcError};

use super::{
    parse_confirm, OutputMode, Prompt, PromptResult, PromptType, SpinnerHandle, UserInterface,
};

/// Prefix of environment variables that answer prompts without a terminal.
pub const PROMPT_ENV_PREFIX: &str = "WANPC_PROMPT_";

/// UI implementation for non-interactive mode.
///
/// Prompts are answered from `WANPC_PROMPT_<KEY>` environment variables
/// first, then from the prompt's default. A prompt with neither is an error.
pub struct NonInteractiveUI {
    mode: OutputMode,
    env_overrides: HashMap<String, String>,
}

impl NonInteractiveUI {
    /// Create a new non-interactive UI.
    pub fn new(mode: OutputMode) -> Self {
        let env_overrides: HashMap<String, String> = std::env::vars()
            .filter(|(k, _)| k.starts_with(PROMPT_ENV_PREFIX))
            .collect();

        Self {
            mode,
            env_overrides,
        }
    }

    /// Create with explicit overrides (for testing).
    pub fn with_overrides(mode: OutputMode, overrides: HashMap<String, String>) -> Self {
        Self {
            mode,
            env_overrides: overrides,
        }
    }

    fn env_key(prompt_key: &str) -> String {
        format!(
            "{}{}",
            PROMPT_ENV_PREFIX,
            prompt_key.to_uppercase().replace('-', "_")
        )
    }
}

impl UserInterface for NonInteractiveUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        println!("{}", msg);
    }

    fn success(&mut self, msg: &str) {
        println!("✓ {}", msg);
    }

    fn warning(&mut self, msg: &str) {
        eprintln!("⚠ {}", msg);
    }

    fn error(&mut self, msg: &str) {
        eprintln!("✗ {}", msg);
    }

    fn prompt(&mut self, prompt: &Prompt) -> Result<PromptResult> {
        let is_confirm = matches!(prompt.prompt_type, PromptType::Confirm);

        let answer = self
            .env_overrides
            .get(&Self::env_key(&prompt.key))
            .or(prompt.default.as_ref())
            .cloned();

        match answer {
            Some(value) if is_confirm => Ok(PromptResult::Bool(parse_confirm(&value))),
            Some(value) => Ok(PromptResult::String(value)),
            None => Err(WanpcError::validation(format!(
                "Cannot prompt for '{}' in non-interactive mode (no default value)",
                prompt.key
            ))),
        }
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        if self.mode.shows_spinners() {
            println!("{}", message);
        }
        Box::new(NoopSpinner { mode: self.mode })
    }

    fn show_header(&mut self, title: &str) {
        if self.mode.shows_detail() {
            println!("\n{}", title);
        }
    }

    fn is_interactive(&self) -> bool {
        false
    }
}

/// Spinner that only prints its final status line.
struct NoopSpinner {
    mode: OutputMode,
}

impl SpinnerHandle for NoopSpinner {
    fn finish_success(&mut self, msg: &str) {
        if self.mode.shows_spinners() {
            println!("✓ {}", msg);
        }
    }

    fn finish_error(&mut self, msg: &str) {
        eprintln!("✗ {}", msg);
    }
}
