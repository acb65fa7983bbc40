//! Templating engine boundary.
//!
//! wanpc never renders files itself. It hands a fully resolved context to
//! an engine, which expands the template directory into the output
//! directory without asking further questions.

use std::ffi::OsString;
use std::fs;
use std::path::Path;
use std::process::{Command, Stdio};

use crate::error::{Result, WanpcError};

use super::context::Context;

/// Environment variable naming the cookiecutter executable.
pub const ENGINE_ENV: &str = "WANPC_COOKIECUTTER";

/// Executable used when [`ENGINE_ENV`] is unset.
pub const DEFAULT_PROGRAM: &str = "cookiecutter";

/// Output captured from a successful render.
#[derive(Debug, Clone, Default)]
pub struct RenderOutput {
    pub stdout: String,
    pub stderr: String,
}

/// Something that can expand a template directory.
pub trait TemplateEngine {
    /// Render `template_dir` into `output_dir` with a pre-resolved context.
    fn render(
        &self,
        template_dir: &Path,
        output_dir: &Path,
        context: &Context,
    ) -> Result<RenderOutput>;
}

/// Runs the `cookiecutter` command-line tool.
#[derive(Debug, Clone)]
pub struct CookiecutterEngine {
    program: OsString,
}

impl Default for CookiecutterEngine {
    fn default() -> Self {
        Self::new(DEFAULT_PROGRAM)
    }
}

impl CookiecutterEngine {
    /// Engine backed by a specific executable.
    pub fn new(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Engine backed by `$WANPC_COOKIECUTTER`, or `cookiecutter` on `PATH`.
    pub fn from_env() -> Self {
        match std::env::var_os(ENGINE_ENV) {
            Some(program) if !program.is_empty() => Self::new(program),
            _ => Self::default(),
        }
    }

    /// The executable this engine runs.
    pub fn program(&self) -> &OsString {
        &self.program
    }

    /// Arguments for one render: template, `--no-input`, output dir, then `key=value` pairs.
    pub fn args(&self, template_dir: &Path, output_dir: &Path, context: &Context) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![
            template_dir.as_os_str().to_owned(),
            "--no-input".into(),
            "--output-dir".into(),
            output_dir.as_os_str().to_owned(),
        ];
        args.extend(
            context
                .iter()
                .map(|(key, value)| OsString::from(format!("{}={}", key, value))),
        );
        args
    }
}

impl TemplateEngine for CookiecutterEngine {
    fn render(
        &self,
        template_dir: &Path,
        output_dir: &Path,
        context: &Context,
    ) -> Result<RenderOutput> {
        fs::create_dir_all(output_dir)?;

        let args = self.args(template_dir, output_dir, context);
        tracing::debug!("Running {:?} {:?}", self.program, args);

        let output = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| WanpcError::RenderFailed {
                message: format!(
                    "could not run '{}': {}. Is cookiecutter installed?",
                    self.program.to_string_lossy(),
                    e
                ),
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();

        if output.status.success() {
            return Ok(RenderOutput { stdout, stderr });
        }

        let code = output
            .status
            .code()
            .map(|c| c.to_string())
            .unwrap_or_else(|| "signal".to_string());
        let detail = stderr.trim();
        Err(WanpcError::RenderFailed {
            message: if detail.is_empty() {
                format!("cookiecutter exited with {}", code)
            } else {
                format!("cookiecutter exited with {}: {}", code, detail)
            },
        })
    }
}
