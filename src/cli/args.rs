//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// wanpc - Cookiecutter templates with saved defaults.
#[derive(Debug, Parser)]
#[command(name = "wanpc")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true, arg_required_else_help = true)]
pub struct Cli {
    /// Path to config file (overrides ~/.wanpc/config.toml)
    #[arg(short, long, global = true, env = "WANPC_CONFIG")]
    pub config: Option<PathBuf>,

    /// Show verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Never prompt; fail when a value is missing
    #[arg(long, global = true)]
    pub non_interactive: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Parse the process arguments.
    ///
    /// Known options that follow a `create` override are applied instead of
    /// being treated as template variables.
    pub fn parse_args() -> Self {
        let mut cli = Self::parse();
        cli.hoist_trailing_flags();
        cli
    }

    /// Move known options out of the trailing `create` overrides.
    ///
    /// clap stops option parsing at the first override, so
    /// `create py --author Jane --no-defaults -o out` leaves everything after
    /// `py` in `overrides`. Override values are consumed in pairs first, so a
    /// value is never mistaken for an option.
    pub fn hoist_trailing_flags(&mut self) {
        let Commands::Create(args) = &mut self.command else {
            return;
        };

        let tokens = std::mem::take(&mut args.overrides);
        let mut iter = tokens.into_iter().peekable();
        while let Some(token) = iter.next() {
            match token.as_str() {
                "--no-defaults" => args.no_defaults = true,
                "--verbose" => self.verbose = true,
                "-q" | "--quiet" => self.quiet = true,
                "--no-color" => self.no_color = true,
                "--debug" => self.debug = true,
                "--non-interactive" => self.non_interactive = true,
                "-o" | "--output-dir" => match iter.next() {
                    Some(dir) => args.output_dir = PathBuf::from(dir),
                    None => args.overrides.push(token),
                },
                "-c" | "--config" => match iter.next() {
                    Some(path) => self.config = Some(PathBuf::from(path)),
                    None => args.overrides.push(token),
                },
                _ => {
                    if let Some(dir) = token.strip_prefix("--output-dir=") {
                        args.output_dir = PathBuf::from(dir);
                    } else if let Some(path) = token.strip_prefix("--config=") {
                        self.config = Some(PathBuf::from(path));
                    } else {
                        let takes_value = token.starts_with("--")
                            && !token.contains('=')
                            && iter.peek().is_some_and(|next| !next.starts_with("--"));
                        args.overrides.push(token);
                        if takes_value {
                            args.overrides.extend(iter.next());
                        }
                    }
                }
            }
        }
    }
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List registered templates
    List(ListArgs),

    /// Create a project from a registered template
    Create(CreateArgs),

    /// Manage templates and defaults
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `list` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ListArgs {
    /// Show each template's defaults and the global defaults it inherits
    #[arg(short = 'd', long)]
    pub show_defaults: bool,
}

/// Arguments for the `create` command.
///
/// Template variables follow the template name as `--KEY VALUE` or
/// `--KEY=VALUE` pairs. Known options may appear before or among them; see
/// [`Cli::hoist_trailing_flags`].
#[derive(Debug, Clone, clap::Args)]
pub struct CreateArgs {
    /// Name of the registered template
    pub template: String,

    /// Directory to generate the project in
    #[arg(short, long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Ignore saved template and global defaults
    #[arg(long)]
    pub no_defaults: bool,

    /// Template variable overrides (--KEY VALUE)
    #[arg(
        value_name = "--KEY VALUE",
        num_args = 0..,
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub overrides: Vec<String>,
}

impl CreateArgs {
    /// Arguments for creating `template` in the current directory.
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            output_dir: PathBuf::from("."),
            no_defaults: false,
            overrides: Vec::new(),
        }
    }
}

/// Arguments for the `config` command.
#[derive(Debug, Clone, clap::Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Configuration subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum ConfigAction {
    /// Show the configuration document
    Show(ShowArgs),

    /// Show where the configuration document is stored
    #[command(alias = "config-path")]
    Path,

    /// Register a template (replaces an existing one with the same name)
    AddTemplate(AddTemplateArgs),

    /// Change a template's description
    SetDescription(SetDescriptionArgs),

    /// Save a default value for one template
    SetDefault(SetDefaultArgs),

    /// Save a default value for every template
    SetGlobalDefault(SetGlobalDefaultArgs),

    /// Unregister a template
    RemoveTemplate(RemoveTemplateArgs),

    /// Remove a template default
    RemoveDefault(RemoveDefaultArgs),

    /// Remove a global default
    RemoveGlobalDefault(RemoveGlobalDefaultArgs),
}

/// Arguments for `config show`.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ShowArgs {
    /// Output as YAML instead of JSON
    #[arg(long)]
    pub yaml: bool,
}

/// Arguments for `config add-template`.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct AddTemplateArgs {
    /// Template name
    #[arg(short, long)]
    pub name: Option<String>,

    /// Path to the template directory
    #[arg(short, long)]
    pub path: Option<String>,

    /// Template description
    #[arg(short, long)]
    pub description: Option<String>,
}

/// Arguments for `config set-description`.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct SetDescriptionArgs {
    /// Template name
    #[arg(short, long)]
    pub name: Option<String>,

    /// New description
    #[arg(short, long)]
    pub description: Option<String>,
}

/// Arguments for `config set-default`.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct SetDefaultArgs {
    /// Template name
    #[arg(short, long)]
    pub name: Option<String>,

    /// Variable name
    #[arg(short, long)]
    pub key: Option<String>,

    /// Default value
    #[arg(short, long, allow_hyphen_values = true)]
    pub value: Option<String>,
}

/// Arguments for `config set-global-default`.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct SetGlobalDefaultArgs {
    /// Variable name
    #[arg(short, long)]
    pub key: Option<String>,

    /// Default value
    #[arg(short, long, allow_hyphen_values = true)]
    pub value: Option<String>,
}

/// Arguments for `config remove-template`.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct RemoveTemplateArgs {
    /// Template name
    #[arg(short, long)]
    pub name: Option<String>,

    /// Skip confirmation
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for `config remove-default`.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct RemoveDefaultArgs {
    /// Template name
    #[arg(short, long)]
    pub name: Option<String>,

    /// Variable name
    #[arg(short, long)]
    pub key: Option<String>,

    /// Skip confirmation
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for `config remove-global-default`.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct RemoveGlobalDefaultArgs {
    /// Variable name
    #[arg(short, long)]
    pub key: Option<String>,

    /// Skip confirmation
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
