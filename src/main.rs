//! wanpc CLI entry point.

use std::process::ExitCode;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use wanpc::cli::{Cli, CommandDispatcher};
use wanpc::config::ConfigStore;
use wanpc::ui::{create_ui, OutputMode, UserInterface};

/// Initialize the tracing subscriber for logging.
///
/// Log level is controlled by:
/// 1. `--debug` flag sets level to DEBUG
/// 2. `RUST_LOG` environment variable (if set)
/// 3. Default is WARN
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("wanpc=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("wanpc=warn"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn run(cli: &Cli, ui: &mut dyn UserInterface) -> wanpc::Result<i32> {
    let store = ConfigStore::locate(cli.config.as_deref())?;
    tracing::debug!("Using config at {}", store.path().display());

    let cwd = std::env::current_dir()?;
    let dispatcher = CommandDispatcher::new(store, cwd);
    Ok(dispatcher.dispatch(cli, ui)?.exit_code)
}

fn main() -> ExitCode {
    let cli = Cli::parse_args();
    init_tracing(cli.debug);

    tracing::debug!("wanpc starting with args: {:?}", cli);

    let output_mode = if cli.quiet {
        OutputMode::Quiet
    } else if cli.verbose {
        OutputMode::Verbose
    } else {
        OutputMode::Normal
    };

    if cli.no_color {
        std::env::set_var("NO_COLOR", "1");
        console::set_colors_enabled(false);
        console::set_colors_enabled_stderr(false);
    }

    let mut ui = create_ui(!cli.non_interactive, output_mode);

    match run(&cli, ui.as_mut()) {
        Ok(code) => ExitCode::from(code as u8),
        Err(e) => {
            ui.error(&e.to_string());
            ExitCode::from(1)
        }
    }
}
