use clap::{CommandFactory, Parser};
use image_tool::cli::{Action, Cli, EXIT_FAILURE, exit_status};
use image_tool::imaging::{self, RustBackend};
use image_tool::{config, output};
use std::process::ExitCode;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

fn main() -> ExitCode {
    let cli = Cli::parse();
    setup_logging(cli.debug);

    let Some(command) = cli.command else {
        let mut cmd = Cli::command();
        // Nothing useful to do if stderr is gone
        let _ = cmd.write_help(&mut std::io::stderr());
        return ExitCode::from(EXIT_FAILURE);
    };

    let request = match command.into_action() {
        Ok(Action::Run(request)) => request,
        Ok(Action::GenConfig) => {
            print!("{}", config::stock_config_toml());
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            tracing::debug!(error = ?err, "dispatch rejected arguments");
            output::print_dispatch_error(&err);
            return ExitCode::from(EXIT_FAILURE);
        }
    };

    let tool_config = match config::resolve_config(cli.config.as_deref()) {
        Ok(tool_config) => tool_config,
        Err(err) => {
            eprintln!("Error: {err}");
            return ExitCode::from(EXIT_FAILURE);
        }
    };

    let outcome = imaging::run(&RustBackend::new(), request, &tool_config.settings());
    output::print_outcome(&outcome, cli.debug > 0);
    ExitCode::from(exit_status(&outcome, cli.strict))
}

/// Log to stderr so stdout carries only outcome lines.
///
/// `-d` raises the level one step at a time; `RUST_LOG` directives, when set,
/// are layered on top.
fn setup_logging(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::ERROR,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };

    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_names(false);

    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(filter)
        .init();

    tracing::debug!(?level, "logging initialised");
}
