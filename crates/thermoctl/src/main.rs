mod cli;
mod commands;
mod config;
mod error;
mod output;
mod surface;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use thermoctl_core::Thermostat;

use crate::cli::{Cli, Command};
use crate::error::CliError;
use crate::surface::TerminalSurface;

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup tracing based on verbosity
    init_tracing(cli.global.verbose);

    // Dispatch and handle errors with proper exit codes
    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        // Config commands don't need a thermostat
        Command::Config(args) => commands::config_cmd::handle(args, &cli.global),

        // Shell completions generation
        Command::Completions(args) => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "thermoctl", &mut std::io::stdout());
            Ok(())
        }

        // All other commands talk to the thermostat
        cmd => {
            let cfg = config::load_config_or_default();
            let resolved = config::resolve(&cli.global, &cfg)?;
            let surface = TerminalSurface::new(
                config::output_format(&cli.global, &cfg),
                output::should_color(cli.global.color),
            );
            let app = Thermostat::from_config(&resolved.client, surface)?;

            tracing::debug!(command = ?cmd, url = %resolved.client.url, "dispatching command");
            commands::dispatch(cmd, &app, &cli.global, resolved.zone).await
        }
    }
}
