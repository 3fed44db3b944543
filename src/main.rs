use clap::Parser;
use std::process;

use taskboard::cli;
use taskboard::cli::commands::{Cli, Commands};
use taskboard::cli::connect;
use taskboard::output;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli_args = Cli::parse();
    let json_output = cli_args.json;

    if let Err(error) = init_tracing(cli_args.quiet, cli_args.verbose) {
        eprintln!("warning: {error}");
    }

    let config = match cli_args.command {
        Commands::Init => process::exit(cli::init::run(json_output)),
        _ => match connect::load_config(cli_args.store_url.as_deref()) {
            Ok(config) => config,
            Err(e) => {
                output::print_error(&e, json_output);
                process::exit(1);
            }
        },
    };

    let exit_code = match cli_args.command {
        Commands::Init => 0,
        Commands::Task(cmd) => cli::task::run(cmd, json_output, &config).await,
        Commands::Project(cmd) => cli::project::run(cmd, json_output, &config).await,
        Commands::Board => cli::board::run(json_output, &config).await,
    };

    process::exit(exit_code);
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("TASKBOARD_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
