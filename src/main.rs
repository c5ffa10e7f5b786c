//! trello-mcp binary entry point.

use clap::Parser;
use tracing_subscriber::EnvFilter;
use trello_mcp::cli::{commands, Cli, Commands};
use trello_mcp::config::TrelloConfig;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    let result = match &cli.command {
        None | Some(Commands::Serve) => match TrelloConfig::from_env() {
            Ok(config) => commands::handle_serve(cli.apply_overrides(config)).await,
            Err(e) => Err(e.into()),
        },
        Some(Commands::Tools) => commands::handle_tools(),
        Some(Commands::Validate(args)) => commands::handle_validate(&args.tool, &args.args),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

/// Log to stderr; stdout carries the MCP stream.
fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
