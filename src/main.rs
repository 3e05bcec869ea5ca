//! Docflow CLI entry point.

use clap::Parser;

use docflow::cli::{commands, context::load_config, handle_error, Cli, Commands};
use docflow::infrastructure::logging;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let config_path = cli.config.as_deref();

    // A broken config file falls back to default logging here; the command
    // itself reloads the config and reports the error.
    let logging_config = load_config(config_path)
        .map(|config| config.logging)
        .unwrap_or_default();
    logging::init(&logging_config);

    let result = match cli.command {
        Commands::Serve { port } => commands::serve::execute(port, config_path).await,
        Commands::Classify { file } => {
            commands::classify::execute(&file, config_path, cli.json).await
        }
        Commands::Types => commands::catalog::execute(config_path, cli.json).await,
        Commands::Agent(cmd) => commands::agent::execute(cmd, config_path, cli.json).await,
        Commands::Assignment(cmd) => {
            commands::assignment::execute(cmd, config_path, cli.json).await
        }
    };

    if let Err(err) = result {
        handle_error(err, cli.json);
    }
}
