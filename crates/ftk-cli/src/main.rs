mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use ftk_config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    // Initialize tracing; stdout carries command output
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .init();

    let config = Config::load()?;

    match cli.command {
        cli::Commands::Generate {
            ref file_id,
            ref page_name,
            ref output,
        } => commands::generate::handle(&cli, &config, file_id, page_name, output.as_deref()).await,
        cli::Commands::Export {
            ref input,
            ref output,
        } => commands::export::handle(&cli, &config, input, output.as_deref()).await,
        cli::Commands::Download {
            ref input,
            ref output,
            ref icon,
        } => commands::download::handle(&cli, &config, input, output.as_deref(), icon).await,
        cli::Commands::React {
            ref input,
            ref output,
        } => commands::react::handle(&cli, &config, input, output).await,
        cli::Commands::Component { ref input } => {
            commands::component::handle(&cli, &config, input).await
        }
    }
}
