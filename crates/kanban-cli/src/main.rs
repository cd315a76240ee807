mod cli;
mod context;
mod handlers;
mod output;

use clap::Parser;
use cli::{Cli, Commands};
use context::CliContext;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Ok(log_path) = std::env::var("KANBAN_DEBUG_LOG") {
        let log_file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;

        tracing_subscriber::fmt()
            .with_writer(log_file)
            .with_max_level(tracing::Level::DEBUG)
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .with_ansi(false)
            .init();
    } else {
        // stdout carries the JSON envelope, so diagnostics go to stderr.
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_writer(std::io::stderr)
            .init();
    }

    let cli = Cli::parse();
    let config = context::resolve_config(&cli);
    let ctx = match CliContext::build(&config) {
        Ok(ctx) => ctx,
        Err(e) => output::output_error(&e.to_string()),
    };

    match cli.command {
        Commands::Dashboard(cmd) => handlers::dashboard::handle(&ctx, cmd.action).await?,
        Commands::Column(cmd) => handlers::column::handle(&ctx, cmd.action).await?,
        Commands::Card(cmd) => handlers::card::handle(&ctx, cmd.action).await?,
        Commands::Store(cmd) => handlers::store::handle(&ctx, cmd.action).await?,
    }

    Ok(())
}
