use clap::Parser;
use tracing_subscriber::EnvFilter;

use ecr_publish::cli::{self, Cli};
use ecr_publish::runner::SystemRunner;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let config = cli.load_config()?;
    cli::dispatch(&cli.command, config, &SystemRunner::new())?;
    Ok(())
}
