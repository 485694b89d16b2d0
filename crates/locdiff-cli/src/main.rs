use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use locdiff_cli::{
    cli::{Cli, Commands},
    commands,
};
use locdiff_config::ConfigLoader;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so merged documents can be piped from stdout
    let env_filter = EnvFilter::builder()
        .with_default_directive(cli.level_filter().into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let config = ConfigLoader::load_or_default(cli.config.as_deref()).with_context(|| match &cli.config {
        Some(path) => format!("Failed to load config from {}", path.display()),
        None => "Failed to load default config".to_string(),
    })?;
    debug!(?config, "Loaded configuration");

    match cli.command {
        Commands::Diff {
            original,
            modified,
            site,
            hostnames,
            config_sheet,
            output,
            format,
        } => commands::diff::execute(config, original, modified, site, hostnames, config_sheet, output, format)?,

        Commands::Clean { file, output } => commands::clean::execute(file, output)?,

        Commands::Blocks { file, format } => commands::blocks::execute(file, format)?,
    }

    Ok(())
}
