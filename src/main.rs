use anyhow::{Context, Result};
use gitpage::Config;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = Config::parse();
    config.validate().context("Invalid configuration")?;

    let summary = gitpage::generate(&config)
        .with_context(|| format!("Failed to generate site for {}", config.project_name()))?;

    println!(
        "Generated {} ({} commits, {} files) in {}",
        config.project_name(),
        summary.commits,
        summary.files,
        summary.site_root.display()
    );

    Ok(())
}
