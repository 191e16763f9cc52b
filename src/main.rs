use anyhow::{Context, Result};
use blueprint_takeoff::app::{App, RunOutcome};
use blueprint_takeoff::models::{Config, Credential};
use clap::Parser;
use dialoguer::Password;
use std::fs;
use std::path::PathBuf;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "blueprint-takeoff")]
#[command(about = "CAD blueprint take-off: ask a vision model for a quantity table")]
struct CliArgs {
    /// Drawing images (.png, .jpg, .jpeg, .gif, .webp).
    #[arg(value_name = "IMAGES")]
    images: Vec<PathBuf>,

    /// Show HTML tables in the reply as-is instead of converting them.
    #[arg(long)]
    no_table_normalization: bool,

    /// Also write the reply to this markdown file.
    #[arg(long, short, value_name = "FILE")]
    output: Option<PathBuf>,
}

fn prompt_credential() -> Result<Credential> {
    let token = Password::new()
        .with_prompt("OpenRouter API Key")
        .allow_empty_password(true)
        .interact()
        .context("Failed to read API key")?;
    Ok(Credential::new(token))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "blueprint_takeoff=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = CliArgs::parse();

    let mut config = Config::from_env()?;
    if args.no_table_normalization {
        config.normalize_tables = false;
    }

    let app = match App::new(&config) {
        Ok(app) => app,
        Err(e) => {
            error!("Failed to initialize application: {}", e);
            std::process::exit(1);
        }
    };

    let credential = prompt_credential()?;

    match app.run_files(credential, &args.images).await {
        Ok(RunOutcome::Completed(transcript)) => {
            if let Some(status) = transcript.error_status {
                warn!("Gateway answered with HTTP {}", status);
            }
            if let Some(path) = &args.output {
                fs::write(path, &transcript.reply)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                info!("Saved take-off to {}", path.display());
            }
            Ok(())
        }
        Ok(RunOutcome::Aborted(_)) => std::process::exit(1),
        Err(e) => {
            error!("Take-off failed: {}", e);
            std::process::exit(1);
        }
    }
}
