use anyhow::{Context, Result};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use tailor::config::Config;
use tailor::input::{resolve_resume, DocumentTextExtractor};
use tailor::materialize::{finalize, ArtifactKind};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first; logging level comes from it
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Tailor v{}", env!("CARGO_PKG_VERSION"));

    // The pipeline is blocking filesystem work; keep it off the async workers.
    let resume = if config.skip_resume_check {
        warn!("Resume check skipped");
        None
    } else {
        let input_dir = config.input_dir.clone();
        let resume = tokio::task::spawn_blocking(move || {
            resolve_resume(&input_dir, &DocumentTextExtractor)
        })
        .await?
        .with_context(|| format!("resolving resume in {}", config.input_dir.display()))?;
        info!(
            path = %resume.path.display(),
            chars = resume.text.chars().count(),
            "Resume input resolved"
        );
        Some(resume)
    };

    let request = config.materialize_request();
    let (_resume, result) =
        tokio::task::spawn_blocking(move || finalize(resume, &request)).await?;
    let report = result?;

    for kind in [ArtifactKind::Cv, ArtifactKind::CoverLetter] {
        let artifact = report.artifact(kind);
        if !artifact.status.is_processed() {
            warn!(
                artifact = ?kind,
                path = %artifact.path.display(),
                status = ?artifact.status,
                "Artifact produced no documents"
            );
        }
    }

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
