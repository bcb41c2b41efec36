use std::path::PathBuf;

use anyhow::{bail, Result};

use crate::materialize::{ArtifactKind, MaterializeRequest};

/// Runtime configuration loaded from environment variables (and `.env` if present).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub cv_artifact: PathBuf,
    pub cover_letter_artifact: PathBuf,
    pub skip_resume_check: bool,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let input_dir = PathBuf::from(lookup("TAILOR_INPUT_DIR").unwrap_or_else(|| "input".into()));
        let output_dir =
            PathBuf::from(lookup("TAILOR_OUTPUT_DIR").unwrap_or_else(|| "output".into()));

        Ok(Config {
            cv_artifact: lookup("TAILOR_CV_ARTIFACT")
                .map(PathBuf::from)
                .unwrap_or_else(|| output_dir.join(ArtifactKind::Cv.artifact_file_name())),
            cover_letter_artifact: lookup("TAILOR_COVER_LETTER_ARTIFACT")
                .map(PathBuf::from)
                .unwrap_or_else(|| {
                    output_dir.join(ArtifactKind::CoverLetter.artifact_file_name())
                }),
            skip_resume_check: parse_bool(
                "TAILOR_SKIP_RESUME_CHECK",
                lookup("TAILOR_SKIP_RESUME_CHECK"),
            )?,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            input_dir,
            output_dir,
        })
    }

    pub fn materialize_request(&self) -> MaterializeRequest {
        MaterializeRequest {
            cv_artifact: self.cv_artifact.clone(),
            cover_letter_artifact: self.cover_letter_artifact.clone(),
            output_root: self.output_dir.clone(),
        }
    }
}

fn parse_bool(key: &str, value: Option<String>) -> Result<bool> {
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(false),
        Some(v) if ["1", "true", "yes"].contains(&v.to_ascii_lowercase().as_str()) => Ok(true),
        Some(v) if ["0", "false", "no"].contains(&v.to_ascii_lowercase().as_str()) => Ok(false),
        Some(v) => bail!("{key} must be a boolean (true/false), got '{v}'"),
    }
}
