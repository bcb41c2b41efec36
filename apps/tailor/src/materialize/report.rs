use std::path::PathBuf;

use serde::Serialize;

use crate::errors::ArtifactError;
use crate::materialize::pairing::Application;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    Cv,
    CoverLetter,
}

impl ArtifactKind {
    /// File written into each partition directory.
    pub fn document_file_name(self) -> &'static str {
        match self {
            ArtifactKind::Cv => "cv.docx",
            ArtifactKind::CoverLetter => "cover_letter.docx",
        }
    }

    /// Default artifact file name inside the output directory.
    pub fn artifact_file_name(self) -> &'static str {
        match self {
            ArtifactKind::Cv => "tailored_cv.json",
            ArtifactKind::CoverLetter => "tailored_cover_letter.json",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ArtifactStatus {
    Processed {
        records: usize,
        partitions: usize,
        documents_written: usize,
    },
    Absent,
    Failed {
        reason: ArtifactError,
    },
}

impl ArtifactStatus {
    pub fn is_processed(&self) -> bool {
        matches!(self, ArtifactStatus::Processed { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtifactReport {
    pub artifact: ArtifactKind,
    pub path: PathBuf,
    pub status: ArtifactStatus,
}

/// Distinct raw (company, job title) pairs that sanitized to one key.
/// Later records overwrite earlier ones on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyCollision {
    pub key: String,
    pub artifact: ArtifactKind,
    pub sources: Vec<RawKey>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RawKey {
    pub company: String,
    pub job_title: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WriteFailure {
    pub key: String,
    pub artifact: ArtifactKind,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MaterializeReport {
    pub output_root: PathBuf,
    pub cv: ArtifactReport,
    pub cover_letter: ArtifactReport,
    /// Distinct partition directories ensured by this run.
    pub directories_created: usize,
    pub documents_written: usize,
    pub collisions: Vec<KeyCollision>,
    pub write_failures: Vec<WriteFailure>,
    pub applications: Vec<Application>,
}

impl MaterializeReport {
    pub fn artifact(&self, kind: ArtifactKind) -> &ArtifactReport {
        match kind {
            ArtifactKind::Cv => &self.cv,
            ArtifactKind::CoverLetter => &self.cover_letter,
        }
    }
}
