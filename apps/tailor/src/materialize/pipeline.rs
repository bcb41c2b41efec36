//! Materialization run: orchestrates the whole pipeline for one pair of artifacts.
//!
//! Flow: create output root → load both artifacts → validate → partition by
//! application key → render + package every record → write documents.
//!
//! The two artifacts are independent: a missing, malformed or invalid artifact is
//! recorded in the report and the other one is still materialized. A document that
//! cannot be written is recorded and the remaining partitions continue. Only an
//! output root that cannot be created aborts the run.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, error, info, warn};

use crate::errors::{ArtifactError, FilesystemError, MaterializeError};
use crate::materialize::pairing::index_applications;
use crate::materialize::report::{
    ArtifactKind, ArtifactReport, ArtifactStatus, KeyCollision, MaterializeReport, RawKey,
    WriteFailure,
};
use crate::materialize::writer::{ensure_dir, write_atomic};
use crate::models::{ApplicationTarget, TailoredCoverLetters, TailoredCvs};
use crate::partition::{find_collisions, partition_by_application, Partitions};
use crate::render::docx::package;
use crate::render::{render_cover_letter, render_cv, Document};
use crate::schema::validate_as;

// ────────────────────────────────────────────────────────────────────────────
// Run state
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunState {
    Idle,
    LoadingArtifacts,
    Validating,
    Partitioning,
    Rendering,
    Writing,
    Done,
    Failed(String),
}

#[derive(Debug)]
struct Run {
    history: Vec<RunState>,
}

impl Run {
    fn new() -> Self {
        Self {
            history: vec![RunState::Idle],
        }
    }

    fn state(&self) -> &RunState {
        self.history.last().unwrap_or(&RunState::Idle)
    }

    fn advance(&mut self, next: RunState) {
        debug!(from = ?self.state(), to = ?next, "materialize run state");
        self.history.push(next);
    }
}

/// Where one artifact ended up. `Ready` carries the artifact's current payload.
enum Outcome<T> {
    Absent,
    Failed(ArtifactError),
    Ready(T),
}

impl<T> Outcome<T> {
    fn and_then<U>(self, f: impl FnOnce(T) -> Result<U, ArtifactError>) -> Outcome<U> {
        match self {
            Outcome::Ready(value) => match f(value) {
                Ok(next) => Outcome::Ready(next),
                Err(e) => Outcome::Failed(e),
            },
            Outcome::Absent => Outcome::Absent,
            Outcome::Failed(e) => Outcome::Failed(e),
        }
    }

    fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        self.and_then(|value| Ok(f(value)))
    }

    fn ready(&self) -> Option<&T> {
        match self {
            Outcome::Ready(value) => Some(value),
            _ => None,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Public API
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaterializeRequest {
    pub cv_artifact: PathBuf,
    pub cover_letter_artifact: PathBuf,
    pub output_root: PathBuf,
}

impl MaterializeRequest {
    /// Both artifacts at their default names inside `output_root`.
    pub fn in_output_root(output_root: impl Into<PathBuf>) -> Self {
        let output_root = output_root.into();
        Self {
            cv_artifact: output_root.join(ArtifactKind::Cv.artifact_file_name()),
            cover_letter_artifact: output_root
                .join(ArtifactKind::CoverLetter.artifact_file_name()),
            output_root,
        }
    }

    pub fn run(&self) -> Result<MaterializeReport, MaterializeError> {
        materialize(
            &self.cv_artifact,
            &self.cover_letter_artifact,
            &self.output_root,
        )
    }
}

/// Materializes both artifacts into `{output_root}/{key}/cv.docx` and
/// `{output_root}/{key}/cover_letter.docx`.
pub fn materialize(
    cv_artifact: &Path,
    cover_letter_artifact: &Path,
    output_root: &Path,
) -> Result<MaterializeReport, MaterializeError> {
    let mut run = Run::new();
    run_pipeline(&mut run, cv_artifact, cover_letter_artifact, output_root)
}

/// Runs materialization as a side-effecting post-step: `payload` is handed back
/// untouched whatever the outcome.
pub fn finalize<T>(
    payload: T,
    request: &MaterializeRequest,
) -> (T, Result<MaterializeReport, MaterializeError>) {
    let result = request.run();
    if let Err(e) = &result {
        error!("Materialization aborted: {e}");
    }
    (payload, result)
}

// ────────────────────────────────────────────────────────────────────────────
// Pipeline
// ────────────────────────────────────────────────────────────────────────────

/// A rendered document waiting to be packaged and written. Packaging happens in
/// the write loop so only one package is held in memory at a time.
struct PlannedWrite {
    key: String,
    artifact: ArtifactKind,
    document: Document,
}

fn run_pipeline(
    run: &mut Run,
    cv_artifact: &Path,
    cover_letter_artifact: &Path,
    output_root: &Path,
) -> Result<MaterializeReport, MaterializeError> {
    info!(output_root = %output_root.display(), "Materializing tailored documents");

    if let Err(source) = fs::create_dir_all(output_root) {
        run.advance(RunState::Failed(format!(
            "cannot create output root: {source}"
        )));
        return Err(MaterializeError::OutputRoot {
            path: output_root.to_path_buf(),
            source,
        });
    }

    run.advance(RunState::LoadingArtifacts);
    let cv_raw = load_artifact(ArtifactKind::Cv, cv_artifact);
    let letter_raw = load_artifact(ArtifactKind::CoverLetter, cover_letter_artifact);

    run.advance(RunState::Validating);
    let cvs = cv_raw.and_then(validate_as::<TailoredCvs>);
    let letters = letter_raw.and_then(validate_as::<TailoredCoverLetters>);
    log_failure(ArtifactKind::Cv, &cvs);
    log_failure(ArtifactKind::CoverLetter, &letters);

    run.advance(RunState::Partitioning);
    let cv_parts = cvs.map(|c| partition_by_application(c.tailored_cvs));
    let letter_parts = letters.map(|l| partition_by_application(l.tailored_cover_letters));

    let mut collisions = Vec::new();
    if let Some(parts) = cv_parts.ready() {
        collisions.extend(key_collisions(ArtifactKind::Cv, parts));
    }
    if let Some(parts) = letter_parts.ready() {
        collisions.extend(key_collisions(ArtifactKind::CoverLetter, parts));
    }
    let applications = index_applications(
        cv_parts.ready().into_iter().flat_map(|p| p.keys()),
        letter_parts.ready().into_iter().flat_map(|p| p.keys()),
    );

    run.advance(RunState::Rendering);
    let mut plan = Vec::new();
    if let Some(parts) = cv_parts.ready() {
        plan.extend(plan_writes(parts, ArtifactKind::Cv, |cv| {
            render_cv(&cv.tailored_cv_content)
        }));
    }
    if let Some(parts) = letter_parts.ready() {
        plan.extend(plan_writes(parts, ArtifactKind::CoverLetter, |letter| {
            render_cover_letter(letter.cover_letter_content.as_deref())
        }));
    }

    run.advance(RunState::Writing);
    let outcome = write_plan(output_root, plan);

    let report = MaterializeReport {
        output_root: output_root.to_path_buf(),
        cv: artifact_report(ArtifactKind::Cv, cv_artifact, &cv_parts, &outcome),
        cover_letter: artifact_report(
            ArtifactKind::CoverLetter,
            cover_letter_artifact,
            &letter_parts,
            &outcome,
        ),
        directories_created: outcome.directories_created,
        documents_written: outcome.written.values().sum(),
        collisions,
        write_failures: outcome.failures,
        applications,
    };

    run.advance(RunState::Done);
    let complete = report.applications.iter().filter(|a| a.is_complete()).count();
    info!(
        directories = report.directories_created,
        documents = report.documents_written,
        failures = report.write_failures.len(),
        complete_applications = complete,
        "Materialization complete"
    );
    Ok(report)
}

fn load_artifact(kind: ArtifactKind, path: &Path) -> Outcome<Value> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            warn!(artifact = ?kind, path = %path.display(), "Artifact not found, skipping");
            return Outcome::Absent;
        }
        Err(e) => {
            return Outcome::Failed(ArtifactError::Parse(format!(
                "cannot read {}: {e}",
                path.display()
            )))
        }
    };

    match serde_json::from_str(&text) {
        Ok(value) => Outcome::Ready(value),
        Err(e) => Outcome::Failed(ArtifactError::Parse(e.to_string())),
    }
}

fn log_failure<T>(kind: ArtifactKind, outcome: &Outcome<T>) {
    if let Outcome::Failed(e) = outcome {
        warn!(artifact = ?kind, "Artifact rejected: {e}");
    }
}

fn key_collisions<T: ApplicationTarget>(
    kind: ArtifactKind,
    parts: &Partitions<T>,
) -> Vec<KeyCollision> {
    find_collisions(parts)
        .into_iter()
        .map(|c| {
            warn!(
                artifact = ?kind,
                key = %c.key,
                sources = c.sources.len(),
                "Distinct applications share an output directory; later documents overwrite earlier ones"
            );
            KeyCollision {
                key: c.key,
                artifact: kind,
                sources: c
                    .sources
                    .into_iter()
                    .map(|(company, job_title)| RawKey { company, job_title })
                    .collect(),
            }
        })
        .collect()
}

fn plan_writes<T>(
    parts: &Partitions<T>,
    artifact: ArtifactKind,
    render: impl Fn(&T) -> Document,
) -> Vec<PlannedWrite> {
    let render = &render;
    parts
        .iter()
        .flat_map(|group| {
            group.records.iter().map(move |record| PlannedWrite {
                key: group.key.clone(),
                artifact,
                document: render(record),
            })
        })
        .collect()
}

#[derive(Debug, Default)]
struct WriteOutcome {
    directories_created: usize,
    written: HashMap<ArtifactKind, usize>,
    failures: Vec<WriteFailure>,
}

fn write_plan(output_root: &Path, plan: Vec<PlannedWrite>) -> WriteOutcome {
    let mut outcome = WriteOutcome::default();
    // key → Err(reason) when the directory could not be created
    let mut dirs: HashMap<String, Result<(), String>> = HashMap::new();

    for write in plan {
        let dir = output_root.join(&write.key);
        let dir_status = dirs
            .entry(write.key.clone())
            .or_insert_with(|| match ensure_dir(&dir) {
                Ok(()) => {
                    outcome.directories_created += 1;
                    Ok(())
                }
                Err(e) => Err(e.to_string()),
            })
            .clone();

        let path = dir.join(write.artifact.document_file_name());
        let result = dir_status.and_then(|()| {
            let bytes = package(&write.document).map_err(|source| {
                FilesystemError::Package {
                    path: path.clone(),
                    source,
                }
                .to_string()
            })?;
            write_atomic(&path, &bytes).map_err(|e| e.to_string())
        });

        match result {
            Ok(()) => *outcome.written.entry(write.artifact).or_default() += 1,
            Err(reason) => {
                error!(key = %write.key, artifact = ?write.artifact, "Document not written: {reason}");
                outcome.failures.push(WriteFailure {
                    key: write.key,
                    artifact: write.artifact,
                    reason,
                });
            }
        }
    }

    outcome
}

fn artifact_report<T>(
    kind: ArtifactKind,
    path: &Path,
    parts: &Outcome<Partitions<T>>,
    outcome: &WriteOutcome,
) -> ArtifactReport {
    let status = match parts {
        Outcome::Absent => ArtifactStatus::Absent,
        Outcome::Failed(reason) => ArtifactStatus::Failed {
            reason: reason.clone(),
        },
        Outcome::Ready(parts) => ArtifactStatus::Processed {
            records: parts.record_count(),
            partitions: parts.len(),
            documents_written: outcome.written.get(&kind).copied().unwrap_or(0),
        },
    };
    ArtifactReport {
        artifact: kind,
        path: path.to_path_buf(),
        status,
    }
}
