use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

use crate::render::docx::PackageError;

/// Failure that stops one input artifact from being materialized.
/// Recorded in the run report; never aborts processing of the other artifact.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", content = "message", rename_all = "snake_case")]
pub enum ArtifactError {
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Empty collection: '{0}' contains no records")]
    EmptyCollection(String),
}

/// Failure while writing one record's output. Fatal to that record only.
#[derive(Debug, Error)]
pub enum FilesystemError {
    #[error("Failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to package document {path}: {source}")]
    Package { path: PathBuf, source: PackageError },
}

/// Run-level failure. The only one is an output root that cannot be created.
#[derive(Debug, Error)]
pub enum MaterializeError {
    #[error("Cannot create output root {path}: {source}")]
    OutputRoot {
        path: PathBuf,
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_artifact_error_serializes_with_kind() {
        let err = ArtifactError::EmptyCollection("tailored_cvs".to_string());
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["kind"], "empty_collection");
        assert_eq!(json["message"], "tailored_cvs");
    }

    #[test]
    fn test_artifact_error_display() {
        let err = ArtifactError::Parse("expected value at line 1 column 1".to_string());
        assert_eq!(
            err.to_string(),
            "Parse error: expected value at line 1 column 1"
        );
    }
}
