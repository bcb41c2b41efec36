use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{info, warn};

use crate::input::extractor::{is_supported, ExtractError, TextExtractor};

#[derive(Debug, Error)]
pub enum InputError {
    #[error("Cannot read input directory {path}: {source}")]
    ReadDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("No valid resume file found in {0}")]
    NoResume(PathBuf),

    #[error("The resume file {0} is empty or could not be read")]
    EmptyResume(PathBuf),

    #[error(transparent)]
    Extract(#[from] ExtractError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedResume {
    pub path: PathBuf,
    pub text: String,
}

/// Supported résumé files directly inside `input_dir`, sorted by file name.
pub fn find_candidates(input_dir: &Path) -> Result<Vec<PathBuf>, InputError> {
    let read_dir_error = |source| InputError::ReadDir {
        path: input_dir.to_path_buf(),
        source,
    };

    let mut candidates = Vec::new();
    for entry in fs::read_dir(input_dir).map_err(read_dir_error)? {
        let path = entry.map_err(read_dir_error)?.path();
        if path.is_file() && is_supported(&path) {
            candidates.push(path);
        }
    }
    candidates.sort();
    Ok(candidates)
}

/// Picks the résumé source file in `input_dir` and extracts its text.
///
/// When several supported files are present the first by name wins.
pub fn resolve_resume(
    input_dir: &Path,
    extractor: &dyn TextExtractor,
) -> Result<ResolvedResume, InputError> {
    let candidates = find_candidates(input_dir)?;
    let Some(path) = candidates.first().cloned() else {
        return Err(InputError::NoResume(input_dir.to_path_buf()));
    };
    if candidates.len() > 1 {
        warn!(
            chosen = %path.display(),
            ignored = candidates.len() - 1,
            "Multiple resume files found; using the first"
        );
    }

    info!(path = %path.display(), "Parsing resume");
    let text = extractor.extract(&path)?;
    if text.trim().is_empty() {
        return Err(InputError::EmptyResume(path));
    }

    Ok(ResolvedResume {
        text: text.trim().to_string(),
        path,
    })
}
