//! Document source: turns resume files into [`CandidateRecord`]s.
//!
//! Reading never fails a candidate outright. A document that cannot be read, or that yields no
//! text, becomes an unreadable record (`raw_text == None`) and is ranked with the unreadable
//! penalty.

mod error;


pub use error::{DocumentError, DocumentResult};

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::constants::DEFAULT_DISPLAY_NAME;
use crate::ranking::CandidateRecord;

/// File extensions [`load_directory`] picks up (lowercase).
pub const SUPPORTED_EXTENSIONS: &[&str] = &["pdf", "txt", "md"];

/// First non-empty trimmed line of `text`, or `"Unknown"`.
pub fn extract_display_name(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or(DEFAULT_DISPLAY_NAME)
        .to_string()
}

fn extension_of(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_lowercase)
}

/// Returns `true` if `path` has one of the [`SUPPORTED_EXTENSIONS`].
pub fn is_supported(path: &Path) -> bool {
    extension_of(path).is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext.as_str()))
}

/// Extracts the text of a single document.
pub async fn read_text(path: &Path) -> DocumentResult<String> {
    let io_err = |source| DocumentError::Io {
        path: path.to_path_buf(),
        source,
    };

    match extension_of(path).as_deref() {
        Some("pdf") => {
            let bytes = tokio::fs::read(path).await.map_err(io_err)?;
            tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&bytes))
                .await
                .map_err(|e| DocumentError::Pdf {
                    path: path.to_path_buf(),
                    reason: e.to_string(),
                })?
                .map_err(|e| DocumentError::Pdf {
                    path: path.to_path_buf(),
                    reason: e.to_string(),
                })
        }
        Some("txt" | "md") => tokio::fs::read_to_string(path).await.map_err(io_err),
        _ => Err(DocumentError::Unsupported {
            path: path.to_path_buf(),
        }),
    }
}

/// Loads one document as a candidate keyed by its file name.
///
/// Read errors and blank documents yield an unreadable record.
pub async fn load_document(path: &Path) -> CandidateRecord {
    let identifier = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    match read_text(path).await {
        Ok(text) => {
            let text = text.trim();
            if text.is_empty() {
                warn!(path = %path.display(), "Document contains no text");
                return CandidateRecord::unreadable(identifier);
            }
            debug!(path = %path.display(), chars = text.len(), "Document loaded");
            CandidateRecord::new(identifier, Some(text.to_string()))
                .with_display_name(extract_display_name(text))
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Document unreadable");
            CandidateRecord::unreadable(identifier)
        }
    }
}

/// Loads up to `max` supported documents from `dir`, in lexical file-name order.
///
/// Subdirectories and unsupported files are skipped. Only failing to list `dir` itself is an
/// error.
pub async fn load_directory(dir: &Path, max: usize) -> DocumentResult<Vec<CandidateRecord>> {
    let io_err = |source| DocumentError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let metadata = tokio::fs::metadata(dir).await.map_err(io_err)?;
    if !metadata.is_dir() {
        return Err(DocumentError::NotADirectory {
            path: dir.to_path_buf(),
        });
    }

    let mut paths: Vec<PathBuf> = Vec::new();
    let mut entries = tokio::fs::read_dir(dir).await.map_err(io_err)?;
    while let Some(entry) = entries.next_entry().await.map_err(io_err)? {
        let path = entry.path();
        let is_file = entry.file_type().await.map(|t| t.is_file()).unwrap_or(false);
        if is_file && is_supported(&path) {
            paths.push(path);
        } else {
            debug!(path = %path.display(), "Skipping entry");
        }
    }
    paths.sort();

    if paths.len() > max {
        warn!(
            found = paths.len(),
            kept = max,
            dir = %dir.display(),
            "Too many documents, loading only the first ones"
        );
        paths.truncate(max);
    }

    let mut records = Vec::with_capacity(paths.len());
    for path in &paths {
        records.push(load_document(path).await);
    }

    info!(
        dir = %dir.display(),
        loaded = records.len(),
        unreadable = records.iter().filter(|r| !r.is_readable()).count(),
        "Documents loaded"
    );

    Ok(records)
}
