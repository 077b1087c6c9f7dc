use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to extract PDF text from {path}: {reason}")]
    Pdf { path: PathBuf, reason: String },

    #[error("unsupported document type: {path}")]
    Unsupported { path: PathBuf },

    #[error("{path} is not a directory")]
    NotADirectory { path: PathBuf },
}

pub type DocumentResult<T> = Result<T, DocumentError>;
