use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("CSV export failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON export failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("export write failed: {0}")]
    Io(#[from] std::io::Error),
}

pub type ExportResult<T> = Result<T, ExportError>;
