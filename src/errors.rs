use thiserror::Error;

/// Load failures that leave the dashboard without a dataset.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),
    #[error("file contains no records")]
    NoRecords,
    #[error("row {row}: {reason}")]
    MalformedRow { row: usize, reason: String },
}
