use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("object not found: {0}")]
    NotFound(String),

    #[error("invalid object key: {0}")]
    InvalidKey(String),

    #[error("object {0} is not valid UTF-8")]
    NotUtf8(String),

    #[error("invalid store configuration: {0}")]
    Config(String),

    #[error("catalog row {row}: {message}")]
    Catalog { row: u64, message: String },

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "s3")]
    #[error("s3 error: {0}")]
    S3(String),

    #[error("{0}")]
    Other(String),
}
