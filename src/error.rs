use thiserror::Error;

#[derive(Error, Debug)]
pub enum DirhashError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unsupported bit size: {0}. Must be 256, 512, 1024 or 2048")]
    UnsupportedWidth(u32),

    #[error("Invalid bit size: {0}")]
    InvalidWidth(String),

    #[error("Unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),

    #[error("Invalid chunk size: {0}. Must be at least 1 byte")]
    InvalidChunkSize(usize),

    #[error("Invalid worker count: {0}. Must be at least 1")]
    InvalidWorkerCount(usize),

    #[error("Worker pool error: {0}")]
    ThreadPool(String),

    #[error("Failed to allocate {bytes} bytes for {what}")]
    Allocation { what: &'static str, bytes: usize },
}

pub type Result<T> = std::result::Result<T, DirhashError>;
