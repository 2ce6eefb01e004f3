//! Error types for the grid editor

use thiserror::Error;

/// Result type alias for editor operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while exporting, uploading or persisting art
#[derive(Error, Debug)]
pub enum Error {
    /// Filesystem access failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding or decoding failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The SQLite gallery backend failed
    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Rasterizing or encoding the grid failed
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// Transport-level HTTP failure (connect, non-2xx, body read)
    #[error("Network error: {0}")]
    Http(#[from] reqwest::Error),

    /// The image host answered but the response was unusable
    #[error("Upload failed: {0}")]
    Upload(String),

    /// A background worker panicked or was cancelled
    #[error("Background task failed: {0}")]
    Task(String),

    /// Persisted gallery state could not be used
    #[error("Storage error: {0}")]
    Storage(String),
}
