// ABOUTME: Error types for the lazy-slides application
// ABOUTME: Covers the fallible edges around the total slide/presentation core

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SlidesError {
    #[error("Failed to read file: {0}")]
    FileReadError(#[from] std::io::Error),

    #[error("Failed to fetch remote resource: {0}")]
    FetchError(#[from] reqwest::Error),

    #[error("Markdown rendering error: {0}")]
    RenderError(String),

    #[error("Input validation error: {0}")]
    ValidationError(String),

    #[error("Path not found: {0}")]
    PathNotFoundError(PathBuf),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Server error: {0}")]
    ServerError(String),

    #[error("Watch error: {0}")]
    WatchError(String),
}

impl From<tungstenite::Error> for SlidesError {
    fn from(err: tungstenite::Error) -> Self {
        SlidesError::ServerError(format!("WebSocket failure: {}", err))
    }
}

pub type Result<T> = std::result::Result<T, SlidesError>;
