// ABOUTME: Resource handling for the lazy-slides application
// ABOUTME: Loads theme stylesheets from disk or over HTTP

use crate::errors::{SlidesError, Result};
use crate::html::escape;
use log::{info, warn};
use reqwest::blocking::Client;
use std::fs;
use std::path::Path;
use std::time::Duration;

/// A stylesheet that is either a local file or a URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceFile {
    pub path: String,
    pub is_remote: bool,
}

impl ResourceFile {
    pub fn new(path: &str) -> Self {
        let path = path.trim();
        let is_remote = path.starts_with("http://") || path.starts_with("https://");
        Self {
            path: path.to_string(),
            is_remote,
        }
    }

    /// Read the resource, fetching it when it is remote.
    pub fn content(&self) -> Result<String> {
        if self.is_remote {
            self.fetch_remote_content()
        } else {
            self.read_local_content()
        }
    }

    /// Fetch with up to three attempts and exponential backoff
    fn fetch_remote_content(&self) -> Result<String> {
        info!("Fetching remote resource: {}", self.path);

        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(SlidesError::FetchError)?;

        let mut retry_delay = 500;
        let mut last_error = None;

        for attempt in 1..=3 {
            match client.get(&self.path).send() {
                Ok(response) if response.status().is_success() => {
                    return response.text().map_err(SlidesError::FetchError);
                }
                Ok(response) => {
                    last_error = Some(SlidesError::ValidationError(format!(
                        "HTTP error: {}",
                        response.status()
                    )));
                }
                Err(e) => last_error = Some(SlidesError::FetchError(e)),
            }

            info!(
                "Fetch attempt {} for {} failed, retrying in {} ms",
                attempt, self.path, retry_delay
            );
            std::thread::sleep(Duration::from_millis(retry_delay));
            retry_delay *= 2;
        }

        Err(last_error.unwrap_or_else(|| {
            SlidesError::ValidationError("Unknown error fetching resource".to_string())
        }))
    }

    fn read_local_content(&self) -> Result<String> {
        info!("Reading local resource: {}", self.path);
        let path = Path::new(&self.path);
        if !path.exists() {
            return Err(SlidesError::PathNotFoundError(path.to_path_buf()));
        }

        fs::read_to_string(path).map_err(SlidesError::FileReadError)
    }

    /// Build the stylesheet tag for this resource. With `embed` set the
    /// content is inlined. A remote stylesheet that cannot be fetched is
    /// linked instead, so the browser can still try.
    pub fn stylesheet_tag(&self, embed: bool) -> Result<String> {
        if !embed {
            return Ok(self.link_tag());
        }
        match self.content() {
            Ok(content) => Ok(format!("<style>{}</style>", content)),
            Err(e) if self.is_remote => {
                warn!("Could not embed {}, linking instead: {}", self.path, e);
                Ok(self.link_tag())
            }
            Err(e) => Err(e),
        }
    }

    fn link_tag(&self) -> String {
        format!(r#"<link rel="stylesheet" href="{}">"#, escape(&self.path))
    }
}
