// ABOUTME: Utility functions for the lazy-slides application
// ABOUTME: Path validation and safe mapping of request paths onto the document directory

use crate::errors::{Result, SlidesError};
use std::path::{Path, PathBuf};
use url::Url;

/// Validate that a file exists
pub fn validate_file_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(SlidesError::PathNotFoundError(path.to_path_buf()));
    }
    if !path.is_file() {
        return Err(SlidesError::ValidationError(format!(
            "Path is not a file: {:?}",
            path
        )));
    }
    Ok(())
}

pub fn get_absolute_path(path: &Path) -> Result<PathBuf> {
    std::fs::canonicalize(path).map_err(|e| {
        SlidesError::ValidationError(format!("Failed to get absolute path for {:?}: {}", path, e))
    })
}

/// Directory containing `path`, `.` for a bare file name.
pub fn parent_or_current(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Map a request target such as `/img/logo.png?v=2` onto a file under
/// `root`. Dot segments are resolved by URL normalisation, so the result
/// never leaves `root`. Returns `None` for the root path itself.
pub fn resolve_asset(root: &Path, request_target: &str) -> Option<PathBuf> {
    let base = Url::parse("http://localhost/").ok()?;
    let url = base.join(request_target).ok()?;

    let mut path = root.to_path_buf();
    let mut any = false;
    for segment in url.path_segments()? {
        if segment.is_empty() {
            continue;
        }
        let segment = decode_segment(segment);
        if segment == ".." || segment.contains(['/', '\\']) {
            return None;
        }
        path.push(segment);
        any = true;
    }

    any.then_some(path)
}

fn decode_segment(segment: &str) -> String {
    let escaped = segment.replace('+', "%2B").replace('&', "%26");
    url::form_urlencoded::parse(format!("s={}", escaped).as_bytes())
        .next()
        .map(|(_, value)| value.into_owned())
        .unwrap_or_else(|| segment.to_string())
}
