// ABOUTME: Watch module for monitoring the presented Markdown file
// ABOUTME: Feeds the full file contents into the session whenever it changes on disk

use log::{debug, error, info};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use std::time::Duration;

use notify::{RecommendedWatcher, RecursiveMode, Watcher};
use notify_debouncer_full::{new_debouncer, DebounceEventResult, Debouncer, FileIdMap};

use crate::errors::{Result, SlidesError};
use crate::sync::SessionEvent;
use crate::utils;

/// Dropping this stops the watch.
pub type DocumentWatcher = Debouncer<RecommendedWatcher, FileIdMap>;

pub struct WatchConfig {
    pub markdown_path: PathBuf,
    pub debounce_ms: u64,
}

/// Start watching the document. Every relevant batch of events re-reads the
/// whole file, so the last change to settle is always the one delivered.
pub fn watch_document(config: &WatchConfig, events: Sender<SessionEvent>) -> Result<DocumentWatcher> {
    utils::validate_file_exists(&config.markdown_path)?;
    let target = utils::get_absolute_path(&config.markdown_path)?;
    let watch_dir = utils::parent_or_current(&target);

    let handler_target = target.clone();
    let mut debouncer = new_debouncer(
        Duration::from_millis(config.debounce_ms),
        None,
        move |result: DebounceEventResult| match result {
            Ok(batch) => {
                let relevant = batch
                    .iter()
                    .any(|event| event.paths.iter().any(|p| is_relevant_path(p, &handler_target)));
                if !relevant {
                    return;
                }
                match fs::read_to_string(&handler_target) {
                    Ok(text) => {
                        debug!("Document changed on disk ({} bytes)", text.len());
                        if events.send(SessionEvent::FileChanged(text)).is_err() {
                            debug!("Session closed, dropping file change");
                        }
                    }
                    // Editors that save by rename leave a brief gap; the
                    // follow-up create event delivers the new text
                    Err(e) => debug!("Could not read {:?} yet: {}", handler_target, e),
                }
            }
            Err(errors) => {
                for e in errors {
                    error!("Watch error: {:?}", e);
                }
            }
        },
    )
    .map_err(|e| SlidesError::WatchError(format!("Failed to create file watcher: {}", e)))?;

    debouncer
        .watcher()
        .watch(&watch_dir, RecursiveMode::NonRecursive)
        .map_err(|e| {
            SlidesError::WatchError(format!("Failed to watch directory {:?}: {}", watch_dir, e))
        })?;

    info!("Watching {:?} for changes", target);
    Ok(debouncer)
}

/// Whether an event path refers to the watched document.
pub fn is_relevant_path(path: &Path, target: &Path) -> bool {
    if path == target {
        return true;
    }
    match utils::get_absolute_path(path) {
        Ok(abs) => abs == target,
        // The file may be mid-replace; fall back to comparing names in the same directory
        Err(_) => path.file_name() == target.file_name() && path.parent() == target.parent(),
    }
}
