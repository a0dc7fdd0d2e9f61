// ABOUTME: Configuration module for the lazy-slides application
// ABOUTME: Provides defaults, environment variable handling and derived settings

use crate::errors::Result;
use crate::resources::ResourceFile;
use crate::slides::{LeadingContent, SlideParser};
use crate::theme::{ThemeRegistry, BUILTIN_THEMES};
use log::warn;
use std::env;

/// Application configuration. CLI flags override these after `from_env`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Defaults to `port + 1` when unset
    pub ws_port: Option<u16>,
    pub debounce_ms: u64,
    /// Theme specs, `name` or `name=stylesheet`
    pub themes: Vec<String>,
    pub leading_content: LeadingContent,
    pub embed_resources: bool,
    pub css_files: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            ws_port: None,
            debounce_ms: 200,
            themes: BUILTIN_THEMES.iter().map(|name| name.to_string()).collect(),
            leading_content: LeadingContent::Keep,
            embed_resources: true,
            css_files: Vec::new(),
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from `LAZY_SLIDES_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a configuration from any key lookup. Unparseable values keep
    /// their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let host = lookup("LAZY_SLIDES_HOST")
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(defaults.host);
        let port = lookup("LAZY_SLIDES_PORT")
            .and_then(|s| s.trim().parse::<u16>().ok())
            .unwrap_or(defaults.port);
        let ws_port = lookup("LAZY_SLIDES_WS_PORT").and_then(|s| s.trim().parse::<u16>().ok());
        let debounce_ms = lookup("LAZY_SLIDES_DEBOUNCE_MS")
            .and_then(|s| s.trim().parse::<u64>().ok())
            .unwrap_or(defaults.debounce_ms);
        let themes = match lookup("LAZY_SLIDES_THEMES").map(|s| split_list(&s)) {
            Some(list) if !list.is_empty() => match ThemeRegistry::from_specs(&list) {
                Ok(_) => list,
                Err(e) => {
                    warn!("{}, using the built-in themes", e);
                    defaults.themes
                }
            },
            _ => defaults.themes,
        };
        let leading_content = match lookup("LAZY_SLIDES_LEADING_CONTENT") {
            Some(value) => value.parse::<LeadingContent>().unwrap_or_else(|e| {
                warn!("{}, keeping leading content", e);
                defaults.leading_content
            }),
            None => defaults.leading_content,
        };
        let embed_resources = lookup("LAZY_SLIDES_EMBED_RESOURCES")
            .map(|s| s.to_lowercase() != "false")
            .unwrap_or(defaults.embed_resources);
        let css_files = lookup("LAZY_SLIDES_CSS")
            .map(|s| split_list(&s))
            .unwrap_or(defaults.css_files);

        Self {
            host,
            port,
            ws_port,
            debounce_ms,
            themes,
            leading_content,
            embed_resources,
            css_files,
        }
    }

    pub fn ws_port(&self) -> u16 {
        self.ws_port.unwrap_or_else(|| self.port.saturating_add(1))
    }

    pub fn parser(&self) -> SlideParser {
        SlideParser::new(self.leading_content)
    }

    pub fn theme_registry(&self) -> Result<ThemeRegistry> {
        ThemeRegistry::from_specs(&self.themes)
    }

    pub fn css_resources(&self) -> Vec<ResourceFile> {
        self.css_files
            .iter()
            .map(|path| ResourceFile::new(path))
            .collect()
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(String::from)
        .collect()
}
