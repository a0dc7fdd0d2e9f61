// ABOUTME: Theme registry for the lazy-slides application
// ABOUTME: Holds the ordered, non-empty list of visual themes and cycles through it

use serde::Serialize;

use crate::errors::{Result, SlidesError};
use crate::resources::ResourceFile;

/// Built-in themes, styled by `assets/base.css` through their class names.
pub const BUILTIN_THEMES: &[&str] = &["default", "dark", "sepia", "contrast"];

/// A theme descriptor: the CSS class applied to the slide surface and an
/// optional stylesheet bundle that defines it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub name: String,
    pub stylesheet: Option<ResourceFile>,
}

impl Theme {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            stylesheet: None,
        }
    }

    pub fn with_stylesheet(name: &str, stylesheet: ResourceFile) -> Self {
        Self {
            name: name.to_string(),
            stylesheet: Some(stylesheet),
        }
    }

    /// Parse `name` or `name=path-or-url`.
    pub fn parse(spec: &str) -> Result<Self> {
        let (name, stylesheet) = match spec.split_once('=') {
            Some((name, path)) => (name.trim(), Some(ResourceFile::new(path))),
            None => (spec.trim(), None),
        };

        let valid = !name.is_empty()
            && name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(SlidesError::ConfigError(format!(
                "Invalid theme name: {:?}",
                name
            )));
        }

        Ok(match stylesheet {
            Some(sheet) if !sheet.path.is_empty() => Theme::with_stylesheet(name, sheet),
            _ => Theme::new(name),
        })
    }
}

/// What the presentation surface needs to apply a theme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThemeDescriptor {
    pub id: usize,
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct ThemeRegistry {
    themes: Vec<Theme>,
}

impl Default for ThemeRegistry {
    fn default() -> Self {
        Self {
            themes: BUILTIN_THEMES.iter().map(|name| Theme::new(name)).collect(),
        }
    }
}

impl ThemeRegistry {
    pub fn new(themes: Vec<Theme>) -> Result<Self> {
        if themes.is_empty() {
            return Err(SlidesError::ConfigError(
                "At least one theme is required".to_string(),
            ));
        }
        Ok(Self { themes })
    }

    /// Build from a list of `name` / `name=stylesheet` specs.
    pub fn from_specs<S: AsRef<str>>(specs: &[S]) -> Result<Self> {
        let themes = specs
            .iter()
            .map(|spec| Theme::parse(spec.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Self::new(themes)
    }

    pub fn count(&self) -> usize {
        self.themes.len()
    }

    /// Defined for every index through wraparound.
    pub fn theme_at(&self, index: usize) -> &Theme {
        &self.themes[index % self.themes.len()]
    }

    pub fn descriptor(&self, index: usize) -> ThemeDescriptor {
        ThemeDescriptor {
            id: index % self.themes.len(),
            name: self.theme_at(index).name.clone(),
        }
    }

    pub fn themes(&self) -> &[Theme] {
        &self.themes
    }
}
