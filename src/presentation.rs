// ABOUTME: Presentation state machine for the lazy-slides application
// ABOUTME: Owns navigation, display mode, theme and overlay state behind named commands

use log::debug;
use serde::Serialize;

use crate::keys::Command;
use crate::slides::{Slide, SlideParser};
use crate::theme::ThemeRegistry;

/// Whether the raw editor is shown next to the rendered slide.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Editing,
    Presenting,
}

impl Mode {
    pub fn toggled(self) -> Self {
        match self {
            Mode::Editing => Mode::Presenting,
            Mode::Presenting => Mode::Editing,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresentationState {
    pub slides: Vec<Slide>,
    pub current_index: usize,
    pub mode: Mode,
    pub theme_id: usize,
    pub help_visible: bool,
    pub expose_mode: bool,
}

/// Single owner of [`PresentationState`]. Every command is total and
/// saturates at the boundaries instead of failing.
#[derive(Debug, Clone)]
pub struct PresentationController {
    parser: SlideParser,
    themes: ThemeRegistry,
    state: PresentationState,
}

impl PresentationController {
    pub fn new(parser: SlideParser, themes: ThemeRegistry, text: &str) -> Self {
        Self {
            state: PresentationState {
                slides: parser.parse(text),
                current_index: 0,
                mode: Mode::default(),
                theme_id: 0,
                help_visible: false,
                expose_mode: false,
            },
            parser,
            themes,
        }
    }

    pub fn state(&self) -> &PresentationState {
        &self.state
    }

    pub fn themes(&self) -> &ThemeRegistry {
        &self.themes
    }

    pub fn slides(&self) -> &[Slide] {
        &self.state.slides
    }

    pub fn current_slide(&self) -> &Slide {
        &self.state.slides[self.state.current_index]
    }

    /// The current slide, or every slide while expose mode is on.
    pub fn visible_slides(&self) -> &[Slide] {
        if self.state.expose_mode {
            &self.state.slides
        } else {
            let i = self.state.current_index;
            &self.state.slides[i..=i]
        }
    }

    fn last_index(&self) -> usize {
        self.state.slides.len().saturating_sub(1)
    }

    pub fn set_document(&mut self, text: &str) {
        self.state.slides = self.parser.parse(text);
        self.state.current_index = self.state.current_index.min(self.last_index());
        debug!(
            "Document parsed into {} slides, current slide {}",
            self.state.slides.len(),
            self.state.current_index
        );
    }

    pub fn next(&mut self) {
        self.state.current_index = (self.state.current_index + 1).min(self.last_index());
    }

    pub fn previous(&mut self) {
        self.state.current_index = self.state.current_index.saturating_sub(1);
    }

    pub fn go_to(&mut self, index: usize) {
        self.state.current_index = index.min(self.last_index());
    }

    pub fn toggle_mode(&mut self) {
        self.state.mode = self.state.mode.toggled();
    }

    pub fn cycle_theme(&mut self) {
        self.state.theme_id = (self.state.theme_id + 1) % self.themes.count();
    }

    pub fn toggle_help(&mut self) {
        self.state.help_visible = !self.state.help_visible;
    }

    pub fn toggle_expose(&mut self) {
        self.state.expose_mode = !self.state.expose_mode;
    }

    pub fn apply(&mut self, command: Command) {
        match command {
            Command::Next => self.next(),
            Command::Previous => self.previous(),
            Command::ToggleMode => self.toggle_mode(),
            Command::CycleTheme => self.cycle_theme(),
            Command::ToggleHelp => self.toggle_help(),
            Command::ToggleExpose => self.toggle_expose(),
        }
    }
}
