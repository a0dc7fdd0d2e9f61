// ABOUTME: Markdown rendering for the lazy-slides application
// ABOUTME: Turns the visible slides into HTML fragments, isolating renderer failures

use comrak::{markdown_to_html, ComrakOptions};
use log::warn;
use serde::Serialize;
use std::panic::{self, AssertUnwindSafe};

use crate::errors::Result;
use crate::presentation::{Mode, PresentationController};
use crate::slides::Slide;
use crate::theme::ThemeDescriptor;

/// Converts one slide's Markdown into an HTML fragment.
pub trait MarkdownRenderer {
    fn render(&self, markdown: &str) -> Result<String>;
}

/// GitHub-flavoured rendering through comrak.
pub struct ComrakRenderer {
    pub allow_raw_html: bool,
}

impl Default for ComrakRenderer {
    fn default() -> Self {
        Self {
            allow_raw_html: true,
        }
    }
}

impl ComrakRenderer {
    fn options(&self) -> ComrakOptions {
        let mut options = ComrakOptions::default();
        options.extension.table = true;
        options.extension.strikethrough = true;
        options.extension.autolink = true;
        options.extension.tasklist = true;
        options.render.unsafe_ = self.allow_raw_html;
        options
    }
}

impl MarkdownRenderer for ComrakRenderer {
    fn render(&self, markdown: &str) -> Result<String> {
        Ok(markdown_to_html(markdown, &self.options()))
    }
}

/// Render a slide, falling back to empty HTML if the renderer errors or
/// panics so the rest of the deck stays usable.
pub fn render_or_empty(renderer: &dyn MarkdownRenderer, slide: &Slide) -> String {
    match panic::catch_unwind(AssertUnwindSafe(|| renderer.render(&slide.raw_body))) {
        Ok(Ok(html)) => html,
        Ok(Err(e)) => {
            warn!("Renderer failed on slide {}: {}", slide.index, e);
            String::new()
        }
        Err(_) => {
            warn!("Renderer panicked on slide {}", slide.index);
            String::new()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedSlide {
    pub index: usize,
    pub title: String,
    pub html: String,
}

/// Everything the display surface needs for one frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct View {
    pub slides: Vec<RenderedSlide>,
    pub current_index: usize,
    pub slide_count: usize,
    pub mode: Mode,
    pub theme: ThemeDescriptor,
    pub help_visible: bool,
    pub expose_mode: bool,
}

pub fn render_view(controller: &PresentationController, renderer: &dyn MarkdownRenderer) -> View {
    let state = controller.state();
    let slides = controller
        .visible_slides()
        .iter()
        .map(|slide| RenderedSlide {
            index: slide.index,
            title: slide.title.clone(),
            html: render_or_empty(renderer, slide),
        })
        .collect();

    View {
        slides,
        current_index: state.current_index,
        slide_count: state.slides.len(),
        mode: state.mode,
        theme: controller.themes().descriptor(state.theme_id),
        help_visible: state.help_visible,
        expose_mode: state.expose_mode,
    }
}
