// ABOUTME: HTML page generation for the lazy-slides application
// ABOUTME: Builds the editor/presenter page shell with theme styles and the live client

use crate::errors::{Result, SlidesError};
use crate::keys::SHORTCUTS;
use crate::presentation::Mode;
use crate::render::{RenderedSlide, View};
use crate::resources::ResourceFile;
use crate::theme::ThemeRegistry;
use log::{info, warn};
use std::fs;
use std::path::Path;

const BASE_CSS: &str = include_str!("../assets/base.css");
const CLIENT_JS: &str = include_str!("../assets/client.js");

/// Inputs for the page shell.
pub struct PageConfig<'a> {
    pub themes: &'a ThemeRegistry,
    pub css_files: &'a [ResourceFile],
    pub embed_resources: bool,
    /// Port of the WebSocket endpoint the client connects back to
    pub ws_port: u16,
}

/// Build the full page, pre-rendering `view` so it is readable before the
/// live connection comes up.
pub fn generate_page(config: &PageConfig, view: &View, document: &str) -> String {
    let title = view
        .slides
        .iter()
        .map(|slide| slide.title.as_str())
        .find(|title| !title.is_empty())
        .unwrap_or("Presentation");

    let mut page = String::from("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    page.push_str("<meta charset=\"UTF-8\">\n");
    page.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n");
    page.push_str(&format!("<title>{}</title>\n", escape(title)));
    page.push_str(&format!("<style>{}</style>\n", BASE_CSS));

    let stylesheets = config
        .themes
        .themes()
        .iter()
        .filter_map(|theme| theme.stylesheet.as_ref())
        .chain(config.css_files.iter());
    for css in stylesheets {
        match css.stylesheet_tag(config.embed_resources) {
            Ok(tag) => {
                page.push_str(&tag);
                page.push('\n');
            }
            // Skip stylesheets that cannot be loaded
            Err(e) => warn!("Failed to include stylesheet {}: {}", css.path, e),
        }
    }
    page.push_str("</head>\n<body>\n");

    page.push_str(&format!(
        "<main class=\"{}\" id=\"surface\" data-mode=\"{}\"{}>\n",
        escape(&view.theme.name),
        mode_name(view),
        if view.expose_mode { " data-expose" } else { "" }
    ));
    page.push_str(&format!(
        "<textarea id=\"editor\" spellcheck=\"false\">{}</textarea>\n",
        escape(document)
    ));

    page.push_str("<section id=\"slides\">\n");
    for slide in &view.slides {
        page.push_str(&slide_fragment(slide, view.current_index));
        page.push('\n');
    }
    page.push_str("</section>\n");

    page.push_str(&help_overlay(view.help_visible));
    page.push_str("</main>\n");

    page.push_str(&format!(
        "<script>window.LAZY_SLIDES = {{ wsPort: {} }};</script>\n",
        config.ws_port
    ));
    page.push_str(&format!("<script>{}</script>\n", CLIENT_JS));
    page.push_str("</body>\n</html>");

    page
}

pub fn slide_fragment(slide: &RenderedSlide, current_index: usize) -> String {
    format!(
        "<div class=\"slide{}\" data-index=\"{}\">{}</div>",
        if slide.index == current_index {
            " current"
        } else {
            ""
        },
        slide.index,
        slide.html
    )
}

fn help_overlay(visible: bool) -> String {
    let mut html = format!(
        "<aside id=\"help\"{}>\n<table>\n",
        if visible { "" } else { " hidden" }
    );
    for (keys, command) in SHORTCUTS {
        html.push_str(&format!(
            "<tr><td><kbd>{}</kbd></td><td>{}</td></tr>\n",
            escape(keys),
            escape(command.description())
        ));
    }
    html.push_str("</table>\n</aside>\n");
    html
}

fn mode_name(view: &View) -> &'static str {
    match view.mode {
        Mode::Editing => "editing",
        Mode::Presenting => "presenting",
    }
}

pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Read a Markdown document from disk.
pub fn read_document(path: &Path) -> Result<String> {
    info!("Reading markdown document: {:?}", path);
    if !path.exists() {
        return Err(SlidesError::PathNotFoundError(path.to_path_buf()));
    }
    fs::read_to_string(path).map_err(SlidesError::FileReadError)
}
