// ABOUTME: Library module for the lazy-slides program.
// ABOUTME: Slide segmentation, presentation state and the live editor/presenter host.

pub mod config;
pub mod default_content;
pub mod errors;
pub mod html;
pub mod keys;
pub mod presentation;
pub mod render;
pub mod resources;
pub mod server;
pub mod slides;
pub mod sync;
pub mod theme;
pub mod utils;
pub mod watch;

pub use config::Config;
pub use default_content::DEFAULT_DOCUMENT;
pub use errors::{Result, SlidesError};
pub use keys::{dispatch, Command, Key};
pub use presentation::{Mode, PresentationController, PresentationState};
pub use render::{render_view, ComrakRenderer, MarkdownRenderer, View};
pub use resources::ResourceFile;
pub use server::serve;
pub use slides::{parse, slide_at_line, LeadingContent, Slide, SlideParser};
pub use sync::{ClientMessage, ServerMessage, Session, SessionEvent};
pub use theme::{Theme, ThemeRegistry};
