// ABOUTME: Slide segmentation for the lazy-slides application
// ABOUTME: Splits a Markdown document on top-level headings, ignoring fenced code

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::errors::SlidesError;

/// One unit of the presentation.
///
/// `raw_body` holds the exact source text of the slide, heading line included,
/// so joining every body of a parse in order gives back the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Slide {
    pub index: usize,
    pub title: String,
    pub raw_body: String,
    /// Zero-based line where `raw_body` starts in the document
    pub line: usize,
    /// Byte offset where `raw_body` starts in the document
    pub offset: usize,
}

/// What to do with text that appears before the first top-level heading.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LeadingContent {
    /// Present it as an untitled first slide
    #[default]
    Keep,
    /// Drop it, as long as at least one heading slide remains
    Discard,
}

impl FromStr for LeadingContent {
    type Err = SlidesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "keep" => Ok(LeadingContent::Keep),
            "discard" | "ignore" => Ok(LeadingContent::Discard),
            other => Err(SlidesError::ConfigError(format!(
                "Unknown leading content policy: {} (expected 'keep' or 'discard')",
                other
            ))),
        }
    }
}

impl fmt::Display for LeadingContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LeadingContent::Keep => write!(f, "keep"),
            LeadingContent::Discard => write!(f, "discard"),
        }
    }
}

/// Line-level Markdown splitter. Parsing is total: any text, including
/// empty input or an unterminated fence, yields at least one slide.
#[derive(Debug, Clone, Copy, Default)]
pub struct SlideParser {
    leading: LeadingContent,
}

struct Boundary {
    title: String,
    offset: usize,
    line: usize,
}

impl SlideParser {
    pub fn new(leading: LeadingContent) -> Self {
        Self { leading }
    }

    pub fn leading_content(&self) -> LeadingContent {
        self.leading
    }

    pub fn parse(&self, text: &str) -> Vec<Slide> {
        let mut boundaries = find_boundaries(text);

        let Some(first_offset) = boundaries.first().map(|first| first.offset) else {
            return vec![Slide {
                index: 0,
                title: String::new(),
                raw_body: text.to_string(),
                line: 0,
                offset: 0,
            }];
        };

        let mut slides = Vec::with_capacity(boundaries.len() + 1);
        let leading = &text[..first_offset];

        if leading.trim().is_empty() {
            // Blank lines ahead of the first heading ride along with it
            boundaries[0].offset = 0;
            boundaries[0].line = 0;
        } else if self.leading == LeadingContent::Keep {
            slides.push(Slide {
                index: 0,
                title: String::new(),
                raw_body: leading.to_string(),
                line: 0,
                offset: 0,
            });
        }

        for (i, boundary) in boundaries.iter().enumerate() {
            let end = boundaries
                .get(i + 1)
                .map_or(text.len(), |next| next.offset);
            slides.push(Slide {
                index: slides.len(),
                title: boundary.title.clone(),
                raw_body: text[boundary.offset..end].to_string(),
                line: boundary.line,
                offset: boundary.offset,
            });
        }

        slides
    }
}

/// Parse with the default policy, keeping leading content as a slide.
pub fn parse(text: &str) -> Vec<Slide> {
    SlideParser::default().parse(text)
}

/// Index of the slide whose body contains the given zero-based line.
pub fn slide_at_line(slides: &[Slide], line: usize) -> usize {
    slides
        .iter()
        .rev()
        .find(|slide| slide.line <= line)
        .map_or(0, |slide| slide.index)
}

fn find_boundaries(text: &str) -> Vec<Boundary> {
    let mut boundaries = Vec::new();
    let mut fence: Option<Fence> = None;
    let mut offset = 0;

    for (line_no, line) in text.split_inclusive('\n').enumerate() {
        let content = line.trim_end_matches(['\n', '\r']);

        match &fence {
            Some(open) => {
                if open.closes(content) {
                    fence = None;
                }
            }
            None => {
                if let Some(open) = Fence::open(content) {
                    fence = Some(open);
                } else if let Some(title) = heading_title(content) {
                    boundaries.push(Boundary {
                        title,
                        offset,
                        line: line_no,
                    });
                }
            }
        }

        offset += line.len();
    }

    boundaries
}

/// Up to three spaces of indentation are allowed before block markers.
fn strip_indent(line: &str) -> Option<&str> {
    let rest = line.trim_start_matches(' ');
    if line.len() - rest.len() > 3 {
        None
    } else {
        Some(rest)
    }
}

/// Title of a top-level heading line, or `None` if the line is not one.
fn heading_title(line: &str) -> Option<String> {
    let rest = strip_indent(line)?.strip_prefix('#')?;
    if !(rest.is_empty() || rest.starts_with(' ') || rest.starts_with('\t')) {
        return None;
    }

    let text = rest.trim();
    let without_closing = text.trim_end_matches('#');
    let title = if without_closing.is_empty() {
        ""
    } else if without_closing.ends_with([' ', '\t']) {
        without_closing.trim_end()
    } else {
        text
    };

    Some(title.to_string())
}

struct Fence {
    marker: char,
    len: usize,
}

impl Fence {
    fn open(line: &str) -> Option<Fence> {
        let rest = strip_indent(line)?;
        let marker = rest.chars().next()?;
        if marker != '`' && marker != '~' {
            return None;
        }

        let len = rest.chars().take_while(|&c| c == marker).count();
        if len < 3 {
            return None;
        }
        // Backtick info strings may not contain backticks
        if marker == '`' && rest[len..].contains('`') {
            return None;
        }

        Some(Fence { marker, len })
    }

    fn closes(&self, line: &str) -> bool {
        let Some(rest) = strip_indent(line) else {
            return false;
        };
        let run = rest.chars().take_while(|&c| c == self.marker).count();
        run >= self.len && rest[run..].trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_title_forms() {
        assert_eq!(heading_title("# Title"), Some("Title".to_string()));
        assert_eq!(heading_title("#\tTabbed"), Some("Tabbed".to_string()));
        assert_eq!(heading_title("   # Indented"), Some("Indented".to_string()));
        assert_eq!(heading_title("#"), Some(String::new()));
        assert_eq!(heading_title("# Closed ##"), Some("Closed".to_string()));
        assert_eq!(heading_title("# C#"), Some("C#".to_string()));
    }

    #[test]
    fn test_not_top_level_headings() {
        assert_eq!(heading_title("#Title"), None);
        assert_eq!(heading_title("## Subtitle"), None);
        assert_eq!(heading_title("    # indented code"), None);
        assert_eq!(heading_title("text # with hash"), None);
    }

    #[test]
    fn test_fence_open_and_close() {
        let fence = Fence::open("```rust").expect("backtick fence");
        assert_eq!(fence.len, 3);
        assert!(fence.closes("```"));
        assert!(fence.closes("`````  "));
        assert!(!fence.closes("``"));
        assert!(!fence.closes("```rust"));
        assert!(!fence.closes("~~~"));

        let tilde = Fence::open("~~~~").expect("tilde fence");
        assert!(!tilde.closes("~~~"));
        assert!(tilde.closes("~~~~"));

        assert!(Fence::open("``").is_none());
        assert!(Fence::open("```a`b").is_none());
        assert!(Fence::open("    ```").is_none());
    }
}
