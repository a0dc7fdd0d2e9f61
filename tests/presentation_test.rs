use proptest::prelude::*;

use lazy_slides::{
    dispatch, parse, Key, LeadingContent, Mode, PresentationController, Slide, SlideParser,
    ThemeRegistry, DEFAULT_DOCUMENT,
};

const SAMPLES: &[&str] = &[
    DEFAULT_DOCUMENT,
    "",
    "\n",
    "# One",
    "before\n# One\n# Two\n",
    "# Windows\r\nline\r\n# Endings\r\n",
    "~~~\n# inside\n~~~\n# outside\n",
    "````\n```\n# still inside\n````\n# out\n",
    "    # indented code\n# real\n",
];

fn titled(slides: &[Slide]) -> usize {
    slides.iter().filter(|s| !s.title.is_empty()).count()
}

#[test]
fn round_trip_holds_for_samples() {
    for doc in SAMPLES {
        let rebuilt: String = parse(doc).iter().map(|s| s.raw_body.as_str()).collect();
        assert_eq!(&rebuilt, doc);
    }
}

#[test]
fn indices_are_contiguous_and_lines_increase() {
    for doc in SAMPLES {
        let slides = parse(doc);
        assert!(!slides.is_empty());
        for (i, slide) in slides.iter().enumerate() {
            assert_eq!(slide.index, i);
        }
        for pair in slides.windows(2) {
            assert!(pair[0].line < pair[1].line);
            assert!(pair[0].offset < pair[1].offset);
        }
    }
}

#[test]
fn leading_slide_only_for_non_blank_preamble() {
    let slides = parse("before\n# One\n# Two\n");
    assert_eq!(slides.len(), 3);
    assert_eq!(titled(&slides), 2);

    let slides = parse("\n\n# One\n# Two\n");
    assert_eq!(slides.len(), 2);
}

#[test]
fn nested_fence_markers_do_not_close_early() {
    let slides = parse("````\n```\n# still inside\n````\n# out\n");
    assert_eq!(slides.len(), 2);
    assert_eq!(slides[1].title, "out");
}

#[test]
fn keyboard_session_walkthrough() {
    let mut controller = PresentationController::new(
        SlideParser::new(LeadingContent::Discard),
        ThemeRegistry::default(),
        DEFAULT_DOCUMENT,
    );
    assert_eq!(controller.slides().len(), 4);

    let press = |controller: &mut PresentationController, name: &str| {
        if let Some(command) = dispatch(&Key::from_dom(name)) {
            controller.apply(command);
        }
    };

    for _ in 0..6 {
        press(&mut controller, "ArrowRight");
    }
    assert_eq!(controller.current_slide().title, "Keys definitions");

    press(&mut controller, "ArrowUp");
    assert_eq!(controller.current_slide().title, "Code snippets");

    press(&mut controller, " ");
    press(&mut controller, "Enter");
    assert_eq!(controller.state().mode, Mode::Presenting);

    for _ in 0..controller.themes().count() {
        press(&mut controller, "t");
    }
    assert_eq!(controller.state().theme_id, 0);
}

const LINE_SHAPES: &[&str] = &["# Title", "## Sub", "```", "~~~", "text", ""];

/// Slide count by a plain line walk: one per unfenced `# ` heading, plus an
/// untitled slide when non-blank text precedes the first one.
fn expected_slide_count(lines: &[&str]) -> usize {
    let mut fence: Option<&str> = None;
    let mut headings = 0;
    let mut preamble = false;

    for line in lines {
        match (fence, *line) {
            (Some(open), l) if l == open => fence = None,
            (Some(_), _) => {}
            (None, "```") | (None, "~~~") => {
                fence = Some(*line);
                preamble |= headings == 0;
            }
            (None, "# Title") => headings += 1,
            (None, "") => {}
            (None, _) => preamble |= headings == 0,
        }
    }

    match headings {
        0 => 1,
        n => n + usize::from(preamble),
    }
}

proptest! {
    #[test]
    fn parse_is_lossless_and_counts_top_level_headings(
        lines in prop::collection::vec((prop::sample::select(LINE_SHAPES), any::<bool>()), 0..40),
        final_newline in any::<bool>(),
    ) {
        let mut text = String::new();
        for (i, (line, crlf)) in lines.iter().enumerate() {
            text.push_str(line);
            if i + 1 < lines.len() || final_newline {
                text.push_str(if *crlf { "\r\n" } else { "\n" });
            }
        }

        let slides = parse(&text);
        let shapes: Vec<&str> = lines.iter().map(|(line, _)| *line).collect();

        prop_assert_eq!(slides.iter().map(|s| s.raw_body.as_str()).collect::<String>(), text.clone());
        prop_assert_eq!(slides.len(), expected_slide_count(&shapes));

        let mut offset = 0;
        for (i, slide) in slides.iter().enumerate() {
            prop_assert_eq!(slide.index, i);
            prop_assert_eq!(slide.offset, offset);
            prop_assert_eq!(slide.line, text[..offset].matches('\n').count());
            offset += slide.raw_body.len();
        }
    }
}
