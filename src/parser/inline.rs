//! Inline formatting: font/size spans and emphasis markers.
//!
//! Text is tokenized in two single passes:
//!
//! 1. style spans: `[FONT:name,size]...[/FONT]` overrides font and size,
//!    `[SIZE:size]...[/SIZE]` overrides the size only. Tags must close within
//!    the same input; an unterminated tag stays literal text.
//! 2. emphasis inside each span: `***x***` (bold italic), `**x**` (bold),
//!    `*x*` (italic, only when the marked token is longer than two
//!    characters), anything else is plain text. Stray `*` characters remain
//!    part of the surrounding plain run.

use crate::model::{Run, StyleDefaults};
use regex::Regex;
use std::sync::OnceLock;

fn style_span_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\[FONT:([^,]+),([0-9]+)\](.*?)\[/FONT\]|\[SIZE:([0-9]+)\](.*?)\[/SIZE\]")
            .unwrap()
    })
}

fn emphasis_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\*\*\*.*?\*\*\*|\*\*.*?\*\*|\*.*?\*|[^*]+").unwrap())
}

fn line_font_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\[FONT:([^,]+),([0-9]+)\]").unwrap())
}

/// Split `text` into styled runs.
///
/// The input is trimmed first; empty input yields no runs. Every run inherits
/// the font and size of the style span it came from, `style` outside spans.
///
/// # Example
///
/// ```
/// use officemark::model::StyleDefaults;
/// use officemark::parser::format_inline;
///
/// let runs = format_inline("**bold** and *italic*", &StyleDefaults::new("Arial", 11));
/// assert_eq!(runs.len(), 3);
/// assert!(runs[0].bold);
/// assert_eq!(runs[1].text, " and ");
/// assert!(runs[2].italic);
/// ```
pub fn format_inline(text: &str, style: &StyleDefaults) -> Vec<Run> {
    let mut runs = Vec::new();
    for (segment, segment_style) in style_segments(text.trim(), style) {
        push_emphasis_runs(segment, &segment_style, &mut runs);
    }
    runs
}

/// Strip a leading `[FONT:name,size]` directive from a line.
///
/// Returns the remaining text (trimmed) and the directive's style, or the
/// untouched line and `None` when the line does not start with a directive.
pub fn split_font_directive(line: &str) -> (&str, Option<StyleDefaults>) {
    let Some(caps) = line_font_regex().captures(line) else {
        return (line, None);
    };
    let (Some(whole), Some(name), Some(size)) = (caps.get(0), caps.get(1), caps.get(2)) else {
        return (line, None);
    };
    match size.as_str().parse::<u32>() {
        Ok(size) => (
            line[whole.end()..].trim(),
            Some(StyleDefaults::new(name.as_str(), size)),
        ),
        Err(_) => (line, None),
    }
}

/// Cut text into (segment, style) pairs at style span boundaries.
fn style_segments<'a>(text: &'a str, style: &StyleDefaults) -> Vec<(&'a str, StyleDefaults)> {
    let mut segments = Vec::new();
    let mut pos = 0;

    for caps in style_span_regex().captures_iter(text) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        let span = if let (Some(name), Some(size), Some(inner)) = (caps.get(1), caps.get(2), caps.get(3))
        {
            let size = size.as_str().parse().unwrap_or(style.font_size);
            (inner.as_str(), StyleDefaults::new(name.as_str(), size))
        } else if let (Some(size), Some(inner)) = (caps.get(4), caps.get(5)) {
            let size = size.as_str().parse().unwrap_or(style.font_size);
            (inner.as_str(), style.with_size(size))
        } else {
            continue;
        };

        if whole.start() > pos {
            segments.push((&text[pos..whole.start()], style.clone()));
        }
        segments.push(span);
        pos = whole.end();
    }

    if pos < text.len() {
        segments.push((&text[pos..], style.clone()));
    }
    segments
}

/// Marked token classified by its delimiters.
enum Emphasis<'a> {
    Plain(&'a str),
    Styled {
        text: &'a str,
        bold: bool,
        italic: bool,
    },
}

fn classify(token: &str) -> Emphasis<'_> {
    let len = token.len();
    if len >= 6 && token.starts_with("***") && token.ends_with("***") {
        Emphasis::Styled {
            text: &token[3..len - 3],
            bold: true,
            italic: true,
        }
    } else if len >= 4 && token.starts_with("**") && token.ends_with("**") {
        Emphasis::Styled {
            text: &token[2..len - 2],
            bold: true,
            italic: false,
        }
    } else if len > 2 && token.starts_with('*') && token.ends_with('*') {
        Emphasis::Styled {
            text: &token[1..len - 1],
            bold: false,
            italic: true,
        }
    } else {
        Emphasis::Plain(token)
    }
}

fn push_emphasis_runs(segment: &str, style: &StyleDefaults, runs: &mut Vec<Run>) {
    let mut plain = String::new();
    let mut last = 0;

    for token in emphasis_regex().find_iter(segment) {
        // Anything the scanner skipped is an unmatched '*'.
        plain.push_str(&segment[last..token.start()]);
        last = token.end();

        match classify(token.as_str()) {
            Emphasis::Plain(text) => plain.push_str(text),
            Emphasis::Styled { text, .. } if text.is_empty() => {}
            Emphasis::Styled { text, bold, italic } => {
                flush_plain(&mut plain, style, runs);
                runs.push(Run {
                    bold,
                    italic,
                    ..Run::plain(text, style)
                });
            }
        }
    }
    plain.push_str(&segment[last..]);
    flush_plain(&mut plain, style, runs);
}

fn flush_plain(plain: &mut String, style: &StyleDefaults, runs: &mut Vec<Run>) {
    if !plain.is_empty() {
        runs.push(Run::plain(std::mem::take(plain), style));
    }
}
