//! Bracket-tag formatting for spreadsheet cell values.
//!
//! Recognized tags: `[BOLD]..[/BOLD]`, `[ITALIC]..[/ITALIC]`,
//! `[COLOR:RRGGBB]..[/COLOR]`, `[ALIGN:left|center|right]..[/ALIGN]` and
//! `[BORDER]..[/BORDER]`. Every complete pair is stripped from the text, but
//! each kind applies its effect at most once per cell: later pairs of the
//! same kind keep their inner text and change nothing.

use crate::model::{Alignment, Border, CellStyle, StyleDefaults};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::ops::Range;
use std::sync::OnceLock;

fn tag_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"\[(BOLD|ITALIC|BORDER)\]|\[COLOR:([A-Fa-f0-9]{6})\]|\[ALIGN:(left|center|right)\]|\[/(BOLD|ITALIC|COLOR|ALIGN|BORDER)\]",
        )
        .unwrap()
    })
}

/// Kind of a bracket tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DirectiveKind {
    /// `[BOLD]`
    Bold,
    /// `[ITALIC]`
    Italic,
    /// `[COLOR:RRGGBB]`
    Color,
    /// `[ALIGN:left|center|right]`
    Align,
    /// `[BORDER]`
    Border,
}

impl DirectiveKind {
    /// Kinds in the order their effects are applied.
    pub const ALL: [DirectiveKind; 5] = [
        DirectiveKind::Bold,
        DirectiveKind::Italic,
        DirectiveKind::Color,
        DirectiveKind::Align,
        DirectiveKind::Border,
    ];

    fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "BOLD" => Some(DirectiveKind::Bold),
            "ITALIC" => Some(DirectiveKind::Italic),
            "COLOR" => Some(DirectiveKind::Color),
            "ALIGN" => Some(DirectiveKind::Align),
            "BORDER" => Some(DirectiveKind::Border),
            _ => None,
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// A matched tag pair found in a cell value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormattingDirective {
    /// Tag kind
    pub kind: DirectiveKind,

    /// Tag parameter (color hex or alignment keyword)
    pub payload: Option<String>,

    /// Byte range of the whole tagged substring, opening tag to closing tag
    pub span: Range<usize>,
}

#[derive(Debug)]
struct Tag<'a> {
    kind: DirectiveKind,
    closing: bool,
    payload: Option<&'a str>,
    span: Range<usize>,
}

fn tokenize(raw: &str) -> Vec<Tag<'_>> {
    tag_regex()
        .captures_iter(raw)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let (keyword, payload, closing) = if let Some(k) = caps.get(1) {
                (k.as_str(), None, false)
            } else if let Some(color) = caps.get(2) {
                ("COLOR", Some(color.as_str()), false)
            } else if let Some(align) = caps.get(3) {
                ("ALIGN", Some(align.as_str()), false)
            } else {
                (caps.get(4)?.as_str(), None, true)
            };
            Some(Tag {
                kind: DirectiveKind::from_keyword(keyword)?,
                closing,
                payload,
                span: whole.range(),
            })
        })
        .collect()
}

/// Pair every opening tag with the nearest closing tag of its kind after it.
/// Returns the pairs as indices into `tags`, ordered by closing tag.
fn pair_tags(tags: &[Tag<'_>]) -> Vec<(usize, usize)> {
    let mut open: [Option<usize>; 5] = [None; 5];
    let mut pairs = Vec::new();

    for (idx, tag) in tags.iter().enumerate() {
        let k = tag.kind.index();
        match (tag.closing, open[k]) {
            (false, None) => open[k] = Some(idx),
            (true, Some(start)) => {
                pairs.push((start, idx));
                open[k] = None;
            }
            _ => {}
        }
    }
    pairs
}

/// Keep only the first pair of each kind.
fn first_of_each_kind(tags: &[Tag<'_>], pairs: &[(usize, usize)]) -> Vec<(usize, usize)> {
    let mut seen = [false; 5];
    pairs
        .iter()
        .copied()
        .filter(|&(open, _)| !std::mem::replace(&mut seen[tags[open].kind.index()], true))
        .collect()
}

/// Find the directives that apply to a cell value, in application order.
pub fn scan_directives(raw: &str) -> Vec<FormattingDirective> {
    let tags = tokenize(raw);
    let mut directives: Vec<FormattingDirective> = first_of_each_kind(&tags, &pair_tags(&tags))
        .into_iter()
        .map(|(open, close)| FormattingDirective {
            kind: tags[open].kind,
            payload: tags[open].payload.map(str::to_string),
            span: tags[open].span.start..tags[close].span.end,
        })
        .collect();
    directives.sort_by_key(|d| d.kind.index());
    directives
}

/// Strip bracket tags from a cell value and compute its style.
///
/// Returns the display text and the cumulative style of every applied tag.
///
/// # Example
///
/// ```
/// use officemark::model::StyleDefaults;
/// use officemark::parser::format_cell;
///
/// let (text, style) = format_cell("[BOLD]Hi[/BOLD] there", &StyleDefaults::default());
/// assert_eq!(text, "Hi there");
/// assert!(style.bold);
/// ```
pub fn format_cell(raw: &str, defaults: &StyleDefaults) -> (String, CellStyle) {
    let tags = tokenize(raw);
    let pairs = pair_tags(&tags);

    let mut style = CellStyle::new(defaults);
    for (open, _) in first_of_each_kind(&tags, &pairs) {
        apply(&mut style, tags[open].kind, tags[open].payload);
    }

    let mut consumed: Vec<&Range<usize>> = pairs
        .iter()
        .flat_map(|&(open, close)| [&tags[open].span, &tags[close].span])
        .collect();
    consumed.sort_by_key(|span| span.start);

    let mut text = String::with_capacity(raw.len());
    let mut pos = 0;
    for span in consumed {
        text.push_str(&raw[pos..span.start]);
        pos = span.end;
    }
    text.push_str(&raw[pos..]);

    (text, style)
}

fn apply(style: &mut CellStyle, kind: DirectiveKind, payload: Option<&str>) {
    match kind {
        DirectiveKind::Bold => style.bold = true,
        DirectiveKind::Italic => style.italic = true,
        DirectiveKind::Color => style.color = payload.map(|hex| hex.to_ascii_uppercase()),
        DirectiveKind::Align => style.alignment = payload.and_then(Alignment::from_keyword),
        DirectiveKind::Border => style.border = Some(Border::single()),
    }
}
