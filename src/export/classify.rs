//! Line-by-line classification of model replies.
//!
//! The classifier recognizes a small set of markdown conventions. Its only
//! state is whether the walk is currently inside a fenced code region.

use super::document::{Block, ListKind};
use super::inline::format_spans;

const FENCE: &str = "```";

/// Whether the walk is inside a fenced code region.
///
/// A fresh state starts outside; each turn gets its own.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct FenceState {
    inside: bool,
}

impl FenceState {
    /// A state outside any fence.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true inside a fenced code region.
    pub fn is_inside(&self) -> bool {
        self.inside
    }

    fn toggle(&mut self) {
        self.inside = !self.inside;
    }
}

/// What a single line turned out to be.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LineClass<'a> {
    /// A fence marker; toggles the fence and renders nothing.
    Fence,
    /// A line inside a fence, kept verbatim.
    Code(&'a str),
    /// `### ` heading text.
    Heading3(&'a str),
    /// `## ` heading text.
    Heading2(&'a str),
    /// `- ` or `* ` item text.
    Bullet(&'a str),
    /// `N.` item text.
    Numbered(&'a str),
    /// Any other non-empty line.
    Paragraph(&'a str),
    /// An empty line; renders nothing.
    Blank,
}

impl LineClass<'_> {
    /// The block this line renders as, if any.
    pub fn into_block(self) -> Option<Block> {
        match self {
            LineClass::Fence | LineClass::Blank => None,
            LineClass::Code(text) => Some(Block::CodeLine(text.to_string())),
            LineClass::Heading3(text) => Some(Block::Heading {
                level: 3,
                text: text.to_string(),
                color: None,
            }),
            LineClass::Heading2(text) => Some(Block::Heading {
                level: 2,
                text: text.to_string(),
                color: None,
            }),
            LineClass::Bullet(text) => Some(Block::ListItem {
                kind: ListKind::Bullet,
                spans: format_spans(text),
            }),
            LineClass::Numbered(text) => Some(Block::ListItem {
                kind: ListKind::Numbered,
                spans: format_spans(text),
            }),
            LineClass::Paragraph(text) => Some(Block::Paragraph {
                spans: format_spans(text),
                italic: false,
            }),
        }
    }
}

/// Classify one line that has already been trimmed of surrounding whitespace.
///
/// Rules apply in order: fence marker, inside-fence code, `### `, `## `,
/// bullet, numbered, paragraph, blank. Classification is total.
pub fn classify_line<'a>(line: &'a str, fence: &mut FenceState) -> LineClass<'a> {
    if line.starts_with(FENCE) {
        fence.toggle();
        return LineClass::Fence;
    }
    if fence.is_inside() {
        return LineClass::Code(line);
    }
    if let Some(rest) = line.strip_prefix("### ") {
        return LineClass::Heading3(rest);
    }
    if let Some(rest) = line.strip_prefix("## ") {
        return LineClass::Heading2(rest);
    }
    if let Some(rest) = line.strip_prefix("- ").or_else(|| line.strip_prefix("* ")) {
        return LineClass::Bullet(rest);
    }
    if let Some(rest) = numbered_item(line) {
        return LineClass::Numbered(rest);
    }
    if line.is_empty() {
        LineClass::Blank
    } else {
        LineClass::Paragraph(line)
    }
}

/// Classify every line of one reply with a fresh fence state.
pub fn classify_reply(content: &str) -> Vec<Block> {
    let mut fence = FenceState::new();
    content
        .split('\n')
        .filter_map(|line| classify_line(line.trim(), &mut fence).into_block())
        .collect()
}

// Leading digits (any script) followed by a dot; the item text is what
// follows the first dot, trimmed.
fn numbered_item(line: &str) -> Option<&str> {
    let digits: usize = line
        .chars()
        .take_while(|c| c.is_numeric())
        .map(char::len_utf8)
        .sum();
    if digits == 0 || !line[digits..].starts_with('.') {
        return None;
    }
    line.split_once('.').map(|(_, rest)| rest.trim())
}
