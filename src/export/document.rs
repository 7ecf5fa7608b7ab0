//! The styled block model produced by the builder and consumed by the writer.

use std::fmt;

/// An RGB text color.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Color {
    /// Heading color of user sections.
    pub const DARK_BLUE: Color = Color::rgb(0, 51, 102);
    /// Heading color of assistant sections.
    pub const FOREST_GREEN: Color = Color::rgb(34, 139, 34);
    /// Text color of fenced code lines.
    pub const CODE_GREEN: Color = Color::rgb(0, 100, 0);

    /// Create a color from its channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Upper-case hex without the leading `#`, as word processors expect.
    pub fn hex(&self) -> String {
        format!("{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.hex())
    }
}

/// A run of text that is either bold or plain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    /// The text of the run.
    pub text: String,
    /// Whether the run is bold.
    pub bold: bool,
}

impl Span {
    /// A plain span.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: false,
        }
    }

    /// A bold span.
    pub fn bold(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: true,
        }
    }
}

/// Flattens spans back to their text, dropping styling.
pub fn spans_text(spans: &[Span]) -> String {
    spans.iter().map(|span| span.text.as_str()).collect()
}

/// The marker style of a list item.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ListKind {
    /// Rendered with a bullet glyph.
    Bullet,
    /// Rendered with a running number.
    Numbered,
}

/// One styled unit of output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// The centered document title.
    Title(String),

    /// A section or in-reply heading.
    Heading {
        /// Outline level (2 or 3).
        level: u8,
        /// Heading text.
        text: String,
        /// Accent color, when the heading carries one.
        color: Option<Color>,
    },

    /// A body paragraph made of bold and plain runs.
    Paragraph {
        /// The runs of the paragraph.
        spans: Vec<Span>,
        /// Whether the whole paragraph is italic.
        italic: bool,
    },

    /// A bulleted or numbered list item.
    ListItem {
        /// Bullet or number.
        kind: ListKind,
        /// The runs of the item.
        spans: Vec<Span>,
    },

    /// One line of a fenced code region in a reply.
    CodeLine(String),

    /// A pasted code block kept verbatim, possibly several lines.
    Monospace(String),

    /// A horizontal separator between turns.
    Separator,
}

impl Block {
    /// A plain paragraph with a single unstyled run.
    pub fn text(text: impl Into<String>) -> Self {
        Block::Paragraph {
            spans: vec![Span::plain(text)],
            italic: false,
        }
    }

    /// The text of the block with styling removed.
    pub fn plain_text(&self) -> String {
        match self {
            Block::Title(text)
            | Block::Heading { text, .. }
            | Block::CodeLine(text)
            | Block::Monospace(text) => text.clone(),
            Block::Paragraph { spans, .. } | Block::ListItem { spans, .. } => spans_text(spans),
            Block::Separator => String::new(),
        }
    }
}

/// An ordered sequence of blocks, finished once and then only read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    blocks: Vec<Block>,
}

impl Document {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, block: Block) {
        self.blocks.push(block);
    }

    /// The blocks in output order.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// The number of blocks.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Returns true if the document has no blocks.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}
