//! Turns a transcript into a styled [`Document`].

use time::OffsetDateTime;

use super::classify::classify_reply;
use super::document::{Block, Color, Document, Span};
use crate::transcript::{Role, Transcript, Turn};
use crate::utils::time::format_generated_on;

/// Title written at the top of every report.
pub const REPORT_TITLE: &str = "IIB Code Analysis Report";

/// Section heading of user turns.
pub const USER_HEADING: &str = "User Query / Code:";

/// Section heading of assistant turns.
pub const ASSISTANT_HEADING: &str = "Analysis & Explanation:";

/// Substrings that mark a user turn as pasted code.
const CODE_MARKERS: [&str; 2] = ["CREATE", "SET"];

/// User turns with more lines than this are treated as pasted code.
const CODE_LINE_THRESHOLD: usize = 3;

/// Accumulates blocks for one export.
pub struct DocumentBuilder {
    document: Document,
}

impl DocumentBuilder {
    /// Starts a document with its title, generation timestamp and separator.
    pub fn new(generated_at: OffsetDateTime) -> Self {
        let mut document = Document::new();
        document.push(Block::Title(REPORT_TITLE.to_string()));
        document.push(Block::text(format!(
            "Generated on: {}",
            format_generated_on(generated_at)
        )));
        document.push(Block::Separator);
        Self { document }
    }

    /// Appends one turn: a role heading, its body, and a separator.
    pub fn add_turn(&mut self, turn: &Turn) {
        match turn.role() {
            Role::User => {
                self.heading(USER_HEADING, Color::DARK_BLUE);
                self.user_body(turn.content());
            }
            Role::Assistant => {
                self.heading(ASSISTANT_HEADING, Color::FOREST_GREEN);
                for block in classify_reply(turn.content()) {
                    self.document.push(block);
                }
            }
        }
        self.document.push(Block::Separator);
    }

    /// Finishes the document.
    pub fn finish(self) -> Document {
        self.document
    }

    fn heading(&mut self, text: &str, color: Color) {
        self.document.push(Block::Heading {
            level: 2,
            text: text.to_string(),
            color: Some(color),
        });
    }

    fn user_body(&mut self, content: &str) {
        if looks_like_code(content) {
            self.document.push(Block::Monospace(content.to_string()));
        } else {
            self.document.push(Block::Paragraph {
                spans: vec![Span::plain(content)],
                italic: true,
            });
        }
    }
}

/// Coarse check for pasted code: a code keyword anywhere, or more than three lines.
///
/// This never looks at syntax.
pub fn looks_like_code(content: &str) -> bool {
    CODE_MARKERS.iter().any(|marker| content.contains(marker))
        || content.split('\n').count() > CODE_LINE_THRESHOLD
}

/// Builds the document for a whole transcript in one pass.
pub fn build_document(transcript: &Transcript, generated_at: OffsetDateTime) -> Document {
    let mut builder = DocumentBuilder::new(generated_at);
    for turn in transcript {
        builder.add_turn(turn);
    }
    builder.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::document::ListKind;
    use time::macros::datetime;

    const AT: OffsetDateTime = datetime!(2026-10-18 09:05:03 UTC);

    fn body(document: &Document) -> Vec<Block> {
        document
            .blocks()
            .iter()
            .filter(|block| !matches!(block, Block::Title(_) | Block::Separator))
            .filter(|block| !block.plain_text().starts_with("Generated on: "))
            .cloned()
            .collect()
    }

    fn user_heading() -> Block {
        Block::Heading {
            level: 2,
            text: USER_HEADING.to_string(),
            color: Some(Color::DARK_BLUE),
        }
    }

    fn assistant_heading() -> Block {
        Block::Heading {
            level: 2,
            text: ASSISTANT_HEADING.to_string(),
            color: Some(Color::FOREST_GREEN),
        }
    }

    #[test]
    fn preamble() {
        let document = build_document(&Transcript::new(), AT);
        assert_eq!(
            document.blocks(),
            &[
                Block::Title(REPORT_TITLE.to_string()),
                Block::text("Generated on: 2026-10-18 09:05:03"),
                Block::Separator,
            ]
        );
    }

    #[test]
    fn round_trip_block_sequence() {
        let transcript: Transcript = [
            Turn::user("CREATE PROCEDURE x()\nBEGIN\nEND;"),
            Turn::assistant("### Summary\nThis does X.\n1. Step one\n```\nSET x = 1;\n```"),
        ]
        .into_iter()
        .collect();

        let document = build_document(&transcript, AT);
        assert_eq!(
            body(&document),
            vec![
                user_heading(),
                Block::Monospace("CREATE PROCEDURE x()\nBEGIN\nEND;".to_string()),
                assistant_heading(),
                Block::Heading {
                    level: 3,
                    text: "Summary".to_string(),
                    color: None,
                },
                Block::text("This does X."),
                Block::ListItem {
                    kind: ListKind::Numbered,
                    spans: vec![Span::plain("Step one")],
                },
                Block::CodeLine("SET x = 1;".to_string()),
            ]
        );
    }

    #[test]
    fn separator_after_every_turn() {
        let transcript: Transcript = [Turn::user("hi"), Turn::assistant("hello")]
            .into_iter()
            .collect();
        let document = build_document(&transcript, AT);
        let separators = document
            .blocks()
            .iter()
            .filter(|block| **block == Block::Separator)
            .count();
        assert_eq!(separators, 3);
        assert_eq!(document.blocks().last(), Some(&Block::Separator));
    }

    #[test]
    fn short_user_turn_is_italic() {
        let transcript: Transcript = [Turn::user("What does the Filter node do?")]
            .into_iter()
            .collect();
        assert_eq!(
            body(&build_document(&transcript, AT)),
            vec![
                user_heading(),
                Block::Paragraph {
                    spans: vec![Span::plain("What does the Filter node do?")],
                    italic: true,
                },
            ]
        );
    }

    #[test]
    fn user_code_heuristic() {
        assert!(looks_like_code("SET OutputRoot = InputRoot;"));
        assert!(looks_like_code("please CREATE a flow"));
        assert!(looks_like_code("a\nb\nc\nd"));
        assert!(!looks_like_code("a\nb\nc"));
        assert!(!looks_like_code("set lowercase is not a marker"));
        // Bold markers are not interpreted in user turns.
        assert!(!looks_like_code("why **this**?"));
    }

    #[test]
    fn user_markdown_is_not_classified() {
        let transcript: Transcript = [Turn::user("### not a heading")].into_iter().collect();
        assert_eq!(
            body(&build_document(&transcript, AT))[1],
            Block::Paragraph {
                spans: vec![Span::plain("### not a heading")],
                italic: true,
            }
        );
    }

    #[test]
    fn fence_state_resets_between_turns() {
        let transcript: Transcript = [
            Turn::assistant("```\nSET a = 1;"),
            Turn::assistant("Plain again."),
        ]
        .into_iter()
        .collect();
        assert_eq!(
            body(&build_document(&transcript, AT)),
            vec![
                assistant_heading(),
                Block::CodeLine("SET a = 1;".to_string()),
                assistant_heading(),
                Block::text("Plain again."),
            ]
        );
    }
}
