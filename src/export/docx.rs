//! Writes a [`Document`] as an Office Open XML word-processing package.

use std::io::Cursor;

use docx_rs::{
    AbstractNumbering, AlignmentType, BreakType, Docx, IndentLevel, Level, LevelJc, LevelText,
    LineSpacing, NumberFormat, Numbering, NumberingId, Paragraph, Run, RunFonts, SpecialIndentType,
    Start, Style, StyleType,
};

use super::document::{Block, Color, Document, ListKind, Span};
use crate::error::{Error, Result};

const MONOSPACE_FONT: &str = "Courier New";

/// Font size of code, in half-points (9pt).
const CODE_SIZE: usize = 18;

/// Twentieths of a point per inch.
const TWIPS_PER_INCH: i32 = 1440;

/// Left indent of fenced code lines (0.5in).
const CODE_LINE_INDENT: i32 = TWIPS_PER_INCH / 2;

/// Left indent of pasted code blocks (0.2in).
const MONOSPACE_INDENT: i32 = TWIPS_PER_INCH / 5;

/// Space after user paragraphs and code blocks (12pt), in twips.
const SPACE_AFTER_USER: u32 = 240;

const SEPARATOR: &str = "__________________________________________________";

const BULLET_NUMBERING: usize = 1;
const DECIMAL_NUMBERING: usize = 2;

/// Renders the document and packs it into an in-memory `.docx`.
pub fn write_docx(document: &Document) -> Result<Vec<u8>> {
    let mut docx = base_docx();
    for block in document.blocks() {
        docx = docx.add_paragraph(paragraph(block));
    }

    let mut buffer = Cursor::new(Vec::new());
    docx.build()
        .pack(&mut buffer)
        .map_err(|err| Error::export("failed to pack document", Some(Box::new(err))))?;
    Ok(buffer.into_inner())
}

fn base_docx() -> Docx {
    Docx::new()
        .add_style(
            Style::new("Title", StyleType::Paragraph)
                .name("Title")
                .size(52)
                .color("17365D"),
        )
        .add_style(
            Style::new("Heading2", StyleType::Paragraph)
                .name("Heading 2")
                .size(26)
                .bold(),
        )
        .add_style(
            Style::new("Heading3", StyleType::Paragraph)
                .name("Heading 3")
                .size(24)
                .bold()
                .color("4F81BD"),
        )
        .add_style(Style::new("ListBullet", StyleType::Paragraph).name("List Bullet"))
        .add_style(Style::new("ListNumber", StyleType::Paragraph).name("List Number"))
        .add_abstract_numbering(list_numbering(BULLET_NUMBERING, "bullet", "\u{2022}"))
        .add_abstract_numbering(list_numbering(DECIMAL_NUMBERING, "decimal", "%1."))
        .add_numbering(Numbering::new(BULLET_NUMBERING, BULLET_NUMBERING))
        .add_numbering(Numbering::new(DECIMAL_NUMBERING, DECIMAL_NUMBERING))
}

fn list_numbering(id: usize, format: &str, text: &str) -> AbstractNumbering {
    AbstractNumbering::new(id).add_level(
        Level::new(
            0,
            Start::new(1),
            NumberFormat::new(format),
            LevelText::new(text),
            LevelJc::new("left"),
        )
        .indent(Some(720), Some(SpecialIndentType::Hanging(360)), None, None),
    )
}

fn paragraph(block: &Block) -> Paragraph {
    match block {
        Block::Title(text) => Paragraph::new()
            .style("Title")
            .align(AlignmentType::Center)
            .add_run(Run::new().add_text(text)),
        Block::Heading { level, text, color } => {
            let mut run = Run::new().add_text(text);
            if let Some(color) = color {
                run = run.color(color.hex());
            }
            Paragraph::new()
                .style(&format!("Heading{level}"))
                .add_run(run)
        }
        Block::Paragraph { spans, italic } => {
            let mut paragraph = spans_paragraph(Paragraph::new(), spans, *italic);
            if *italic {
                paragraph = paragraph.line_spacing(LineSpacing::new().after(SPACE_AFTER_USER));
            }
            paragraph
        }
        Block::ListItem { kind, spans } => {
            let (style, numbering) = match kind {
                ListKind::Bullet => ("ListBullet", BULLET_NUMBERING),
                ListKind::Numbered => ("ListNumber", DECIMAL_NUMBERING),
            };
            let paragraph = Paragraph::new()
                .style(style)
                .numbering(NumberingId::new(numbering), IndentLevel::new(0));
            spans_paragraph(paragraph, spans, false)
        }
        Block::CodeLine(text) => Paragraph::new()
            .indent(Some(CODE_LINE_INDENT), None, None, None)
            .line_spacing(LineSpacing::new().after(0))
            .add_run(code_run(text).color(Color::CODE_GREEN.hex())),
        Block::Monospace(text) => Paragraph::new()
            .indent(Some(MONOSPACE_INDENT), None, None, None)
            .line_spacing(LineSpacing::new().after(SPACE_AFTER_USER))
            .add_run(code_run(text)),
        Block::Separator => Paragraph::new().add_run(Run::new().add_text(SEPARATOR)),
    }
}

fn spans_paragraph(mut paragraph: Paragraph, spans: &[Span], italic: bool) -> Paragraph {
    for span in spans {
        let mut run = add_lines(Run::new(), &span.text);
        if span.bold {
            run = run.bold();
        }
        if italic {
            run = run.italic();
        }
        paragraph = paragraph.add_run(run);
    }
    paragraph
}

fn code_run(text: &str) -> Run {
    let run = Run::new()
        .fonts(RunFonts::new().ascii(MONOSPACE_FONT).hi_ansi(MONOSPACE_FONT))
        .size(CODE_SIZE);
    add_lines(run, text)
}

// Newlines become line breaks and tabs become tab characters; `<w:t>` keeps
// neither.
fn add_lines(mut run: Run, text: &str) -> Run {
    for (index, line) in text.split('\n').enumerate() {
        if index > 0 {
            run = run.add_break(BreakType::TextWrapping);
        }
        for (column, piece) in line.split('\t').enumerate() {
            if column > 0 {
                run = run.add_tab();
            }
            if !piece.is_empty() {
                run = run.add_text(piece);
            }
        }
    }
    run
}
