//! Output rendering for the chat application.
//!
//! This module provides a trait-based rendering abstraction that allows
//! for different output styles. The default implementation uses ANSI
//! escape codes to give replies the same structure the exported report has.

use std::io::{self, Stdout, Write};

use crate::export::{FenceState, LineClass, Span, classify_line, format_spans};

/// ANSI escape code for bold text (used for `**bold**` spans).
const ANSI_BOLD: &str = "\x1b[1m";

/// ANSI escape code for dim text (used for fence markers).
const ANSI_DIM: &str = "\x1b[2m";

/// ANSI escape code to reset all styling.
const ANSI_RESET: &str = "\x1b[0m";

/// ANSI escape code for cyan text (used for headings).
const ANSI_CYAN: &str = "\x1b[36m";

/// ANSI escape code for yellow text (used for warnings).
const ANSI_YELLOW: &str = "\x1b[33m";

/// ANSI escape code for green text (used for code lines).
const ANSI_GREEN: &str = "\x1b[32m";

/// ANSI escape code for red text (used for errors).
const ANSI_RED: &str = "\x1b[31m";

/// Trait for rendering chat output.
///
/// This abstraction allows for different rendering strategies:
/// - Plain text with ANSI styling
/// - Plain text without styling (for piping/redirecting)
pub trait Renderer: Send {
    /// Print a complete model reply.
    fn print_reply(&mut self, reply: &str);

    /// Print an error message.
    fn print_error(&mut self, error: &str);

    /// Print a warning.
    fn print_warning(&mut self, warning: &str);

    /// Print an informational message.
    fn print_info(&mut self, info: &str);
}

/// Plain text renderer with optional ANSI styling.
pub struct PlainTextRenderer {
    stdout: Stdout,
    use_color: bool,
}

impl PlainTextRenderer {
    /// Creates a new PlainTextRenderer with ANSI colors enabled.
    pub fn new() -> Self {
        Self::with_color(true)
    }

    /// Creates a new PlainTextRenderer with specified color setting.
    pub fn with_color(use_color: bool) -> Self {
        Self {
            stdout: io::stdout(),
            use_color,
        }
    }

    fn flush(&mut self) {
        let _ = self.stdout.flush();
    }
}

impl Default for PlainTextRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for PlainTextRenderer {
    fn print_reply(&mut self, reply: &str) {
        if self.use_color {
            println!("\n{}\n", style_reply(reply));
        } else {
            println!("\n{reply}\n");
        }
        self.flush();
    }

    fn print_error(&mut self, error: &str) {
        if self.use_color {
            eprintln!("\n{ANSI_RED}Error:{ANSI_RESET} {error}");
        } else {
            eprintln!("\nError: {error}");
        }
    }

    fn print_warning(&mut self, warning: &str) {
        if self.use_color {
            eprintln!("{ANSI_YELLOW}{warning}{ANSI_RESET}");
        } else {
            eprintln!("{warning}");
        }
    }

    fn print_info(&mut self, info: &str) {
        println!("{info}");
        self.flush();
    }
}

/// Styles a reply for the terminal with the rules the report uses.
///
/// Headings lose their markers, fenced lines keep their indentation, and
/// list markers and numbers are kept so the text reads the same unstyled.
pub fn style_reply(reply: &str) -> String {
    let mut fence = FenceState::new();
    let mut lines = Vec::new();
    for line in reply.split('\n') {
        let trimmed = line.trim();
        let styled = match classify_line(trimmed, &mut fence) {
            LineClass::Fence => format!("{ANSI_DIM}{trimmed}{ANSI_RESET}"),
            LineClass::Code(_) => format!("{ANSI_GREEN}{line}{ANSI_RESET}"),
            LineClass::Heading3(text) | LineClass::Heading2(text) => {
                format!("{ANSI_BOLD}{ANSI_CYAN}{text}{ANSI_RESET}")
            }
            LineClass::Bullet(text) => format!("  \u{2022} {}", style_spans(&format_spans(text))),
            LineClass::Numbered(_) => format!("  {}", style_spans(&format_spans(trimmed))),
            LineClass::Paragraph(_) => style_spans(&format_spans(trimmed)),
            LineClass::Blank => String::new(),
        };
        lines.push(styled);
    }
    lines.join("\n")
}

fn style_spans(spans: &[Span]) -> String {
    spans
        .iter()
        .map(|span| {
            if span.bold && !span.text.is_empty() {
                format!("{ANSI_BOLD}{}{ANSI_RESET}", span.text)
            } else {
                span.text.clone()
            }
        })
        .collect()
}
