//! Bold-span splitting for a single run of text.

use super::document::Span;

/// The two-character marker that opens and closes a bold span.
pub const BOLD_MARKER: &str = "**";

/// Split `text` on [`BOLD_MARKER`] into alternating plain and bold spans.
///
/// Segments at even positions are plain and segments at odd positions are
/// bold. Markers are not matched up: with an odd number of markers the last
/// segment simply takes whatever boldness its position gives it. Empty
/// segments are kept so that positions never shift.
pub fn format_spans(text: &str) -> Vec<Span> {
    text.split(BOLD_MARKER)
        .enumerate()
        .map(|(index, segment)| Span {
            text: segment.to_string(),
            bold: index % 2 == 1,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(spans: &[Span]) -> Vec<(&str, bool)> {
        spans.iter().map(|s| (s.text.as_str(), s.bold)).collect()
    }

    #[test]
    fn bold_in_the_middle() {
        assert_eq!(
            pairs(&format_spans("a **b** c")),
            vec![("a ", false), ("b", true), (" c", false)]
        );
    }

    #[test]
    fn no_marker_is_one_plain_span() {
        assert_eq!(
            pairs(&format_spans("Route to the output.")),
            vec![("Route to the output.", false)]
        );
    }

    #[test]
    fn leading_and_trailing_markers_keep_empty_segments() {
        assert_eq!(
            pairs(&format_spans("**Compute** node")),
            vec![("", false), ("Compute", true), (" node", false)]
        );
        assert_eq!(
            pairs(&format_spans("**b**")),
            vec![("", false), ("b", true), ("", false)]
        );
    }

    #[test]
    fn unmatched_marker_follows_strict_alternation() {
        assert_eq!(
            pairs(&format_spans("set **Status and go")),
            vec![("set ", false), ("Status and go", true)]
        );
        assert_eq!(
            pairs(&format_spans("**a** and **b")),
            vec![("", false), ("a", true), (" and ", false), ("b", true)]
        );
    }

    #[test]
    fn empty_text() {
        assert_eq!(pairs(&format_spans("")), vec![("", false)]);
    }
}
