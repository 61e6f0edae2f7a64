//! Per-document state and LSP position arithmetic.

use tower_lsp::lsp_types::{Position, Range};

/// State for each open document
#[derive(Debug)]
pub struct DocumentState {
    pub content: String,
}

impl DocumentState {
    pub fn new(content: String) -> Self {
        Self { content }
    }

    /// Byte offset of an LSP position.
    ///
    /// Columns are UTF-16 code units, per the protocol. Positions past the
    /// end of a line or of the document clamp to the nearest valid offset.
    pub fn offset_of(&self, pos: Position) -> usize {
        let content = self.content.as_str();

        let mut offset = 0;
        for _ in 0..pos.line {
            match content[offset..].find('\n') {
                Some(idx) => offset += idx + 1,
                None => return content.len(),
            }
        }

        let mut units = pos.character as usize;
        for c in content[offset..].chars() {
            if units == 0 || c == '\n' || c == '\r' {
                break;
            }
            let width = c.len_utf16();
            if width > units {
                break;
            }
            units -= width;
            offset += c.len_utf8();
        }

        offset
    }

    /// Text covered by `range`, with out-of-bounds positions clamped.
    pub fn slice(&self, range: Range) -> &str {
        let start = self.offset_of(range.start);
        let end = self.offset_of(range.end).max(start);
        &self.content[start..end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(content: &str) -> DocumentState {
        DocumentState::new(content.to_string())
    }

    fn range(sl: u32, sc: u32, el: u32, ec: u32) -> Range {
        Range::new(Position::new(sl, sc), Position::new(el, ec))
    }

    #[test]
    fn test_offset_on_single_line() {
        let d = doc("(display x)");
        assert_eq!(d.offset_of(Position::new(0, 0)), 0);
        assert_eq!(d.offset_of(Position::new(0, 8)), 8);
    }

    #[test]
    fn test_offset_spans_lines() {
        let d = doc("(a)\n(bb)\n(c)");
        assert_eq!(d.offset_of(Position::new(1, 0)), 4);
        assert_eq!(d.offset_of(Position::new(2, 1)), 10);
    }

    #[test]
    fn test_offset_counts_utf16_units() {
        // '𝜆' is two UTF-16 code units and four UTF-8 bytes.
        let d = doc("(𝜆 x)");
        assert_eq!(d.offset_of(Position::new(0, 3)), 5);
    }

    #[test]
    fn test_offset_clamps_past_line_end() {
        let d = doc("(a)\n(b)");
        assert_eq!(d.offset_of(Position::new(0, 99)), 3);
        assert_eq!(d.offset_of(Position::new(9, 0)), 7);
    }

    #[test]
    fn test_slice_exact_range() {
        let d = doc("(define x\n  1)");
        assert_eq!(d.slice(range(0, 1, 0, 7)), "define");
        assert_eq!(d.slice(range(0, 0, 1, 4)), "(define x\n  1)");
    }

    #[test]
    fn test_slice_clamped_range() {
        let d = doc("(a)");
        assert_eq!(d.slice(range(0, 0, 5, 5)), "(a)");
    }

    #[test]
    fn test_slice_inverted_range_is_empty() {
        let d = doc("(a b)");
        assert_eq!(d.slice(range(0, 4, 0, 1)), "");
    }

    #[test]
    fn test_slice_keeps_crlf_out_of_clamped_lines() {
        let d = doc("(a)\r\n(b)");
        assert_eq!(d.slice(range(0, 0, 0, 99)), "(a)");
    }
}
