//! Pretty-printer for parsed s-expressions.
//!
//! Elements that the author separated with a newline stay on separate
//! lines, indented by nesting depth; everything else collapses to a single
//! space. Atoms are emitted verbatim.

use crate::fmt::parser::{Expr, Tagged, CLOSE, OPEN, QUOTED_OPEN};

/// Formatting options for the printer.
#[derive(Debug, Clone, PartialEq)]
pub struct FormatOptions {
    /// Sequence emitted once per indentation level.
    pub indent_seq: String,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self::spaces(2)
    }
}

impl FormatOptions {
    pub fn spaces(width: usize) -> Self {
        Self {
            indent_seq: " ".repeat(width),
        }
    }

    pub fn tabs() -> Self {
        Self {
            indent_seq: "\t".to_string(),
        }
    }
}

/// Render a single top-level expression.
///
/// `src` must be the source the expression was parsed from; its byte spans
/// are used to decide which element separators were line breaks.
pub fn print_expr(src: &str, expr: &Tagged, options: &FormatOptions) -> String {
    let mut out = String::new();
    print_into(src, expr, 0, options, &mut out);
    out
}

fn print_into(src: &str, tagged: &Tagged, indent: usize, options: &FormatOptions, out: &mut String) {
    let (quoted, elems) = match &tagged.expr {
        Expr::Atom(text) => {
            out.push_str(text);
            return;
        }
        Expr::List { quoted, elems } => (*quoted, elems),
    };

    out.push_str(if quoted { QUOTED_OPEN } else { OPEN });

    if let Some(first) = elems.first() {
        print_into(src, first, indent + 1, options, out);
    }

    for pair in elems.windows(2) {
        let (prev, elem) = (&pair[0], &pair[1]);
        if src[prev.end..elem.start].contains('\n') {
            out.push('\n');
            for _ in 0..indent {
                out.push_str(&options.indent_seq);
            }
        } else {
            out.push(' ');
        }
        print_into(src, elem, indent + 1, options, out);
    }

    out.push_str(CLOSE);
}
