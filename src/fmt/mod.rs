//! Native Scheme formatter.
//!
//! Parses s-expressions while tracking byte spans, then reprints them with
//! normalized spacing. Used by the `scheme-fmt` binary; the language server
//! delegates to an external script instead (see [`crate::bridge`]).

pub mod parser;
pub mod printer;

pub use parser::{Expr, Parser, Tagged};
pub use printer::{print_expr, FormatOptions};

use anyhow::Result;

/// Format a whole source text.
///
/// Top-level expressions are separated by one blank line and the output
/// always ends in a newline.
pub fn format_source(src: &str, options: &FormatOptions) -> Result<String> {
    let exprs = Parser::new(src).parse()?;
    let formatted: Vec<String> = exprs
        .iter()
        .map(|expr| print_expr(src, expr, options))
        .collect();
    Ok(formatted.join("\n\n") + "\n")
}
