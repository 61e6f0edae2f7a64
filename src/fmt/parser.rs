//! Scheme s-expression parser.
//!
//! Small recursive-descent parser that keeps the byte span of every
//! expression, so the printer can inspect the original text between
//! neighboring elements and preserve the author's line breaks.

use anyhow::{bail, Result};

pub const OPEN: &str = "(";
pub const QUOTED_OPEN: &str = "'(";
pub const CLOSE: &str = ")";

/// Token boundaries: an atom ends where one of these begins.
const DELIMITERS: [&str; 3] = [OPEN, QUOTED_OPEN, CLOSE];

/// A parsed expression tagged with its byte span in the source.
#[derive(Debug, Clone, PartialEq)]
pub struct Tagged {
    pub expr: Expr,
    pub start: usize,
    pub end: usize,
}

/// An s-expression node.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A bare token: symbol, number, or stray delimiter.
    Atom(String),
    /// A parenthesized list, optionally quoted (`'(...)`).
    List { quoted: bool, elems: Vec<Tagged> },
}

/// What the next step of parsing produced.
enum Item {
    Expr(Tagged),
    Close { start: usize, end: usize },
    Eof,
}

pub struct Parser<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    pub fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    /// Parse every top-level expression in the source.
    pub fn parse(mut self) -> Result<Vec<Tagged>> {
        let mut exprs = Vec::new();
        loop {
            match self.parse_item()? {
                Item::Expr(expr) => exprs.push(expr),
                // An unmatched close paren at the top level is kept as an
                // opaque atom rather than rejected.
                Item::Close { start, end } => exprs.push(Tagged {
                    expr: Expr::Atom(CLOSE.to_string()),
                    start,
                    end,
                }),
                Item::Eof => break,
            }
        }
        Ok(exprs)
    }

    fn rest(&self) -> &str {
        &self.src[self.pos..]
    }

    fn take(&mut self, token: &str) -> bool {
        if self.rest().starts_with(token) {
            self.pos += token.len();
            true
        } else {
            false
        }
    }

    fn at_delimiter(&self) -> bool {
        DELIMITERS.iter().any(|d| self.rest().starts_with(d))
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.rest().chars().next() {
            if !c.is_whitespace() {
                break;
            }
            self.pos += c.len_utf8();
        }
    }

    /// Consume a maximal run of non-whitespace, non-delimiter characters.
    fn take_atom(&mut self) -> &'a str {
        let start = self.pos;
        while let Some(c) = self.rest().chars().next() {
            if c.is_whitespace() || self.at_delimiter() {
                break;
            }
            self.pos += c.len_utf8();
        }
        &self.src[start..self.pos]
    }

    fn parse_item(&mut self) -> Result<Item> {
        self.skip_whitespace();
        let start = self.pos;

        if self.rest().is_empty() {
            return Ok(Item::Eof);
        }

        let quoted = if self.take(QUOTED_OPEN) {
            true
        } else if self.take(OPEN) {
            false
        } else if self.take(CLOSE) {
            return Ok(Item::Close {
                start,
                end: self.pos,
            });
        } else {
            let text = self.take_atom();
            return Ok(Item::Expr(Tagged {
                expr: Expr::Atom(text.to_string()),
                start,
                end: self.pos,
            }));
        };

        let mut elems = Vec::new();
        loop {
            match self.parse_item()? {
                Item::Expr(elem) => elems.push(elem),
                Item::Close { .. } => break,
                Item::Eof => bail!("expected ')', found end of input"),
            }
        }

        Ok(Item::Expr(Tagged {
            expr: Expr::List { quoted, elems },
            start,
            end: self.pos,
        }))
    }
}
