/*!
# Rust Language Module

This Rust module provides lexical analysis and parsing of the BASIC language.

*/

#[macro_use]
mod error;
mod ident;
mod lex;
mod line;
mod parse;
pub mod ast;
pub mod token;

pub use error::Error;
pub use error::ErrorCode;
pub use ident::Ident;
pub use lex::{lex, Tokenizer};
pub use line::Line;
pub use parse::parse;

pub type LineNumber = u16;
pub type Column = std::ops::Range<usize>;

/// Position of one physical line in a program. Continuation lines
/// without a number of their own share the number of the line above
/// and count up `sub` from zero.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LineKey {
    pub number: LineNumber,
    pub sub: u16,
}

impl LineKey {
    pub fn new(number: LineNumber, sub: u16) -> LineKey {
        LineKey { number, sub }
    }

    pub fn head(number: LineNumber) -> LineKey {
        LineKey { number, sub: 0 }
    }
}

impl std::fmt::Display for LineKey {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}.{}", self.number, self.sub)
    }
}
