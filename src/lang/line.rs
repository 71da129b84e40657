use super::ast::Statement;
use super::token::Token;
use super::{lex, parse, Error, LineNumber};

/// One physical line of source, tokenized.
#[derive(Debug, PartialEq)]
pub struct Line {
    number: Option<LineNumber>,
    tokens: Vec<Token>,
}

impl Line {
    pub fn from_str(s: &str) -> Line {
        let (number, tokens) = lex(s);
        Line { number, tokens }
    }

    /// `None` for continuation lines.
    pub fn number(&self) -> Option<LineNumber> {
        self.number
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn ast(&self) -> Result<Vec<Statement>, Error> {
        parse(&self.tokens)
    }

    /// Warnings for characters the tokenizer could not place. The
    /// parser skips them.
    pub fn illegal_characters(&self) -> Vec<Error> {
        let mut v = vec![];
        let mut col = 0;
        for t in &self.tokens {
            let len = t.to_string().chars().count();
            if let Token::Unknown(s) = t {
                v.push(error!(Warning, ..&(col..col + len); format!("ILLEGAL CHARACTER {:?}", s)));
            }
            col += len;
        }
        v
    }
}

impl std::fmt::Display for Line {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let s: String = self.tokens.iter().map(|s| s.to_string()).collect();
        match self.number {
            Some(number) => write!(f, "{} {}", number, s),
            None => write!(f, "{}", s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_round_trip() {
        let line = Line::from_str("100 PRINT A$; \"X\"");
        assert_eq!(line.number(), Some(100));
        assert_eq!(line.to_string(), "100 PRINT A$; \"X\"");
    }

    #[test]
    fn test_illegal_characters() {
        let line = Line::from_str("10 A=1 @");
        let warnings = line.illegal_characters();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].is_warning());
        assert_eq!(warnings[0].column(), 4..5);
        assert!(line.ast().is_ok());
    }

    #[test]
    fn test_continuation() {
        let line = Line::from_str("    NEXT I");
        assert_eq!(line.number(), None);
        assert!(!line.is_empty());
    }
}
