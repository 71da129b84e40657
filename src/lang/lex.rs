use super::{token::*, LineNumber};

/// Splits a leading line number from a physical source line and
/// tokenizes the remainder. Lines that do not start with a digit are
/// continuation lines and return `None` for the number.
pub fn lex(s: &str) -> (Option<LineNumber>, Vec<Token>) {
    let mut line_number = None;
    let mut s = s.trim_end_matches(|c: char| c == '\r' || c == '\n');
    if s.starts_with(is_basic_digit) {
        let end = s.find(|c: char| !is_basic_digit(c)).unwrap_or_else(|| s.len());
        if let Ok(n) = s[..end].parse::<u16>() {
            line_number = Some(n);
            s = &s[end..];
        }
    }
    let mut tokenizer = Tokenizer::new();
    tokenizer.feed(s.trim_start_matches(is_basic_whitespace));
    let mut tokens: Vec<Token> = tokenizer.collect();
    Tokenizer::trim_end(&mut tokens);
    Tokenizer::collapse_end_if(&mut tokens);
    (line_number, tokens)
}

fn is_basic_whitespace(c: char) -> bool {
    c == ' ' || c == '\t'
}

fn is_basic_digit(c: char) -> bool {
    c.is_ascii_digit()
}

fn is_basic_alphabetic(c: char) -> bool {
    c.is_ascii_uppercase()
}

fn is_type_suffix(c: char) -> bool {
    c == '$' || c == '%' || c == '!' || c == '#'
}

trait Tokenizers<'a> {
    fn chars(&mut self) -> &mut std::iter::Peekable<std::str::Chars<'a>>;

    fn whitespace(&mut self) -> Option<Token> {
        let mut len = 0;
        while let Some(pk) = self.chars().peek() {
            if !is_basic_whitespace(*pk) {
                break;
            }
            self.chars().next();
            len += 1;
        }
        Some(Token::Whitespace(len))
    }

    fn number(&mut self) -> Option<Token> {
        let mut s = String::new();
        let mut decimal = false;
        let mut exp = false;
        while let Some(&ch) = self.chars().peek() {
            if is_basic_digit(ch) {
                s.push(ch);
                self.chars().next();
                continue;
            }
            if ch == '.' && !decimal && !exp {
                decimal = true;
                s.push(ch);
                self.chars().next();
                continue;
            }
            if !exp && matches!(ch, 'E' | 'e' | 'D' | 'd') {
                let mut ahead = self.chars().clone();
                ahead.next();
                let sign = match ahead.peek() {
                    Some('+') | Some('-') => ahead.next(),
                    _ => None,
                };
                if !matches!(ahead.peek(), Some(c) if is_basic_digit(*c)) {
                    break;
                }
                exp = true;
                self.chars().next();
                s.push(ch.to_ascii_uppercase());
                if let Some(sign) = sign {
                    self.chars().next();
                    s.push(sign);
                }
                continue;
            }
            break;
        }
        let integral = !decimal && !exp && s.parse::<i16>().is_ok();
        if let Some(&ch) = self.chars().peek() {
            if ch == '!' || ch == '#' || ch == '%' {
                self.chars().next();
                s.push(ch);
            }
        }
        if integral {
            Some(Token::Literal(Literal::Integer(s)))
        } else {
            Some(Token::Literal(Literal::Float(s)))
        }
    }

    fn string(&mut self, quote: char) -> Option<Token> {
        let mut s = String::new();
        self.chars().next();
        while let Some(ch) = self.chars().next() {
            if ch == quote {
                break;
            }
            s.push(ch);
        }
        Some(Token::Literal(Literal::String(s)))
    }

    fn alphabetic(&mut self) -> Option<Token> {
        let mut s = String::new();
        while let Some(&ch) = self.chars().peek() {
            if !is_basic_alphabetic(ch) && !is_basic_digit(ch) {
                break;
            }
            s.push(ch);
            self.chars().next();
        }
        if let Some(&ch) = self.chars().peek() {
            if is_type_suffix(ch) {
                let mut suffixed = s.clone();
                suffixed.push(ch);
                if let Some(token) = Token::from_string(&suffixed) {
                    self.chars().next();
                    return Some(token);
                }
                if let Some(token) = Token::from_string(&s) {
                    return Some(token);
                }
                self.chars().next();
                return Some(Token::Ident(Ident::new(&suffixed)));
            }
        }
        match Token::from_string(&s) {
            Some(token) => Some(token),
            None => Some(Token::Ident(Ident::new(&s))),
        }
    }

    fn ampersand(&mut self) -> Option<Token> {
        self.chars().next();
        let radix = match self.chars().peek() {
            Some('H') | Some('h') => {
                self.chars().next();
                16
            }
            Some('O') | Some('o') => {
                self.chars().next();
                8
            }
            Some(c) if c.is_digit(8) => 8,
            _ => return Some(Token::Unknown("&".to_string())),
        };
        let mut s = String::new();
        while let Some(&ch) = self.chars().peek() {
            if !ch.is_digit(radix) {
                break;
            }
            s.push(ch.to_ascii_uppercase());
            self.chars().next();
        }
        if radix == 16 {
            Some(Token::Literal(Literal::Hex(s)))
        } else {
            Some(Token::Literal(Literal::Octal(s)))
        }
    }

    fn handle(&mut self) -> Option<Token> {
        self.chars().next();
        let mut s = String::new();
        while let Some(&ch) = self.chars().peek() {
            if !is_basic_digit(ch) {
                break;
            }
            s.push(ch);
            self.chars().next();
        }
        if s.is_empty() {
            Some(Token::Hash)
        } else {
            Some(Token::Handle(s))
        }
    }

    fn minutia(&mut self) -> Option<Token> {
        let ch = self.chars().next()?;
        if ch == '<' || ch == '>' {
            if let Some(&pk) = self.chars().peek() {
                let mut s = ch.to_string();
                s.push(pk);
                if let Some(t) = Token::from_string(&s) {
                    self.chars().next();
                    return Some(t);
                }
            }
        }
        match Token::from_string(&ch.to_string()) {
            Some(t) => Some(t),
            None => Some(Token::Unknown(ch.to_string())),
        }
    }

    fn datum(&mut self) -> Option<Token> {
        let mut s = String::new();
        while let Some(&ch) = self.chars().peek() {
            if ch == ',' || ch == ':' {
                break;
            }
            s.push(ch);
            self.chars().next();
        }
        Some(Token::Remark(s))
    }
}

/// Streaming tokenizer for one physical line at a time.
pub struct Tokenizer<'a> {
    chars: std::iter::Peekable<std::str::Chars<'a>>,
    remark: bool,
    data: bool,
}

impl<'a> Tokenizers<'a> for Tokenizer<'a> {
    fn chars(&mut self) -> &mut std::iter::Peekable<std::str::Chars<'a>> {
        &mut self.chars
    }
}

impl<'a> Default for Tokenizer<'a> {
    fn default() -> Self {
        Tokenizer {
            chars: "".chars().peekable(),
            remark: false,
            data: false,
        }
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        let pk = *self.chars.peek()?;
        if self.remark {
            return Some(Token::Remark(self.chars.by_ref().collect::<String>()));
        }
        if is_basic_whitespace(pk) {
            return self.whitespace();
        }
        if self.data {
            return match pk {
                '"' => self.string('"'),
                ':' => {
                    self.data = false;
                    self.minutia()
                }
                ',' => self.minutia(),
                _ => self.datum(),
            };
        }
        if is_basic_digit(pk) {
            return self.number();
        }
        if pk == '.' {
            let mut ahead = self.chars.clone();
            ahead.next();
            if matches!(ahead.peek(), Some(c) if is_basic_digit(*c)) {
                return self.number();
            }
        }
        if is_basic_alphabetic(pk) {
            let r = self.alphabetic();
            match r {
                Some(Token::Word(Word::Rem1)) => self.remark = true,
                Some(Token::Word(Word::Data)) => self.data = true,
                _ => {}
            }
            return r;
        }
        match pk {
            '"' => self.string('"'),
            '\'' => {
                let mut ahead = self.chars.clone();
                ahead.next();
                if ahead.any(|c| c == '\'') {
                    self.string('\'')
                } else {
                    self.chars.next();
                    self.remark = true;
                    Some(Token::Word(Word::Rem2))
                }
            }
            '&' => self.ampersand(),
            '#' => self.handle(),
            _ => self.minutia(),
        }
    }
}

impl<'a> Tokenizer<'a> {
    pub fn new() -> Tokenizer<'a> {
        Tokenizer::default()
    }

    /// Loads one physical line. Any state left from the previous line
    /// is discarded.
    pub fn feed(&mut self, line: &'a str) {
        self.chars = line.chars().peekable();
        self.remark = false;
        self.data = false;
    }

    pub fn next_token(&mut self) -> Option<Token> {
        self.next()
    }

    fn collapse_end_if(tokens: &mut Vec<Token>) {
        let mut locs: Vec<usize> = vec![];
        for (index, ttt) in tokens.windows(3).enumerate() {
            if let Token::Word(Word::End) = ttt[0] {
                if let Token::Whitespace(_) = ttt[1] {
                    if let Token::Word(Word::If) = ttt[2] {
                        locs.push(index);
                    }
                }
            }
        }
        while let Some(index) = locs.pop() {
            tokens.splice(index..index + 3, Some(Token::Word(Word::Endif)));
        }
    }

    fn trim_end(tokens: &mut Vec<Token>) {
        if let Some(Token::Whitespace(_)) = tokens.last() {
            tokens.pop();
        }
        if let Some(Token::Remark(_)) = tokens.last() {
            if let Some(Token::Remark(s)) = tokens.pop() {
                tokens.push(Token::Remark(s.trim_end().to_string()));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(s: &str) -> Vec<Token> {
        lex(s)
            .1
            .into_iter()
            .filter(|t| !matches!(t, Token::Whitespace(_)))
            .collect()
    }

    #[test]
    fn test_line_number_split() {
        let (ln, v) = lex("100 PRINT");
        assert_eq!(ln, Some(100));
        assert_eq!(v, vec![Token::Word(Word::Print1)]);
        let (ln, v) = lex("    PRINT");
        assert_eq!(ln, None);
        assert_eq!(v, vec![Token::Word(Word::Print1)]);
    }

    #[test]
    fn test_numbers() {
        assert_eq!(
            tokens("12 1.5 .5 1E3 2.5D-3 7! 40000"),
            vec![
                Token::Literal(Literal::Integer("12".into())),
                Token::Literal(Literal::Float("1.5".into())),
                Token::Literal(Literal::Float(".5".into())),
                Token::Literal(Literal::Float("1E3".into())),
                Token::Literal(Literal::Float("2.5D-3".into())),
                Token::Literal(Literal::Integer("7!".into())),
                Token::Literal(Literal::Float("40000".into())),
            ]
        );
    }

    #[test]
    fn test_exponent_needs_digits() {
        assert_eq!(
            tokens("1ELSE"),
            vec![
                Token::Literal(Literal::Integer("1".into())),
                Token::Word(Word::Else),
            ]
        );
    }

    #[test]
    fn test_hex() {
        assert_eq!(
            tokens("&HFF &h42"),
            vec![
                Token::Literal(Literal::Hex("FF".into())),
                Token::Literal(Literal::Hex("42".into())),
            ]
        );
    }

    #[test]
    fn test_string_keywords() {
        assert_eq!(
            tokens("LEFT$(A$,1) LEFT"),
            vec![
                Token::Word(Word::Left),
                Token::LParen,
                Token::Ident(Ident::new("A$")),
                Token::Comma,
                Token::Literal(Literal::Integer("1".into())),
                Token::RParen,
                Token::Ident(Ident::new("LEFT")),
            ]
        );
    }

    #[test]
    fn test_keyword_before_handle() {
        assert_eq!(
            tokens("PRINT#1,X"),
            vec![
                Token::Word(Word::Print1),
                Token::Handle("1".into()),
                Token::Comma,
                Token::Ident(Ident::new("X")),
            ]
        );
    }

    #[test]
    fn test_quotes() {
        assert_eq!(
            tokens("PRINT 'ab' \"c'd\""),
            vec![
                Token::Word(Word::Print1),
                Token::Literal(Literal::String("ab".into())),
                Token::Literal(Literal::String("c'd".into())),
            ]
        );
        assert_eq!(
            tokens("NEXT X ' next without for"),
            vec![
                Token::Word(Word::Next),
                Token::Ident(Ident::new("X")),
                Token::Word(Word::Rem2),
                Token::Remark(" next without for".into()),
            ]
        );
    }

    #[test]
    fn test_relational() {
        assert_eq!(
            tokens("<=>=<>><"),
            vec![
                Token::Operator(Operator::LessEqual),
                Token::Operator(Operator::GreaterEqual),
                Token::Operator(Operator::NotEqual),
                Token::Operator(Operator::NotEqual),
            ]
        );
    }

    #[test]
    fn test_illegal_characters_continue() {
        assert_eq!(
            tokens("A=1 @ b"),
            vec![
                Token::Ident(Ident::new("A")),
                Token::Operator(Operator::Equal),
                Token::Literal(Literal::Integer("1".into())),
                Token::Unknown("@".into()),
                Token::Unknown("b".into()),
            ]
        );
    }

    #[test]
    fn test_end_if() {
        assert_eq!(tokens("END IF"), vec![Token::Word(Word::Endif)]);
        assert_eq!(tokens("ENDIF"), vec![Token::Word(Word::Endif)]);
    }

    #[test]
    fn test_data_items() {
        assert_eq!(
            tokens("DATA 1.5,\"A,B\", hello world :PRINT"),
            vec![
                Token::Word(Word::Data),
                Token::Remark("1.5".into()),
                Token::Comma,
                Token::Literal(Literal::String("A,B".into())),
                Token::Comma,
                Token::Remark("hello world ".into()),
                Token::Colon,
                Token::Word(Word::Print1),
            ]
        );
    }

    #[test]
    fn test_feed_resets() {
        let mut t = Tokenizer::new();
        t.feed("REM X");
        assert_eq!(t.next_token(), Some(Token::Word(Word::Rem1)));
        t.feed("X");
        assert_eq!(t.next_token(), Some(Token::Ident(Ident::new("X"))));
        assert_eq!(t.next_token(), None);
    }
}
