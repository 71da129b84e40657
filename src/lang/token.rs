pub use super::ident::Ident;
use super::{Error, LineNumber};
use std::collections::HashMap;
use std::convert::TryFrom;

thread_local!(
    static STRING_TO_TOKEN: HashMap<std::string::String, Token> = Token::PUNCTUATION
        .iter()
        .cloned()
        .chain(Word::ALL.iter().cloned().map(Token::Word))
        .chain(Operator::ALL.iter().cloned().map(Token::Operator))
        .map(|d| (d.to_string(), d))
        .chain(std::iter::once((
            "><".to_string(),
            Token::Operator(Operator::NotEqual)
        )))
        .collect();
);

#[derive(Debug, PartialEq, Clone)]
pub enum Token {
    Unknown(String),
    Whitespace(usize),
    Literal(Literal),
    Word(Word),
    Operator(Operator),
    Ident(Ident),
    Handle(String),
    Remark(String),
    Hash,
    LParen,
    RParen,
    Comma,
    Colon,
    Semicolon,
}

impl Token {
    const PUNCTUATION: [Token; 6] = [
        Token::Hash,
        Token::LParen,
        Token::RParen,
        Token::Comma,
        Token::Colon,
        Token::Semicolon,
    ];

    pub fn from_string(s: &str) -> Option<Token> {
        STRING_TO_TOKEN.with(|stt| stt.get(s).cloned())
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Token::*;
        match self {
            Unknown(s) => write!(f, "{}", s),
            Whitespace(u) => write!(f, "{s:>w$}", s = "", w = u),
            Literal(s) => write!(f, "{}", s),
            Word(s) => write!(f, "{}", s),
            Operator(s) => write!(f, "{}", s),
            Ident(s) => write!(f, "{}", s),
            Handle(s) => write!(f, "#{}", s),
            Remark(s) => write!(f, "{}", s),
            Hash => write!(f, "#"),
            LParen => write!(f, "("),
            RParen => write!(f, ")"),
            Comma => write!(f, ","),
            Colon => write!(f, ":"),
            Semicolon => write!(f, ";"),
        }
    }
}

impl TryFrom<&Token> for LineNumber {
    type Error = Error;
    fn try_from(token: &Token) -> Result<Self, Self::Error> {
        let msg = "INVALID LINE NUMBER";
        if let Token::Literal(Literal::Integer(s)) | Token::Literal(Literal::Float(s)) = token {
            if s.chars().all(|c| c.is_ascii_digit()) {
                return match s.parse::<u16>() {
                    Ok(line) => Ok(line),
                    Err(_) => Err(error!(Overflow; msg)),
                };
            }
        }
        Err(error!(SyntaxError; msg))
    }
}

/// Literal text as written. Numbers are classified by shape: plain
/// digits that fit in 16 bits are integers, anything else is floating.
#[derive(Debug, PartialEq, Clone)]
pub enum Literal {
    Integer(String),
    Float(String),
    Hex(String),
    Octal(String),
    String(String),
}

impl std::fmt::Display for Literal {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Literal::*;
        match self {
            Integer(s) | Float(s) => write!(f, "{}", s),
            Hex(s) => write!(f, "&H{}", s),
            Octal(s) => write!(f, "&O{}", s),
            String(s) => write!(f, "\"{}\"", s),
        }
    }
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Word {
    Abs,
    Append,
    As,
    Asc,
    Atn,
    Chr,
    Circle,
    Close,
    Cls,
    Color,
    Cos,
    Csrlin,
    Cvi,
    Cvs,
    Data,
    Defdbl,
    Defint,
    Defsng,
    Defstr,
    Dim,
    Else,
    End,
    Endif,
    Eof,
    Erl,
    Err,
    Error,
    Exp,
    Field,
    Fix,
    For,
    Frp,
    Get,
    Gosub,
    Goto,
    If,
    Inkey,
    Input,
    Int,
    Key,
    Left,
    Len,
    Let,
    Line,
    Locate,
    Log,
    Lset,
    Mid,
    Mki,
    Mks,
    Next,
    On,
    Open,
    Output,
    Print1,
    Print2,
    Pset,
    Put,
    Random,
    Randomize,
    Read,
    Rem1,
    Rem2,
    Restore,
    Resume,
    Return,
    Right,
    Rnd,
    Rset,
    Screen,
    Sgn,
    Sin,
    Space,
    Sqr,
    Step,
    Stop,
    Str,
    String,
    System,
    Tab,
    Tan,
    Then,
    To,
    Using,
    Val,
    Wend,
    While,
    Width,
    Window,
    Write,
}

impl Word {
    const ALL: [Word; 90] = [
        Word::Abs,
        Word::Append,
        Word::As,
        Word::Asc,
        Word::Atn,
        Word::Chr,
        Word::Circle,
        Word::Close,
        Word::Cls,
        Word::Color,
        Word::Cos,
        Word::Csrlin,
        Word::Cvi,
        Word::Cvs,
        Word::Data,
        Word::Defdbl,
        Word::Defint,
        Word::Defsng,
        Word::Defstr,
        Word::Dim,
        Word::Else,
        Word::End,
        Word::Endif,
        Word::Eof,
        Word::Erl,
        Word::Err,
        Word::Error,
        Word::Exp,
        Word::Field,
        Word::Fix,
        Word::For,
        Word::Frp,
        Word::Get,
        Word::Gosub,
        Word::Goto,
        Word::If,
        Word::Inkey,
        Word::Input,
        Word::Int,
        Word::Key,
        Word::Left,
        Word::Len,
        Word::Let,
        Word::Line,
        Word::Locate,
        Word::Log,
        Word::Lset,
        Word::Mid,
        Word::Mki,
        Word::Mks,
        Word::Next,
        Word::On,
        Word::Open,
        Word::Output,
        Word::Print1,
        Word::Print2,
        Word::Pset,
        Word::Put,
        Word::Random,
        Word::Randomize,
        Word::Read,
        Word::Rem1,
        Word::Rem2,
        Word::Restore,
        Word::Resume,
        Word::Return,
        Word::Right,
        Word::Rnd,
        Word::Rset,
        Word::Screen,
        Word::Sgn,
        Word::Sin,
        Word::Space,
        Word::Sqr,
        Word::Step,
        Word::Stop,
        Word::Str,
        Word::String,
        Word::System,
        Word::Tab,
        Word::Tan,
        Word::Then,
        Word::To,
        Word::Using,
        Word::Val,
        Word::Wend,
        Word::While,
        Word::Width,
        Word::Window,
        Word::Write,
    ];
}

impl std::fmt::Display for Word {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Word::*;
        let s = match self {
            Abs => "ABS",
            Append => "APPEND",
            As => "AS",
            Asc => "ASC",
            Atn => "ATN",
            Chr => "CHR$",
            Circle => "CIRCLE",
            Close => "CLOSE",
            Cls => "CLS",
            Color => "COLOR",
            Cos => "COS",
            Csrlin => "CSRLIN",
            Cvi => "CVI",
            Cvs => "CVS",
            Data => "DATA",
            Defdbl => "DEFDBL",
            Defint => "DEFINT",
            Defsng => "DEFSNG",
            Defstr => "DEFSTR",
            Dim => "DIM",
            Else => "ELSE",
            End => "END",
            Endif => "ENDIF",
            Eof => "EOF",
            Erl => "ERL",
            Err => "ERR",
            Error => "ERROR",
            Exp => "EXP",
            Field => "FIELD",
            Fix => "FIX",
            For => "FOR",
            Frp => "FRP",
            Get => "GET",
            Gosub => "GOSUB",
            Goto => "GOTO",
            If => "IF",
            Inkey => "INKEY$",
            Input => "INPUT",
            Int => "INT",
            Key => "KEY",
            Left => "LEFT$",
            Len => "LEN",
            Let => "LET",
            Line => "LINE",
            Locate => "LOCATE",
            Log => "LOG",
            Lset => "LSET",
            Mid => "MID$",
            Mki => "MKI$",
            Mks => "MKS$",
            Next => "NEXT",
            On => "ON",
            Open => "OPEN",
            Output => "OUTPUT",
            Print1 => "PRINT",
            Print2 => "?",
            Pset => "PSET",
            Put => "PUT",
            Random => "RANDOM",
            Randomize => "RANDOMIZE",
            Read => "READ",
            Rem1 => "REM",
            Rem2 => "'",
            Restore => "RESTORE",
            Resume => "RESUME",
            Return => "RETURN",
            Right => "RIGHT$",
            Rnd => "RND",
            Rset => "RSET",
            Screen => "SCREEN",
            Sgn => "SGN",
            Sin => "SIN",
            Space => "SPACE$",
            Sqr => "SQR",
            Step => "STEP",
            Stop => "STOP",
            Str => "STR$",
            String => "STRING$",
            System => "SYSTEM",
            Tab => "TAB",
            Tan => "TAN",
            Then => "THEN",
            To => "TO",
            Using => "USING",
            Val => "VAL",
            Wend => "WEND",
            While => "WHILE",
            Width => "WIDTH",
            Window => "WINDOW",
            Write => "WRITE",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Operator {
    Caret,
    Multiply,
    Divide,
    DivideInt,
    Modulus,
    Plus,
    Minus,
    Equal,
    NotEqual,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
    Not,
    And,
    Or,
}

impl Operator {
    const ALL: [Operator; 16] = [
        Operator::Caret,
        Operator::Multiply,
        Operator::Divide,
        Operator::DivideInt,
        Operator::Modulus,
        Operator::Plus,
        Operator::Minus,
        Operator::Equal,
        Operator::NotEqual,
        Operator::Less,
        Operator::LessEqual,
        Operator::Greater,
        Operator::GreaterEqual,
        Operator::Not,
        Operator::And,
        Operator::Or,
    ];
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Operator::*;
        match self {
            Caret => write!(f, "^"),
            Multiply => write!(f, "*"),
            Divide => write!(f, "/"),
            DivideInt => write!(f, "\\"),
            Modulus => write!(f, "MOD"),
            Plus => write!(f, "+"),
            Minus => write!(f, "-"),
            Equal => write!(f, "="),
            NotEqual => write!(f, "<>"),
            Less => write!(f, "<"),
            LessEqual => write!(f, "<="),
            Greater => write!(f, ">"),
            GreaterEqual => write!(f, ">="),
            Not => write!(f, "NOT"),
            And => write!(f, "AND"),
            Or => write!(f, "OR"),
        }
    }
}
