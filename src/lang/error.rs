use super::{Column, LineKey};

#[derive(Clone, PartialEq)]
pub struct Error {
    code: u16,
    line: Option<LineKey>,
    source_line: Option<usize>,
    column: Column,
    message: String,
}

#[doc(hidden)]
#[macro_export]
macro_rules! error {
    ($err:ident) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err)
    };
    ($err:ident, ..$col:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err).in_column($col)
    };
    ($err:ident; $msg:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err).message($msg)
    };
    ($err:ident, ..$col:expr; $msg:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err)
            .in_column($col)
            .message($msg)
    };
}

impl Error {
    pub fn new(code: ErrorCode) -> Error {
        Error {
            code: code as u16,
            line: None,
            source_line: None,
            column: 0..0,
            message: String::new(),
        }
    }

    /// Error raised by the ERROR statement with a program supplied code.
    pub fn from_code(code: u16) -> Error {
        Error {
            code,
            line: None,
            source_line: None,
            column: 0..0,
            message: String::new(),
        }
    }

    pub fn code(&self) -> u16 {
        self.code
    }

    pub fn line(&self) -> Option<LineKey> {
        self.line
    }

    pub fn source_line(&self) -> Option<usize> {
        self.source_line
    }

    pub fn column(&self) -> Column {
        self.column.clone()
    }

    pub fn is_warning(&self) -> bool {
        self.code == ErrorCode::Warning as u16
    }

    pub fn in_line(mut self, line: LineKey) -> Error {
        if self.line.is_none() {
            self.line = Some(line);
        }
        self
    }

    pub fn in_source_line(mut self, source_line: Option<usize>) -> Error {
        if self.source_line.is_none() {
            self.source_line = source_line;
        }
        self
    }

    pub fn in_column(mut self, column: &Column) -> Error {
        if self.column == (0..0) {
            self.column = column.clone();
        }
        self
    }

    pub fn message<S: Into<String>>(mut self, message: S) -> Error {
        self.message = message.into();
        self
    }
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Error {
        use std::io::ErrorKind;
        let code = match error.kind() {
            ErrorKind::NotFound => ErrorCode::FileNotFound,
            ErrorKind::UnexpectedEof => ErrorCode::InputPastEnd,
            _ => ErrorCode::DeviceIoError,
        };
        Error::new(code).message(error.to_string().to_uppercase())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ErrorCode {
    Warning = 0,
    NextWithoutFor = 1,
    SyntaxError = 2,
    ReturnWithoutGosub = 3,
    OutOfData = 4,
    IllegalFunctionCall = 5,
    Overflow = 6,
    OutOfMemory = 7,
    UndefinedLine = 8,
    SubscriptOutOfRange = 9,
    RedimensionedArray = 10,
    DivisionByZero = 11,
    TypeMismatch = 13,
    StringTooLong = 15,
    ResumeWithoutError = 20,
    WhileWithoutWend = 29,
    WendWithoutWhile = 30,
    FieldOverflow = 50,
    InternalError = 51,
    BadFileNumber = 52,
    FileNotFound = 53,
    BadFileMode = 54,
    DeviceIoError = 57,
    InputPastEnd = 62,
    BadRecordNumber = 63,
    AdvancedFeature = 73,
    Break = 255,
}

impl std::fmt::Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Error {{ {} }}", self.to_string())
    }
}

impl std::error::Error for Error {}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let code_str = match self.code {
            0 => "WARNING",
            1 => "NEXT WITHOUT FOR",
            2 => "SYNTAX ERROR",
            3 => "RETURN WITHOUT GOSUB",
            4 => "OUT OF DATA",
            5 => "ILLEGAL FUNCTION CALL",
            6 => "OVERFLOW",
            7 => "OUT OF MEMORY",
            8 => "UNDEFINED LINE",
            9 => "SUBSCRIPT OUT OF RANGE",
            10 => "REDIMENSIONED ARRAY",
            11 => "DIVISION BY ZERO",
            13 => "TYPE MISMATCH",
            15 => "STRING TOO LONG",
            20 => "RESUME WITHOUT ERROR",
            29 => "WHILE WITHOUT WEND",
            30 => "WEND WITHOUT WHILE",
            50 => "FIELD OVERFLOW",
            51 => "INTERNAL ERROR",
            52 => "BAD FILE NUMBER",
            53 => "FILE NOT FOUND",
            54 => "BAD FILE MODE",
            57 => "DEVICE I/O ERROR",
            62 => "INPUT PAST END",
            63 => "BAD RECORD NUMBER",
            73 => "ADVANCED FEATURE",
            255 => "BREAK",
            _ => "",
        };
        let mut suffix = String::new();
        if let Some(line) = self.line {
            suffix.push_str(&format!(" {}", line));
        }
        if let Some(source_line) = self.source_line {
            suffix.push_str(&format!(" AT SOURCE LINE {}", source_line));
        }
        if (0..0) != self.column {
            suffix.push_str(&format!(" ({}..{})", self.column.start, self.column.end));
        }
        let message = if self.message.is_empty() {
            String::new()
        } else {
            format!("; {}", self.message)
        };
        if code_str.is_empty() {
            if suffix.is_empty() {
                write!(f, "PROGRAM ERROR {}{}", self.code, message)
            } else {
                write!(f, "PROGRAM ERROR {} IN{}{}", self.code, suffix, message)
            }
        } else if suffix.is_empty() {
            write!(f, "{}{}", code_str, message)
        } else {
            write!(f, "{} IN{}{}", code_str, suffix, message)
        }
    }
}
