use super::format::format_float;
use crate::error;
use crate::lang::Error;
use std::convert::TryFrom;
use std::rc::Rc;

type Result<T> = std::result::Result<T, Error>;

/// ## BASIC values
///
/// Strings hold one byte per character so binary record data survives
/// a trip through a variable.

#[derive(Debug, Clone, PartialEq)]
pub enum Val {
    Integer(i16),
    Float(f64),
    String(Rc<str>),
}

impl Val {
    pub fn is_true(&self) -> Result<bool> {
        match self {
            Val::Integer(n) => Ok(*n != 0),
            Val::Float(n) => Ok(*n != 0.0),
            Val::String(_) => Err(error!(TypeMismatch)),
        }
    }

    pub fn from_bool(b: bool) -> Val {
        Val::Integer(if b { -1 } else { 0 })
    }

    /// Text without the sign column, as used by STR$ and WRITE.
    pub fn to_trimmed_string(&self) -> String {
        match self {
            Val::Float(n) => format_float(*n).trim().to_string(),
            _ => self.to_string(),
        }
    }
}

/// Rounds half away from zero into a 16 bit integer.
pub fn round_i16(n: f64) -> Result<i16> {
    let r = n.round();
    if r.is_nan() || r < i16::min_value() as f64 || r > i16::max_value() as f64 {
        Err(error!(Overflow))
    } else {
        Ok(r as i16)
    }
}

impl TryFrom<&Val> for f64 {
    type Error = Error;
    fn try_from(val: &Val) -> Result<f64> {
        match val {
            Val::Integer(n) => Ok(*n as f64),
            Val::Float(n) => Ok(*n),
            Val::String(_) => Err(error!(TypeMismatch)),
        }
    }
}

impl TryFrom<&Val> for i16 {
    type Error = Error;
    fn try_from(val: &Val) -> Result<i16> {
        match val {
            Val::Integer(n) => Ok(*n),
            Val::Float(n) => round_i16(*n),
            Val::String(_) => Err(error!(TypeMismatch)),
        }
    }
}

impl TryFrom<&Val> for Rc<str> {
    type Error = Error;
    fn try_from(val: &Val) -> Result<Rc<str>> {
        match val {
            Val::String(s) => Ok(s.clone()),
            _ => Err(error!(TypeMismatch)),
        }
    }
}

impl From<f64> for Val {
    fn from(n: f64) -> Val {
        Val::Float(n)
    }
}

impl From<i16> for Val {
    fn from(n: i16) -> Val {
        Val::Integer(n)
    }
}

impl From<&str> for Val {
    fn from(s: &str) -> Val {
        Val::String(s.into())
    }
}

impl From<String> for Val {
    fn from(s: String) -> Val {
        Val::String(s.into())
    }
}

impl std::fmt::Display for Val {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Val::Integer(n) => write!(f, "{}", n),
            Val::Float(n) => write!(f, "{}", format_float(*n)),
            Val::String(s) => write!(f, "{}", s),
        }
    }
}

/// Characters above 255 cannot be stored in a byte and become `?`.
pub fn latin1_bytes(s: &str) -> Vec<u8> {
    s.chars()
        .map(|c| if (c as u32) < 256 { c as u8 } else { b'?' })
        .collect()
}

pub fn latin1_string(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| b as char).collect()
}
