use super::format::format_float;
use super::mbf::MbfFloat;
use super::val::{latin1_bytes, latin1_string, round_i16};
use super::Val;
use crate::error;
use crate::lang::Error;
use std::convert::TryFrom;
use std::rc::Rc;

type Result<T> = std::result::Result<T, Error>;

/// Builtin functions that depend only on their arguments.
pub struct Function {}

impl Function {
    pub fn abs(val: Val) -> Result<Val> {
        use Val::*;
        match val {
            Integer(n) => match n.checked_abs() {
                Some(n) => Ok(Integer(n)),
                None => Ok(Float((n as f64).abs())),
            },
            Float(n) => Ok(Float(n.abs())),
            String(_) => Err(error!(TypeMismatch)),
        }
    }

    pub fn asc(val: Val) -> Result<Val> {
        let s = Self::text(&val)?;
        match s.chars().next() {
            Some(ch) => Ok(Val::Integer(ch as u32 as i16)),
            None => Err(error!(IllegalFunctionCall)),
        }
    }

    pub fn atn(val: Val) -> Result<Val> {
        Ok(Val::Float(Self::number(&val)?.atan()))
    }

    /// CHR$(12) is a form feed, which prints as nothing.
    pub fn chr(val: Val) -> Result<Val> {
        let n = i16::try_from(&val)?;
        if n < 0 || n > 255 {
            return Err(error!(IllegalFunctionCall));
        }
        if n == 12 {
            return Ok(Val::from(""));
        }
        Ok(Val::from((n as u8 as char).to_string()))
    }

    pub fn cos(val: Val) -> Result<Val> {
        Ok(Val::Float(Self::number(&val)?.cos()))
    }

    pub fn cvi(val: Val) -> Result<Val> {
        let bytes = latin1_bytes(&Self::text(&val)?);
        match bytes.len() {
            0 => Ok(Val::Integer(0)),
            2 => Ok(Val::Integer(i16::from_le_bytes([bytes[0], bytes[1]]))),
            _ => Err(error!(IllegalFunctionCall; "CVI NEEDS 2 BYTES")),
        }
    }

    pub fn cvs(val: Val) -> Result<Val> {
        let bytes = latin1_bytes(&Self::text(&val)?);
        match bytes.len() {
            0 => Ok(Val::Float(0.0)),
            4 => {
                let mbf = MbfFloat::from_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
                Ok(Val::Float(mbf.as_float() as f64))
            }
            _ => Err(error!(IllegalFunctionCall; "CVS NEEDS 4 BYTES")),
        }
    }

    pub fn exp(val: Val) -> Result<Val> {
        Ok(Val::Float(Self::number(&val)?.exp()))
    }

    pub fn fix(val: Val) -> Result<Val> {
        match val {
            Val::Integer(_) => Ok(val),
            _ => Ok(Val::Float(Self::number(&val)?.trunc())),
        }
    }

    /// Fractional part, truncated toward zero.
    pub fn frp(val: Val) -> Result<Val> {
        let n = Self::number(&val)?;
        Ok(Val::Float(n - n.trunc()))
    }

    pub fn int(val: Val) -> Result<Val> {
        match val {
            Val::Integer(_) => Ok(val),
            _ => Ok(Val::Float(Self::number(&val)?.floor())),
        }
    }

    pub fn left(val: Val, len: Val) -> Result<Val> {
        let s = Self::text(&val)?;
        let n = Self::count(&len)?;
        Ok(Val::from(s.chars().take(n).collect::<String>()))
    }

    pub fn len(val: Val) -> Result<Val> {
        let s = Self::text(&val)?;
        Ok(Val::Integer(s.chars().count() as i16))
    }

    pub fn log(val: Val) -> Result<Val> {
        let n = Self::number(&val)?;
        if n <= 0.0 {
            return Err(error!(IllegalFunctionCall));
        }
        Ok(Val::Float(n.ln()))
    }

    pub fn mid(val: Val, start: Val, len: Option<Val>) -> Result<Val> {
        let s = Self::text(&val)?;
        let start = Self::count(&start)?;
        if start < 1 {
            return Err(error!(IllegalFunctionCall));
        }
        let chars = s.chars().skip(start - 1);
        let s: String = match len {
            Some(len) => chars.take(Self::count(&len)?).collect(),
            None => chars.collect(),
        };
        Ok(Val::from(s))
    }

    pub fn mki(val: Val) -> Result<Val> {
        let n = i16::try_from(&val)?;
        Ok(Val::from(latin1_string(&n.to_le_bytes())))
    }

    pub fn mks(val: Val) -> Result<Val> {
        let n = Self::number(&val)?;
        let bytes = MbfFloat::from_float(n as f32)?.to_bytes()?;
        Ok(Val::from(latin1_string(&bytes)))
    }

    pub fn right(val: Val, len: Val) -> Result<Val> {
        let s = Self::text(&val)?;
        let n = Self::count(&len)?;
        let total = s.chars().count();
        Ok(Val::from(s.chars().skip(total.saturating_sub(n)).collect::<String>()))
    }

    pub fn sgn(val: Val) -> Result<Val> {
        let n = Self::number(&val)?;
        let s = if n > 0.0 {
            1.0
        } else if n < 0.0 {
            -1.0
        } else {
            0.0
        };
        Ok(Val::Float(s))
    }

    pub fn sin(val: Val) -> Result<Val> {
        Ok(Val::Float(Self::number(&val)?.sin()))
    }

    pub fn space(val: Val) -> Result<Val> {
        let n = Self::count(&val)?;
        Ok(Val::from(" ".repeat(n)))
    }

    pub fn sqr(val: Val) -> Result<Val> {
        let n = Self::number(&val)?;
        if n < 0.0 {
            return Err(error!(IllegalFunctionCall));
        }
        Ok(Val::Float(n.sqrt()))
    }

    /// Floats keep the sign column but lose the padding behind them.
    pub fn str(val: Val) -> Result<Val> {
        match val {
            Val::Integer(n) => Ok(Val::from(n.to_string())),
            Val::Float(n) => Ok(Val::from(format_float(n).trim_end().to_string())),
            Val::String(_) => Err(error!(TypeMismatch)),
        }
    }

    pub fn string(len: Val, ch: Val) -> Result<Val> {
        let n = Self::count(&len)?;
        let ch = match &ch {
            Val::String(s) => match s.chars().next() {
                Some(ch) => ch,
                None => return Err(error!(IllegalFunctionCall)),
            },
            _ => {
                let code = i16::try_from(&ch)?;
                if code < 0 || code > 255 {
                    return Err(error!(IllegalFunctionCall));
                }
                code as u8 as char
            }
        };
        Ok(Val::from(std::iter::repeat(ch).take(n).collect::<String>()))
    }

    pub fn tan(val: Val) -> Result<Val> {
        Ok(Val::Float(Self::number(&val)?.tan()))
    }

    /// Reads the longest numeric prefix. Anything unreadable is zero.
    pub fn val(val: Val) -> Result<Val> {
        let s = Self::text(&val)?;
        Ok(Val::Float(parse_prefix(&s)))
    }

    fn number(val: &Val) -> Result<f64> {
        f64::try_from(val)
    }

    fn text(val: &Val) -> Result<Rc<str>> {
        Rc::<str>::try_from(val)
    }

    fn count(val: &Val) -> Result<usize> {
        let n = round_i16(Self::number(val)?)?;
        if n < 0 {
            return Err(error!(IllegalFunctionCall));
        }
        Ok(n as usize)
    }
}

/// Numeric prefix of `s` the way VAL and INPUT read it. Spaces inside
/// the number are ignored.
pub fn parse_prefix(s: &str) -> f64 {
    let s: String = s.chars().filter(|c| *c != ' ' && *c != '\t').collect();
    let upper = s.to_ascii_uppercase();
    if let Some(hex) = upper.strip_prefix("&H") {
        let digits: String = hex.chars().take_while(|c| c.is_ascii_hexdigit()).collect();
        return i64::from_str_radix(&digits, 16).unwrap_or(0) as f64;
    }
    if let Some(oct) = upper.strip_prefix("&O").or_else(|| upper.strip_prefix('&')) {
        let digits: String = oct.chars().take_while(|c| ('0'..='7').contains(c)).collect();
        return i64::from_str_radix(&digits, 8).unwrap_or(0) as f64;
    }
    let mut best = 0.0;
    for (i, ch) in upper.char_indices() {
        let end = i + ch.len_utf8();
        let candidate = upper[..end].replace('D', "E");
        if let Ok(n) = candidate.parse::<f64>() {
            best = n;
        } else if !matches!(ch, '+' | '-' | '.' | 'E' | 'D' | '0'..='9') {
            break;
        }
    }
    if best.is_finite() {
        best
    } else {
        0.0
    }
}
