use super::val::round_i16;
use super::Val;
use crate::error;
use crate::lang::Error;

type Result<T> = std::result::Result<T, Error>;

/// Arithmetic and relational operators. Integer results that leave
/// the 16 bit range are promoted to floating point.
pub struct Operation {}

impl Operation {
    pub fn negate(val: Val) -> Result<Val> {
        use Val::*;
        match val {
            Integer(n) => match n.checked_neg() {
                Some(n) => Ok(Integer(n)),
                None => Ok(Float(-(n as f64))),
            },
            Float(n) => Ok(Float(-n)),
            String(_) => Err(error!(TypeMismatch)),
        }
    }

    pub fn not(val: Val) -> Result<Val> {
        use Val::*;
        match val {
            Integer(n) => Ok(Integer(!n)),
            Float(n) => Ok(Integer(!round_i16(n)?)),
            String(_) => Err(error!(TypeMismatch)),
        }
    }

    pub fn power(lhs: Val, rhs: Val) -> Result<Val> {
        let (l, r) = Self::floats(&lhs, &rhs)?;
        Ok(Val::Float(l.powf(r)))
    }

    pub fn multiply(lhs: Val, rhs: Val) -> Result<Val> {
        use Val::*;
        match (&lhs, &rhs) {
            (Integer(l), Integer(r)) => match l.checked_mul(*r) {
                Some(i) => Ok(Integer(i)),
                None => Ok(Float(*l as f64 * *r as f64)),
            },
            _ => {
                let (l, r) = Self::floats(&lhs, &rhs)?;
                Ok(Float(l * r))
            }
        }
    }

    pub fn divide(lhs: Val, rhs: Val) -> Result<Val> {
        let (l, r) = Self::floats(&lhs, &rhs)?;
        if r == 0.0 {
            return Err(error!(DivisionByZero));
        }
        Ok(Val::Float(l / r))
    }

    pub fn divide_int(lhs: Val, rhs: Val) -> Result<Val> {
        let (l, r) = Self::rounded(&lhs, &rhs)?;
        if r == 0.0 {
            return Err(error!(DivisionByZero));
        }
        Ok(Self::narrow((l / r).trunc()))
    }

    pub fn modulus(lhs: Val, rhs: Val) -> Result<Val> {
        let (l, r) = Self::rounded(&lhs, &rhs)?;
        if r == 0.0 {
            return Err(error!(DivisionByZero));
        }
        Ok(Self::narrow(l % r))
    }

    pub fn sum(lhs: Val, rhs: Val) -> Result<Val> {
        use Val::*;
        match (&lhs, &rhs) {
            (String(l), String(r)) => Ok(String(format!("{}{}", l, r).into())),
            (Integer(l), Integer(r)) => match l.checked_add(*r) {
                Some(i) => Ok(Integer(i)),
                None => Ok(Float(*l as f64 + *r as f64)),
            },
            _ => {
                let (l, r) = Self::floats(&lhs, &rhs)?;
                Ok(Float(l + r))
            }
        }
    }

    pub fn subtract(lhs: Val, rhs: Val) -> Result<Val> {
        use Val::*;
        match (&lhs, &rhs) {
            (Integer(l), Integer(r)) => match l.checked_sub(*r) {
                Some(i) => Ok(Integer(i)),
                None => Ok(Float(*l as f64 - *r as f64)),
            },
            _ => {
                let (l, r) = Self::floats(&lhs, &rhs)?;
                Ok(Float(l - r))
            }
        }
    }

    pub fn equal(lhs: Val, rhs: Val) -> Result<Val> {
        Self::compare(lhs, rhs, |o| o == std::cmp::Ordering::Equal)
    }

    pub fn not_equal(lhs: Val, rhs: Val) -> Result<Val> {
        Self::compare(lhs, rhs, |o| o != std::cmp::Ordering::Equal)
    }

    pub fn less(lhs: Val, rhs: Val) -> Result<Val> {
        Self::compare(lhs, rhs, |o| o == std::cmp::Ordering::Less)
    }

    pub fn less_equal(lhs: Val, rhs: Val) -> Result<Val> {
        Self::compare(lhs, rhs, |o| o != std::cmp::Ordering::Greater)
    }

    pub fn greater(lhs: Val, rhs: Val) -> Result<Val> {
        Self::compare(lhs, rhs, |o| o == std::cmp::Ordering::Greater)
    }

    pub fn greater_equal(lhs: Val, rhs: Val) -> Result<Val> {
        Self::compare(lhs, rhs, |o| o != std::cmp::Ordering::Less)
    }

    fn compare<F>(lhs: Val, rhs: Val, test: F) -> Result<Val>
    where
        F: Fn(std::cmp::Ordering) -> bool,
    {
        use Val::*;
        let ordering = match (&lhs, &rhs) {
            (String(l), String(r)) => l.cmp(r),
            (Integer(l), Integer(r)) => l.cmp(r),
            _ => {
                let (l, r) = Self::floats(&lhs, &rhs)?;
                match l.partial_cmp(&r) {
                    Some(o) => o,
                    None => return Ok(Val::from_bool(false)),
                }
            }
        };
        Ok(Val::from_bool(test(ordering)))
    }

    fn floats(lhs: &Val, rhs: &Val) -> Result<(f64, f64)> {
        use std::convert::TryFrom;
        Ok((f64::try_from(lhs)?, f64::try_from(rhs)?))
    }

    fn rounded(lhs: &Val, rhs: &Val) -> Result<(f64, f64)> {
        let (l, r) = Self::floats(lhs, rhs)?;
        Ok((l.round(), r.round()))
    }

    fn narrow(n: f64) -> Val {
        if n >= i16::min_value() as f64 && n <= i16::max_value() as f64 {
            Val::Integer(n as i16)
        } else {
            Val::Float(n)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_overflow_promotes() {
        assert_eq!(
            Operation::sum(Val::Integer(32767), Val::Integer(1)),
            Ok(Val::Float(32768.0))
        );
        assert_eq!(
            Operation::multiply(Val::Integer(300), Val::Integer(300)),
            Ok(Val::Float(90000.0))
        );
        assert_eq!(
            Operation::negate(Val::Integer(-32768)),
            Ok(Val::Float(32768.0))
        );
    }

    #[test]
    fn test_divide() {
        assert_eq!(
            Operation::divide(Val::Integer(7), Val::Integer(2)),
            Ok(Val::Float(3.5))
        );
        assert!(Operation::divide(Val::Integer(1), Val::Float(0.0)).is_err());
        assert_eq!(
            Operation::divide_int(Val::Float(7.6), Val::Integer(2)),
            Ok(Val::Integer(4))
        );
        assert_eq!(
            Operation::modulus(Val::Integer(-7), Val::Integer(3)),
            Ok(Val::Integer(-1))
        );
    }

    #[test]
    fn test_relational() {
        assert_eq!(
            Operation::less(Val::Integer(1), Val::Float(1.5)),
            Ok(Val::Integer(-1))
        );
        assert_eq!(
            Operation::equal(Val::from("A"), Val::from("B")),
            Ok(Val::Integer(0))
        );
        assert!(Operation::equal(Val::from("A"), Val::Integer(1)).is_err());
    }

    #[test]
    fn test_not_is_bitwise() {
        assert_eq!(Operation::not(Val::Integer(0)), Ok(Val::Integer(-1)));
        assert_eq!(Operation::not(Val::Integer(-1)), Ok(Val::Integer(0)));
        assert_eq!(Operation::not(Val::Float(5.0)), Ok(Val::Integer(-6)));
    }

    #[test]
    fn test_string_concat() {
        assert_eq!(
            Operation::sum(Val::from("AB"), Val::from("CD")),
            Ok(Val::from("ABCD"))
        );
    }
}
