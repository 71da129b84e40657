use crate::error;
use crate::lang::Error;

type Result<T> = std::result::Result<T, Error>;

/// ## Microsoft Binary Format single precision
///
/// A sign, a binary exponent and a 24 bit mantissa with the leading
/// one explicit. Arithmetic truncates and rounds the way the GW-BASIC
/// math package does so MKS$ records match byte for byte.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MbfFloat {
    sign: u8,
    exp: i32,
    mantissa: u32,
}

const HIDDEN: u32 = 1 << 23;
const MIN_EXP: i32 = -126;
const MAX_EXP: i32 = 127;

impl MbfFloat {
    pub fn new(sign: u8, exp: i32, mantissa: u32) -> Result<MbfFloat> {
        if mantissa == 0 {
            return Ok(MbfFloat::zero());
        }
        if exp < MIN_EXP || exp > MAX_EXP || mantissa >> 24 != 0 || mantissa & HIDDEN == 0 {
            return Err(error!(Overflow));
        }
        Ok(MbfFloat {
            sign: sign & 1,
            exp,
            mantissa,
        })
    }

    pub fn zero() -> MbfFloat {
        MbfFloat {
            sign: 0,
            exp: 0,
            mantissa: 0,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.mantissa == 0
    }

    pub fn parts(&self) -> (u8, i32, u32) {
        (self.sign, self.exp, self.mantissa)
    }

    /// Denormals become zero. Infinities and NaN overflow.
    pub fn from_float(f: f32) -> Result<MbfFloat> {
        let bits = f.to_bits();
        let raw_exp = ((bits >> 23) & 0xff) as i32;
        if raw_exp == 0xff {
            return Err(error!(Overflow));
        }
        if raw_exp == 0 {
            return Ok(MbfFloat::zero());
        }
        Ok(MbfFloat {
            sign: (bits >> 31) as u8,
            exp: raw_exp - 127,
            mantissa: (bits & 0x7f_ffff) | HIDDEN,
        })
    }

    pub fn as_float(&self) -> f32 {
        if self.is_zero() {
            return 0.0;
        }
        let bits = (self.sign as u32) << 31
            | ((self.exp + 127) as u32) << 23
            | (self.mantissa & 0x7f_ffff);
        f32::from_bits(bits)
    }

    pub fn negate(&self) -> MbfFloat {
        if self.is_zero() {
            *self
        } else {
            MbfFloat {
                sign: self.sign ^ 1,
                ..*self
            }
        }
    }

    pub fn add(&self, other: &MbfFloat) -> Result<MbfFloat> {
        if self.is_zero() {
            return Ok(*other);
        }
        if other.is_zero() {
            return Ok(*self);
        }
        let (a, b) = if (self.exp, self.mantissa) >= (other.exp, other.mantissa) {
            (self, other)
        } else {
            (other, self)
        };
        let shift = (a.exp - b.exp) as u32;
        if shift > 23 {
            return Ok(*a);
        }
        let mut exp = a.exp;
        let mut mantissa = if a.sign == b.sign {
            let mut m = a.mantissa + (b.mantissa >> shift);
            if m > 0xff_ffff {
                m >>= 1;
                exp += 1;
            }
            m
        } else {
            a.mantissa - (b.mantissa >> shift)
        };
        if mantissa == 0 {
            return Ok(MbfFloat::zero());
        }
        while mantissa & HIDDEN == 0 {
            mantissa <<= 1;
            exp -= 1;
        }
        if exp < MIN_EXP {
            return Ok(MbfFloat::zero());
        }
        MbfFloat::new(a.sign, exp, mantissa)
    }

    pub fn subtract(&self, other: &MbfFloat) -> Result<MbfFloat> {
        self.add(&other.negate())
    }

    pub fn multiply(&self, other: &MbfFloat) -> Result<MbfFloat> {
        if self.is_zero() || other.is_zero() {
            return Ok(MbfFloat::zero());
        }
        let mut exp = self.exp + other.exp + 1;
        let mut r = ((self.mantissa as u64) * (other.mantissa as u64)) >> 16;
        if r < 1 << 31 {
            r <<= 1;
            exp -= 1;
        }
        r &= 0xff_ffff_ffe0;
        let low = r & 0xf0;
        r += 0x80;
        r >>= 8;
        if low == 0x80 && r & 1 == 1 {
            r -= 1;
        }
        if r >= 1 << 24 {
            r >>= 1;
            exp += 1;
        }
        if exp < MIN_EXP {
            return Ok(MbfFloat::zero());
        }
        MbfFloat::new(self.sign ^ other.sign, exp, r as u32)
    }

    pub fn divide(&self, other: &MbfFloat) -> Result<MbfFloat> {
        if other.is_zero() {
            return Err(error!(DivisionByZero));
        }
        self.multiply(&MbfFloat::from_float(1.0 / other.as_float())?)
    }

    /// Bytes in memory order: mantissa low, middle, sign with mantissa
    /// high, then the exponent biased by 129.
    pub fn to_bytes(&self) -> Result<[u8; 4]> {
        if self.is_zero() {
            return Ok([0; 4]);
        }
        let biased = self.exp + 129;
        if biased > 0xff {
            return Err(error!(Overflow));
        }
        Ok([
            self.mantissa as u8,
            (self.mantissa >> 8) as u8,
            self.sign << 7 | ((self.mantissa >> 16) as u8 & 0x7f),
            biased as u8,
        ])
    }

    pub fn from_bytes(bytes: [u8; 4]) -> MbfFloat {
        if bytes[3] == 0 {
            return MbfFloat::zero();
        }
        MbfFloat {
            sign: bytes[2] >> 7,
            exp: bytes[3] as i32 - 129,
            mantissa: HIDDEN
                | ((bytes[2] & 0x7f) as u32) << 16
                | (bytes[1] as u32) << 8
                | bytes[0] as u32,
        }
    }
}
