//! Number formatting for PRINT. Floats print with a sign column, up to
//! eight significant digits, no leading zero before the decimal point
//! and no trailing zeros after it.

/// Formats a float for PRINT. The result always starts with a space
/// or a minus sign.
pub fn format_float(v: f64) -> String {
    if v == 0.0 {
        return " 0".to_string();
    }
    let e = v.abs().log10().floor() as i32;
    let wide = strip(&alt_general(v, 9));
    let s = if e.abs() > 8 || (wide.len() >= 8 && e < -3) {
        strip(&scientific_upper(v, 6))
    } else if (-3..=-1).contains(&e) {
        strip(&format!("{:.8}", v))
    } else {
        strip(&alt_general(v, 8))
    };
    if s.starts_with('-') {
        s
    } else {
        format!(" {}", s)
    }
}

/// Drops leading zeros and, for plain decimals, trailing zeros and a
/// dangling point.
fn strip(s: &str) -> String {
    let s = s.trim();
    let (sign, digits) = match s.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", s),
    };
    let mut x = format!("{}{}", sign, digits.trim_start_matches('0'));
    if x.contains('.') && !x.contains('e') && !x.contains('E') {
        x = x.trim_end_matches('0').trim_end_matches('.').to_string();
    }
    x
}

/// General format with `precision` significant digits that always keeps
/// the decimal point and the trailing zeros.
pub fn alt_general(v: f64, precision: usize) -> String {
    let precision = precision.max(1);
    let sci = format!("{:.*e}", precision - 1, v);
    let exp: i32 = match sci.find('e') {
        Some(pos) => sci[pos + 1..].parse().unwrap_or(0),
        None => 0,
    };
    if exp >= -4 && exp < precision as i32 {
        let decimals = (precision as i32 - 1 - exp) as usize;
        let s = format!("{:.*}", decimals, v);
        if s.contains('.') {
            s
        } else {
            format!("{}.", s)
        }
    } else {
        let (mantissa, _) = sci.split_at(sci.find('e').unwrap_or(sci.len()));
        let mantissa = if mantissa.contains('.') {
            mantissa.to_string()
        } else {
            format!("{}.", mantissa)
        };
        format!("{}{}", mantissa, exponent('e', exp))
    }
}

/// Scientific format with an upper case `E` and a signed exponent of at
/// least two digits.
pub fn scientific_upper(v: f64, decimals: usize) -> String {
    let sci = format!("{:.*e}", decimals, v);
    match sci.find('e') {
        Some(pos) => {
            let exp: i32 = sci[pos + 1..].parse().unwrap_or(0);
            format!("{}{}", &sci[..pos], exponent('E', exp))
        }
        None => sci,
    }
}

fn exponent(letter: char, exp: i32) -> String {
    let sign = if exp < 0 { '-' } else { '+' };
    format!("{}{}{:02}", letter, sign, exp.abs())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_float() {
        assert_eq!(format_float(0.0), " 0");
        assert_eq!(format_float(0.001), " .001");
        assert_eq!(format_float(-0.001), "-.001");
        assert_eq!(format_float(2.141428111), " 2.1414281");
        assert_eq!(format_float(4.99262212345e-03), " .00499262");
        assert_eq!(format_float(42.82857111), " 42.828571");
        assert_eq!(format_float(-0.9036958111), "-.90369581");
        assert_eq!(format_float(170.02811), " 170.02811");
        assert_eq!(format_float(0.0497375), " .0497375");
        assert_eq!(format_float(0.07958), " .07958");
        assert_eq!(format_float(0.0099475), " .0099475");
        assert_eq!(format_float(-0.16039812), "-.16039812");
    }

    #[test]
    fn test_whole_numbers() {
        assert_eq!(format_float(1.0), " 1");
        assert_eq!(format_float(100.0), " 100");
        assert_eq!(format_float(-5.0), "-5");
    }

    #[test]
    fn test_exponent_forms() {
        assert_eq!(format_float(1e9), " 1.000000E+09");
        assert_eq!(format_float(1e-5), " 1.000000E-05");
        assert_eq!(scientific_upper(123.456, 4), "1.2346E+02");
        assert_eq!(alt_general(123456789.0, 8), "1.2345679e+08");
    }
}
