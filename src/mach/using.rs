use super::format::scientific_upper;
use crate::error;
use crate::lang::Error;

type Result<T> = std::result::Result<T, Error>;

/// ## PRINT USING templates
///
/// A template is split into numeric fields. `#` is a digit, `.` marks
/// the decimal point and each `^` requests exponent form. Other
/// characters are copied around the field they follow or precede.

#[derive(Debug, Clone, PartialEq)]
pub struct PrintUsing {
    fields: Vec<Field>,
    next: usize,
}

#[derive(Debug, Clone, PartialEq)]
struct Field {
    prefix: String,
    kind: Kind,
    suffix: String,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Kind {
    Fixed { width: usize, decimals: usize },
    Exponent { decimals: usize },
}

#[derive(Default)]
struct Builder {
    before: usize,
    after: usize,
    point: bool,
    carets: usize,
    prefix: String,
    suffix: String,
    fields: Vec<Field>,
}

impl Builder {
    fn finish_field(&mut self) {
        if self.before > 0 || self.after > 0 {
            let width = self.before + self.after + self.point as usize;
            let kind = if self.carets > 0 {
                Kind::Exponent {
                    decimals: width.saturating_sub(2),
                }
            } else {
                Kind::Fixed {
                    width,
                    decimals: self.after,
                }
            };
            self.fields.push(Field {
                prefix: std::mem::take(&mut self.prefix),
                kind,
                suffix: std::mem::take(&mut self.suffix),
            });
        }
        self.before = 0;
        self.after = 0;
        self.point = false;
        self.carets = 0;
    }
}

impl PrintUsing {
    pub fn parse(template: &str) -> PrintUsing {
        let mut b = Builder::default();
        for ch in template.chars() {
            match ch {
                '#' => {
                    if !b.suffix.is_empty() {
                        b.finish_field();
                    }
                    if b.point {
                        b.after += 1;
                    } else {
                        b.before += 1;
                    }
                }
                '.' => b.point = true,
                '^' => b.carets += 1,
                _ => {
                    if b.before > 0 || b.after > 0 {
                        b.suffix.push(ch);
                    } else {
                        b.prefix.push(ch);
                    }
                }
            }
        }
        b.finish_field();
        PrintUsing {
            fields: b.fields,
            next: 0,
        }
    }

    /// Formats with the next field. Once every field has been used the
    /// last one takes all remaining values.
    pub fn format(&mut self, v: f64) -> Result<String> {
        let field = match self.fields.get(self.next) {
            Some(field) => field,
            None => return Err(error!(IllegalFunctionCall; "NO FIELD IN PRINT USING")),
        };
        if self.next + 1 < self.fields.len() {
            self.next += 1;
        }
        let number = match field.kind {
            Kind::Fixed { width, decimals } => format!("{:>w$.d$}", v, w = width, d = decimals),
            Kind::Exponent { decimals } => scientific_upper(v, decimals),
        };
        Ok(format!("{}{}{}", field.prefix, number, field.suffix))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_with_trailing_text() {
        let mut u = PrintUsing::parse("###.##    ");
        assert_eq!(u.format(3.14159).unwrap(), "  3.14    ");
        assert_eq!(u.format(-12.5).unwrap(), "-12.50    ");
    }

    #[test]
    fn test_exponent() {
        let mut u = PrintUsing::parse("       ##.###^^^^");
        assert_eq!(u.format(1234.5).unwrap(), "       1.2345E+03");
    }

    #[test]
    fn test_last_field_repeats() {
        let mut u = PrintUsing::parse("###  ###   ##");
        assert_eq!(u.format(1.0).unwrap(), "  1  ");
        assert_eq!(u.format(22.0).unwrap(), " 22   ");
        assert_eq!(u.format(3.0).unwrap(), " 3");
        assert_eq!(u.format(4.0).unwrap(), " 4");
        assert_eq!(u.format(55.0).unwrap(), "55");
    }

    #[test]
    fn test_no_field() {
        let mut u = PrintUsing::parse("HELLO");
        assert!(u.format(1.0).is_err());
    }
}
