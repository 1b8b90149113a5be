//! Price spec parsing and resolution.
//!
//! An exit price is written either as an absolute level ("4552.6") or as a
//! signed percentage offset from the entry price ("3%", "-8.7%"). Parsing
//! reports character offsets so malformed input can be shown with a caret.

use std::fmt;
use std::str::FromStr;

use crate::domain::error::ParseError;

/// A take-profit or stop-loss price, absolute or relative to the entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PriceSpec {
    /// A price level taken as-is.
    Absolute(f64),
    /// A percentage offset applied to the entry price. `-8.7` means 8.7%
    /// below the entry.
    PercentOffset(f64),
}

impl PriceSpec {
    /// Resolve to an absolute price against the given entry price.
    ///
    /// Absolute specs ignore the entry price entirely; percent offsets
    /// scale it by `1 + percent / 100`.
    pub fn resolve(&self, entry_price: f64) -> f64 {
        match self {
            PriceSpec::Absolute(price) => *price,
            PriceSpec::PercentOffset(percent) => entry_price * (1.0 + percent / 100.0),
        }
    }
}

impl From<f64> for PriceSpec {
    fn from(price: f64) -> Self {
        PriceSpec::Absolute(price)
    }
}

impl fmt::Display for PriceSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PriceSpec::Absolute(price) => write!(f, "{price}"),
            PriceSpec::PercentOffset(percent) => write!(f, "{percent}%"),
        }
    }
}

struct Scanner<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Scanner<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += ch.len_utf8();
        Some(ch)
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.peek() {
            if ch.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn scan_number(&mut self) -> Result<f64, ParseError> {
        let start = self.pos;
        let mut has_dot = false;
        let mut digits = 0;

        if self.peek() == Some('-') || self.peek() == Some('+') {
            self.advance();
        }

        while let Some(ch) = self.peek() {
            if ch.is_ascii_digit() {
                digits += 1;
                self.advance();
            } else if ch == '.' && !has_dot {
                has_dot = true;
                self.advance();
            } else {
                break;
            }
        }

        if digits == 0 {
            return Err(ParseError {
                message: "expected number".to_string(),
                position: start,
            });
        }

        let num_str = &self.input[start..self.pos];
        num_str.parse::<f64>().map_err(|_| ParseError {
            message: format!("invalid number: {}", num_str),
            position: start,
        })
    }
}

impl FromStr for PriceSpec {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut scanner = Scanner::new(s);
        scanner.skip_whitespace();
        let value = scanner.scan_number()?;
        let spec = if scanner.peek() == Some('%') {
            scanner.advance();
            PriceSpec::PercentOffset(value)
        } else {
            PriceSpec::Absolute(value)
        };
        scanner.skip_whitespace();
        if scanner.pos < s.len() {
            return Err(ParseError {
                message: format!("unexpected input after price: '{}'", &s[scanner.pos..]),
                position: scanner.pos,
            });
        }
        Ok(spec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_absolute() {
        assert_eq!("4552.6".parse::<PriceSpec>().unwrap(), PriceSpec::Absolute(4552.6));
        assert_eq!("95".parse::<PriceSpec>().unwrap(), PriceSpec::Absolute(95.0));
    }

    #[test]
    fn parses_percent_offset() {
        assert_eq!("3%".parse::<PriceSpec>().unwrap(), PriceSpec::PercentOffset(3.0));
        assert_eq!(
            "-8.7%".parse::<PriceSpec>().unwrap(),
            PriceSpec::PercentOffset(-8.7)
        );
        assert_eq!(
            "+1.5%".parse::<PriceSpec>().unwrap(),
            PriceSpec::PercentOffset(1.5)
        );
    }

    #[test]
    fn tolerates_surrounding_whitespace() {
        assert_eq!(" 3% ".parse::<PriceSpec>().unwrap(), PriceSpec::PercentOffset(3.0));
        assert_eq!(" 100 ".parse::<PriceSpec>().unwrap(), PriceSpec::Absolute(100.0));
    }

    #[test]
    fn error_on_empty_input() {
        let err = "".parse::<PriceSpec>().unwrap_err();
        assert!(err.message.contains("expected number"));
        assert_eq!(err.position, 0);
    }

    #[test]
    fn error_on_non_numeric_prefix() {
        let err = "abc%".parse::<PriceSpec>().unwrap_err();
        assert!(err.message.contains("expected number"));
        assert_eq!(err.position, 0);
    }

    #[test]
    fn error_on_bare_percent_sign() {
        let err = "%".parse::<PriceSpec>().unwrap_err();
        assert!(err.message.contains("expected number"));
    }

    #[test]
    fn error_on_trailing_garbage() {
        let err = "3%%".parse::<PriceSpec>().unwrap_err();
        assert!(err.message.contains("unexpected input"));
        assert_eq!(err.position, 2);

        let err = "3x%".parse::<PriceSpec>().unwrap_err();
        assert_eq!(err.position, 1);
    }

    #[test]
    fn error_on_double_sign() {
        let err = "--5%".parse::<PriceSpec>().unwrap_err();
        assert!(err.message.contains("expected number"));
        assert_eq!(err.position, 0);
    }

    #[test]
    fn error_display_with_context_points_at_offset() {
        let err = "4x20".parse::<PriceSpec>().unwrap_err();
        let display = err.display_with_context("4x20");
        assert!(display.contains("4x20"));
        assert!(display.contains(" ^"));
    }

    #[test]
    fn resolves_percent_against_entry() {
        let spec: PriceSpec = "10%".parse().unwrap();
        assert!((spec.resolve(100.0) - 110.0).abs() < 1e-9);

        let spec: PriceSpec = "-5%".parse().unwrap();
        assert!((spec.resolve(100.0) - 95.0).abs() < 1e-9);
    }

    #[test]
    fn resolves_absolute_ignoring_entry() {
        let spec: PriceSpec = "95".parse().unwrap();
        assert!((spec.resolve(100.0) - 95.0).abs() < f64::EPSILON);
        assert!((spec.resolve(4420.0) - 95.0).abs() < f64::EPSILON);
    }

    #[test]
    fn resolves_worked_example() {
        let tp: PriceSpec = "3%".parse().unwrap();
        let sl: PriceSpec = "-8.7%".parse().unwrap();
        assert!((tp.resolve(4420.0) - 4552.6).abs() < 1e-9);
        assert!((sl.resolve(4420.0) - 4420.0 * 0.913).abs() < 1e-9);
    }

    #[test]
    fn from_f64_is_absolute() {
        assert_eq!(PriceSpec::from(42.0), PriceSpec::Absolute(42.0));
    }

    #[test]
    fn display_round_trips() {
        assert_eq!(PriceSpec::Absolute(95.0).to_string(), "95");
        assert_eq!(PriceSpec::PercentOffset(-8.7).to_string(), "-8.7%");
    }
}
