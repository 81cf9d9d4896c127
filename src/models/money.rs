//! Money type for representing ruble amounts
//!
//! Internally stores amounts in kopecks (i64) to avoid floating-point precision
//! issues. Provides safe arithmetic, the lenient cell parser used for markdown
//! tables, and the strict parser used for user input.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// Currency symbol used when none is configured
pub const DEFAULT_SYMBOL: &str = "₽";

/// Represents a monetary amount stored as kopecks (hundredths of a ruble)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Create a Money amount from kopecks
    ///
    /// # Examples
    /// ```
    /// use findash::models::Money;
    /// let amount = Money::from_kopecks(150050); // 1 500,50 ₽
    /// assert_eq!(amount.rubles(), 1500);
    /// ```
    pub const fn from_kopecks(kopecks: i64) -> Self {
        Self(kopecks)
    }

    /// Create a Money amount from whole rubles
    pub const fn from_rubles(rubles: i64) -> Self {
        Self(rubles * 100)
    }

    /// Create a zero Money amount
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Get the amount in kopecks
    pub const fn kopecks(&self) -> i64 {
        self.0
    }

    /// Get the whole rubles portion (truncated toward zero)
    pub const fn rubles(&self) -> i64 {
        self.0 / 100
    }

    /// Get the kopecks portion (0-99)
    pub const fn kopecks_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Check if the amount is zero
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Check if the amount is positive
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Check if the amount is negative
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Get the absolute value
    pub const fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    /// Amount as a float, for chart scaling only
    pub fn to_f64(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Parse an amount typed by the user
    ///
    /// Accepts "1500", "1500.50", "1500,5", "1 500 ₽". Rejects anything with
    /// stray characters, more than one decimal separator or more than two
    /// fraction digits.
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let trimmed = s.trim();
        let (negative, rest) = match trimmed.strip_prefix('-') {
            Some(stripped) => (true, stripped),
            None => (false, trimmed),
        };

        let rest = rest.trim_end_matches(DEFAULT_SYMBOL).trim();
        let compact: String = rest
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| if c == ',' { '.' } else { c })
            .collect();

        let invalid = || MoneyParseError::InvalidFormat(s.to_string());

        if compact.is_empty() || !compact.chars().all(|c| c.is_ascii_digit() || c == '.') {
            return Err(invalid());
        }

        let (whole, fraction) = match compact.split_once('.') {
            Some((whole, fraction)) => (whole, fraction),
            None => (compact.as_str(), ""),
        };

        if fraction.contains('.') || fraction.len() > 2 || (whole.is_empty() && fraction.is_empty()) {
            return Err(invalid());
        }

        let rubles: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| invalid())?
        };
        let kopecks: i64 = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<i64>().map_err(|_| invalid())? * 10,
            _ => fraction.parse().map_err(|_| invalid())?,
        };

        let total = rubles
            .checked_mul(100)
            .and_then(|r| r.checked_add(kopecks))
            .ok_or_else(invalid)?;

        Ok(Self(if negative { -total } else { total }))
    }

    /// Format with a currency symbol, showing kopecks only when non-zero
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        let sign = if self.is_negative() { "-" } else { "" };
        let rubles = group_thousands(self.rubles().unsigned_abs());
        if self.kopecks_part() == 0 {
            format!("{}{} {}", sign, rubles, symbol)
        } else {
            format!("{}{},{:02} {}", sign, rubles, self.kopecks_part(), symbol)
        }
    }

    /// Format rounded to whole rubles, as shown on the dashboard cards
    pub fn format_whole(&self, symbol: &str) -> String {
        let abs = self.0.unsigned_abs();
        let rounded = (abs + 50) / 100;
        let sign = if self.is_negative() && rounded > 0 { "-" } else { "" };
        format!("{}{} {}", sign, group_thousands(rounded), symbol)
    }
}

/// Lenient amount parser for markdown table cells
///
/// Strips everything except digits, comma and period, treats the first comma
/// as the decimal separator and reads the longest leading `digits[.digits]`
/// prefix. Fractions beyond kopecks are rounded half-up. Empty or unreadable
/// input yields zero.
pub fn parse_amount(text: &str) -> Money {
    let mut cleaned: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == ',' || *c == '.')
        .collect();

    if let Some(pos) = cleaned.find(',') {
        cleaned.replace_range(pos..pos + 1, ".");
    }

    let mut whole = String::new();
    let mut fraction = String::new();
    let mut seen_dot = false;
    for c in cleaned.chars() {
        match c {
            '0'..='9' if seen_dot => fraction.push(c),
            '0'..='9' => whole.push(c),
            '.' if !seen_dot => seen_dot = true,
            _ => break,
        }
    }

    if whole.is_empty() && fraction.is_empty() {
        return Money::zero();
    }

    let rubles: i64 = if whole.is_empty() {
        0
    } else {
        match whole.parse() {
            Ok(value) => value,
            Err(_) => return Money::zero(),
        }
    };

    let digits: Vec<i64> = fraction
        .chars()
        .take(3)
        .map(|c| i64::from(c as u8 - b'0'))
        .collect();
    let tens = digits.first().copied().unwrap_or(0);
    let ones = digits.get(1).copied().unwrap_or(0);
    let round_up = i64::from(digits.get(2).is_some_and(|d| *d >= 5));

    rubles
        .checked_mul(100)
        .and_then(|r| r.checked_add(tens * 10 + ones + round_up))
        .map(Money::from_kopecks)
        .unwrap_or_default()
}

/// Insert a space between every group of three digits
fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(' ');
        }
        out.push(c);
    }
    out
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_with_symbol(DEFAULT_SYMBOL))
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0 - other.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl<'a> std::iter::Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + *m)
    }
}

/// Error type for money parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    InvalidFormat(String),
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyParseError::InvalidFormat(s) => write!(f, "Invalid amount: {}", s),
        }
    }
}

impl std::error::Error for MoneyParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_kopecks() {
        let m = Money::from_kopecks(150050);
        assert_eq!(m.kopecks(), 150050);
        assert_eq!(m.rubles(), 1500);
        assert_eq!(m.kopecks_part(), 50);
    }

    #[test]
    fn test_parse_amount_with_grouping_and_symbol() {
        assert_eq!(parse_amount("12 345,67 ₽").kopecks(), 1234567);
        assert_eq!(parse_amount("12\u{a0}345,67\u{a0}₽").kopecks(), 1234567);
    }

    #[test]
    fn test_parse_amount_empty_is_zero() {
        assert!(parse_amount("").is_zero());
        assert!(parse_amount("—").is_zero());
        assert!(parse_amount("руб.").is_zero());
    }

    #[test]
    fn test_parse_amount_prefix_semantics() {
        assert_eq!(parse_amount("1500").kopecks(), 150000);
        assert_eq!(parse_amount("**1 500**").kopecks(), 150000);
        assert_eq!(parse_amount("1.234.567").kopecks(), 123);
        assert_eq!(parse_amount("0,125").kopecks(), 13);
        assert_eq!(parse_amount(".5").kopecks(), 50);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_kopecks(150000).to_string(), "1 500 ₽");
        assert_eq!(Money::from_kopecks(1234567).to_string(), "12 345,67 ₽");
        assert_eq!(Money::from_kopecks(-5).to_string(), "-0,05 ₽");
        assert_eq!(Money::zero().to_string(), "0 ₽");
    }

    #[test]
    fn test_display_parses_back() {
        let m = Money::from_kopecks(98765432);
        assert_eq!(parse_amount(&m.to_string()), m);
    }

    #[test]
    fn test_format_whole() {
        assert_eq!(Money::from_kopecks(1234567).format_whole("₽"), "12 346 ₽");
        assert_eq!(Money::from_kopecks(-150000).format_whole("₽"), "-1 500 ₽");
        assert_eq!(Money::from_kopecks(-20).format_whole("₽"), "0 ₽");
    }

    #[test]
    fn test_strict_parse() {
        assert_eq!(Money::parse("1500").unwrap().kopecks(), 150000);
        assert_eq!(Money::parse("1500.5").unwrap().kopecks(), 150050);
        assert_eq!(Money::parse("1 500,50 ₽").unwrap().kopecks(), 150050);
        assert_eq!(Money::parse("-10").unwrap().kopecks(), -1000);
        assert!(Money::parse("").is_err());
        assert!(Money::parse("12abc").is_err());
        assert!(Money::parse("1.2.3").is_err());
        assert!(Money::parse("1.234").is_err());
    }

    #[test]
    fn test_arithmetic_and_sum() {
        let a = Money::from_rubles(10);
        let b = Money::from_rubles(5);
        assert_eq!((a + b).kopecks(), 1500);
        assert_eq!((a - b).kopecks(), 500);
        assert_eq!((-a).kopecks(), -1000);

        let amounts = [a, b, Money::from_kopecks(1)];
        let total: Money = amounts.iter().sum();
        assert_eq!(total.kopecks(), 1501);
    }

    #[test]
    fn test_serialization() {
        let m = Money::from_kopecks(1050);
        let json = serde_json::to_string(&m).unwrap();
        assert_eq!(json, "1050");
        let back: Money = serde_json::from_str(&json).unwrap();
        assert_eq!(m, back);
    }
}
