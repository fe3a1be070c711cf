//! Whole-peso price representation.
//!
//! Chilean pesos have no minor unit, so a price is a plain non-negative
//! integer. Display follows the `es-CL` currency format with zero fraction
//! digits: a `$` prefix and `.` as the thousands separator (`$2.500`).

use core::fmt;
use core::iter::Sum;

use serde::{Deserialize, Deserializer, Serialize};

/// A price in whole Chilean pesos (CLP).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct Price(u64);

impl Price {
    /// The zero amount, rendered as `$0`.
    pub const ZERO: Self = Self(0);

    /// Create a new price.
    #[must_use]
    pub const fn new(amount: u64) -> Self {
        Self(amount)
    }

    /// Get the amount in whole pesos.
    #[must_use]
    pub const fn amount(&self) -> u64 {
        self.0
    }

    /// Price of `quantity` units, saturating on overflow.
    #[must_use]
    pub const fn times(self, quantity: u32) -> Self {
        Self(self.0.saturating_mul(quantity as u64))
    }

    /// Format for display (e.g., `$12.990`).
    #[must_use]
    pub fn display(&self) -> String {
        let digits = self.0.to_string();
        let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
        out.push('$');
        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                out.push('.');
            }
            out.push(c);
        }
        out
    }

    /// Interpret a loosely-typed backend value as a price.
    ///
    /// Integers are taken as-is, floats are truncated, and strings are read
    /// up to the first non-digit. Negative, missing or non-numeric values are
    /// zero.
    #[must_use]
    pub fn from_json(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Number(n) => n
                .as_u64()
                .or_else(|| n.as_f64().filter(|f| f.is_finite() && *f >= 0.0).map(truncate))
                .map_or(Self::ZERO, Self),
            serde_json::Value::String(s) => Self::parse_leading_digits(s),
            _ => Self::ZERO,
        }
    }

    fn parse_leading_digits(s: &str) -> Self {
        let digits: String = s
            .trim_start()
            .chars()
            .take_while(char::is_ascii_digit)
            .collect();
        digits.parse().map_or(Self::ZERO, Self)
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn truncate(f: f64) -> u64 {
    f.trunc() as u64
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

impl From<u64> for Price {
    fn from(amount: u64) -> Self {
        Self(amount)
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, |acc, p| Self(acc.0.saturating_add(p.0)))
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        Ok(Self::from_json(&value))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_display_grouping() {
        assert_eq!(Price::new(0).display(), "$0");
        assert_eq!(Price::new(990).display(), "$990");
        assert_eq!(Price::new(2500).display(), "$2.500");
        assert_eq!(Price::new(12_990).display(), "$12.990");
        assert_eq!(Price::new(1_000_000).display(), "$1.000.000");
    }

    #[test]
    fn test_times_and_sum() {
        let total: Price = [Price::new(1000).times(2), Price::new(500).times(1)]
            .into_iter()
            .sum();
        assert_eq!(total, Price::new(2500));
    }

    #[test]
    fn test_times_saturates() {
        assert_eq!(Price::new(u64::MAX).times(2), Price::new(u64::MAX));
    }

    #[test]
    fn test_deserialize_loose_values() {
        let cases = [
            ("1500", 1500),
            ("\"1500\"", 1500),
            ("\"1500 CLP\"", 1500),
            ("1500.9", 1500),
            ("-3", 0),
            ("\"abc\"", 0),
            ("null", 0),
        ];
        for (json, expected) in cases {
            let price: Price = serde_json::from_str(json).unwrap();
            assert_eq!(price.amount(), expected, "input {json}");
        }
    }
}
