use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

use serde::{Deserialize, Serialize};

/// A non-negative monetary amount held as whole cents
///
/// Arithmetic saturates at `u64::MAX` cents instead of wrapping or panicking,
/// so sums over any `DataSource` stay defined. Saturated totals display as the
/// largest representable amount.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(u64);

impl Money {
    pub const ZERO: Money = Money(0);

    pub fn from_cents(cents: u64) -> Self {
        Money(cents)
    }

    pub fn from_dollars(dollars: u64) -> Self {
        Money(dollars.saturating_mul(100))
    }

    pub fn cents(self) -> u64 {
        self.0
    }

    /// Whole dollars, rounded half up
    pub fn dollars(self) -> u64 {
        self.0 / 100 + u64::from(self.0 % 100 >= 50)
    }

    /// Multiplies by a non-negative factor, rounding to the nearest cent
    pub fn scale(self, factor: f64) -> Self {
        Money((self.0 as f64 * factor.max(0.0)).round() as u64)
    }

    /// Signed difference `self - other` in cents, clamped to the `i64` range
    pub fn delta(self, other: Money) -> i64 {
        let delta = i128::from(self.0) - i128::from(other.0);
        i64::try_from(delta).unwrap_or(if delta < 0 { i64::MIN } else { i64::MAX })
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        *self = *self + rhs;
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, |a, b| a + b)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}", group_thousands(self.dollars()))
    }
}

/// Formats a signed cent amount as `+$1,234` / `-$1,234`
pub fn format_delta(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "+" };
    let dollars = (cents.unsigned_abs() + 50) / 100;
    format!("{}${}", sign, group_thousands(dollars))
}

/// `1234567` as `1,234,567`
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_groups_thousands() {
        assert_eq!(Money::from_dollars(0).to_string(), "$0");
        assert_eq!(Money::from_dollars(999).to_string(), "$999");
        assert_eq!(Money::from_dollars(1_000).to_string(), "$1,000");
        assert_eq!(Money::from_dollars(45_200_000).to_string(), "$45,200,000");
    }

    #[test]
    fn test_dollars_rounds_cents() {
        assert_eq!(Money::from_cents(149).dollars(), 1);
        assert_eq!(Money::from_cents(150).dollars(), 2);
    }

    #[test]
    fn test_scale_rounds_to_cent() {
        assert_eq!(Money::from_cents(1_000).scale(1.2), Money::from_cents(1_200));
        assert_eq!(Money::from_cents(3).scale(0.5), Money::from_cents(2));
        assert_eq!(Money::from_cents(100).scale(-1.0), Money::ZERO);
    }

    #[test]
    fn test_delta_and_format() {
        let budget = Money::from_dollars(200);
        let actual = Money::from_dollars(180);
        assert_eq!(actual.delta(budget), -2_000);
        assert_eq!(format_delta(actual.delta(budget)), "-$20");
        assert_eq!(format_delta(5_000_000), "+$50,000");
    }

    #[test]
    fn test_addition_saturates() {
        let near_max = Money::from_cents(u64::MAX - 10);
        assert_eq!(near_max + Money::from_cents(100), Money::from_cents(u64::MAX));
        assert_eq!(near_max + Money::from_cents(10), Money::from_cents(u64::MAX));

        let mut total = near_max;
        total += Money::from_cents(u64::MAX);
        assert_eq!(total.cents(), u64::MAX);

        let total: Money = [near_max, near_max, near_max].into_iter().sum();
        assert_eq!(total.cents(), u64::MAX);
        assert_eq!(Money::from_dollars(u64::MAX).cents(), u64::MAX);
    }

    #[test]
    fn test_delta_clamps_beyond_i64() {
        let huge = Money::from_cents(u64::MAX);
        assert_eq!(huge.delta(Money::ZERO), i64::MAX);
        assert_eq!(Money::ZERO.delta(huge), i64::MIN);
        assert_eq!(huge.delta(huge), 0);
        let just_over = Money::from_cents(i64::MAX as u64 + 2);
        assert_eq!(just_over.delta(Money::from_cents(1)), i64::MAX);
    }

    #[test]
    fn test_extremes_still_display() {
        let max = Money::from_cents(u64::MAX);
        assert_eq!(max.dollars(), u64::MAX / 100);
        assert_eq!(max.to_string(), "$184,467,440,737,095,516");
        assert!(format_delta(i64::MIN).starts_with("-$"));
    }

    #[test]
    fn test_sum() {
        let total: Money = [1, 2, 3].into_iter().map(Money::from_dollars).sum();
        assert_eq!(total, Money::from_dollars(6));
    }
}
