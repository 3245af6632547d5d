// src/core/money.rs
//
// Currency text <-> integer cents. No floating point anywhere on this path:
// fractional digits past the second are truncated, never rounded.

use std::fmt;
use std::ops::{Add, AddAssign, Neg};
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::ExtractError;

/// `$` followed by grouped digits and an optional fraction of any length.
static AMOUNT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$[\d,]+(?:\.\d+)?").expect("static regex"));

/// Same, but also accepts the accounting form `($1,234.56)`.
static CELL_AMOUNT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$[\d,]+(?:\.\d+)?|\(\$[\d,]+(?:\.\d+)?\)").expect("static regex")
});

/// Signed count of cents.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cents(pub i64);

impl Cents {
    pub const ZERO: Cents = Cents(0);

    #[inline] pub fn get(self) -> i64 { self.0 }
    #[inline] pub fn abs(self) -> Cents { Cents(self.0.saturating_abs()) }
    #[inline] pub fn is_negative(self) -> bool { self.0 < 0 }

    /// `None` when the sum leaves the `i64` range.
    #[inline] pub fn checked_add(self, rhs: Cents) -> Option<Cents> {
        self.0.checked_add(rhs.0).map(Cents)
    }

    #[inline] pub fn saturating_sub(self, rhs: Cents) -> Cents {
        Cents(self.0.saturating_sub(rhs.0))
    }
}

// Arithmetic saturates at the i64 bounds; totals use `checked_add` instead.
impl Add for Cents {
    type Output = Cents;
    fn add(self, rhs: Cents) -> Cents { Cents(self.0.saturating_add(rhs.0)) }
}

impl AddAssign for Cents {
    fn add_assign(&mut self, rhs: Cents) { *self = *self + rhs; }
}

impl Neg for Cents {
    type Output = Cents;
    fn neg(self) -> Cents { Cents(self.0.saturating_neg()) }
}

impl From<i64> for Cents {
    fn from(v: i64) -> Self { Cents(v) }
}

/// Displays as `format`: `-$1,234.56`.
impl fmt::Display for Cents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format(*self))
    }
}

/// First currency substring of a cell, accepting the parenthesized form.
pub fn find_amount(text: &str) -> Option<&str> {
    CELL_AMOUNT.find(text).map(|m| m.as_str())
}

/// Parse `"$1,234.56"` or `"($1,234.56)"` into cents.
///
/// Only the first `$` amount is read. A wrapping pair of parentheses around
/// the whole (trimmed) text marks it negative.
pub fn parse(text: &str) -> Result<Cents, ExtractError> {
    let invalid = || ExtractError::InvalidMoneyText(text.to_string());

    let t = text.trim();
    let neg_by_parens = t.len() >= 2 && t.starts_with('(') && t.ends_with(')');

    let m = AMOUNT.find(t).ok_or_else(invalid)?;
    let raw: String = m.as_str()[1..].chars().filter(|&c| c != ',').collect();
    let (int_part, frac_part) = raw.split_once('.').unwrap_or((&raw, ""));

    let dollars: i64 = if int_part.is_empty() { 0 } else { int_part.parse().map_err(|_| invalid())? };

    // exact 2 digits: pad short fractions, drop the rest
    let mut frac2 = frac_part.chars().take(2).collect::<String>();
    while frac2.len() < 2 { frac2.push('0'); }
    let cents: i64 = frac2.parse().map_err(|_| invalid())?;

    let total = dollars
        .checked_mul(100)
        .and_then(|d| d.checked_add(cents))
        .ok_or_else(invalid)?;

    Ok(Cents(if neg_by_parens { -total } else { total }))
}

/// `-$1,234.56`: sign before the symbol, comma-grouped dollars.
pub fn format(cents: Cents) -> String {
    let sign = if cents.is_negative() { "-" } else { "" };
    let abs = cents.0.unsigned_abs();
    format!("{sign}${}.{:02}", group_thousands(abs / 100), abs % 100)
}

/// `-1234.56`: plain two-decimal text for machine-readable export.
pub fn format_fixed(cents: Cents) -> String {
    let sign = if cents.is_negative() { "-" } else { "" };
    let abs = cents.0.unsigned_abs();
    format!("{sign}{}.{:02}", abs / 100, abs % 100)
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncates_third_fraction_digit() {
        assert_eq!(parse("$1,234.567").unwrap(), Cents(123456));
        assert_eq!(parse("$0.999").unwrap(), Cents(99));
    }

    #[test]
    fn parens_mean_negative() {
        assert_eq!(parse("($45.00)").unwrap(), Cents(-4500));
        assert_eq!(parse("  ($1,000)  ").unwrap(), Cents(-100000));
    }

    #[test]
    fn pads_short_fractions() {
        assert_eq!(parse("$7.5").unwrap(), Cents(750));
        assert_eq!(parse("$12").unwrap(), Cents(1200));
        assert_eq!(parse("up $3.05 today").unwrap(), Cents(305));
    }

    #[test]
    fn reads_only_the_first_amount() {
        assert_eq!(parse("$1.00 / $2.00").unwrap(), Cents(100));
    }

    #[test]
    fn rejects_text_without_amount() {
        assert!(matches!(parse("—"), Err(ExtractError::InvalidMoneyText(_))));
        assert!(parse("1,234.56").is_err());
        assert!(parse("").is_err());
    }

    #[test]
    fn rejects_overflowing_integer_part() {
        assert!(parse("$99999999999999999999.00").is_err());
    }

    #[test]
    fn arithmetic_stays_in_range() {
        let big = parse("$90,000,000,000,000,000.00").unwrap();
        assert_eq!(big, Cents(9_000_000_000_000_000_000));
        assert_eq!(big.checked_add(big), None);
        assert_eq!(big + big, Cents(i64::MAX));
        assert_eq!(-Cents(i64::MIN), Cents(i64::MAX));
        assert_eq!(Cents(i64::MIN).abs(), Cents(i64::MAX));
        assert_eq!(Cents(i64::MIN).saturating_sub(big), Cents(i64::MIN));
    }

    #[test]
    fn formats_grouped_with_leading_minus() {
        assert_eq!(format(Cents(123456)), "$1,234.56");
        assert_eq!(format(Cents(-4500)), "-$45.00");
        assert_eq!(format(Cents(5)), "$0.05");
        assert_eq!(format(Cents(100_000_000)), "$1,000,000.00");
        assert_eq!(format(Cents(0)), "$0.00");
    }

    #[test]
    fn fixed_has_no_grouping_or_symbol() {
        assert_eq!(format_fixed(Cents(123456)), "1234.56");
        assert_eq!(format_fixed(Cents(-5)), "-0.05");
        assert_eq!(format_fixed(Cents(-3025)), "-30.25");
        assert_eq!(format_fixed(Cents(0)), "0.00");
    }

    #[test]
    fn parse_inverts_format() {
        for v in [0, 1, 99, 100, 12050, 123456, 100_000_000, 987_654_321_012] {
            assert_eq!(parse(&format(Cents(v))).unwrap(), Cents(v));
        }
    }

    #[test]
    fn format_after_parse_is_truncated_input() {
        assert_eq!(format(parse("$1,234.567").unwrap()), "$1,234.56");
        assert_eq!(format(parse("$9.1").unwrap()), "$9.10");
    }

    #[test]
    fn finds_parenthesized_cell_amount() {
        assert_eq!(find_amount("Total ($30.25) ▼"), Some("($30.25)"));
        assert_eq!(find_amount("$120.50 +4.2%"), Some("$120.50"));
        assert_eq!(find_amount("n/a"), None);
    }
}
