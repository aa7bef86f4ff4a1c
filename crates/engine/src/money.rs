use std::{fmt, str::FromStr};

use crate::EngineError;

/// Money amount represented as **integer cents**.
///
/// Expense amounts, report totals and budget limits all use this type, so
/// aggregations stay exact. Major units (`12.5`) only appear at the edges:
/// JSON bodies and settings.
///
/// Additions are checked; a sum that leaves the `i64` range is reported to
/// the caller instead of wrapping.
///
/// ```rust
/// use engine::Money;
///
/// let amount = Money::new(12_34);
/// assert_eq!(amount.to_string(), "12.34€");
/// assert_eq!("12,34".parse::<Money>().unwrap(), amount);
/// assert_eq!(Money::new(i64::MAX).checked_add(Money::new(1)), None);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    #[must_use]
    pub const fn new(cents: i64) -> Self {
        Self(cents)
    }

    #[must_use]
    pub const fn cents(self) -> i64 {
        self.0
    }

    #[must_use]
    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    /// Checked addition (returns `None` on overflow).
    #[must_use]
    pub fn checked_add(self, rhs: Money) -> Option<Money> {
        self.0.checked_add(rhs.0).map(Money)
    }

    /// Adds every amount, or `None` as soon as the running total overflows.
    #[must_use]
    pub fn checked_sum(amounts: impl IntoIterator<Item = Money>) -> Option<Money> {
        amounts.into_iter().try_fold(Money::ZERO, Money::checked_add)
    }

    /// Converts a major-unit value (e.g. `12.5`) into cents, rounding to the
    /// nearest cent.
    ///
    /// Returns `None` for NaN, infinities and values outside the `i64` range.
    #[must_use]
    pub fn from_major(value: f64) -> Option<Money> {
        let cents = (value * 100.0).round();
        let in_range = cents.is_finite() && cents >= i64::MIN as f64 && cents < i64::MAX as f64;
        in_range.then(|| Money(cents as i64))
    }

    #[must_use]
    pub fn to_major(self) -> f64 {
        self.0 as f64 / 100.0
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let abs = self.0.unsigned_abs();
        if self.0 < 0 {
            f.write_str("-")?;
        }
        write!(f, "{}.{:02}€", abs / 100, abs % 100)
    }
}

impl FromStr for Money {
    type Err = EngineError;

    /// Parses user text such as `12`, `12.5`, `-3,20` or `+1.00`.
    ///
    /// The fractional part has at most two digits; `12.345` is rejected
    /// rather than rounded.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let reject = |reason: &str| EngineError::InvalidAmount(reason.to_string());

        let text = s.trim();
        let (negative, unsigned) = if let Some(rest) = text.strip_prefix('-') {
            (true, rest)
        } else {
            (false, text.strip_prefix('+').unwrap_or(text))
        };
        if unsigned.is_empty() {
            return Err(reject("empty amount"));
        }

        let (whole, fraction) = unsigned.split_once(['.', ',']).unwrap_or((unsigned, ""));
        let digits_only = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if whole.is_empty() || !digits_only(whole) || !digits_only(fraction) {
            return Err(reject("invalid amount"));
        }
        if fraction.len() > 2 {
            return Err(reject("too many decimals"));
        }

        let whole: i64 = whole.parse().map_err(|_| reject("amount too large"))?;
        let fraction: i64 = format!("{fraction:0<2}")
            .parse()
            .map_err(|_| reject("invalid amount"))?;
        let cents = whole
            .checked_mul(100)
            .and_then(|cents| cents.checked_add(fraction))
            .ok_or_else(|| reject("amount too large"))?;

        Ok(Money(if negative { -cents } else { cents }))
    }
}
