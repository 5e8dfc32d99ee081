//! Money value object and en-US currency formatting.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};
use crate::value_object::ValueObject;

/// ISO 4217 currency codes the catalog prices in.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Usd,
    Eur,
    Gbp,
}

impl Currency {
    pub fn code(self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Gbp => "GBP",
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Currency::Usd => "$",
            Currency::Eur => "€",
            Currency::Gbp => "£",
        }
    }
}

impl core::fmt::Display for Currency {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "USD" => Ok(Currency::Usd),
            "EUR" => Ok(Currency::Eur),
            "GBP" => Ok(Currency::Gbp),
            other => Err(DomainError::validation(format!(
                "unsupported currency '{other}' (expected one of: USD, EUR, GBP)"
            ))),
        }
    }
}

/// An amount in minor units (cents) of a currency.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Money {
    pub minor: i64,
    pub currency: Currency,
}

impl ValueObject for Money {}

impl Money {
    pub fn new(minor: i64, currency: Currency) -> Self {
        Self { minor, currency }
    }

    pub fn usd(minor: i64) -> Self {
        Self::new(minor, Currency::Usd)
    }

    pub fn zero(currency: Currency) -> Self {
        Self::new(0, currency)
    }

    /// Convert a major-unit amount (e.g. `12.5` dollars) into minor units,
    /// rounding half away from zero.
    pub fn from_major(major: f64, currency: Currency) -> DomainResult<Self> {
        if !major.is_finite() {
            return Err(DomainError::validation("amount must be a finite number"));
        }
        let minor = (major * 100.0).round();
        // i64::MAX as f64 rounds up to 2^63, which does not fit.
        if minor < i64::MIN as f64 || minor >= i64::MAX as f64 {
            return Err(DomainError::validation("amount out of range"));
        }
        Ok(Self::new(minor as i64, currency))
    }

    /// Multiply by a unit count (e.g. stock on hand). `None` on overflow.
    pub fn checked_mul(self, units: u64) -> Option<Self> {
        let units = i64::try_from(units).ok()?;
        self.minor
            .checked_mul(units)
            .map(|minor| Self::new(minor, self.currency))
    }

    pub fn checked_add(self, other: Money) -> DomainResult<Self> {
        if self.currency != other.currency {
            return Err(DomainError::validation(format!(
                "cannot add {} to {}",
                other.currency, self.currency
            )));
        }
        self.minor
            .checked_add(other.minor)
            .map(|minor| Self::new(minor, self.currency))
            .ok_or_else(|| DomainError::invariant("money overflow"))
    }

    pub fn format(&self) -> String {
        format_currency(self.minor, self.currency)
    }
}

impl core::fmt::Display for Money {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.format())
    }
}

/// Format an amount the way an en-US currency formatter does:
/// `123456` cents of USD renders as `$1,234.56`, negatives as `-$1,234.56`.
pub fn format_currency(minor: i64, currency: Currency) -> String {
    let sign = if minor < 0 { "-" } else { "" };
    // unsigned_abs keeps i64::MIN representable.
    let abs = minor.unsigned_abs();
    let whole = abs / 100;
    let cents = abs % 100;
    format!(
        "{sign}{}{}.{cents:02}",
        currency.symbol(),
        group_thousands(whole)
    )
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
