//! Whole-unit prices with Naira display formatting.
//!
//! Catalog prices are non-negative integers in the currency's main unit
//! (no kobo). Display groups thousands the way the storefront has always
//! shown them: `₦20,000`.

use core::fmt;
use core::iter::Sum;
use core::ops::Add;

use serde::{Deserialize, Serialize};

/// A price with currency information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Price {
    /// Amount in whole currency units.
    amount: u64,
    /// ISO 4217 currency code.
    currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: u64, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// Create a Naira price.
    #[must_use]
    pub const fn naira(amount: u64) -> Self {
        Self::new(amount, CurrencyCode::NGN)
    }

    /// A zero Naira price.
    #[must_use]
    pub const fn zero() -> Self {
        Self::naira(0)
    }

    /// Amount in whole currency units.
    #[must_use]
    pub const fn amount(&self) -> u64 {
        self.amount
    }

    /// Currency of this price.
    #[must_use]
    pub const fn currency_code(&self) -> CurrencyCode {
        self.currency_code
    }

    /// Amount with thousands separators and no symbol, e.g. `30,000`.
    #[must_use]
    pub fn grouped_amount(&self) -> String {
        let digits = self.amount.to_string();
        let mut out = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                out.push(',');
            }
            out.push(ch);
        }
        out
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.currency_code.symbol(), self.grouped_amount())
    }
}

impl Add for Price {
    type Output = Self;

    /// Saturating addition; both sides are expected to share a currency.
    fn add(self, rhs: Self) -> Self {
        Self::new(self.amount.saturating_add(rhs.amount), self.currency_code)
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Price> for Price {
    fn sum<I: Iterator<Item = &'a Price>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    /// Nigerian Naira.
    #[default]
    NGN,
}

impl CurrencyCode {
    /// Currency symbol used in display strings.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::NGN => "₦",
        }
    }

    /// ISO 4217 code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::NGN => "NGN",
        }
    }
}
