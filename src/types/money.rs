//! # Money Value Type
//!
//! `Money` pairs an ISO-4217 currency code with an arbitrary-precision
//! decimal amount. The backing store keeps it as the composite literal
//! `(<currency>,<amount>)` under the `currency` type name (the built-in
//! `money` type name is already taken server-side).
//!
//! Currency codes are validated against [`CURRENCY_CODES`] on every
//! assignment; an unknown code is always an error, never silently kept.
//! Cross-currency arithmetic goes through a [`CurrencyConverter`] supplied
//! by the embedder; without one, mixing currencies fails with
//! [`CodecError::ConversionUnavailable`].

use crate::error::CodecError;
use eyre::Result;
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::ser::{Serialize, SerializeStruct, Serializer};
use std::fmt;

/// Active ISO-4217 alphabetic currency codes, sorted for binary search.
pub const CURRENCY_CODES: &[&str] = &[
    "AED", "AFN", "ALL", "AMD", "ANG", "AOA", "ARS", "AUD", "AWG", "AZN", "BAM", "BBD", "BDT",
    "BGN", "BHD", "BIF", "BMD", "BND", "BOB", "BRL", "BSD", "BTN", "BWP", "BYN", "BZD", "CAD",
    "CDF", "CHF", "CLP", "CNY", "COP", "CRC", "CUP", "CVE", "CZK", "DJF", "DKK", "DOP", "DZD",
    "EGP", "ERN", "ETB", "EUR", "FJD", "FKP", "GBP", "GEL", "GHS", "GIP", "GMD", "GNF", "GTQ",
    "GYD", "HKD", "HNL", "HTG", "HUF", "IDR", "ILS", "INR", "IQD", "IRR", "ISK", "JMD", "JOD",
    "JPY", "KES", "KGS", "KHR", "KMF", "KPW", "KRW", "KWD", "KYD", "KZT", "LAK", "LBP", "LKR",
    "LRD", "LSL", "LYD", "MAD", "MDL", "MGA", "MKD", "MMK", "MNT", "MOP", "MRU", "MUR", "MVR",
    "MWK", "MXN", "MYR", "MZN", "NAD", "NGN", "NIO", "NOK", "NPR", "NZD", "OMR", "PAB", "PEN",
    "PGK", "PHP", "PKR", "PLN", "PYG", "QAR", "RON", "RSD", "RUB", "RWF", "SAR", "SBD", "SCR",
    "SDG", "SEK", "SGD", "SHP", "SLE", "SOS", "SRD", "SSP", "STN", "SVC", "SYP", "SZL", "THB",
    "TJS", "TMT", "TND", "TOP", "TRY", "TTD", "TWD", "TZS", "UAH", "UGX", "USD", "UYU", "UZS",
    "VES", "VND", "VUV", "WST", "XAF", "XCD", "XOF", "XPF", "YER", "ZAR", "ZMW", "ZWG",
];

/// Membership test against the supported-currency table. Case-sensitive;
/// callers upper-case first (assignment always does).
pub fn is_known_currency(code: &str) -> bool {
    CURRENCY_CODES.binary_search(&code).is_ok()
}

/// Pluggable cross-currency conversion, supplied by the embedder.
pub trait CurrencyConverter: Send + Sync {
    /// Converts `amount` from currency `from` to currency `to`.
    fn convert(&self, amount: Decimal, from: &str, to: &str) -> Result<Decimal>;
}

// Combined form "USD12.50" / "EUR-3": leading alphabetic code, then a
// signed decimal. Either part may be empty, matching the lenient source
// grammar for user input.
static COMBINED_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([a-zA-Z]*)([+-]?\d*(?:\.\d+)?)").unwrap());

/// Currency-tagged arbitrary-precision amount.
///
/// The currency is optional: a bare numeric input produces a currency-less
/// amount (scalar arithmetic still works; cross-currency arithmetic does
/// not). Once set, the code is guaranteed to be in the supported table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Money {
    currency: Option<String>,
    amount: Decimal,
}

impl Default for Money {
    /// Currency-less zero. This is also the documented fallback for a money
    /// composite literal that fails to parse.
    fn default() -> Self {
        Money {
            currency: None,
            amount: Decimal::ZERO,
        }
    }
}

impl Money {
    /// Builds a Money from a currency code and amount. The code is
    /// upper-cased and validated.
    pub fn new(currency: &str, amount: Decimal) -> Result<Self> {
        let mut money = Money {
            currency: None,
            amount,
        };
        money.set_currency(currency)?;
        Ok(money)
    }

    /// Currency-less amount.
    pub fn from_amount(amount: Decimal) -> Self {
        Money {
            currency: None,
            amount,
        }
    }

    /// Parses the combined form `"<CODE><signed-decimal>"`, e.g. `USD12.50`.
    /// A missing code leaves the currency unset; a missing amount is zero.
    pub fn parse_combined(input: &str) -> Result<Self> {
        let caps = COMBINED_RE
            .captures(input)
            .ok_or_else(|| eyre::eyre!("unrecognized money input {input:?}"))?;
        let code = &caps[1];
        let amount = caps[2].parse().unwrap_or(Decimal::ZERO);
        if code.is_empty() {
            Ok(Money::from_amount(amount))
        } else {
            Money::new(code, amount)
        }
    }

    pub fn currency(&self) -> Option<&str> {
        self.currency.as_deref()
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    /// Reassigns the currency. An empty code is a no-op; an unknown code
    /// fails with [`CodecError::UnknownCurrency`] and leaves the value
    /// untouched.
    pub fn set_currency(&mut self, code: &str) -> Result<()> {
        if code.is_empty() {
            return Ok(());
        }
        let upper = code.to_ascii_uppercase();
        if !is_known_currency(&upper) {
            return Err(CodecError::UnknownCurrency(upper).into());
        }
        self.currency = Some(upper);
        Ok(())
    }

    /// Truncated integer amount.
    pub fn to_i(&self) -> i64 {
        self.amount.trunc().to_i64().unwrap_or(0)
    }

    pub fn to_f(&self) -> f64 {
        self.amount.to_f64().unwrap_or(0.0)
    }

    /// Converts into `target` currency through the supplied converter.
    /// Same-currency conversion is the identity and needs no converter.
    pub fn convert_to(
        &self,
        target: &str,
        converter: Option<&dyn CurrencyConverter>,
    ) -> Result<Self> {
        let target = target.to_ascii_uppercase();
        if self.currency.as_deref() == Some(target.as_str()) {
            return Ok(self.clone());
        }
        let from = self.currency.clone().unwrap_or_default();
        match converter {
            Some(fx) => {
                let converted = fx.convert(self.amount, &from, &target)?;
                Money::new(&target, converted)
            }
            None => Err(CodecError::ConversionUnavailable { from, to: target }.into()),
        }
    }

    /// Money + Money. The right-hand side is converted to this value's
    /// currency first; same-currency addition never consults the converter.
    pub fn add(&self, rhs: &Money, converter: Option<&dyn CurrencyConverter>) -> Result<Self> {
        let rhs = self.align(rhs, converter)?;
        Ok(self.with_amount(self.amount + rhs.amount))
    }

    pub fn sub(&self, rhs: &Money, converter: Option<&dyn CurrencyConverter>) -> Result<Self> {
        let rhs = self.align(rhs, converter)?;
        Ok(self.with_amount(self.amount - rhs.amount))
    }

    pub fn mul(&self, rhs: &Money, converter: Option<&dyn CurrencyConverter>) -> Result<Self> {
        let rhs = self.align(rhs, converter)?;
        Ok(self.with_amount(self.amount * rhs.amount))
    }

    pub fn div(&self, rhs: &Money, converter: Option<&dyn CurrencyConverter>) -> Result<Self> {
        let rhs = self.align(rhs, converter)?;
        eyre::ensure!(!rhs.amount.is_zero(), "division of money by zero");
        Ok(self.with_amount(self.amount / rhs.amount))
    }

    /// Composite literal form stored server-side: `(<currency>,<amount>)`.
    pub fn to_composite(&self) -> String {
        format!(
            "({},{})",
            self.currency.as_deref().unwrap_or(""),
            self.amount
        )
    }

    fn align(&self, rhs: &Money, converter: Option<&dyn CurrencyConverter>) -> Result<Money> {
        if self.currency == rhs.currency {
            return Ok(rhs.clone());
        }
        match &self.currency {
            Some(target) => rhs.convert_to(target, converter),
            None => Err(CodecError::ConversionUnavailable {
                from: rhs.currency.clone().unwrap_or_default(),
                to: String::new(),
            }
            .into()),
        }
    }

    fn with_amount(&self, amount: Decimal) -> Money {
        Money {
            currency: self.currency.clone(),
            amount,
        }
    }
}

// Scalar arithmetic: a plain number on the right operates on the amount
// directly and keeps the currency.
impl std::ops::Add<Decimal> for &Money {
    type Output = Money;
    fn add(self, rhs: Decimal) -> Money {
        self.with_amount(self.amount + rhs)
    }
}

impl std::ops::Sub<Decimal> for &Money {
    type Output = Money;
    fn sub(self, rhs: Decimal) -> Money {
        self.with_amount(self.amount - rhs)
    }
}

impl std::ops::Mul<Decimal> for &Money {
    type Output = Money;
    fn mul(self, rhs: Decimal) -> Money {
        self.with_amount(self.amount * rhs)
    }
}

impl std::ops::Div<Decimal> for &Money {
    type Output = Money;
    fn div(self, rhs: Decimal) -> Money {
        self.with_amount(self.amount / rhs)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.currency {
            Some(code) => write!(f, "{} {}", code, self.amount),
            None => write!(f, "{}", self.amount),
        }
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("Money", 3)?;
        s.serialize_field("currency", &self.currency)?;
        s.serialize_field("amount", &self.amount)?;
        s.serialize_field("formatted", &self.to_string())?;
        s.end()
    }
}
