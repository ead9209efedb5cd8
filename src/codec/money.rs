//! Currency codec. The server-side type name is `currency` because the
//! built-in `money` name is taken; the wire form is the composite literal
//! `(<currency>,<amount>)`.

use super::{Codec, CodecConfig};
use crate::types::{CodecValue, CurrencyConverter, Money};
use eyre::{bail, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::Arc;

// Composite literal body: currency word, comma, signed decimal. Unanchored
// so the surrounding parentheses need no stripping.
static COMPOSITE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\w*),([+-]?\d+(?:\.\d+)?)").unwrap());

pub struct CurrencyCodec {
    default_currency: String,
    converter: Option<Arc<dyn CurrencyConverter>>,
}

impl CurrencyCodec {
    pub fn new(config: &CodecConfig) -> Self {
        CurrencyCodec {
            default_currency: config.default_currency_or_usd(),
            converter: config.converter_ref(),
        }
    }

    /// Converter configured for this connection, for embedders running
    /// money arithmetic on decoded values.
    pub fn converter(&self) -> Option<&dyn CurrencyConverter> {
        self.converter.as_deref()
    }
}

impl Codec for CurrencyCodec {
    fn type_name(&self) -> &str {
        "currency"
    }

    fn cast(&self, input: CodecValue) -> Result<CodecValue> {
        let money = match &input {
            CodecValue::Null | CodecValue::Money(_) => return Ok(input),
            CodecValue::Text(s) => Money::parse_combined(s)?,
            CodecValue::Int(_) | CodecValue::Float(_) | CodecValue::Decimal(_) => {
                Money::from_amount(input.as_decimal().unwrap_or_default())
            }
            CodecValue::Map(fields) => {
                let amount = fields
                    .get("amount")
                    .and_then(CodecValue::as_decimal)
                    .unwrap_or_default();
                match fields.get("currency") {
                    Some(CodecValue::Text(code)) => Money::new(code, amount)?,
                    _ => Money::from_amount(amount),
                }
            }
            CodecValue::List(items) => match items.as_slice() {
                [CodecValue::Text(code), amount] => {
                    Money::new(code, amount.as_decimal().unwrap_or_default())?
                }
                _ => bail!("cannot cast list {input:?} to money"),
            },
            _ => bail!("cannot cast {input:?} to money"),
        };
        Ok(CodecValue::Money(money))
    }

    fn deserialize(&self, raw: &str) -> Result<Option<CodecValue>> {
        if raw.trim().is_empty() {
            return Ok(None);
        }
        // A non-matching literal degrades to the currency-less zero Money
        // rather than an error; callers treat that as an ambiguous value.
        let money = match COMPOSITE_RE.captures(raw) {
            Some(caps) => {
                let amount = caps[2].parse().unwrap_or_default();
                if caps[1].is_empty() {
                    Money::from_amount(amount)
                } else {
                    Money::new(&caps[1], amount)?
                }
            }
            None => Money::default(),
        };
        Ok(Some(CodecValue::Money(money)))
    }

    fn serialize(&self, value: &CodecValue) -> Result<Option<String>> {
        if value.is_blank() {
            return Ok(None);
        }
        let CodecValue::Money(money) = value else {
            bail!("currency codec cannot serialize {value:?}");
        };
        Ok(Some(money.to_composite()))
    }

    fn json_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "properties": {
                "amount": {"type": "number"},
                "currency": {"type": "string", "default": self.default_currency},
                "formatted": {"type": "string", "readonly": true}
            },
            "required": ["amount"]
        })
    }
}
