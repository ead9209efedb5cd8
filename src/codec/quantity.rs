//! Meter codec: a thin numeric tag. Stored as a plain number, surfaced as
//! a unit-tagged quantity; no unit conversion happens here.

use super::Codec;
use crate::types::{CodecValue, Quantity};
use eyre::{bail, Result};

#[derive(Debug, Default)]
pub struct MeterCodec;

impl MeterCodec {
    pub fn new() -> Self {
        MeterCodec
    }
}

impl Codec for MeterCodec {
    fn type_name(&self) -> &str {
        "meter"
    }

    fn cast(&self, input: CodecValue) -> Result<CodecValue> {
        match &input {
            CodecValue::Null | CodecValue::Quantity(_) => Ok(input),
            _ => match input.as_decimal() {
                Some(amount) => Ok(CodecValue::Quantity(Quantity::meters(amount))),
                None => bail!("cannot cast {input:?} to meters"),
            },
        }
    }

    fn deserialize(&self, raw: &str) -> Result<Option<CodecValue>> {
        if raw.trim().is_empty() {
            return Ok(None);
        }
        let amount = raw
            .trim()
            .parse()
            .map_err(|e| eyre::eyre!("bad meter value {raw:?}: {e}"))?;
        Ok(Some(CodecValue::Quantity(Quantity::meters(amount))))
    }

    fn serialize(&self, value: &CodecValue) -> Result<Option<String>> {
        if value.is_blank() {
            return Ok(None);
        }
        let CodecValue::Quantity(quantity) = value else {
            bail!("meter codec cannot serialize {value:?}");
        };
        Ok(Some(quantity.to_i().to_string()))
    }

    fn json_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "properties": {
                "meter": {"type": "number"}
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn wraps_numbers_and_numeric_text() {
        let codec = MeterCodec::new();
        assert_eq!(
            codec.cast(CodecValue::Int(12)).unwrap(),
            CodecValue::Quantity(Quantity::meters(dec!(12)))
        );
        assert_eq!(
            codec.deserialize("12.9").unwrap(),
            Some(CodecValue::Quantity(Quantity::meters(dec!(12.9))))
        );
    }

    #[test]
    fn serializes_the_integer_amount() {
        let codec = MeterCodec::new();
        let q = CodecValue::Quantity(Quantity::meters(dec!(12.9)));
        assert_eq!(codec.serialize(&q).unwrap(), Some("12".to_string()));
    }

    #[test]
    fn cast_is_idempotent_and_blank_is_none() {
        let codec = MeterCodec::new();
        let q = CodecValue::Quantity(Quantity::meters(dec!(7)));
        assert_eq!(codec.cast(q.clone()).unwrap(), q);
        assert_eq!(codec.deserialize(" ").unwrap(), None);
        assert_eq!(codec.serialize(&CodecValue::Null).unwrap(), None);
    }
}
