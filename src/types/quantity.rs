//! Unit-tagged numeric wrapper. The tag is display metadata only; storage
//! is a plain number and no unit conversion happens at this layer.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Unit name used by the meter codec.
pub const METER: &str = "meter";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quantity {
    unit: &'static str,
    amount: Decimal,
}

impl Quantity {
    pub fn new(unit: &'static str, amount: Decimal) -> Self {
        Quantity { unit, amount }
    }

    pub fn meters(amount: Decimal) -> Self {
        Quantity::new(METER, amount)
    }

    pub fn unit(&self) -> &'static str {
        self.unit
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    /// Truncated integer amount, the form the store keeps.
    pub fn to_i(&self) -> i64 {
        self.amount.trunc().to_i64().unwrap_or(0)
    }
}

impl Serialize for Quantity {
    // {"<unit>": amount}
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(self.unit, &self.amount)?;
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn integer_amount_truncates() {
        assert_eq!(Quantity::meters(dec!(12.9)).to_i(), 12);
        assert_eq!(Quantity::meters(dec!(-3.2)).to_i(), -3);
    }

    #[test]
    fn json_shape_keys_by_unit() {
        let q = Quantity::meters(dec!(7));
        let json = serde_json::to_value(q).unwrap();
        assert_eq!(json["meter"], serde_json::json!("7"));
    }
}
