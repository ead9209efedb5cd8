//! # Codec Value Union
//!
//! `CodecValue` is the dynamic value that flows through every codec. It
//! covers three layers of shape:
//!
//! - scalar storage forms (`Bool`, `Int`, `Float`, `Decimal`, `Text`)
//! - tolerant user-input forms accepted by `cast` (`List`, `Map`)
//! - domain values produced by the codecs (`Point`, `Money`, `Quantity`)
//!
//! `cast` is idempotent: feeding a domain variant back through a codec's
//! `cast` returns it unchanged.

use super::{Money, Point, Quantity};
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq)]
pub enum CodecValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Decimal(Decimal),
    Text(String),
    List(Vec<CodecValue>),
    Map(BTreeMap<String, CodecValue>),
    Point(Point),
    Money(Money),
    Quantity(Quantity),
}

impl CodecValue {
    /// Blank in the storage sense: absent, or whitespace-only text.
    pub fn is_blank(&self) -> bool {
        match self {
            CodecValue::Null => true,
            CodecValue::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// Numeric view of scalar variants. Textual numbers parse; everything
    /// else is `None`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CodecValue::Int(n) => Some(*n as f64),
            CodecValue::Float(f) => Some(*f),
            CodecValue::Decimal(d) => d.to_f64(),
            CodecValue::Text(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Decimal view of scalar variants.
    pub fn as_decimal(&self) -> Option<Decimal> {
        match self {
            CodecValue::Int(n) => Some(Decimal::from(*n)),
            CodecValue::Float(f) => Decimal::from_f64(*f),
            CodecValue::Decimal(d) => Some(*d),
            CodecValue::Text(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}

impl From<bool> for CodecValue {
    fn from(v: bool) -> Self {
        CodecValue::Bool(v)
    }
}

impl From<i64> for CodecValue {
    fn from(v: i64) -> Self {
        CodecValue::Int(v)
    }
}

impl From<f64> for CodecValue {
    fn from(v: f64) -> Self {
        CodecValue::Float(v)
    }
}

impl From<Decimal> for CodecValue {
    fn from(v: Decimal) -> Self {
        CodecValue::Decimal(v)
    }
}

impl From<&str> for CodecValue {
    fn from(v: &str) -> Self {
        CodecValue::Text(v.to_string())
    }
}

impl From<String> for CodecValue {
    fn from(v: String) -> Self {
        CodecValue::Text(v)
    }
}

impl From<Point> for CodecValue {
    fn from(v: Point) -> Self {
        CodecValue::Point(v)
    }
}

impl From<Money> for CodecValue {
    fn from(v: Money) -> Self {
        CodecValue::Money(v)
    }
}

impl From<Quantity> for CodecValue {
    fn from(v: Quantity) -> Self {
        CodecValue::Quantity(v)
    }
}

/// API-boundary conversion: JSON user input maps straight onto the tolerant
/// `cast` input forms.
impl From<serde_json::Value> for CodecValue {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => CodecValue::Null,
            serde_json::Value::Bool(b) => CodecValue::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    CodecValue::Int(i)
                } else {
                    CodecValue::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            serde_json::Value::String(s) => CodecValue::Text(s),
            serde_json::Value::Array(items) => {
                CodecValue::List(items.into_iter().map(CodecValue::from).collect())
            }
            serde_json::Value::Object(fields) => CodecValue::Map(
                fields
                    .into_iter()
                    .map(|(k, v)| (k, CodecValue::from(v)))
                    .collect(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn blankness() {
        assert!(CodecValue::Null.is_blank());
        assert!(CodecValue::Text("  ".into()).is_blank());
        assert!(!CodecValue::Text("x".into()).is_blank());
        assert!(!CodecValue::Int(0).is_blank());
    }

    #[test]
    fn numeric_views() {
        assert_eq!(CodecValue::Int(3).as_f64(), Some(3.0));
        assert_eq!(CodecValue::Text(" 2.5 ".into()).as_decimal(), Some(dec!(2.5)));
        assert_eq!(CodecValue::Bool(true).as_f64(), None);
    }

    #[test]
    fn json_input_maps_onto_cast_forms() {
        let v = CodecValue::from(serde_json::json!({"latitude": 10, "longitude": 20}));
        match v {
            CodecValue::Map(m) => {
                assert_eq!(m["latitude"], CodecValue::Int(10));
                assert_eq!(m["longitude"], CodecValue::Int(20));
            }
            other => panic!("expected map, got {other:?}"),
        }
    }
}
