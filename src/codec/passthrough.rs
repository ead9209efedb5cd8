//! Inherited codec for discovered domain types: values round-trip as the
//! base type's text form, untouched. Registered during bootstrap for every
//! domain whose base type resolves but carries no rich codec of its own.

use super::Codec;
use crate::types::CodecValue;
use eyre::Result;

pub struct PassthroughDomain {
    type_name: String,
    base_type: String,
}

impl PassthroughDomain {
    pub fn new(type_name: &str, base_type: &str) -> Self {
        PassthroughDomain {
            type_name: type_name.to_string(),
            base_type: base_type.to_string(),
        }
    }

    /// Resolved base storage type this domain sits on.
    pub fn base_type(&self) -> &str {
        &self.base_type
    }
}

impl Codec for PassthroughDomain {
    fn type_name(&self) -> &str {
        &self.type_name
    }

    fn cast(&self, input: CodecValue) -> Result<CodecValue> {
        Ok(input)
    }

    fn deserialize(&self, raw: &str) -> Result<Option<CodecValue>> {
        if raw.is_empty() {
            return Ok(None);
        }
        Ok(Some(CodecValue::Text(raw.to_string())))
    }

    fn serialize(&self, value: &CodecValue) -> Result<Option<String>> {
        if value.is_blank() {
            return Ok(None);
        }
        Ok(Some(match value {
            CodecValue::Text(s) => s.clone(),
            CodecValue::Bool(b) => b.to_string(),
            CodecValue::Int(n) => n.to_string(),
            CodecValue::Float(f) => f.to_string(),
            CodecValue::Decimal(d) => d.to_string(),
            other => eyre::bail!("domain codec cannot serialize {other:?}"),
        }))
    }

    fn json_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "string",
            "description": format!("domain over {}", self.base_type)
        })
    }
}
