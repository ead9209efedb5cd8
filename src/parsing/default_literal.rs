//! # Default-Literal Extraction
//!
//! Catalog metadata reports column defaults as raw SQL expressions, e.g.
//! `'hello'::character varying`, `'(USD,12.50)'::currency` or
//! `nextval('users_id_seq'::regclass)`. This module unwraps the literal
//! value out of the expression.
//!
//! The grammar is an ordered cascade of sixteen patterns; several character
//! classes overlap in generality, so first-match-wins order is load-bearing
//! and must not be reshuffled. An expression no rule claims (function
//! calls, user-defined composites outside the enum set) yields `None`:
//! "unknown default, do not pre-fill" — never an error.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

/// A recognized default literal. Everything except booleans stays textual;
/// downstream codecs cast it into the column's domain type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefaultValue {
    Bool(bool),
    Text(String),
}

macro_rules! literal_regex {
    ($name:ident, $pattern:literal) => {
        static $name: Lazy<Regex> = Lazy::new(|| Regex::new($pattern).unwrap());
    };
}

// Ordered from most to least specific; see module docs.
literal_regex!(RANGE_RE, r"(?s)\A'(.*)'::(?:num|date|tstz|ts|int4|int8)range\z");
literal_regex!(NUMERIC_RE, r"\A\(?(-?\d+(?:\.\d*)?)\)?(?:::bigint)?\z");
literal_regex!(CHARACTER_RE, r"(?s)\A\(?'(.*)'::.*\b(?:character varying|bpchar|text)\z");
literal_regex!(BYTEA_RE, r"(?s)\A'(.*)'::bytea\z");
literal_regex!(DATETIME_RE, r"\A'(.+)'::(?:time(?:stamp)? with(?:out)? time zone|date)\z");
literal_regex!(INTERVAL_RE, r"\A'(.*)'::interval\z");
literal_regex!(GEOMETRIC_RE, r#"\A'(.*)'::(?:point|line|lseg|box|"?path"?|polygon|circle)\z"#);
literal_regex!(NETWORK_RE, r"\A'(.*)'::(?:cidr|inet|macaddr)\z");
literal_regex!(BIT_RE, r#"\AB'(.*)'::"?bit(?: varying)?"?\z"#);
literal_regex!(XML_RE, r"(?s)\A'(.*)'::xml\z");
literal_regex!(ARRAY_RE, r#"\A'(.*)'::"?\D+"?\[\]\z"#);
literal_regex!(HSTORE_RE, r"\A'(.*)'::hstore\z");
literal_regex!(JSON_RE, r"\A'(.*)'::json\z");
literal_regex!(OID_RE, r"\A-?\d+\z");
literal_regex!(TYPED_LITERAL_RE, r"'(.*)'::(.*)");

/// Extracts the typed literal from a raw default expression.
///
/// `enum_types` is the discovered enum-type name set; it backs the final
/// fallback rule, which accepts `'<inner>'::<name>` only when `<name>` is a
/// known enum type.
pub fn extract_default(raw: &str, enum_types: &HashSet<String>) -> Option<DefaultValue> {
    let inner_of = |re: &Regex| {
        re.captures(raw)
            .map(|caps| DefaultValue::Text(caps[1].to_string()))
    };

    if let Some(v) = inner_of(&RANGE_RE) {
        return Some(v);
    }
    if let Some(v) = inner_of(&NUMERIC_RE) {
        return Some(v);
    }
    if let Some(v) = inner_of(&CHARACTER_RE) {
        return Some(v);
    }
    if let Some(v) = inner_of(&BYTEA_RE) {
        return Some(v);
    }
    if let Some(v) = inner_of(&DATETIME_RE) {
        return Some(v);
    }
    if let Some(v) = inner_of(&INTERVAL_RE) {
        return Some(v);
    }
    match raw {
        "true" => return Some(DefaultValue::Bool(true)),
        "false" => return Some(DefaultValue::Bool(false)),
        _ => {}
    }
    if let Some(v) = inner_of(&GEOMETRIC_RE) {
        return Some(v);
    }
    if let Some(v) = inner_of(&NETWORK_RE) {
        return Some(v);
    }
    if let Some(v) = inner_of(&BIT_RE) {
        return Some(v);
    }
    if let Some(v) = inner_of(&XML_RE) {
        return Some(v);
    }
    if let Some(v) = inner_of(&ARRAY_RE) {
        return Some(v);
    }
    if let Some(v) = inner_of(&HSTORE_RE) {
        return Some(v);
    }
    if let Some(v) = inner_of(&JSON_RE) {
        return Some(v);
    }
    if OID_RE.is_match(raw) {
        return Some(DefaultValue::Text(raw.to_string()));
    }

    // Last resort: a quoted literal cast to a discovered enum type. Anything
    // else is a user type instance or a function call whose value cannot be
    // known statically.
    let caps = TYPED_LITERAL_RE.captures(raw)?;
    if enum_types.contains(&caps[2]) {
        return Some(DefaultValue::Text(caps[1].to_string()));
    }
    None
}
