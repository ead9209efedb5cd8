//! Round-trip and cast-tolerance coverage for the point, money and meter
//! codecs, driven through the public registry surface the way row
//! materialization uses it.

use pgcodec::{
    Codec, CodecConfig, CodecValue, MemoryCatalog, Money, Point, Quantity, TypeRegistry,
    SRID_WGS84,
};
use rust_decimal_macros::dec;

fn registry() -> TypeRegistry {
    let (registry, _discovery) =
        TypeRegistry::load(&MemoryCatalog::new(), &CodecConfig::new()).unwrap();
    registry
}

fn decode_point(codec: &dyn Codec, wire: &str) -> Point {
    match codec.deserialize(wire).unwrap() {
        Some(CodecValue::Point(p)) => p,
        other => panic!("expected point, got {other:?}"),
    }
}

// ============================================================================
// GEOGRAPHY / GEOMETRY
// ============================================================================

#[test]
fn geography_round_trip_is_exact() {
    let registry = registry();
    let codec = registry.lookup("geography").unwrap();
    let point = Point::with_altitude(-33.8688, 151.2093, 58.0).with_srid(SRID_WGS84);

    let wire = codec.serialize(&CodecValue::Point(point)).unwrap().unwrap();
    let decoded = decode_point(codec.as_ref(), &wire);
    assert!(decoded.approx_eq(&point, 1e-12));
    assert_eq!(decoded.srid, Some(SRID_WGS84));
}

#[test]
fn geometry_round_trip_within_projection_tolerance() {
    let registry = registry();
    let codec = registry.lookup("geometry").unwrap();
    let point = Point::with_altitude(60.17, 24.94, 7.0).with_srid(SRID_WGS84);

    let wire = codec.serialize(&CodecValue::Point(point)).unwrap().unwrap();
    let decoded = decode_point(codec.as_ref(), &wire);
    assert!(
        decoded.approx_eq(&point, 1e-9),
        "projection round trip drifted: {point:?} -> {decoded:?}"
    );
}

#[test]
fn point_cast_forms_agree() {
    let registry = registry();
    let codec = registry.lookup("geography").unwrap();

    let from_map = codec
        .cast(serde_json::json!({"lat": 10, "lon": 20, "alt": 5}).into())
        .unwrap();
    let from_long_keys = codec
        .cast(serde_json::json!({"latitude": 10, "longitude": 20, "altitude": 5}).into())
        .unwrap();
    let from_triple = codec
        .cast(serde_json::json!([20, 10, 5]).into())
        .unwrap();

    assert_eq!(from_map, from_long_keys);
    assert_eq!(from_map, from_triple);
}

#[test]
fn point_cast_defaults_altitude_to_zero() {
    let registry = registry();
    let codec = registry.lookup("geometry").unwrap();
    let cast = codec
        .cast(serde_json::json!({"latitude": 10, "longitude": 20}).into())
        .unwrap();
    match cast {
        CodecValue::Point(p) => assert_eq!(p.altitude, 0.0),
        other => panic!("expected point, got {other:?}"),
    }
}

#[test]
fn point_cast_is_idempotent() {
    let registry = registry();
    for name in ["geometry", "geography"] {
        let codec = registry.lookup(name).unwrap();
        let once = codec
            .cast(serde_json::json!({"latitude": 1, "longitude": 2}).into())
            .unwrap();
        assert_eq!(codec.cast(once.clone()).unwrap(), once);
    }
}

// ============================================================================
// MONEY
// ============================================================================

#[test]
fn money_round_trip_is_exact() {
    let registry = registry();
    let codec = registry.lookup("currency").unwrap();
    let money = Money::new("EUR", dec!(-12.34)).unwrap();

    let wire = codec
        .serialize(&CodecValue::Money(money.clone()))
        .unwrap()
        .unwrap();
    assert_eq!(wire, "(EUR,-12.34)");
    let back = codec.deserialize(&wire).unwrap().unwrap();
    assert_eq!(back, CodecValue::Money(money));
}

#[test]
fn money_cast_is_idempotent() {
    let registry = registry();
    let codec = registry.lookup("currency").unwrap();
    let once = codec.cast(CodecValue::Text("USD12.50".into())).unwrap();
    assert_eq!(codec.cast(once.clone()).unwrap(), once);
}

// ============================================================================
// METER
// ============================================================================

#[test]
fn meter_round_trip_keeps_the_integer_amount() {
    let registry = registry();
    let codec = registry.lookup("meter").unwrap();

    let q = codec.cast(CodecValue::Int(42)).unwrap();
    assert_eq!(q, CodecValue::Quantity(Quantity::meters(dec!(42))));
    let wire = codec.serialize(&q).unwrap().unwrap();
    assert_eq!(wire, "42");
    assert_eq!(codec.deserialize(&wire).unwrap(), Some(q));
}

// ============================================================================
// BLANK INPUT CONVENTION
// ============================================================================

#[test]
fn all_codecs_map_blank_to_none() {
    let registry = registry();
    for name in ["geometry", "geography", "currency", "meter"] {
        let codec = registry.lookup(name).unwrap();
        assert_eq!(codec.deserialize("").unwrap(), None, "{name} deserialize");
        assert_eq!(
            codec.serialize(&CodecValue::Null).unwrap(),
            None,
            "{name} serialize"
        );
    }
}
