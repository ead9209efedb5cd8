//! # Codec Error Taxonomy
//!
//! Named error variants surfaced by the codec layer. Everything is carried
//! through `eyre::Report`; callers that need to branch on a specific failure
//! use `report.downcast_ref::<CodecError>()`.

use thiserror::Error;

/// Errors raised by value construction and wire-format handling.
///
/// Parse failures are local to the value being processed; they never
/// invalidate the registry or a discovery snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// The currency code is not present in the supported-currency table.
    /// Raised both at construction and on later reassignment.
    #[error("'{0}' is not a known currency")]
    UnknownCurrency(String),

    /// Cross-currency arithmetic was requested but no converter is
    /// configured.
    #[error("cannot convert {from} to {to}: no currency converter is configured")]
    ConversionUnavailable { from: String, to: String },

    /// The EWKB payload is malformed (bad hex, truncation, unknown byte
    /// order marker).
    #[error("invalid EWKB: {0}")]
    InvalidWkb(String),

    /// The EWKB payload is well-formed but encodes a geometry other than a
    /// point.
    #[error("unsupported geometry type {0:#010x}, only points are handled")]
    UnsupportedGeometry(u32),
}
