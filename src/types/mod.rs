//! # Domain Value Types
//!
//! Value objects exchanged between application code and the store:
//!
//! - `point`: geographic point (latitude/longitude/altitude, SRID-tagged)
//! - `money`: currency-validated arbitrary-precision amount
//! - `quantity`: unit-tagged number (meters)
//! - `value`: the `CodecValue` union codecs operate on
//!
//! All of these are immutable value objects created per row/column access;
//! none hold connection state.

mod money;
mod point;
mod quantity;
mod value;

pub use money::{is_known_currency, CurrencyConverter, Money, CURRENCY_CODES};
pub use point::{Point, SRID_WEB_MERCATOR, SRID_WGS84};
pub use quantity::{Quantity, METER};
pub use value::CodecValue;
