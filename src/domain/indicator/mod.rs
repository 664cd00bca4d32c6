//! Technical indicator primitives.
//!
//! Both indicators are pure functions over a price sequence and carry no
//! state between calls; callers pass the full prefix seen so far on every
//! tick. Acceptable at replay scale (tens to low hundreds of candles).

pub mod rsi;
pub mod sma;

pub use rsi::rsi;
pub use sma::sma;
