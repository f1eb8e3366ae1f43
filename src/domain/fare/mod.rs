//! Fare table aggregate
//!
//! Time-of-day price breakpoints and the lookup that resolves a passage to a price.

pub mod model;

pub use model::{FareBreakpoint, FareTable, Price};
