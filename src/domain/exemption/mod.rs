//! Exemption rules that make a day's passages free of charge

pub mod model;

pub use model::{ExemptionPolicy, ExemptionReason};
