//! Passage aggregate
//!
//! A vehicle passing a toll station, and the store contract for a vehicle's
//! passage history.

pub mod model;
pub mod repository;

pub use model::{Passage, PassageTime};
pub use repository::PassageRepository;
