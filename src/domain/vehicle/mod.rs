//! Vehicle categories

pub mod model;

pub use model::VehicleType;
