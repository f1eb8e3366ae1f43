pub mod calculator;
pub mod exemption;
pub mod fare;
pub mod passage;
pub mod vehicle;

// Re-export commonly used types
pub use calculator::{
    cluster_passages, FeeBreakdown, PassageCluster, PricedCluster, TollCalculator, TollPolicy,
    CLUSTER_WINDOW_MINUTES,
};
pub use exemption::{ExemptionPolicy, ExemptionReason};
pub use fare::{FareBreakpoint, FareTable, Price};
pub use passage::{Passage, PassageRepository, PassageTime};
pub use vehicle::VehicleType;

// Re-export DomainError from shared for convenience
pub use crate::shared::errors::{DomainError, DomainResult};
