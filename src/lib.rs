//! # Toll Fee Service
//!
//! Congestion tax calculation for vehicles passing toll stations: a
//! time-of-day fare table, toll-free days and vehicle types, one charge per
//! hour-long cluster of passages and a daily cap.
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **domain**: Fare table, exemption policy, passage clustering and the fee engine
//! - **application**: Use cases tying the fee engine to the passage store
//! - **infrastructure**: Passage store implementations
//! - **interfaces**: REST API with Swagger documentation
//! - **shared**: Errors, input validation and shutdown coordination
//! - **server**: Process lifecycle used by the CLI binary

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod shared;

pub use config::{default_config_path, AppConfig};

// Re-export API router
pub use interfaces::http::create_api_router;
