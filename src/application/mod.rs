//! Application layer
//!
//! Use cases that tie the fee engine to the passage store.

pub mod services;

pub use services::TollFeeService;
