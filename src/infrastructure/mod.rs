//! Infrastructure layer
//!
//! External concerns: the passage store backing the request protocol.

pub mod storage;

pub use storage::InMemoryPassageRepository;
