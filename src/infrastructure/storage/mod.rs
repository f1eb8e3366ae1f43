//! Passage store implementations

mod memory;

pub use memory::InMemoryPassageRepository;
