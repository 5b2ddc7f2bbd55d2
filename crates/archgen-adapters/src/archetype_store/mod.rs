//! Archetype descriptor storage.

mod memory;

pub use memory::InMemoryStore;
