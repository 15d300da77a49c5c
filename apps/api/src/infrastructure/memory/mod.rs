// In-process store used by tests and local runs without a database

pub mod in_memory_store;

pub use in_memory_store::{InMemoryStore, InMemoryTransaction};
