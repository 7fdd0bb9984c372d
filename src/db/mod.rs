//! Database layer (in-memory).

pub mod memory;

pub use memory::{EntryScope, MemoryDb, TimeEntryQuery};
