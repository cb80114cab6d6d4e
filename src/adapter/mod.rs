//! Adapters: concrete implementations of the outbound ports.

pub mod memory;
pub mod sqlite;

pub use memory::MemoryLedgerStore;
pub use sqlite::SqliteLedgerStore;
