//! Infrastructure Layer
//!
//! Concrete implementations of the domain traits: PostgreSQL storage,
//! an in-memory store for tests and single-process setups, and
//! notifier backends.

pub mod email;
pub mod memory;
pub mod postgres;

pub use email::{LogNotifier, MockNotifier};
pub use memory::MemoryAccountRepository;
pub use postgres::PgAccountRepository;
