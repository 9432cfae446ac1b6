//! Domain Layer
//!
//! Entities, value objects, and the traits the core calls out through
//! (account storage, reset-mark storage, notification delivery).

pub mod entity;
pub mod notifier;
pub mod repository;
pub mod value_object;
