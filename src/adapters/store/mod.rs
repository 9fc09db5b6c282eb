//! Persistence collaborator boundary
//!
//! The core never talks to a database directly; it goes through the store
//! traits defined here. An in-memory implementation is provided for tests
//! and embedded use.

pub mod memory;
pub mod traits;

pub use memory::InMemoryStore;
pub use traits::{QuizStore, RecordStore, ResultStore};
