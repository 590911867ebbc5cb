//! In-memory project store.

mod store;

pub use store::InMemoryProjectStore;
