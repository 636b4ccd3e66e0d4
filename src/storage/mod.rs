//! Embedding store persistence

pub mod store;

pub use store::{load, read_header, save, StoreHeader};
