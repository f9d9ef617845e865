//! JSON-file backend for the Vitrine document store.
//!
//! Each collection lives in one pretty-printed JSON file under the data
//! directory. All file access runs on the blocking thread pool so the async
//! runtime is never stalled on disk I/O.

mod envelope;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::JsonStore;

#[cfg(test)]
mod tests;
