//! Core types and trait definitions for the Vitrine content backend.
//!
//! This crate is deliberately free of HTTP and filesystem dependencies.
//! All other crates depend on it; it depends on nothing proprietary.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod admin;
pub mod content;
pub mod document;
pub mod error;
pub mod fallback;
pub mod store;

pub use error::{Error, Result};
