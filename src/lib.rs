//! Weather Explorer: city weather lookup proxy.
//!
//! Library crate exposing all modules for use by integration tests
//! and the binary entry points.

pub mod config;
pub mod frontend;
pub mod providers;
pub mod server;
pub mod types;
