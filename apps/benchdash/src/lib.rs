//! # Benchdash
//!
//! Library half of the benchmark dashboard binary: HTTP API, CLI and
//! configuration, exposed for integration tests.

pub mod api;
pub mod cli;
pub mod config;
