//! Homework shared - Process bootstrap helpers
//!
//! Environment loading and logging setup used by the service binaries.

pub mod bootstrap;

pub use bootstrap::{LoggingConfig, init_env, init_tracing};
