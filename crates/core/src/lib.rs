//! Homework core - Domain logic for the homework status notifier
//!
//! This crate contains pure domain logic with no network I/O.
//! Configuration validation, response validation and message formatting
//! live here.

pub mod config;
pub mod error;
pub mod homework;

pub use config::{ChatTarget, CoreConfig};
pub use error::{ConfigError, ResponseError};
pub use homework::{Verdict, check_response, current_date, next_cursor, parse_status};
