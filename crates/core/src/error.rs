//! Error types for homework status domain logic

use thiserror::Error;

/// Startup configuration errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required environment variables: {}", .0.join(", "))]
    MissingEnvVars(Vec<String>),

    #[error("Invalid value for {name}: {reason}")]
    InvalidValue { name: String, reason: String },
}

/// Errors raised while validating an API response or a homework record
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ResponseError {
    #[error("API response is not a JSON object (got {0})")]
    NotAnObject(&'static str),

    #[error("API response has no \"homeworks\" field")]
    MissingHomeworks,

    #[error("API response field \"homeworks\" is not a list (got {0})")]
    HomeworksNotAList(&'static str),

    #[error("Homework record is missing expected key \"{0}\"")]
    MissingKey(&'static str),

    #[error("Unexpected homework status: {0}")]
    UnexpectedStatus(String),
}

/// Result type alias for response validation
pub type ResponseResult<T> = Result<T, ResponseError>;
