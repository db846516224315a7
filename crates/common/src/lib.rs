//! Common types and utilities for kube-codegen
//!
//! This crate contains the intermediate representation (IR) of an API
//! description, the shared error type, and the generation configuration
//! used across the parser, resolver, generator, and CLI components.

pub mod config;
mod ir;

pub use config::GeneratorConfig;
pub use ir::*;

use thiserror::Error;

/// Errors that can occur during client generation
#[derive(Error, Debug)]
pub enum GeneratorError {
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Generation error: {0}")]
    Generation(String),

    #[error(
        "Pattern must follow the Perl /pattern/modifiers convention. {pattern} is not valid (on {owner})"
    )]
    InvalidPatternFormat { pattern: String, owner: String },

    #[error("Empty method name (operationId) not allowed: {method} {path}")]
    EmptyOperationId { path: String, method: HttpMethod },

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for generator operations
pub type Result<T> = std::result::Result<T, GeneratorError>;
