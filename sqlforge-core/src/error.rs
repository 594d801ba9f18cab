//! Error types for SqlForge

use thiserror::Error;

/// The main error type for SqlForge operations
#[derive(Error, Debug)]
pub enum Error {
    /// A builder call violated an operator's shape contract or a value range
    #[error("invalid build instruction: {message}")]
    InvalidInstruction { message: String },

    /// A token is not present in the canonical token tables
    #[error("unknown {category} token: '{token}'")]
    UnknownToken {
        category: &'static str,
        token: String,
    },

    /// Database connection or execution error
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Convenience Result type for SqlForge operations
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a new invalid build instruction error
    pub fn invalid_instruction(message: impl Into<String>) -> Self {
        Self::InvalidInstruction {
            message: message.into(),
        }
    }

    /// Create a new unknown token error
    pub fn unknown_token(category: &'static str, token: impl Into<String>) -> Self {
        Self::UnknownToken {
            category,
            token: token.into(),
        }
    }
}
