//! Error taxonomy for the domain layer.
//!
//! Every error here is locally recoverable: the operation is rejected with
//! no partial state mutation, and the caller is expected to surface a message
//! and let the user retry. Persistence failures are reported through the
//! dedicated `Storage` variant rather than being conflated with validation.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    /// Malformed or missing required input.
    #[error("{0}")]
    Validation(String),

    /// A referenced member, prize, or transaction does not exist.
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    /// Redemption blocked by the insufficient-balance policy.
    #[error("insufficient balance: balance is {balance}, cost is {cost}")]
    InsufficientBalance { balance: i64, cost: i64 },

    /// The prize exists but has no stock left.
    #[error("prize is out of stock: {0}")]
    OutOfStock(String),

    /// The state snapshot could not be persisted. In-memory state remains
    /// the source of truth for the session.
    #[error("failed to persist state")]
    Storage(#[source] anyhow::Error),
}

impl DomainError {
    pub fn validation(message: impl Into<String>) -> Self {
        DomainError::Validation(message.into())
    }

    pub fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        DomainError::NotFound { kind, id: id.into() }
    }
}

pub type Result<T> = std::result::Result<T, DomainError>;
