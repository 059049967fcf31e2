//! Error types for operation dispatch failures.

use thiserror::Error;

use super::handler::HandlerError;
use super::operation::Operation;

/// Errors surfaced while routing an operation to its handler.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The operation name is not part of the protocol profile.
    #[error("unknown operation '{operation}'")]
    UnknownOperation {
        /// Name supplied by the caller.
        operation: String,
    },

    /// The operation is recognised but has no implementation yet.
    #[error("operation '{operation}' is not implemented")]
    NotImplemented {
        /// Recognised operation.
        operation: Operation,
    },

    /// The handler for the operation failed.
    #[error("executing operation '{operation}' for user '{user_id}': {source}")]
    Handler {
        /// Operation that failed.
        operation: Operation,
        /// Acting user.
        user_id: String,
        /// Failure reported by the handler.
        #[source]
        source: HandlerError,
    },
}

impl DispatchError {
    /// Creates an unknown operation error.
    pub fn unknown_operation(operation: impl Into<String>) -> Self {
        Self::UnknownOperation {
            operation: operation.into(),
        }
    }

    /// Creates a not implemented error.
    #[must_use]
    pub const fn not_implemented(operation: Operation) -> Self {
        Self::NotImplemented { operation }
    }

    /// Wraps a handler failure with the operation and user it concerned.
    pub fn handler(operation: Operation, user_id: impl Into<String>, source: HandlerError) -> Self {
        Self::Handler {
            operation,
            user_id: user_id.into(),
            source,
        }
    }

    /// Operation the error concerns, when it was recognised.
    #[must_use]
    pub const fn operation(&self) -> Option<Operation> {
        match self {
            Self::UnknownOperation { .. } => None,
            Self::NotImplemented { operation } | Self::Handler { operation, .. } => Some(*operation),
        }
    }
}
