//! Routing of named operations to their handlers.
//!
//! Operation names are resolved against the closed [`Operation`] set before
//! any handler is looked up, so unknown names never reach a handler. Reserved
//! operations fail with [`DispatchError::NotImplemented`]. Handler failures
//! are wrapped with the operation and user and no outputs are returned.

use tracing::{debug, error, info};

use crate::output::OutputSharedIds;

use super::errors::DispatchError;
use super::handler::{OperationHandlers, OperationOutput};
use super::operation::Operation;

/// Tracing target for dispatch operations.
pub(crate) const DISPATCH_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::dispatch");

/// Routes operation calls to the wired handlers.
#[derive(Debug, Clone)]
pub struct OperationDispatcher {
    handlers: OperationHandlers,
}

impl OperationDispatcher {
    /// Creates a dispatcher over a fixed handler table.
    #[must_use]
    pub const fn new(handlers: OperationHandlers) -> Self {
        Self { handlers }
    }

    /// Runs `operation` for `user_id`.
    ///
    /// On success the handler's output is returned unmodified.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::UnknownOperation`] for names outside the
    /// protocol profile, [`DispatchError::NotImplemented`] for reserved
    /// operations and [`DispatchError::Handler`] when the handler fails.
    pub fn dispatch(
        &self,
        user_id: &str,
        operation: &str,
        parameters: &[u8],
        shared_ids: &OutputSharedIds,
    ) -> Result<OperationOutput, DispatchError> {
        info!(
            target: DISPATCH_TARGET,
            user_id,
            operation,
            output_slots = shared_ids.len(),
            "dispatching operation"
        );
        debug!(
            target: DISPATCH_TARGET,
            parameters = %String::from_utf8_lossy(parameters),
            "operation parameters"
        );

        let result = self.route(user_id, operation, parameters, shared_ids);
        match &result {
            Ok(output) => {
                info!(
                    target: DISPATCH_TARGET,
                    user_id,
                    operation,
                    outputs = output.outputs.len(),
                    "operation completed"
                );
                debug!(
                    target: DISPATCH_TARGET,
                    result = %String::from_utf8_lossy(&output.result),
                    "operation result"
                );
            }
            Err(error) => {
                error!(target: DISPATCH_TARGET, user_id, operation, %error, "operation failed");
            }
        }
        result
    }

    fn route(
        &self,
        user_id: &str,
        name: &str,
        parameters: &[u8],
        shared_ids: &OutputSharedIds,
    ) -> Result<OperationOutput, DispatchError> {
        let operation = Operation::parse(name)?;
        let handler = self
            .handlers
            .get(operation)
            .ok_or_else(|| DispatchError::not_implemented(operation))?;
        handler
            .handle(user_id, parameters, shared_ids)
            .map_err(|source| DispatchError::handler(operation, user_id, source))
    }
}
