//! Hive data source: operation dispatch on top of the hive envelope model.
//!
//! A [`HiveDataSource`] owns the immutable [`hive_config::ConnectionInfo`],
//! the ontology size-limit passthrough and a fixed table of
//! [`OperationHandler`]s. Callers name an operation with a string token;
//! [`HiveDataSource::query`] resolves it against the closed [`Operation`]
//! set, runs the matching handler and returns its result payload and output
//! objects, or a single [`DispatchError`].
//!
//! Handlers that talk to the hive use [`HiveClient`], which builds a request
//! envelope, applies the connection details, posts it through a
//! [`HiveTransport`] and validates the reply status.
//!
//! Start-up follows [`bootstrap_with`]: load the layered configuration,
//! install structured telemetry, then derive connection details, failing
//! closed on an unparsable wait time.

mod bootstrap;
mod client;
mod datasource;
pub mod dispatch;
mod health;
mod output;
mod telemetry;

pub use bootstrap::{
    BootstrapError, Bootstrapped, ConfigLoader, StaticConfigLoader, SystemConfigLoader,
    bootstrap_with,
};
pub use client::{ClientError, HiveClient, HiveTransport, TransportError};
pub use datasource::HiveDataSource;
pub use dispatch::{
    DispatchError, HandlerError, Operation, OperationDispatcher, OperationHandler,
    OperationHandlers, OperationOutput,
};
pub use health::{HealthReporter, StructuredHealthReporter};
pub use output::{OutputObject, OutputObjectName, OutputSharedIds, SharedId};
pub use telemetry::{TelemetryError, TelemetryHandle};

#[cfg(test)]
mod tests;
