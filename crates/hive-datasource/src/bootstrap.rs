//! Data source bootstrap orchestration.

use std::ffi::OsString;
use std::sync::Arc;

use ortho_config::{OrthoConfig, OrthoError};
use thiserror::Error;

use hive_config::{Config, ConnectionInfo, ConnectionInfoError};

use crate::datasource::HiveDataSource;
use crate::dispatch::OperationHandlers;
use crate::health::HealthReporter;
use crate::telemetry::{self, TelemetryError, TelemetryHandle};

/// Trait abstracting configuration loading for testability.
pub trait ConfigLoader: Send + Sync {
    /// Loads the data source configuration.
    ///
    /// # Errors
    ///
    /// Returns the loader's error when no configuration can be assembled.
    fn load(&self) -> Result<Config, Arc<OrthoError>>;
}

/// Loader that delegates to [`OrthoConfig::load`].
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemConfigLoader;

impl ConfigLoader for SystemConfigLoader {
    fn load(&self) -> Result<Config, Arc<OrthoError>> {
        Config::load()
    }
}

/// Loader that parses a fixed argument list, ignoring the process arguments.
#[derive(Debug, Clone)]
pub struct StaticConfigLoader {
    args: Vec<OsString>,
}

impl StaticConfigLoader {
    /// Creates a loader over `args`; the first element is the program name.
    pub fn new<I, A>(args: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<OsString>,
    {
        Self {
            args: args.into_iter().map(Into::into).collect(),
        }
    }
}

impl ConfigLoader for StaticConfigLoader {
    fn load(&self) -> Result<Config, Arc<OrthoError>> {
        Config::load_from_iter(self.args.clone())
    }
}

/// Errors surfaced during bootstrap.
#[derive(Debug, Error)]
pub enum BootstrapError {
    /// Configuration failed to load.
    #[error("failed to load configuration: {source}")]
    Configuration {
        /// Underlying loader error.
        #[source]
        source: Arc<OrthoError>,
    },
    /// Telemetry initialisation failed.
    #[error("failed to initialise telemetry: {source}")]
    Telemetry {
        /// Underlying telemetry error.
        #[source]
        source: TelemetryError,
    },
    /// Connection details could not be derived from the configuration.
    #[error("invalid hive connection settings: {source}")]
    Connection {
        /// Underlying parsing error.
        #[source]
        source: ConnectionInfoError,
    },
}

/// Validated start-up state, ready to be wired with operation handlers.
#[derive(Debug)]
pub struct Bootstrapped {
    config: Config,
    connection: ConnectionInfo,
    telemetry: TelemetryHandle,
}

impl Bootstrapped {
    /// Accessor for the resolved configuration.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Connection details derived from the configuration.
    #[must_use]
    pub const fn connection_info(&self) -> &ConnectionInfo {
        &self.connection
    }

    /// Accessor for the telemetry handle, primarily useful for testing.
    #[must_use]
    pub const fn telemetry(&self) -> TelemetryHandle {
        self.telemetry
    }

    /// Builds the data source with the supplied handler table.
    #[must_use]
    pub fn into_data_source(self, handlers: OperationHandlers) -> HiveDataSource {
        HiveDataSource::new(
            self.connection,
            self.config.ont_max_elements,
            handlers,
        )
    }
}

/// Loads configuration, installs telemetry and validates connection details.
///
/// # Errors
///
/// Returns the first [`BootstrapError`] encountered; the reporter observes it
/// before it is returned.
pub fn bootstrap_with(
    loader: &dyn ConfigLoader,
    reporter: &dyn HealthReporter,
) -> Result<Bootstrapped, BootstrapError> {
    reporter.bootstrap_starting();

    let result = load_and_validate(loader);
    match &result {
        Ok(bootstrapped) => reporter.bootstrap_succeeded(bootstrapped.config()),
        Err(error) => reporter.bootstrap_failed(error),
    }
    result
}

fn load_and_validate(loader: &dyn ConfigLoader) -> Result<Bootstrapped, BootstrapError> {
    let config = loader
        .load()
        .map_err(|source| BootstrapError::Configuration { source })?;
    let telemetry =
        telemetry::initialise(&config).map_err(|source| BootstrapError::Telemetry { source })?;
    let connection = config
        .connection_info()
        .map_err(|source| BootstrapError::Connection { source })?;

    Ok(Bootstrapped {
        config,
        connection,
        telemetry,
    })
}
