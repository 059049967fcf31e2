//! Test doubles shared by the data source behavioural suites.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use hive_config::Config;
use ortho_config::OrthoError;

use crate::bootstrap::{BootstrapError, ConfigLoader};
use crate::dispatch::{HandlerError, OperationHandler, OperationOutput};
use crate::health::HealthReporter;
use crate::output::{OutputObjectName, OutputSharedIds};

/// Handler that counts calls and either echoes its parameters or fails.
#[derive(Default)]
pub struct RecordingHandler {
    calls: AtomicUsize,
    failure: Option<String>,
}

impl RecordingHandler {
    /// Handler that fails every call with `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            failure: Some(message.into()),
        }
    }

    /// Number of calls received so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl OperationHandler for RecordingHandler {
    fn handle(
        &self,
        _user_id: &str,
        parameters: &[u8],
        shared_ids: &OutputSharedIds,
    ) -> Result<OperationOutput, HandlerError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(message) = &self.failure {
            return Err(message.clone().into());
        }
        Ok(OperationOutput {
            result: parameters.to_vec(),
            outputs: shared_ids
                .output(OutputObjectName::COUNT, b"1".to_vec())
                .into_iter()
                .collect(),
        })
    }
}

/// Loader returning a fixed configuration.
pub struct FixedConfigLoader {
    config: Config,
}

impl FixedConfigLoader {
    pub fn new(config: Config) -> Self {
        Self { config }
    }
}

impl ConfigLoader for FixedConfigLoader {
    fn load(&self) -> Result<Config, Arc<OrthoError>> {
        Ok(self.config.clone())
    }
}

/// Health events tracked during scenarios.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthEvent {
    /// Bootstrap started.
    BootstrapStarting,
    /// Bootstrap completed successfully.
    BootstrapSucceeded,
    /// Bootstrap failed with an error description.
    BootstrapFailed(String),
}

/// Records health events for assertions.
#[derive(Default)]
pub struct RecordingHealthReporter {
    events: Mutex<Vec<HealthEvent>>,
}

impl RecordingHealthReporter {
    /// Captures a copy of the recorded events.
    pub fn events(&self) -> Vec<HealthEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn record(&self, event: HealthEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }
}

impl HealthReporter for RecordingHealthReporter {
    fn bootstrap_starting(&self) {
        self.record(HealthEvent::BootstrapStarting);
    }

    fn bootstrap_succeeded(&self, _config: &Config) {
        self.record(HealthEvent::BootstrapSucceeded);
    }

    fn bootstrap_failed(&self, error: &BootstrapError) {
        self.record(HealthEvent::BootstrapFailed(error.to_string()));
    }
}
