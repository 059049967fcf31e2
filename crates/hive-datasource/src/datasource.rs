//! The hive data source: connection details plus the operation table.

use std::collections::HashMap;
use std::hash::BuildHasher;

use hive_config::{ConnectionInfo, ConnectionInfoError, ont_max_elements_from_settings};

use crate::dispatch::{DispatchError, OperationDispatcher, OperationHandlers, OperationOutput};
use crate::output::OutputSharedIds;

/// Entry point callers use to run operations against the hive.
///
/// Holds the immutable connection details, the ontology size-limit
/// passthrough and a fixed handler table; safe to share across threads.
#[derive(Debug, Clone)]
pub struct HiveDataSource {
    connection: ConnectionInfo,
    ont_max_elements: String,
    dispatcher: OperationDispatcher,
}

impl HiveDataSource {
    /// Creates a data source from resolved parts.
    pub fn new(
        connection: ConnectionInfo,
        ont_max_elements: impl Into<String>,
        handlers: OperationHandlers,
    ) -> Self {
        Self {
            connection,
            ont_max_elements: ont_max_elements.into(),
            dispatcher: OperationDispatcher::new(handlers),
        }
    }

    /// Creates a data source from the flat `i2b2.api.*` settings map.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectionInfoError::WaitTime`] when the wait time is missing
    /// or unparsable.
    pub fn from_settings<S>(
        settings: &HashMap<String, String, S>,
        handlers: OperationHandlers,
    ) -> Result<Self, ConnectionInfoError>
    where
        S: BuildHasher,
    {
        let connection = ConnectionInfo::from_settings(settings)?;
        Ok(Self::new(
            connection,
            ont_max_elements_from_settings(settings),
            handlers,
        ))
    }

    /// Connection details forwarded to the hive.
    #[must_use]
    pub const fn connection_info(&self) -> &ConnectionInfo {
        &self.connection
    }

    /// Ontology result size limit handed to handlers.
    #[must_use]
    pub fn ont_max_elements(&self) -> &str {
        &self.ont_max_elements
    }

    /// Runs `operation` on behalf of `user_id`.
    ///
    /// # Errors
    ///
    /// Returns the [`DispatchError`] produced by routing or by the handler.
    pub fn query(
        &self,
        user_id: &str,
        operation: &str,
        parameters: &[u8],
        shared_ids: &OutputSharedIds,
    ) -> Result<OperationOutput, DispatchError> {
        self.dispatcher
            .dispatch(user_id, operation, parameters, shared_ids)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use hive_config::{
        KEY_DOMAIN, KEY_HIVE_URL, KEY_ONT_MAX_ELEMENTS, KEY_PASSWORD, KEY_PROJECT, KEY_USERNAME,
        KEY_WAIT_TIME,
    };
    use rstest::{fixture, rstest};

    use super::*;
    use crate::dispatch::{HandlerError, OperationHandler};

    fn echo(
        user_id: &str,
        _parameters: &[u8],
        _shared_ids: &OutputSharedIds,
    ) -> Result<OperationOutput, HandlerError> {
        Ok(OperationOutput::with_result(user_id))
    }

    #[fixture]
    fn handlers() -> OperationHandlers {
        let handler: Arc<dyn OperationHandler> = Arc::new(echo);
        OperationHandlers::uniform(handler)
    }

    #[fixture]
    fn settings() -> HashMap<String, String> {
        [
            (KEY_HIVE_URL, "http://hive.example/i2b2/services"),
            (KEY_DOMAIN, "i2b2demo"),
            (KEY_USERNAME, "demo"),
            (KEY_PASSWORD, "changeme"),
            (KEY_PROJECT, "Demo"),
            (KEY_WAIT_TIME, "10s"),
            (KEY_ONT_MAX_ELEMENTS, "25"),
        ]
        .into_iter()
        .map(|(key, value)| (key.to_owned(), value.to_owned()))
        .collect()
    }

    #[rstest]
    fn initialises_from_settings(settings: HashMap<String, String>, handlers: OperationHandlers) {
        let source = HiveDataSource::from_settings(&settings, handlers).expect("valid settings");
        assert_eq!(source.connection_info().project(), "Demo");
        assert_eq!(source.connection_info().wait_time(), Duration::from_secs(10));
        assert_eq!(source.ont_max_elements(), "25");
    }

    #[rstest]
    fn refuses_to_start_with_unparsable_wait_time(
        mut settings: HashMap<String, String>,
        handlers: OperationHandlers,
    ) {
        settings.insert(KEY_WAIT_TIME.to_owned(), String::from("soon"));
        let error = HiveDataSource::from_settings(&settings, handlers).expect_err("bad wait time");
        assert!(matches!(error, ConnectionInfoError::WaitTime { ref value, .. } if value == "soon"));
    }

    #[rstest]
    fn query_routes_through_the_dispatcher(
        settings: HashMap<String, String>,
        handlers: OperationHandlers,
    ) {
        let source = HiveDataSource::from_settings(&settings, handlers).expect("valid settings");
        let output = source
            .query("alice", "searchConcept", b"{}", &OutputSharedIds::new())
            .expect("query succeeds");
        assert_eq!(output.result, b"alice");

        let error = source
            .query("alice", "survival-query", b"{}", &OutputSharedIds::new())
            .expect_err("reserved operation");
        assert!(matches!(error, DispatchError::NotImplemented { .. }));
    }
}
