//! Tracing subscriber set-up for the data source.
//!
//! Events go to stderr as JSON or compact lines, stamped with RFC 3339 UTC
//! times. A filter that enables `trace` everywhere keeps the client target
//! at `debug` unless the filter names that target.

use std::io::{self, IsTerminal};

use once_cell::sync::OnceCell;
use tracing::{Subscriber, subscriber::SetGlobalDefaultError};
use tracing_subscriber::filter::{Directive, EnvFilter, LevelFilter};
use tracing_subscriber::fmt::{self, time::UtcTime};

use hive_config::{Config, LogFormat};

use crate::client::CLIENT_TARGET;

static SUBSCRIBER_INSTALLED: OnceCell<()> = OnceCell::new();

/// Proof that the global subscriber is in place.
#[derive(Debug, Default, Clone, Copy)]
pub struct TelemetryHandle;

/// Failures while installing the subscriber.
#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    /// `log_filter` is not a valid filter expression.
    #[error("invalid log filter '{filter}': {message}")]
    Filter {
        /// Expression as configured.
        filter: String,
        /// Parser message.
        message: String,
    },
    /// Another global subscriber was installed first.
    #[error("failed to install telemetry subscriber: {0}")]
    Subscriber(#[source] SetGlobalDefaultError),
}

/// Installs the global subscriber described by `config`.
///
/// Only the first successful call installs anything; later calls return a
/// handle and leave the existing subscriber alone.
///
/// # Errors
///
/// Returns [`TelemetryError::Filter`] for an unparsable `log_filter` and
/// [`TelemetryError::Subscriber`] when a foreign subscriber already owns the
/// global slot.
pub fn initialise(config: &Config) -> Result<TelemetryHandle, TelemetryError> {
    SUBSCRIBER_INSTALLED
        .get_or_try_init(|| install(config))
        .map(|()| TelemetryHandle)
}

fn install(config: &Config) -> Result<(), TelemetryError> {
    let filter = log_filter(config.log_filter())?;
    let subscriber = subscriber(filter, config.log_format());
    tracing::subscriber::set_global_default(subscriber).map_err(TelemetryError::Subscriber)
}

fn log_filter(expression: &str) -> Result<EnvFilter, TelemetryError> {
    let invalid = |message: String| TelemetryError::Filter {
        filter: expression.to_owned(),
        message,
    };
    let filter = EnvFilter::try_new(expression).map_err(|error| invalid(error.to_string()))?;

    if filter.max_level_hint() != Some(LevelFilter::TRACE) || expression.contains(CLIENT_TARGET) {
        return Ok(filter);
    }
    let cap = format!("{CLIENT_TARGET}=debug")
        .parse::<Directive>()
        .map_err(|error| invalid(error.to_string()))?;
    Ok(filter.add_directive(cap))
}

fn subscriber(filter: EnvFilter, format: LogFormat) -> Box<dyn Subscriber + Send + Sync> {
    let stderr_is_terminal = io::stderr().is_terminal();
    let builder = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(stderr_is_terminal)
        .with_timer(UtcTime::rfc_3339())
        .with_target(true)
        .with_thread_names(false);

    match format {
        LogFormat::Json => Box::new(builder.json().flatten_event(true).finish()),
        LogFormat::Compact => Box::new(builder.compact().finish()),
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[test]
    fn rejects_invalid_filters_before_installing() {
        let error = log_filter("hive_datasource=notalevel").expect_err("invalid filter");
        assert!(
            matches!(error, TelemetryError::Filter { ref filter, .. } if filter == "hive_datasource=notalevel")
        );
    }

    #[test]
    fn global_trace_keeps_envelope_dumps_off() {
        let filter = log_filter("trace").expect("valid filter");
        assert!(
            filter.to_string().contains("hive_datasource::client=debug"),
            "filter: {filter}"
        );
    }

    #[rstest]
    #[case::default_level("info")]
    #[case::dispatch_trace("warn,hive_datasource::dispatch=debug")]
    #[case::explicit_client("info,hive_datasource::client=trace")]
    #[case::explicit_client_with_global_trace("trace,hive_datasource::client=trace")]
    fn leaves_other_filters_as_written(#[case] expression: &str) {
        let filter = log_filter(expression).expect("valid filter");
        assert!(
            !filter.to_string().contains("hive_datasource::client=debug"),
            "filter: {filter}"
        );
    }
}
