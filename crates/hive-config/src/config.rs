//! Layered configuration for the hive data source.
//!
//! Values are merged from defaults, a configuration file, `HIVE_*`
//! environment variables and command-line flags, in increasing precedence.

#![expect(
    non_snake_case,
    reason = "OrthoConfig derive macros generate helper modules with uppercase names"
)]
#![expect(
    missing_docs,
    reason = "OrthoConfig derive macros generate items that cannot be documented"
)]

use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

use crate::connection::{ConnectionInfo, ConnectionInfoError};
use crate::defaults::{
    DEFAULT_HIVE_URL, DEFAULT_LOG_FILTER, DEFAULT_ONT_MAX_ELEMENTS, DEFAULT_WAIT_TIME,
    default_hive_url, default_log_filter_string, default_ont_max_elements, default_wait_time,
};
use crate::logging::LogFormat;

/// Runtime configuration shared by the data source binary and its library.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, OrthoConfig)]
#[ortho_config(prefix = "HIVE")]
pub struct Config {
    /// Hive endpoint URL.
    #[ortho_config(default = DEFAULT_HIVE_URL.to_owned())]
    pub hive_url: String,
    /// Security domain presented to the hive.
    #[ortho_config(default = String::new())]
    pub domain: String,
    /// Hive username.
    #[ortho_config(default = String::new())]
    pub username: String,
    /// Hive password.
    #[ortho_config(default = String::new())]
    pub password: String,
    /// Project identifier.
    #[ortho_config(default = String::new())]
    pub project: String,
    /// Result wait time forwarded to the hive, e.g. `"180s"`.
    #[ortho_config(default = DEFAULT_WAIT_TIME.to_owned())]
    pub wait_time: String,
    /// Maximum number of ontology elements requested from the hive.
    #[ortho_config(default = DEFAULT_ONT_MAX_ELEMENTS.to_owned())]
    pub ont_max_elements: String,
    /// Tracing filter expression.
    #[ortho_config(default = DEFAULT_LOG_FILTER.to_owned())]
    pub log_filter: String,
    /// Log output format.
    #[ortho_config(default = LogFormat::Json)]
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            hive_url: default_hive_url(),
            domain: String::new(),
            username: String::new(),
            password: String::new(),
            project: String::new(),
            wait_time: default_wait_time(),
            ont_max_elements: default_ont_max_elements(),
            log_filter: default_log_filter_string(),
            log_format: LogFormat::default(),
        }
    }
}

impl Config {
    /// Tracing filter expression.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        &self.log_filter
    }

    /// Log output format.
    #[must_use]
    pub const fn log_format(&self) -> LogFormat {
        self.log_format
    }

    /// Ontology result size limit passthrough.
    #[must_use]
    pub fn ont_max_elements(&self) -> &str {
        &self.ont_max_elements
    }

    /// Builds the immutable [`ConnectionInfo`] for this configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectionInfoError::WaitTime`] when `wait_time` is not a
    /// valid duration string.
    pub fn connection_info(&self) -> Result<ConnectionInfo, ConnectionInfoError> {
        ConnectionInfo::parse(
            &self.hive_url,
            &self.domain,
            &self.username,
            &self.password,
            &self.project,
            &self.wait_time,
        )
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn default_config_yields_connection_info() {
        let info = Config::default()
            .connection_info()
            .expect("default wait time parses");
        assert_eq!(info.hive_url(), DEFAULT_HIVE_URL);
        assert_eq!(info.wait_time(), Duration::from_secs(180));
    }

    #[test]
    fn invalid_wait_time_is_rejected() {
        let config = Config {
            wait_time: String::from("later"),
            ..Config::default()
        };
        assert!(config.connection_info().is_err());
    }

    #[test]
    fn exposes_logging_settings() {
        let config = Config::default();
        assert_eq!(config.log_filter(), "info");
        assert_eq!(config.log_format(), LogFormat::Json);
        assert_eq!(config.ont_max_elements(), "200");
    }
}
