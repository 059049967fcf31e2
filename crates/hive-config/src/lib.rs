//! Shared configuration for the hive data source.
//!
//! This crate owns the configuration surface consumed at start-up: the
//! layered [`Config`] loaded through `ortho_config`, the immutable
//! [`ConnectionInfo`] injected into every outbound envelope, and the logging
//! defaults used by the binaries.
//!
//! Connection details can be derived either from [`Config`] or from the flat
//! `i2b2.api.*` key map supplied by a hosting platform. In both cases the
//! result wait time is parsed from a human-readable duration string and an
//! unparsable value fails construction.

mod config;
mod connection;
mod defaults;
mod duration;
mod logging;

pub use config::Config;
pub use connection::{
    ConnectionInfo, ConnectionInfoError, KEY_DOMAIN, KEY_HIVE_URL, KEY_ONT_MAX_ELEMENTS,
    KEY_PASSWORD, KEY_PROJECT, KEY_USERNAME, KEY_WAIT_TIME, ont_max_elements_from_settings,
};
pub use defaults::{
    DEFAULT_HIVE_URL, DEFAULT_LOG_FILTER, DEFAULT_ONT_MAX_ELEMENTS, DEFAULT_WAIT_TIME,
    default_hive_url, default_log_filter, default_log_filter_string, default_log_format,
    default_ont_max_elements, default_wait_time,
};
pub use duration::{DurationParseError, parse_duration};
pub use logging::{LogFormat, LogFormatParseError};
