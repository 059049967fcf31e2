use crate::logging::LogFormat;

/// Default hive endpoint used when nothing else is configured.
pub const DEFAULT_HIVE_URL: &str = "http://localhost:8080/i2b2/services";

/// Default result wait time forwarded to the hive, as a duration string.
pub const DEFAULT_WAIT_TIME: &str = "180s";

/// Default upper bound on ontology elements returned by the hive.
pub const DEFAULT_ONT_MAX_ELEMENTS: &str = "200";

/// Default log filter expression used by the binaries.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Default log filter expression used by the binaries.
#[must_use]
pub const fn default_log_filter() -> &'static str {
    DEFAULT_LOG_FILTER
}

/// Owned log filter value used where allocation is required (e.g. serde).
#[must_use]
pub fn default_log_filter_string() -> String {
    DEFAULT_LOG_FILTER.to_owned()
}

/// Default logging format for the binaries.
#[must_use]
pub const fn default_log_format() -> LogFormat {
    LogFormat::Json
}

/// Owned default hive endpoint.
#[must_use]
pub fn default_hive_url() -> String {
    DEFAULT_HIVE_URL.to_owned()
}

/// Owned default wait time string.
#[must_use]
pub fn default_wait_time() -> String {
    DEFAULT_WAIT_TIME.to_owned()
}

/// Owned default ontology element limit.
#[must_use]
pub fn default_ont_max_elements() -> String {
    DEFAULT_ONT_MAX_ELEMENTS.to_owned()
}
