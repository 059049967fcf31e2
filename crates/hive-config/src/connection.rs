//! Connection details for a hive deployment.
//!
//! [`ConnectionInfo`] is assembled once at start-up and then shared read-only
//! by every outbound exchange. It can be built from the layered [`Config`] or
//! from the flat key map handed over by a hosting platform.
//!
//! [`Config`]: crate::Config

use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

use thiserror::Error;

use crate::duration::{DurationParseError, parse_duration};

/// Settings key holding the hive endpoint URL.
pub const KEY_HIVE_URL: &str = "i2b2.api.url";
/// Settings key holding the security domain.
pub const KEY_DOMAIN: &str = "i2b2.api.domain";
/// Settings key holding the hive username.
pub const KEY_USERNAME: &str = "i2b2.api.username";
/// Settings key holding the hive password.
pub const KEY_PASSWORD: &str = "i2b2.api.password";
/// Settings key holding the project identifier.
pub const KEY_PROJECT: &str = "i2b2.api.project";
/// Settings key holding the result wait time as a duration string.
pub const KEY_WAIT_TIME: &str = "i2b2.api.wait-time";
/// Settings key holding the ontology result size limit.
pub const KEY_ONT_MAX_ELEMENTS: &str = "i2b2.api.ont-max-elements";

/// Immutable connection details for the hive.
///
/// No field is checked for emptiness: empty credentials are forwarded as-is
/// and rejected by the hive itself.
#[derive(Clone, PartialEq, Eq)]
pub struct ConnectionInfo {
    hive_url: String,
    domain: String,
    username: String,
    password: String,
    project: String,
    wait_time: Duration,
}

impl ConnectionInfo {
    /// Creates connection details from already validated parts.
    #[must_use]
    pub fn new(
        hive_url: impl Into<String>,
        domain: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
        project: impl Into<String>,
        wait_time: Duration,
    ) -> Self {
        Self {
            hive_url: hive_url.into(),
            domain: domain.into(),
            username: username.into(),
            password: password.into(),
            project: project.into(),
            wait_time,
        }
    }

    /// Parses connection details from raw values, parsing `wait_time` as a
    /// duration string.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectionInfoError::WaitTime`] when the wait time cannot be
    /// parsed.
    pub fn parse(
        hive_url: &str,
        domain: &str,
        username: &str,
        password: &str,
        project: &str,
        wait_time: &str,
    ) -> Result<Self, ConnectionInfoError> {
        let wait = parse_duration(wait_time).map_err(|source| ConnectionInfoError::WaitTime {
            value: wait_time.to_owned(),
            source,
        })?;
        Ok(Self::new(hive_url, domain, username, password, project, wait))
    }

    /// Builds connection details from a flat settings map keyed by the
    /// `i2b2.api.*` names.
    ///
    /// Missing string keys read as empty strings. A missing wait time is an
    /// empty duration string and therefore fails.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectionInfoError::WaitTime`] when the wait time is
    /// missing or unparsable.
    pub fn from_settings<S>(settings: &HashMap<String, String, S>) -> Result<Self, ConnectionInfoError>
    where
        S: std::hash::BuildHasher,
    {
        Self::parse(
            setting(settings, KEY_HIVE_URL),
            setting(settings, KEY_DOMAIN),
            setting(settings, KEY_USERNAME),
            setting(settings, KEY_PASSWORD),
            setting(settings, KEY_PROJECT),
            setting(settings, KEY_WAIT_TIME),
        )
    }

    /// Hive endpoint URL.
    #[must_use]
    pub fn hive_url(&self) -> &str {
        &self.hive_url
    }

    /// Security domain.
    #[must_use]
    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Hive username.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Hive password.
    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }

    /// Project identifier.
    #[must_use]
    pub fn project(&self) -> &str {
        &self.project
    }

    /// Result wait time forwarded to the hive.
    #[must_use]
    pub const fn wait_time(&self) -> Duration {
        self.wait_time
    }
}

impl fmt::Debug for ConnectionInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionInfo")
            .field("hive_url", &self.hive_url)
            .field("domain", &self.domain)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("project", &self.project)
            .field("wait_time", &self.wait_time)
            .finish()
    }
}

/// Reads the ontology result size limit passthrough from a settings map.
#[must_use]
pub fn ont_max_elements_from_settings<S>(settings: &HashMap<String, String, S>) -> String
where
    S: std::hash::BuildHasher,
{
    setting(settings, KEY_ONT_MAX_ELEMENTS).to_owned()
}

fn setting<'a, S>(settings: &'a HashMap<String, String, S>, key: &str) -> &'a str
where
    S: std::hash::BuildHasher,
{
    settings.get(key).map_or("", String::as_str)
}

/// Errors raised while assembling [`ConnectionInfo`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConnectionInfoError {
    /// The configured wait time is not a valid duration.
    #[error("parsing hive wait time '{value}': {source}")]
    WaitTime {
        /// Raw configured value.
        value: String,
        /// Parser failure.
        #[source]
        source: DurationParseError,
    },
}
