//! Exchange of envelopes with a hive cell over a pluggable transport.

use std::error::Error;

use hive_config::ConnectionInfo;
use hive_msg::{
    Clock, EnvelopeBuilder, EnvelopeError, MessageBody, Response, StatusError, SystemClock,
};
use thiserror::Error;
use tracing::{debug, trace};

/// Tracing target for hive exchanges.
pub(crate) const CLIENT_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::client");

/// Failure reported by a transport.
pub type TransportError = Box<dyn Error + Send + Sync + 'static>;

/// Delivers serialised requests to the hive.
pub trait HiveTransport: Send + Sync {
    /// Posts `body` to `url` and returns the reply bytes.
    ///
    /// # Errors
    ///
    /// Returns any delivery failure.
    fn post(&self, url: &str, body: &[u8]) -> Result<Vec<u8>, TransportError>;
}

/// Errors raised while exchanging envelopes with the hive.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request could not be built or the reply could not be decoded.
    #[error(transparent)]
    Envelope(#[from] EnvelopeError),

    /// The transport failed to deliver the request.
    #[error("posting request to {url}: {source}")]
    Transport {
        /// Endpoint the request was sent to.
        url: String,
        /// Transport failure.
        #[source]
        source: TransportError,
    },

    /// The hive reported a non-completion status.
    #[error(transparent)]
    Status(#[from] StatusError),
}

/// Builds, sends and validates envelopes for one hive endpoint.
pub struct HiveClient<T, C = SystemClock> {
    connection: ConnectionInfo,
    transport: T,
    builder: EnvelopeBuilder<C>,
}

impl<T: HiveTransport> HiveClient<T> {
    /// Creates a client stamping requests with the system clock.
    #[must_use]
    pub const fn new(connection: ConnectionInfo, transport: T) -> Self {
        Self::with_builder(connection, transport, EnvelopeBuilder::new())
    }
}

impl<T: HiveTransport, C: Clock> HiveClient<T, C> {
    /// Creates a client using a custom envelope builder.
    #[must_use]
    pub const fn with_builder(
        connection: ConnectionInfo,
        transport: T,
        builder: EnvelopeBuilder<C>,
    ) -> Self {
        Self {
            connection,
            transport,
            builder,
        }
    }

    /// Connection details applied to every request.
    #[must_use]
    pub const fn connection_info(&self) -> &ConnectionInfo {
        &self.connection
    }

    /// URL of the cell service at `path` below the hive endpoint.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.connection.hive_url().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Sends `body` to the cell at `path` and decodes the reply without
    /// checking its status.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Envelope`] when the request cannot be encoded
    /// or the reply cannot be decoded, and [`ClientError::Transport`] when
    /// delivery fails.
    pub fn send(&self, path: &str, body: MessageBody) -> Result<Response, ClientError> {
        let mut request = self.builder.request_with_body(body)?;
        request.apply_connection_info(&self.connection);
        if tracing::enabled!(target: CLIENT_TARGET, tracing::Level::TRACE) {
            trace!(
                target: CLIENT_TARGET,
                envelope = %request.to_redacted_xml()?,
                "outbound request"
            );
        }

        let url = self.endpoint(path);
        let payload = request.to_xml()?;
        debug!(
            target: CLIENT_TARGET,
            url = %url,
            message_num = %request.message_header.message_num,
            bytes = payload.len(),
            "posting request"
        );
        let reply = self
            .transport
            .post(&url, &payload)
            .map_err(|source| ClientError::Transport {
                url: url.clone(),
                source,
            })?;

        let response = Response::from_xml(&reply)?;
        debug!(
            target: CLIENT_TARGET,
            url = %url,
            status = %response.response_header.result_status.status.status_type,
            "received response"
        );
        Ok(response)
    }

    /// Sends `body` to the cell at `path` and requires a `DONE` status.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`HiveClient::send`], plus
    /// [`ClientError::Status`] when the hive reports any other status.
    pub fn exchange(&self, path: &str, body: MessageBody) -> Result<Response, ClientError> {
        let response = self.send(path, body)?;
        response.check_status()?;
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use hive_msg::{FixedClock, Request};
    use mockall::mock;
    use rstest::{fixture, rstest};
    use time::macros::datetime;

    use super::*;

    mock! {
        Transport {}
        impl HiveTransport for Transport {
            fn post(&self, url: &str, body: &[u8]) -> Result<Vec<u8>, TransportError>;
        }
    }

    const DONE_REPLY: &str = r#"<msgns:response xmlns:msgns="http://www.i2b2.org/xsd/hive/msg/1.1/">
        <response_header><result_status><status type="DONE">ok</status></result_status></response_header>
        <message_body><answer>42</answer></message_body>
    </msgns:response>"#;

    const ERROR_REPLY: &str = r#"<msgns:response xmlns:msgns="http://www.i2b2.org/xsd/hive/msg/1.1/">
        <response_header><result_status><status type="ERROR">bad query</status></result_status></response_header>
    </msgns:response>"#;

    #[fixture]
    fn connection() -> ConnectionInfo {
        ConnectionInfo::new(
            "http://hive.example/i2b2/services/",
            "d",
            "u",
            "p",
            "proj1",
            Duration::from_secs(5),
        )
    }

    fn client(
        connection: ConnectionInfo,
        transport: MockTransport,
    ) -> HiveClient<MockTransport, FixedClock> {
        let clock = FixedClock::new(datetime!(2024-01-01 00:00:00 UTC));
        HiveClient::with_builder(connection, transport, EnvelopeBuilder::with_clock(clock))
    }

    #[rstest]
    #[case::plain("OntologyService/getCategories")]
    #[case::leading_slash("/OntologyService/getCategories")]
    fn joins_cell_paths(connection: ConnectionInfo, #[case] path: &str) {
        let client = client(connection, MockTransport::new());
        assert_eq!(
            client.endpoint(path),
            "http://hive.example/i2b2/services/OntologyService/getCategories"
        );
    }

    #[rstest]
    fn posts_request_with_connection_details(connection: ConnectionInfo) {
        let mut transport = MockTransport::new();
        transport
            .expect_post()
            .withf(|url, _| url == "http://hive.example/i2b2/services/QueryToolService/request")
            .times(1)
            .returning(|_, body| {
                let request = Request::from_xml(body).expect("client sends a valid request");
                assert_eq!(request.message_header.project_id, "proj1");
                assert_eq!(request.message_header.security_password, "p");
                assert_eq!(request.request_header.result_waittime_ms, "5000");
                Ok(DONE_REPLY.as_bytes().to_vec())
            });

        let response = client(connection, transport)
            .exchange("QueryToolService/request", MessageBody::empty())
            .expect("exchange succeeds");
        assert_eq!(response.message_body.elements().len(), 1);
    }

    #[rstest]
    fn surfaces_peer_status_text(connection: ConnectionInfo) {
        let mut transport = MockTransport::new();
        transport
            .expect_post()
            .returning(|_, _| Ok(ERROR_REPLY.as_bytes().to_vec()));
        let client = client(connection, transport);

        let error = client
            .exchange("QueryToolService/request", MessageBody::empty())
            .expect_err("ERROR status");
        assert!(matches!(error, ClientError::Status(_)));
        assert_eq!(error.to_string(), "bad query");

        let response = client
            .send("QueryToolService/request", MessageBody::empty())
            .expect("send skips status validation");
        assert_eq!(response.response_header.result_status.status.text, "bad query");
    }

    #[rstest]
    fn reports_transport_failures(connection: ConnectionInfo) {
        let mut transport = MockTransport::new();
        transport
            .expect_post()
            .returning(|_, _| Err("connection refused".into()));

        let error = client(connection, transport)
            .exchange("PMService/getServices", MessageBody::empty())
            .expect_err("transport failure");
        assert!(
            matches!(error, ClientError::Transport { ref url, .. } if url.ends_with("/PMService/getServices"))
        );
        assert_eq!(
            error.source().map(ToString::to_string).as_deref(),
            Some("connection refused")
        );
    }

    #[rstest]
    fn rejects_undecodable_replies(connection: ConnectionInfo) {
        let mut transport = MockTransport::new();
        transport
            .expect_post()
            .returning(|_, _| Ok(b"<html>gateway timeout</html>".to_vec()));

        let error = client(connection, transport)
            .exchange("PMService/getServices", MessageBody::empty())
            .expect_err("not an envelope");
        assert!(matches!(
            error,
            ClientError::Envelope(EnvelopeError::UnexpectedRoot { .. })
        ));
    }
}
