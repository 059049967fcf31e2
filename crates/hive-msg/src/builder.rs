//! Construction of request envelopes pre-populated with protocol defaults.

use time::{OffsetDateTime, format_description::well_known::Rfc3339};
use tracing::trace;

use crate::{
    body::MessageBody,
    clock::{Clock, SystemClock},
    constants::{
        ACCEPT_ACKNOWLEDGEMENT_TYPE, APPLICATION_ACKNOWLEDGEMENT_TYPE, COUNTRY_CODE, EVENT_TYPE,
        HIVE_VERSION_COMPATIBLE, HL7_VERSION_COMPATIBLE, INSTANCE_NUM, MESSAGE_CODE,
        MESSAGE_STRUCTURE, NOT_SET, PROCESSING_ID, PROCESSING_MODE, RECEIVING_APPLICATION_NAME,
        RECEIVING_APPLICATION_VERSION, RECEIVING_FACILITY_NAME, SENDING_APPLICATION_NAME,
        SENDING_APPLICATION_VERSION, SENDING_FACILITY_NAME,
    },
    envelope::Request,
    error::EnvelopeError,
    header::{MessageHeader, RequestHeader},
};

const BUILDER_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::builder");

/// Builds fresh request envelopes stamped with the time reported by `C`.
///
/// Credential, project and wait-time fields hold [`NOT_SET`] until
/// [`Request::apply_connection_info`] is called.
#[derive(Debug, Clone, Default)]
pub struct EnvelopeBuilder<C = SystemClock> {
    clock: C,
}

impl EnvelopeBuilder<SystemClock> {
    /// Creates a builder reading the system clock.
    #[must_use]
    pub const fn new() -> Self {
        Self { clock: SystemClock }
    }
}

impl<C: Clock> EnvelopeBuilder<C> {
    /// Creates a builder reading the supplied clock.
    #[must_use]
    pub const fn with_clock(clock: C) -> Self {
        Self { clock }
    }

    /// Builds a request with an empty body.
    ///
    /// # Errors
    ///
    /// Returns [`EnvelopeError::Timestamp`] when the clock reports an instant
    /// that cannot be rendered as RFC 3339.
    pub fn request(&self) -> Result<Request, EnvelopeError> {
        self.request_with_body(MessageBody::empty())
    }

    /// Builds a request carrying `body`.
    ///
    /// # Errors
    ///
    /// Returns [`EnvelopeError::Timestamp`] when the clock reports an instant
    /// that cannot be rendered as RFC 3339.
    pub fn request_with_body(&self, body: MessageBody) -> Result<Request, EnvelopeError> {
        let now = self.clock.now();
        let timestamp = format_timestamp(now)?;
        let message_num = now.unix_timestamp().to_string();
        trace!(
            target: BUILDER_TARGET,
            session_id = %timestamp,
            message_num = %message_num,
            "built request envelope"
        );

        Ok(Request {
            message_header: default_message_header(timestamp, message_num),
            request_header: RequestHeader {
                result_waittime_ms: NOT_SET.to_owned(),
            },
            message_body: body,
        })
    }
}

/// Renders `instant` at second precision, as the hive expects.
fn format_timestamp(instant: OffsetDateTime) -> Result<String, EnvelopeError> {
    instant
        .replace_nanosecond(0)
        .unwrap_or(instant)
        .format(&Rfc3339)
        .map_err(|source| EnvelopeError::Timestamp { source })
}

fn default_message_header(timestamp: String, message_num: String) -> MessageHeader {
    MessageHeader {
        hive_version_compatible: HIVE_VERSION_COMPATIBLE.to_owned(),
        hl7_version_compatible: HL7_VERSION_COMPATIBLE.to_owned(),
        sending_application_name: SENDING_APPLICATION_NAME.to_owned(),
        sending_application_version: SENDING_APPLICATION_VERSION.to_owned(),
        sending_facility_name: SENDING_FACILITY_NAME.to_owned(),
        receiving_application_name: RECEIVING_APPLICATION_NAME.to_owned(),
        receiving_application_version: RECEIVING_APPLICATION_VERSION.to_owned(),
        receiving_facility_name: RECEIVING_FACILITY_NAME.to_owned(),
        datetime_of_message: timestamp.clone(),
        security_domain: NOT_SET.to_owned(),
        security_username: NOT_SET.to_owned(),
        security_password: NOT_SET.to_owned(),
        message_code: MESSAGE_CODE.to_owned(),
        event_type: EVENT_TYPE.to_owned(),
        message_structure: MESSAGE_STRUCTURE.to_owned(),
        session_id: timestamp,
        message_num,
        instance_num: INSTANCE_NUM.to_owned(),
        processing_id: PROCESSING_ID.to_owned(),
        processing_mode: PROCESSING_MODE.to_owned(),
        accept_acknowledgement_type: ACCEPT_ACKNOWLEDGEMENT_TYPE.to_owned(),
        application_acknowledgement_type: APPLICATION_ACKNOWLEDGEMENT_TYPE.to_owned(),
        country_code: COUNTRY_CODE.to_owned(),
        project_id: NOT_SET.to_owned(),
    }
}
