//! Message and request headers shared by requests and responses.

use xmltree::Element;

use crate::xml::{group, push, text_at, text_element};

/// Protocol metadata carried at the top of every message.
///
/// Nested tags such as `sending_application/application_name` are flattened
/// into single fields here and serialised as nested elements.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageHeader {
    /// Hive protocol version this message conforms to.
    pub hive_version_compatible: String,
    /// Underlying HL7 version this message conforms to.
    pub hl7_version_compatible: String,
    /// Sending application name.
    pub sending_application_name: String,
    /// Sending application version.
    pub sending_application_version: String,
    /// Sending facility name.
    pub sending_facility_name: String,
    /// Receiving application name.
    pub receiving_application_name: String,
    /// Receiving application version.
    pub receiving_application_version: String,
    /// Receiving facility name.
    pub receiving_facility_name: String,
    /// RFC 3339 timestamp of the message.
    pub datetime_of_message: String,
    /// Security domain.
    pub security_domain: String,
    /// Security username.
    pub security_username: String,
    /// Security password.
    pub security_password: String,
    /// Message type code.
    pub message_code: String,
    /// Message type event.
    pub event_type: String,
    /// Message type structure.
    pub message_structure: String,
    /// Control identifier: session id.
    pub session_id: String,
    /// Control identifier: message sequence number.
    pub message_num: String,
    /// Control identifier: instance number.
    pub instance_num: String,
    /// Processing identifier.
    pub processing_id: String,
    /// Processing mode.
    pub processing_mode: String,
    /// Accept acknowledgement type.
    pub accept_acknowledgement_type: String,
    /// Application acknowledgement type.
    pub application_acknowledgement_type: String,
    /// Country code.
    pub country_code: String,
    /// Project identifier.
    pub project_id: String,
}

impl MessageHeader {
    pub(crate) const TAG: &'static str = "message_header";

    pub(crate) fn to_element(&self) -> Element {
        self.to_element_with_password(&self.security_password)
    }

    /// Renders the header with the password replaced, for diagnostics.
    pub(crate) fn to_element_with_password(&self, password: &str) -> Element {
        let mut header = Element::new(Self::TAG);
        push(
            &mut header,
            text_element("i2b2_version_compatible", &self.hive_version_compatible),
        );
        push(
            &mut header,
            text_element("hl7_version_compatible", &self.hl7_version_compatible),
        );
        push(
            &mut header,
            group(
                "sending_application",
                &[
                    ("application_name", self.sending_application_name.as_str()),
                    ("application_version", self.sending_application_version.as_str()),
                ],
            ),
        );
        push(
            &mut header,
            group(
                "sending_facility",
                &[("facility_name", self.sending_facility_name.as_str())],
            ),
        );
        push(
            &mut header,
            group(
                "receiving_application",
                &[
                    ("application_name", self.receiving_application_name.as_str()),
                    ("application_version", self.receiving_application_version.as_str()),
                ],
            ),
        );
        push(
            &mut header,
            group(
                "receiving_facility",
                &[("facility_name", self.receiving_facility_name.as_str())],
            ),
        );
        push(
            &mut header,
            text_element("datetime_of_message", self.datetime_of_message.as_str()),
        );
        push(
            &mut header,
            group(
                "security",
                &[
                    ("domain", self.security_domain.as_str()),
                    ("username", self.security_username.as_str()),
                    ("password", password),
                ],
            ),
        );
        push(
            &mut header,
            group(
                "message_type",
                &[
                    ("message_code", self.message_code.as_str()),
                    ("event_type", self.event_type.as_str()),
                    ("message_structure", self.message_structure.as_str()),
                ],
            ),
        );
        push(
            &mut header,
            group(
                "message_control_id",
                &[
                    ("session_id", self.session_id.as_str()),
                    ("message_num", self.message_num.as_str()),
                    ("instance_num", self.instance_num.as_str()),
                ],
            ),
        );
        push(
            &mut header,
            group(
                "processing_id",
                &[
                    ("processing_id", self.processing_id.as_str()),
                    ("processing_mode", self.processing_mode.as_str()),
                ],
            ),
        );
        push(
            &mut header,
            text_element(
                "accept_acknowledgement_type",
                &self.accept_acknowledgement_type,
            ),
        );
        push(
            &mut header,
            text_element(
                "application_acknowledgement_type",
                &self.application_acknowledgement_type,
            ),
        );
        push(&mut header, text_element("country_code", self.country_code.as_str()));
        push(&mut header, text_element("project_id", self.project_id.as_str()));
        header
    }

    /// Reads a header element; missing tags read as empty strings.
    pub(crate) fn from_element(header: &Element) -> Self {
        Self {
            hive_version_compatible: text_at(header, &["i2b2_version_compatible"]),
            hl7_version_compatible: text_at(header, &["hl7_version_compatible"]),
            sending_application_name: text_at(
                header,
                &["sending_application", "application_name"],
            ),
            sending_application_version: text_at(
                header,
                &["sending_application", "application_version"],
            ),
            sending_facility_name: text_at(header, &["sending_facility", "facility_name"]),
            receiving_application_name: text_at(
                header,
                &["receiving_application", "application_name"],
            ),
            receiving_application_version: text_at(
                header,
                &["receiving_application", "application_version"],
            ),
            receiving_facility_name: text_at(header, &["receiving_facility", "facility_name"]),
            datetime_of_message: text_at(header, &["datetime_of_message"]),
            security_domain: text_at(header, &["security", "domain"]),
            security_username: text_at(header, &["security", "username"]),
            security_password: text_at(header, &["security", "password"]),
            message_code: text_at(header, &["message_type", "message_code"]),
            event_type: text_at(header, &["message_type", "event_type"]),
            message_structure: text_at(header, &["message_type", "message_structure"]),
            session_id: text_at(header, &["message_control_id", "session_id"]),
            message_num: text_at(header, &["message_control_id", "message_num"]),
            instance_num: text_at(header, &["message_control_id", "instance_num"]),
            processing_id: text_at(header, &["processing_id", "processing_id"]),
            processing_mode: text_at(header, &["processing_id", "processing_mode"]),
            accept_acknowledgement_type: text_at(header, &["accept_acknowledgement_type"]),
            application_acknowledgement_type: text_at(
                header,
                &["application_acknowledgement_type"],
            ),
            country_code: text_at(header, &["country_code"]),
            project_id: text_at(header, &["project_id"]),
        }
    }
}

/// Request-specific header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestHeader {
    /// Time the hive may spend producing a result, in milliseconds.
    pub result_waittime_ms: String,
}

impl RequestHeader {
    pub(crate) const TAG: &'static str = "request_header";

    pub(crate) fn to_element(&self) -> Element {
        group(
            Self::TAG,
            &[("result_waittime_ms", self.result_waittime_ms.as_str())],
        )
    }

    pub(crate) fn from_element(header: &Element) -> Self {
        Self {
            result_waittime_ms: text_at(header, &["result_waittime_ms"]),
        }
    }
}
