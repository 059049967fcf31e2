//! Request and response envelopes and their XML encoding.

use hive_config::ConnectionInfo;
use time::{OffsetDateTime, format_description::well_known::Rfc3339};
use xmltree::{Element, Namespace};

use crate::{
    body::MessageBody,
    constants::{NS_MSG, PREFIX_MSG, REQUEST_NAMESPACES},
    error::EnvelopeError,
    header::{MessageHeader, RequestHeader},
    response_header::ResponseHeader,
    xml::{child_elements, parse_root, push, write_document},
};

const BODY_TAG: &str = "message_body";
const REDACTED: &str = "********";

/// Outbound message sent to a hive cell.
///
/// Build one per call with [`crate::EnvelopeBuilder`]; timestamps and control
/// identifiers reflect the build time and must not be reused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    /// Protocol metadata.
    pub message_header: MessageHeader,
    /// Result wait-time budget.
    pub request_header: RequestHeader,
    /// Operation-specific payload.
    pub message_body: MessageBody,
}

impl Request {
    /// Local name of the request root element.
    pub const ROOT: &'static str = "request";

    /// Copies credentials, project and wait time from `info` into the
    /// envelope. Every other field is left untouched.
    pub fn apply_connection_info(&mut self, info: &ConnectionInfo) {
        let header = &mut self.message_header;
        info.domain().clone_into(&mut header.security_domain);
        info.username().clone_into(&mut header.security_username);
        info.password().clone_into(&mut header.security_password);
        info.project().clone_into(&mut header.project_id);
        self.request_header.result_waittime_ms = info.wait_time().as_millis().to_string();
    }

    /// Replaces the body and returns the request.
    #[must_use]
    pub fn attach_body(mut self, body: MessageBody) -> Self {
        self.message_body = body;
        self
    }

    /// Replaces the body in place.
    pub fn set_body(&mut self, body: MessageBody) {
        self.message_body = body;
    }

    /// Parses the message timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`EnvelopeError::InvalidTimestamp`] when the header does not
    /// hold an RFC 3339 timestamp.
    pub fn sent_at(&self) -> Result<OffsetDateTime, EnvelopeError> {
        let value = &self.message_header.datetime_of_message;
        OffsetDateTime::parse(value, &Rfc3339).map_err(|source| EnvelopeError::InvalidTimestamp {
            value: value.clone(),
            source,
        })
    }

    /// Serialises the request as an XML document.
    ///
    /// # Errors
    ///
    /// Returns [`EnvelopeError::Write`] when the document cannot be written.
    pub fn to_xml(&self) -> Result<Vec<u8>, EnvelopeError> {
        write_document(&self.to_element(self.message_header.to_element()))
    }

    /// Serialises the request with the password replaced, for trace logs.
    ///
    /// # Errors
    ///
    /// Returns [`EnvelopeError::Write`] when the document cannot be written.
    pub fn to_redacted_xml(&self) -> Result<String, EnvelopeError> {
        let header = self.message_header.to_element_with_password(REDACTED);
        let bytes = write_document(&self.to_element(header))?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Decodes a request document.
    ///
    /// # Errors
    ///
    /// Returns [`EnvelopeError`] when the document is malformed or its root is
    /// not a `request` element.
    pub fn from_xml(bytes: &[u8]) -> Result<Self, EnvelopeError> {
        let root = parse_root(bytes, Self::ROOT)?;
        Ok(Self {
            message_header: decode_child(&root, MessageHeader::TAG, MessageHeader::from_element),
            request_header: decode_child(&root, RequestHeader::TAG, RequestHeader::from_element),
            message_body: decode_body(&root),
        })
    }

    fn to_element(&self, message_header: Element) -> Element {
        let mut root = envelope_root(Self::ROOT);
        push(&mut root, message_header);
        push(&mut root, self.request_header.to_element());
        push(&mut root, encode_body(&self.message_body));
        root
    }
}

/// Inbound message returned by a hive cell.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Response {
    /// Protocol metadata populated by the peer.
    pub message_header: MessageHeader,
    /// Request header, when the peer echoes it.
    pub request_header: Option<RequestHeader>,
    /// Result status, polling hint and conditions.
    pub response_header: ResponseHeader,
    /// Operation-specific payload.
    pub message_body: MessageBody,
}

impl Response {
    /// Local name of the response root element.
    pub const ROOT: &'static str = "response";

    /// Decodes a response document.
    ///
    /// # Errors
    ///
    /// Returns [`EnvelopeError`] when the document is malformed or its root is
    /// not a `response` element.
    pub fn from_xml(bytes: &[u8]) -> Result<Self, EnvelopeError> {
        let root = parse_root(bytes, Self::ROOT)?;
        Ok(Self {
            message_header: decode_child(&root, MessageHeader::TAG, MessageHeader::from_element),
            request_header: root
                .get_child(RequestHeader::TAG)
                .map(RequestHeader::from_element),
            response_header: decode_child(&root, ResponseHeader::TAG, ResponseHeader::from_element),
            message_body: decode_body(&root),
        })
    }

    /// Serialises the response as an XML document.
    ///
    /// # Errors
    ///
    /// Returns [`EnvelopeError::Write`] when the document cannot be written.
    pub fn to_xml(&self) -> Result<Vec<u8>, EnvelopeError> {
        let mut root = envelope_root(Self::ROOT);
        push(&mut root, self.message_header.to_element());
        if let Some(request_header) = &self.request_header {
            push(&mut root, request_header.to_element());
        }
        push(&mut root, self.response_header.to_element());
        push(&mut root, encode_body(&self.message_body));
        write_document(&root)
    }
}

/// Namespace declarations carried on every envelope root.
#[must_use]
pub fn envelope_namespaces() -> Namespace {
    let mut namespaces = Namespace::empty();
    for (prefix, uri) in REQUEST_NAMESPACES {
        namespaces.put(prefix, uri);
    }
    namespaces
}

fn envelope_root(name: &str) -> Element {
    let mut root = Element::new(name);
    root.prefix = Some(PREFIX_MSG.to_owned());
    root.namespace = Some(NS_MSG.to_owned());
    root.namespaces = Some(envelope_namespaces());
    root
}

fn decode_child<T: Default>(root: &Element, tag: &str, decode: fn(&Element) -> T) -> T {
    root.get_child(tag).map(decode).unwrap_or_default()
}

fn encode_body(body: &MessageBody) -> Element {
    let mut element = Element::new(BODY_TAG);
    for payload in body.elements() {
        push(&mut element, payload.clone());
    }
    element
}

fn decode_body(root: &Element) -> MessageBody {
    root.get_child(BODY_TAG)
        .map(|body| MessageBody::from_elements(child_elements(body).cloned().collect()))
        .unwrap_or_default()
}
