//! Envelope model for the hive request/response protocol.
//!
//! Requests are built with [`EnvelopeBuilder`], which stamps the protocol
//! profile constants and a control identifier derived from a [`Clock`].
//! Connection details are merged with [`Request::apply_connection_info`]
//! before the envelope is serialised with [`Request::to_xml`]. Replies are
//! decoded with [`Response::from_xml`] and validated with
//! [`Response::check_status`] or classified with [`Response::outcome`].
//!
//! Message bodies stay opaque: [`MessageBody`] carries raw XML elements and
//! handlers translate their own payloads through [`BodyCodec`].

mod body;
mod builder;
mod clock;
mod constants;
mod envelope;
mod error;
mod header;
mod response_header;
mod status;
mod xml;

#[cfg(test)]
mod tests;

pub use body::{BodyCodec, MessageBody};
pub use builder::EnvelopeBuilder;
pub use clock::{Clock, FixedClock, SystemClock};
pub use constants::{
    NOT_SET, NS_CRC_PDO, NS_CRC_PSM, NS_MSG, NS_ONT, NS_PDO, PREFIX_CRC_PDO, PREFIX_CRC_PSM,
    PREFIX_MSG, PREFIX_ONT, PREFIX_PDO, REQUEST_NAMESPACES, STATUS_DONE,
};
pub use envelope::{Request, Response, envelope_namespaces};
pub use error::EnvelopeError;
pub use header::{MessageHeader, RequestHeader};
pub use response_header::{Condition, Info, PollingUrl, ResponseHeader, ResultStatus, Status};
pub use status::{ResponseOutcome, StatusError};
pub use xmltree::Element;
