//! Operation-specific message payloads.
//!
//! The envelope never inspects the body. Handlers that know the concrete
//! payload shape implement [`BodyCodec`] to move between their own types and
//! the XML elements carried inside `message_body`.

use xmltree::Element;

use crate::error::EnvelopeError;

/// Opaque payload carried in the `message_body` element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageBody {
    elements: Vec<Element>,
}

impl MessageBody {
    /// Body with no payload.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            elements: Vec::new(),
        }
    }

    /// Body holding the given top-level payload elements.
    #[must_use]
    pub const fn from_elements(elements: Vec<Element>) -> Self {
        Self { elements }
    }

    /// Top-level payload elements, in document order.
    #[must_use]
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Consumes the body and returns its payload elements.
    #[must_use]
    pub fn into_elements(self) -> Vec<Element> {
        self.elements
    }

    /// Whether the body carries no payload.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

impl From<Element> for MessageBody {
    fn from(element: Element) -> Self {
        Self::from_elements(vec![element])
    }
}

/// Encodes and decodes one operation's payload.
pub trait BodyCodec: Sized {
    /// Renders the payload as a message body.
    fn encode(&self) -> MessageBody;

    /// Reads the payload back from a message body.
    ///
    /// # Errors
    ///
    /// Returns [`EnvelopeError::Body`] when the body does not hold this
    /// payload.
    fn decode(body: &MessageBody) -> Result<Self, EnvelopeError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::{own_text, text_element};

    #[derive(Debug, PartialEq, Eq)]
    struct ConceptSearch {
        path: String,
    }

    impl BodyCodec for ConceptSearch {
        fn encode(&self) -> MessageBody {
            text_element("get_children", &self.path).into()
        }

        fn decode(body: &MessageBody) -> Result<Self, EnvelopeError> {
            body.elements()
                .iter()
                .find(|element| element.name == "get_children")
                .map(|element| Self {
                    path: own_text(element),
                })
                .ok_or_else(|| EnvelopeError::body("missing get_children element"))
        }
    }

    #[test]
    fn empty_body_has_no_elements() {
        assert!(MessageBody::empty().is_empty());
        assert_eq!(MessageBody::default(), MessageBody::empty());
    }

    #[test]
    fn codec_round_trips_its_payload() {
        let search = ConceptSearch {
            path: String::from("\\\\SENSITIVE_TAGGED\\medco\\"),
        };
        let decoded = ConceptSearch::decode(&search.encode()).expect("decode payload");
        assert_eq!(decoded, search);
    }

    #[test]
    fn codec_rejects_foreign_payload() {
        let error = ConceptSearch::decode(&MessageBody::empty()).expect_err("empty body");
        assert!(matches!(error, EnvelopeError::Body { .. }));
    }
}
