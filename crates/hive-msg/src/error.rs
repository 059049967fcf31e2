//! Error types for envelope encoding and decoding.

use thiserror::Error;

/// Errors raised while building, encoding or decoding envelopes.
#[derive(Debug, Error)]
pub enum EnvelopeError {
    /// The document is not well-formed XML.
    #[error("malformed envelope XML: {message}")]
    MalformedXml {
        /// Parser diagnostic.
        message: String,
    },

    /// The root element is not the expected envelope element.
    #[error("unexpected root element '{found}', expected '{expected}'")]
    UnexpectedRoot {
        /// Expected local name.
        expected: &'static str,
        /// Local name actually found.
        found: String,
    },

    /// Serialising the envelope failed.
    #[error("failed to write envelope XML: {message}")]
    Write {
        /// Writer diagnostic.
        message: String,
    },

    /// The message timestamp could not be rendered.
    #[error("failed to format message timestamp: {source}")]
    Timestamp {
        /// Formatting failure.
        #[source]
        source: time::error::Format,
    },

    /// The message timestamp could not be parsed.
    #[error("invalid message timestamp '{value}': {source}")]
    InvalidTimestamp {
        /// Raw timestamp text.
        value: String,
        /// Parsing failure.
        #[source]
        source: time::error::Parse,
    },

    /// A message body could not be decoded into its payload type.
    #[error("invalid message body: {message}")]
    Body {
        /// Description of the mismatch.
        message: String,
    },
}

impl EnvelopeError {
    /// Creates a malformed XML error.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedXml {
            message: message.into(),
        }
    }

    /// Creates an unexpected root error.
    pub fn unexpected_root(expected: &'static str, found: impl Into<String>) -> Self {
        Self::UnexpectedRoot {
            expected,
            found: found.into(),
        }
    }

    /// Creates a writer error.
    pub fn write(message: impl Into<String>) -> Self {
        Self::Write {
            message: message.into(),
        }
    }

    /// Creates a body decoding error.
    pub fn body(message: impl Into<String>) -> Self {
        Self::Body {
            message: message.into(),
        }
    }
}
