//! Interpretation of a response's result status.

use thiserror::Error;

use crate::{
    constants::STATUS_DONE,
    envelope::Response,
    response_header::{Condition, PollingUrl},
};

/// Non-completion status reported by the hive.
///
/// Displays exactly the peer-supplied status text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{text}")]
pub struct StatusError {
    status_type: String,
    text: String,
    conditions: Vec<Condition>,
}

impl StatusError {
    fn from_response(response: &Response) -> Self {
        let result = &response.response_header.result_status;
        Self {
            status_type: result.status.status_type.clone(),
            text: result.status.text.clone(),
            conditions: result.conditions.clone(),
        }
    }

    /// Status type reported by the peer.
    #[must_use]
    pub fn status_type(&self) -> &str {
        &self.status_type
    }

    /// Peer-supplied explanation.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Conditions attached to the result.
    #[must_use]
    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }
}

/// Classified result of a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseOutcome {
    /// The hive completed the request.
    Done,
    /// The hive is still processing and suggested where to poll.
    Pending {
        /// Polling hint supplied by the peer.
        polling: PollingUrl,
        /// The non-completion status that accompanied the hint.
        status: StatusError,
    },
    /// The hive reported a failure.
    Failed(StatusError),
}

impl Response {
    /// Succeeds only when the status type is exactly `DONE`.
    ///
    /// Any other type, including an empty one, is reported as an error whose
    /// message is the status text verbatim. A polling hint does not change the
    /// result; use [`Response::outcome`] to tell pending work apart.
    ///
    /// # Errors
    ///
    /// Returns [`StatusError`] for every non-completion status.
    pub fn check_status(&self) -> Result<(), StatusError> {
        if self.response_header.result_status.status.status_type == STATUS_DONE {
            Ok(())
        } else {
            Err(StatusError::from_response(self))
        }
    }

    /// Classifies the response as done, pending with a polling hint, or
    /// failed.
    #[must_use]
    pub fn outcome(&self) -> ResponseOutcome {
        let Err(status) = self.check_status() else {
            return ResponseOutcome::Done;
        };
        match &self.response_header.result_status.polling_url {
            Some(polling) if !polling.url.is_empty() => ResponseOutcome::Pending {
                polling: polling.clone(),
                status,
            },
            _ => ResponseOutcome::Failed(status),
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::response_header::{ResponseHeader, ResultStatus, Status};

    fn response(status_type: &str, text: &str, polling: Option<PollingUrl>) -> Response {
        Response {
            response_header: ResponseHeader {
                result_status: ResultStatus {
                    status: Status {
                        status_type: status_type.to_owned(),
                        text: text.to_owned(),
                    },
                    polling_url: polling,
                    conditions: Vec::new(),
                },
                ..ResponseHeader::default()
            },
            ..Response::default()
        }
    }

    fn polling(url: &str) -> PollingUrl {
        PollingUrl {
            url: url.to_owned(),
            interval_ms: String::from("100"),
        }
    }

    #[test]
    fn done_passes() {
        assert_eq!(response("DONE", "", None).check_status(), Ok(()));
    }

    #[rstest]
    #[case::error("ERROR", "bad query")]
    #[case::pending("PENDING", "still running")]
    #[case::lowercase("done", "case matters")]
    #[case::empty_type("", "")]
    #[case::padded(" DONE", "whitespace matters")]
    fn non_done_reports_text_verbatim(#[case] status_type: &str, #[case] text: &str) {
        let error = response(status_type, text, None)
            .check_status()
            .expect_err("non-DONE status");
        assert_eq!(error.to_string(), text);
        assert_eq!(error.status_type(), status_type);
    }

    #[test]
    fn check_status_ignores_polling_hint() {
        let pending = response("PENDING", "queued", Some(polling("http://hive/poll")));
        assert!(pending.check_status().is_err());
    }

    #[test]
    fn check_status_is_repeatable() {
        let failed = response("ERROR", "bad query", None);
        let snapshot = failed.clone();
        assert_eq!(failed.check_status(), failed.check_status());
        assert_eq!(failed, snapshot);
    }

    #[rstest]
    #[case::done(response("DONE", "", Some(polling("http://hive/poll"))), "done")]
    #[case::pending(response("PENDING", "queued", Some(polling("http://hive/poll"))), "pending")]
    #[case::blank_polling(response("PENDING", "queued", Some(polling(""))), "failed")]
    #[case::no_polling(response("ERROR", "bad query", None), "failed")]
    fn classifies_outcomes(#[case] response: Response, #[case] expected: &str) {
        let actual = match response.outcome() {
            ResponseOutcome::Done => "done",
            ResponseOutcome::Pending { .. } => "pending",
            ResponseOutcome::Failed(_) => "failed",
        };
        assert_eq!(actual, expected);
    }

    #[test]
    fn failure_keeps_conditions() {
        let mut failed = response("ERROR", "bad query", None);
        failed.response_header.result_status.conditions.push(Condition {
            text: String::from("syntax error"),
            condition_type: String::from("ERROR"),
            coding_system: String::from("i2b2"),
        });
        let error = failed.check_status().expect_err("ERROR status");
        assert_eq!(error.conditions().len(), 1);
        assert!(error.conditions().iter().all(Condition::is_error));
    }
}
