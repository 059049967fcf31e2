//! Response header: result status, polling hint and conditions.

use std::time::Duration;

use xmltree::Element;

use crate::xml::{attribute, child_elements, own_text, push, set_attribute, text_element};

/// Condition types that describe a failure rather than a warning.
const ERROR_CONDITION_TYPES: [&str; 2] = ["ERROR", "FATAL_ERROR"];

/// Header attached by the hive to every response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseHeader {
    /// Informational link and text.
    pub info: Info,
    /// Outcome of the request.
    pub result_status: ResultStatus,
}

/// Informational URL/text pair.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Info {
    /// Informational URL, serialised as the `url` attribute.
    pub url: String,
    /// Informational text.
    pub text: String,
}

/// Outcome of a request as reported by the hive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultStatus {
    /// Status tag and explanation.
    pub status: Status,
    /// Present when the hive is still processing and the caller may poll.
    pub polling_url: Option<PollingUrl>,
    /// Warnings and errors attached to the result.
    pub conditions: Vec<Condition>,
}

/// Status type tag with its human-readable explanation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Status {
    /// Status type, serialised as the `type` attribute (`DONE` on success).
    pub status_type: String,
    /// Peer-supplied explanation.
    pub text: String,
}

/// Hint to re-check an asynchronous request later.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PollingUrl {
    /// URL to poll.
    pub url: String,
    /// Suggested polling interval in milliseconds, as sent by the hive.
    pub interval_ms: String,
}

impl PollingUrl {
    /// Suggested polling interval, when the hint is a valid millisecond count.
    #[must_use]
    pub fn interval(&self) -> Option<Duration> {
        self.interval_ms.trim().parse().ok().map(Duration::from_millis)
    }
}

/// Warning or error attached to a result.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Condition {
    /// Condition text.
    pub text: String,
    /// Condition type, e.g. `ERROR` or `WARNING`.
    pub condition_type: String,
    /// Coding system the condition belongs to.
    pub coding_system: String,
}

impl Condition {
    /// Whether the condition reports an error rather than a warning.
    #[must_use]
    pub fn is_error(&self) -> bool {
        ERROR_CONDITION_TYPES.contains(&self.condition_type.as_str())
    }
}

impl ResponseHeader {
    pub(crate) const TAG: &'static str = "response_header";

    pub(crate) fn to_element(&self) -> Element {
        let mut header = Element::new(Self::TAG);

        let mut info = text_element("info", &self.info.text);
        set_attribute(&mut info, "url", &self.info.url);
        push(&mut header, info);

        let result = &self.result_status;
        let mut result_status = Element::new("result_status");

        let mut status = text_element("status", &result.status.text);
        set_attribute(&mut status, "type", &result.status.status_type);
        push(&mut result_status, status);

        if let Some(polling) = &result.polling_url {
            let mut polling_url = text_element("polling_url", &polling.url);
            set_attribute(&mut polling_url, "interval_ms", &polling.interval_ms);
            push(&mut result_status, polling_url);
        }

        if !result.conditions.is_empty() {
            let mut conditions = Element::new("conditions");
            for condition in &result.conditions {
                let mut element = text_element("condition", &condition.text);
                set_attribute(&mut element, "type", &condition.condition_type);
                set_attribute(&mut element, "coding_system", &condition.coding_system);
                push(&mut conditions, element);
            }
            push(&mut result_status, conditions);
        }

        push(&mut header, result_status);
        header
    }

    pub(crate) fn from_element(header: &Element) -> Self {
        let info = header
            .get_child("info")
            .map(|info| Info {
                url: attribute(info, "url"),
                text: own_text(info),
            })
            .unwrap_or_default();

        let result_status = header
            .get_child("result_status")
            .map(ResultStatus::from_element)
            .unwrap_or_default();

        Self {
            info,
            result_status,
        }
    }
}

impl ResultStatus {
    fn from_element(result: &Element) -> Self {
        let status = result
            .get_child("status")
            .map(|status| Status {
                status_type: attribute(status, "type"),
                text: own_text(status),
            })
            .unwrap_or_default();

        let polling_url = result.get_child("polling_url").map(|polling| PollingUrl {
            url: own_text(polling),
            interval_ms: attribute(polling, "interval_ms"),
        });

        let conditions = result
            .get_child("conditions")
            .map(|conditions| {
                child_elements(conditions)
                    .filter(|element| element.name == "condition")
                    .map(|condition| Condition {
                        text: own_text(condition),
                        condition_type: attribute(condition, "type"),
                        coding_system: attribute(condition, "coding_system"),
                    })
                    .collect()
            })
            .unwrap_or_default();

        Self {
            status,
            polling_url,
            conditions,
        }
    }
}
