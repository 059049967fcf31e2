//! Log output formats selectable through `log_format`.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Output format of the data source's structured logs.
///
/// Parsed case-insensitively, so `JSON` and `json` both select
/// [`LogFormat::Json`].
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum LogFormat {
    /// One JSON object per event, with fields flattened.
    #[default]
    Json,
    /// Compact single-line text for terminals.
    Compact,
}

/// Error returned when a log format name is not recognised.
pub type LogFormatParseError = strum::ParseError;
