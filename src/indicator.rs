//! Normalized health vocabulary and report records

use crate::errors::{Result, StatusError};
use serde::{Deserialize, Serialize};

/// Normalized health level shared by every upstream source.
///
/// Exactly four values are legal, ordered by severity. Any other token
/// reaching [`Color::parse`] indicates a parser bug upstream of it.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    /// Operational
    Green,
    /// Minor issue
    Yellow,
    /// Major issue
    Red,
    /// Unknown / indeterminate
    Black,
}

impl Color {
    /// Validate a color token into one of the four legal values
    pub fn parse(token: &str) -> Result<Color> {
        match token {
            "green" => Ok(Color::Green),
            "yellow" => Ok(Color::Yellow),
            "red" => Ok(Color::Red),
            "black" => Ok(Color::Black),
            other => Err(StatusError::InvalidColor(other.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Color::Green => "green",
            Color::Yellow => "yellow",
            Color::Red => "red",
            Color::Black => "black",
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Normalized status report for one service.
///
/// Produced exclusively by a source's parser and never mutated afterwards.
/// Two indicators are equal iff all five fields are equal by value.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Indicator {
    /// Unique short identifier, matches the source's key
    pub key: String,
    /// Human-readable name
    pub label: String,
    /// Normalized health level
    pub color: Color,
    /// Free-text status description, never empty-by-accident: sources
    /// default it when the upstream omits one
    pub message: String,
    /// The service's base URL, for display
    pub more_info_url: String,
}

impl Indicator {
    pub fn new(
        key: impl Into<String>,
        label: impl Into<String>,
        color: Color,
        message: impl Into<String>,
        more_info_url: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            color,
            message: message.into(),
            more_info_url: more_info_url.into(),
        }
    }
}
