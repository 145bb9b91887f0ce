//! Scoring error types.
//!
//! Scoring itself never fails; errors come from the boundaries where the host
//! hands us data (ring stacks, tick frames, settings).

use std::fmt;

/// Top-level error enum for the scoring crate.
#[derive(Debug, Clone, PartialEq)]
pub enum ScoreError {
    /// A ring was pushed onto a stack that is already at capacity.
    StackFull {
        /// Maximum rings the holder carries.
        capacity: usize,
    },

    /// A host tick frame could not be decoded (bad JSON, unknown ring colour).
    Frame(String),

    /// A settings document could not be decoded.
    Settings(String),

    /// A settings value is outside its accepted range.
    InvalidSetting {
        /// Field name in `Settings`.
        name: &'static str,
        /// The value that was rejected.
        value: f32,
        /// Human-readable description of the accepted range.
        expected: &'static str,
    },

    /// An alliance name other than `red` or `blue`.
    UnknownAlliance(String),

    /// A stake index past the stakes in the last frame.
    UnknownStake(usize),
}

impl fmt::Display for ScoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoreError::StackFull { capacity } => {
                write!(f, "ring stack is full ({capacity} rings)")
            }
            ScoreError::Frame(msg) => write!(f, "invalid tick frame: {msg}"),
            ScoreError::Settings(msg) => write!(f, "invalid settings: {msg}"),
            ScoreError::InvalidSetting {
                name,
                value,
                expected,
            } => write!(f, "setting `{name}` = {value} out of range (expected {expected})"),
            ScoreError::UnknownAlliance(name) => {
                write!(f, "unknown alliance `{name}` (expected `red` or `blue`)")
            }
            ScoreError::UnknownStake(index) => write!(f, "no stake at index {index}"),
        }
    }
}

impl std::error::Error for ScoreError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(
            ScoreError::StackFull { capacity: 6 }.to_string(),
            "ring stack is full (6 rings)"
        );
        assert_eq!(
            ScoreError::UnknownAlliance("green".into()).to_string(),
            "unknown alliance `green` (expected `red` or `blue`)"
        );
        assert_eq!(ScoreError::UnknownStake(4).to_string(), "no stake at index 4");
        let err = ScoreError::InvalidSetting {
            name: "snapshot_epsilon",
            value: 0.0,
            expected: "> 0",
        };
        assert!(err.to_string().contains("snapshot_epsilon"));
    }
}
