use std::fmt;

use crate::types::DurationUnit;

/// A command builder was given a value the game would reject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// Selector arguments only apply to `@` variables, not player names.
    ClauseOnPlayerName { player: String, clause: String },
    ObjectiveTooLong(String),
    InvalidObjectiveChar { objective: String, found: char },
    MixedDurationUnits(DurationUnit, DurationUnit),
    /// A text component could not be serialized.
    Json(String),
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ClauseOnPlayerName { player, clause } => write!(
                f,
                "cannot add clause `{clause}` to the player name selector `{player}`"
            ),
            Self::ObjectiveTooLong(objective) => write!(
                f,
                "objective name `{objective}` must be 16 characters or less"
            ),
            Self::InvalidObjectiveChar { objective, found } => write!(
                f,
                "objective name `{objective}` contains {found:?}; only letters, numbers and \
                 underscores are allowed"
            ),
            Self::MixedDurationUnits(a, b) => write!(
                f,
                "cannot add durations with different units: {a} and {b}"
            ),
            Self::Json(msg) => write!(f, "failed to serialize text component: {msg}"),
        }
    }
}

impl std::error::Error for CommandError {}

impl From<serde_json::Error> for CommandError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}
