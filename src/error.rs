//! Error types for the decision engine and its host adapters.

use thiserror::Error;

/// Errors raised while reading host messages, configuration, or turn order.
///
/// Blocked placements and unaffordable requests are never errors: the board
/// skips them silently and the engine carries on.
#[derive(Debug, Error)]
pub enum RampartError {
    /// A host message parsed as JSON but did not have the expected shape.
    #[error("malformed {kind} message: {reason}")]
    MalformedMessage {
        /// Which message was being decoded (`config`, `turn`, `frame`).
        kind: &'static str,
        /// What was wrong with it.
        reason: String,
    },

    /// A unit shorthand or type code that the game config does not define.
    #[error("unknown unit type: {0}")]
    UnknownUnit(String),

    /// A turn snapshot arrived for a turn that was already handled.
    #[error("turn {received} arrived after turn {last} was already handled")]
    StaleTurn {
        /// Turn number carried by the snapshot.
        received: u32,
        /// Last turn the engine answered.
        last: u32,
    },

    /// The host sent state before the game config line.
    #[error("received {0} before the game config")]
    MissingConfig(&'static str),

    /// Strategy configuration file could not be parsed.
    #[error("invalid strategy config: {0}")]
    Config(#[from] toml::de::Error),

    /// JSON decoding failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Reading or writing the host channel failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl RampartError {
    /// Shorthand for a [`RampartError::MalformedMessage`].
    pub(crate) fn malformed(kind: &'static str, reason: impl Into<String>) -> Self {
        Self::MalformedMessage {
            kind,
            reason: reason.into(),
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, RampartError>;
