use thiserror::Error;

use crate::section::SectionId;

/// Errors raised while building a spy from host-supplied configuration.
///
/// Nothing at runtime produces these: scroll and visibility handling
/// degrade silently instead.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{field} must be a finite number, got {value}")]
    InvalidNumber { field: &'static str, value: f64 },

    #[error("revealThreshold must lie in [0, 1], got {0}")]
    ThresholdOutOfRange(f64),

    #[error("section registry is empty")]
    EmptyRegistry,

    #[error("section '{0}' is registered more than once")]
    DuplicateSection(SectionId),

    #[error("section '{0}' has an empty anchor id")]
    EmptyAnchor(SectionId),

    #[error("anchor '{0}' is used by more than one section")]
    DuplicateAnchor(String),

    #[error("unknown section '{0}' (expected home, about, timeline, projects or contact)")]
    UnknownSection(String),

    #[error("invalid log level '{0}' (expected trace, debug, info, warn, error or off)")]
    InvalidLogLevel(String),
}
