// ============================================================
// Layer 3 — Domain Errors
// ============================================================
// Typed errors for bad user input. The application layer wraps
// these in anyhow::Error with extra context; the interactive
// session prints them and keeps going.

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum InputError {
    #[error("{key} must be a finite number, got {value}")]
    NonFinite { key: &'static str, value: f64 },

    #[error("unknown input '{0}' (expected one of: distance, area, growth-rate, closing-speed, alignment, centroid-speed)")]
    UnknownKey(String),

    #[error("cannot parse '{raw}' as a number for {key}")]
    NotANumber { key: String, raw: String },

    #[error("expected key=value, got '{0}'")]
    MalformedPair(String),
}
