// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Plain Rust structs, enums, and traits that define what the
// tool works with:
//
//   telemetry — the six user-supplied fire signals
//   features  — the 16-column model input row
//   forecast  — impact probabilities at 12/24/48/72 hours
//   traits    — the ForecastRenderer seam
//   error     — typed input errors
//
// No file I/O and no model math lives here.
//
// Reference: Rust Book §5 (Structs), §10 (Traits)

pub mod error;

pub mod features;

pub mod forecast;

pub mod telemetry;

// Core abstractions (traits) that other layers implement
pub mod traits;
