// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// Everything between the user's six numbers and the model row:
//
//   TelemetryInput (6 signals)
//       │
//       ▼
//   FeatureBaseline   → fills the 8 columns the user doesn't set
//       │
//       ▼
//   engineer_features → adds log1p area and 4 derived columns
//       │
//       ▼
//   FeatureRecord (16 columns) → FeatureRow for the models
//
// Reference: Rust Book §13 (Iterators and Closures)

/// Default / overridable values for non-user columns
pub mod baseline;

/// Derived-column formulas and record assembly
pub mod engineer;
