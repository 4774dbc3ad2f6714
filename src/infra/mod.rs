// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Disk-facing concerns used by the layers above:
//
//   model_store.rs  — reads the two JSON model artifacts and
//                     caches them for the life of the process
//
//   forecast_log.rs — appends forecasts to a CSV file for
//                     later review
//
// Reference: Rust Book §7 (Modules)
//            Rust Book §9 (Error Handling with anyhow)

/// Model artifact loading and process-lifetime cache
pub mod model_store;

/// Forecast CSV logger
pub mod forecast_log;
