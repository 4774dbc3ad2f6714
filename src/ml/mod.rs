// ============================================================
// Layer 5 — ML / Model Layer
// ============================================================
// Native evaluation of the two fitted survival models.
// Nothing here trains anything; the fitted trees and curves
// arrive as JSON artifacts (see infra::model_store).
//
//   model.rs         — the SurvivalModel trait
//   step_function.rs — S(t) as a right-continuous step function
//   tree.rs          — flat-array decision trees + validation
//   forest.rs        — random survival forest (mean leaf curve)
//   boosting.rs      — Cox gradient boosting (Breslow baseline)
//   ensemble.rs      — 1 - S(t) at the horizons, averaged
//   error.rs         — typed ModelError
//
// Reference: Rust Book §10 (Traits), §17 (Trait Objects)

pub mod error;

// Core abstraction every fitted model implements
pub mod model;

pub mod step_function;

pub mod tree;

/// Random survival forest
pub mod forest;

/// Gradient boosted survival analysis, Cox loss
pub mod boosting;

/// Horizon probabilities and model averaging
pub mod ensemble;
