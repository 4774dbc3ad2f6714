// ============================================================
// Layer 5 — Model Errors
// ============================================================

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ModelError {
    #[error("model '{model}' expects different input columns: {detail}")]
    FeatureMismatch { model: String, detail: String },

    #[error("tree {tree}, node {node}: {reason}")]
    MalformedTree { tree: usize, node: usize, reason: String },

    #[error("invalid survival curve: {0}")]
    InvalidCurve(String),

    #[error("time {t} is outside the survival function domain [{lo}, {hi}]")]
    OutOfDomain { t: f64, lo: f64, hi: f64 },

    #[error("input column '{column}' is not finite ({value})")]
    NonFiniteInput { column: &'static str, value: f64 },

    #[error("cannot ensemble zero models")]
    EmptyEnsemble,

    #[error("model '{0}' has no trees")]
    NoTrees(String),
}
