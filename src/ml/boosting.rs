// ============================================================
// Layer 5 — Gradient Boosted Survival Model (Cox loss)
// ============================================================
// Boosted regression trees fitted on the Cox partial likelihood.
// The trees sum to a log-risk score, and the survival curve comes
// from the Breslow baseline estimated at fit time:
//
//   r(x)     = init_score + learning_rate * Σ tree_k(x)
//   S(t | x) = S0(t) ^ exp(r(x))
//
// Higher risk → the baseline curve is raised to a larger power
// → survival drops faster.
//
// Reference: Ridgeway (1999) The state of boosting
//            Breslow (1972) baseline hazard estimator

use serde::Deserialize;

use crate::domain::features::FeatureRow;
use crate::ml::{
    error::ModelError,
    model::SurvivalModel,
    step_function::StepFunction,
    tree::{check_feature_names, DecisionTree},
};

/// Breslow baseline survival S0(t).
#[derive(Debug, Clone, Deserialize)]
pub struct BaselineSurvival {
    pub times:    Vec<f64>,
    pub survival: Vec<f64>,
}

#[derive(Debug, Deserialize)]
pub struct BoostingArtifact {
    pub feature_names: Vec<String>,
    pub learning_rate: f64,
    #[serde(default)]
    pub init_score:    f64,
    pub trees:         Vec<DecisionTree>,
    pub baseline:      BaselineSurvival,
    #[serde(default)]
    pub domain:        Option<(f64, f64)>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(try_from = "BoostingArtifact")]
pub struct GradientBoostingSurvival {
    feature_names: Vec<String>,
    learning_rate: f64,
    init_score:    f64,
    trees:         Vec<DecisionTree>,
    baseline:      StepFunction,
}

impl TryFrom<BoostingArtifact> for GradientBoostingSurvival {
    type Error = ModelError;

    fn try_from(a: BoostingArtifact) -> Result<Self, Self::Error> {
        check_feature_names(Self::NAME, &a.feature_names)?;
        if !a.learning_rate.is_finite() || !a.init_score.is_finite() {
            return Err(ModelError::InvalidCurve("learning_rate and init_score must be finite".into()));
        }
        if a.baseline.survival.iter().any(|s| !(0.0..=1.0).contains(s)) {
            return Err(ModelError::InvalidCurve("baseline survival outside [0, 1]".into()));
        }

        let mut baseline = StepFunction::new(a.baseline.times, a.baseline.survival)?;
        if let Some((lo, hi)) = a.domain {
            baseline = baseline.with_domain(lo, hi)?;
        }

        Self::new(a.feature_names, a.learning_rate, a.init_score, a.trees, baseline)
    }
}

impl GradientBoostingSurvival {
    pub const NAME: &'static str = "gbsa";

    pub fn new(
        feature_names: Vec<String>,
        learning_rate: f64,
        init_score:    f64,
        trees:         Vec<DecisionTree>,
        baseline:      StepFunction,
    ) -> Result<Self, ModelError> {
        check_feature_names(Self::NAME, &feature_names)?;
        if trees.is_empty() {
            return Err(ModelError::NoTrees(Self::NAME.into()));
        }
        for (i, tree) in trees.iter().enumerate() {
            tree.validate(i, |leaf| match leaf {
                [v] if v.is_finite() => Ok(()),
                [_] => Err("leaf value is not finite".into()),
                _   => Err(format!("leaf has {} values, expected 1", leaf.len())),
            })?;
        }
        Ok(Self { feature_names, learning_rate, init_score, trees, baseline })
    }

    /// Log-risk score r(x).
    pub fn risk_score(&self, row: &FeatureRow) -> f64 {
        let sum: f64 = self.trees.iter().map(|t| t.leaf_for(row)[0]).sum();
        self.init_score + self.learning_rate * sum
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    pub fn baseline(&self) -> &StepFunction {
        &self.baseline
    }
}

impl SurvivalModel for GradientBoostingSurvival {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    fn predict_survival_function(&self, row: &FeatureRow) -> Result<StepFunction, ModelError> {
        let risk = self.risk_score(row);
        let hazard_ratio = risk.exp();
        tracing::trace!("gbsa risk={risk:.4} hazard_ratio={hazard_ratio:.4}");

        let survival = self.baseline.values().iter().map(|s0| s0.powf(hazard_ratio)).collect();
        let (lo, hi) = self.baseline.domain();
        StepFunction::new(self.baseline.times().to_vec(), survival)?.with_domain(lo, hi)
    }
}
