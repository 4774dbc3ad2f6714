// ============================================================
// Layer 5 — Random Survival Forest
// ============================================================
// Each tree's leaves store a survival curve sampled at the
// forest's shared event times. Predicting for one row:
//
//   1. Route the row down every tree to its leaf
//   2. Average the leaf curves elementwise
//   3. Wrap the mean curve in a StepFunction over event_times
//
// The artifact is validated once when it is deserialised
// (via #[serde(try_from)]), so prediction never has to re-check
// tree structure.
//
// Reference: Ishwaran et al. (2008) Random Survival Forests

use serde::Deserialize;

use crate::domain::features::FeatureRow;
use crate::ml::{
    error::ModelError,
    model::SurvivalModel,
    step_function::StepFunction,
    tree::{check_feature_names, DecisionTree},
};

/// On-disk form, checked by TryFrom before use.
#[derive(Debug, Deserialize)]
pub struct ForestArtifact {
    pub feature_names: Vec<String>,
    pub event_times:   Vec<f64>,
    pub trees:         Vec<DecisionTree>,
    #[serde(default)]
    pub domain:        Option<(f64, f64)>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(try_from = "ForestArtifact")]
pub struct RandomSurvivalForest {
    feature_names: Vec<String>,
    event_times:   Vec<f64>,
    trees:         Vec<DecisionTree>,
    domain:        Option<(f64, f64)>,
}

impl TryFrom<ForestArtifact> for RandomSurvivalForest {
    type Error = ModelError;

    fn try_from(a: ForestArtifact) -> Result<Self, Self::Error> {
        Self::new(a.feature_names, a.event_times, a.trees, a.domain)
    }
}

impl RandomSurvivalForest {
    pub const NAME: &'static str = "rsf";

    pub fn new(
        feature_names: Vec<String>,
        event_times:   Vec<f64>,
        trees:         Vec<DecisionTree>,
        domain:        Option<(f64, f64)>,
    ) -> Result<Self, ModelError> {
        check_feature_names(Self::NAME, &feature_names)?;
        if trees.is_empty() {
            return Err(ModelError::NoTrees(Self::NAME.into()));
        }

        // Build a throwaway curve to validate event times and domain
        let grid = StepFunction::new(event_times.clone(), vec![1.0; event_times.len()])?;
        if let Some((lo, hi)) = domain {
            grid.with_domain(lo, hi)?;
        }

        let n_times = event_times.len();
        for (i, tree) in trees.iter().enumerate() {
            tree.validate(i, |leaf| {
                if leaf.len() != n_times {
                    return Err(format!("leaf has {} values, expected {n_times}", leaf.len()));
                }
                if leaf.iter().any(|s| !(0.0..=1.0).contains(s)) {
                    return Err("leaf survival value outside [0, 1]".into());
                }
                Ok(())
            })?;
        }

        Ok(Self { feature_names, event_times, trees, domain })
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    pub fn event_times(&self) -> &[f64] {
        &self.event_times
    }

    /// Domain of every predicted survival function.
    pub fn domain(&self) -> (f64, f64) {
        self.domain.unwrap_or_else(|| {
            let last = self.event_times[self.event_times.len() - 1];
            (self.event_times[0].min(0.0), last)
        })
    }
}

impl SurvivalModel for RandomSurvivalForest {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    fn predict_survival_function(&self, row: &FeatureRow) -> Result<StepFunction, ModelError> {
        let mut mean = vec![0.0; self.event_times.len()];
        for tree in &self.trees {
            for (acc, s) in mean.iter_mut().zip(tree.leaf_for(row)) {
                *acc += s;
            }
        }
        let n = self.trees.len() as f64;
        mean.iter_mut().for_each(|s| *s /= n);

        let f = StepFunction::new(self.event_times.clone(), mean)?;
        match self.domain {
            Some((lo, hi)) => f.with_domain(lo, hi),
            None           => Ok(f),
        }
    }
}
