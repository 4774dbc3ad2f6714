// ============================================================
// Layer 5 — SurvivalModel Trait
// ============================================================
// The seam between the prediction workflow and the fitted
// models. The ensemble and the model store only talk to this
// trait, so RSF and GBSA can be swapped or extended without
// touching either.
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)
//            Rust Book §17 (Trait Objects)

use crate::domain::features::FeatureRow;
use crate::ml::{error::ModelError, step_function::StepFunction};

/// A fitted survival model.
///
/// Implementations:
///   - RandomSurvivalForest       → mean of leaf survival curves
///   - GradientBoostingSurvival   → Breslow baseline ^ exp(risk)
pub trait SurvivalModel {
    /// Short display name, e.g. "rsf"
    fn name(&self) -> &str;

    /// Column names the model was fitted on, in input order
    fn feature_names(&self) -> &[String];

    /// Predict S(t) for one row.
    fn predict_survival_function(&self, row: &FeatureRow) -> Result<StepFunction, ModelError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::features::{FEATURE_COLUMNS, NUM_FEATURES};
    use crate::infra::model_store::tests::{gbsa_json, rsf_json};
    use crate::ml::{boosting::GradientBoostingSurvival, forest::RandomSurvivalForest};

    #[test]
    fn test_both_models_behind_the_trait() {
        let rsf: RandomSurvivalForest      = serde_json::from_value(rsf_json()).unwrap();
        let gbsa: GradientBoostingSurvival = serde_json::from_value(gbsa_json()).unwrap();
        let models: [Box<dyn SurvivalModel>; 2] = [Box::new(rsf), Box::new(gbsa)];

        let row = FeatureRow([0.0; NUM_FEATURES]);
        for (m, name) in models.iter().zip(["rsf", "gbsa"]) {
            assert_eq!(m.name(), name);
            assert_eq!(m.feature_names(), FEATURE_COLUMNS);
            let sf = m.predict_survival_function(&row).unwrap();
            assert!(sf.values().iter().all(|s| (0.0..=1.0).contains(s)));
        }
    }
}
