// ============================================================
// Layer 5 — Survival Ensemble
// ============================================================
// Turns survival functions into impact probabilities and
// averages them across models:
//
//   for each model:
//     S = model.predict_survival_function(row)
//     p[h] = 1 - S(clip(h, S.domain))     for h in 12/24/48/72
//   ensemble[h] = mean over models of p[h]
//
// Horizons beyond a model's last event time are clipped to it,
// so a model fitted on shorter follow-up reports its last
// known value instead of failing.

use std::sync::Arc;

use crate::domain::{
    features::{FeatureRow, FEATURE_COLUMNS},
    forecast::{HorizonProbabilities, ModelForecast, HORIZONS_HOURS},
};
use crate::ml::{error::ModelError, model::SurvivalModel};

pub type SharedModel = Arc<dyn SurvivalModel + Send + Sync>;

/// Reject rows containing NaN or infinities before they reach a tree.
pub fn check_row(row: &FeatureRow) -> Result<(), ModelError> {
    match row.0.iter().position(|v| !v.is_finite()) {
        Some(i) => Err(ModelError::NonFiniteInput { column: FEATURE_COLUMNS[i], value: row.0[i] }),
        None    => Ok(()),
    }
}

/// P(impact by h) = 1 - S(h) at each horizon, each clamped into [0, 1].
pub fn impact_probabilities(
    model:    &dyn SurvivalModel,
    row:      &FeatureRow,
    horizons: &[f64; 4],
) -> Result<HorizonProbabilities, ModelError> {
    let sf = model.predict_survival_function(row)?;

    let mut probs = [0.0; 4];
    for (p, &h) in probs.iter_mut().zip(horizons) {
        let survival = sf.eval(sf.clip(h))?;
        *p = (1.0 - survival).clamp(0.0, 1.0);
    }
    Ok(HorizonProbabilities(probs))
}

/// Unweighted arithmetic mean per horizon.
pub fn ensemble_mean(members: &[HorizonProbabilities]) -> Result<HorizonProbabilities, ModelError> {
    if members.is_empty() {
        return Err(ModelError::EmptyEnsemble);
    }
    let n = members.len() as f64;
    let mut mean = [0.0; 4];
    for m in members {
        for (acc, p) in mean.iter_mut().zip(m.0) {
            *acc += p;
        }
    }
    Ok(HorizonProbabilities(mean.map(|s| s / n)))
}

/// A fixed set of models queried together.
#[derive(Clone)]
pub struct SurvivalEnsemble {
    members: Vec<SharedModel>,
}

impl SurvivalEnsemble {
    pub fn new(members: Vec<SharedModel>) -> Result<Self, ModelError> {
        if members.is_empty() {
            return Err(ModelError::EmptyEnsemble);
        }
        Ok(Self { members })
    }

    /// Per-model probabilities plus their mean, at HORIZONS_HOURS.
    pub fn predict(
        &self,
        row: &FeatureRow,
    ) -> Result<(Vec<ModelForecast>, HorizonProbabilities), ModelError> {
        check_row(row)?;

        let per_model = self
            .members
            .iter()
            .map(|m| {
                let probabilities = impact_probabilities(m.as_ref(), row, &HORIZONS_HOURS)?;
                tracing::debug!("{}: {:?}", m.name(), probabilities.0);
                Ok(ModelForecast { model: m.name().to_string(), probabilities })
            })
            .collect::<Result<Vec<_>, ModelError>>()?;

        let probs: Vec<HorizonProbabilities> = per_model.iter().map(|f| f.probabilities).collect();
        let ensemble = ensemble_mean(&probs)?;
        Ok((per_model, ensemble))
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::features::NUM_FEATURES;
    use crate::ml::step_function::StepFunction;

    /// Ignores the row and returns a fixed curve.
    struct FixedCurve {
        name:  &'static str,
        names: Vec<String>,
        x:     Vec<f64>,
        y:     Vec<f64>,
    }

    impl FixedCurve {
        fn new(name: &'static str, x: Vec<f64>, y: Vec<f64>) -> Self {
            Self { name, names: Vec::new(), x, y }
        }
    }

    impl SurvivalModel for FixedCurve {
        fn name(&self) -> &str {
            self.name
        }
        fn feature_names(&self) -> &[String] {
            &self.names
        }
        fn predict_survival_function(&self, _row: &FeatureRow) -> Result<StepFunction, ModelError> {
            StepFunction::new(self.x.clone(), self.y.clone())
        }
    }

    fn zero_row() -> FeatureRow {
        FeatureRow([0.0; NUM_FEATURES])
    }

    #[test]
    fn test_impact_is_complement_with_clipping() {
        // Domain ends at 48h, so the 72h horizon reads the 48h value
        let m = FixedCurve::new("a", vec![10.0, 24.0, 48.0], vec![0.9, 0.6, 0.3]);
        let p = impact_probabilities(&m, &zero_row(), &HORIZONS_HOURS).unwrap();
        let expected = [0.1, 0.4, 0.7, 0.7];
        for (got, want) in p.0.iter().zip(expected) {
            assert!((got - want).abs() < 1e-12, "{got} vs {want}");
        }
    }

    #[test]
    fn test_ensemble_is_arithmetic_mean() {
        let a = HorizonProbabilities([0.1, 0.2, 0.3, 0.4]);
        let b = HorizonProbabilities([0.3, 0.4, 0.5, 1.0]);
        let mean = ensemble_mean(&[a, b]).unwrap();
        for i in 0..4 {
            assert!((mean.0[i] - (a.0[i] + b.0[i]) / 2.0).abs() < 1e-12);
            assert!((0.0..=1.0).contains(&mean.0[i]));
        }
        assert_eq!(ensemble_mean(&[]), Err(ModelError::EmptyEnsemble));
    }

    #[test]
    fn test_ensemble_predict_end_to_end() {
        let a: SharedModel = Arc::new(FixedCurve::new("a", vec![12.0, 72.0], vec![0.8, 0.4]));
        let b: SharedModel = Arc::new(FixedCurve::new("b", vec![24.0, 96.0], vec![0.5, 0.1]));
        let ens = SurvivalEnsemble::new(vec![a, b]).unwrap();

        let (per_model, mean) = ens.predict(&zero_row()).unwrap();
        assert_eq!(per_model.len(), 2);
        assert_eq!(per_model[1].model, "b");

        // a: [0.2, 0.2, 0.2, 0.6]   b: [0.5, 0.5, 0.5, 0.5]
        // (12h sits before b's first event, so it reads b's first value)
        let expected = [0.35, 0.35, 0.35, 0.55];
        for (got, want) in mean.0.iter().zip(expected) {
            assert!((got - want).abs() < 1e-12, "{got} vs {want}");
        }
    }

    #[test]
    fn test_non_finite_row_rejected() {
        let a: SharedModel = Arc::new(FixedCurve::new("a", vec![12.0], vec![0.5]));
        let ens = SurvivalEnsemble::new(vec![a]).unwrap();
        let mut row = zero_row();
        row.0[13] = f64::INFINITY;
        let err = ens.predict(&row).unwrap_err();
        assert!(matches!(err, ModelError::NonFiniteInput { column: "eta_hours", .. }));
    }
}
