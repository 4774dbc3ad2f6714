// ============================================================
// Layer 3 — Threat Forecast
// ============================================================
// The result of one prediction: impact probabilities at four
// fixed horizons, per model and ensembled.
//
// An "impact probability" is 1 - S(t), where S is the model's
// survival function (probability the fire has NOT reached the
// evacuation zone by time t).

use serde::{Deserialize, Serialize};

/// Forecast horizons in hours.
pub const HORIZONS_HOURS: [f64; 4] = [12.0, 24.0, 48.0, 72.0];

/// Impact probability at each of HORIZONS_HOURS, each in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HorizonProbabilities(pub [f64; 4]);

impl HorizonProbabilities {
    /// Probabilities as percentages (0..=100).
    pub fn percentages(&self) -> [f64; 4] {
        self.0.map(|p| p * 100.0)
    }
}

/// One model's contribution to the forecast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelForecast {
    pub model:         String,
    pub probabilities: HorizonProbabilities,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThreatForecast {
    pub horizons_hours: [f64; 4],
    pub per_model:      Vec<ModelForecast>,
    pub ensemble:       HorizonProbabilities,
}

impl ThreatForecast {
    pub fn new(per_model: Vec<ModelForecast>, ensemble: HorizonProbabilities) -> Self {
        Self { horizons_hours: HORIZONS_HOURS, per_model, ensemble }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentages() {
        let pct = HorizonProbabilities([0.1, 0.25, 0.5, 0.755]).percentages();
        assert!((pct[0] - 10.0).abs() < 1e-9);
        assert!((pct[3] - 75.5).abs() < 1e-9);
    }

    #[test]
    fn test_new_uses_fixed_horizons() {
        let f = ThreatForecast::new(Vec::new(), HorizonProbabilities([0.0; 4]));
        assert_eq!(f.horizons_hours, HORIZONS_HOURS);
    }
}
